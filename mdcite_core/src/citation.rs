use std::sync::Arc;

use serde::Serialize;

use crate::KnownEntry;
use crate::extract_page_suffix;
use crate::format::escape_text;

/// The result of citing an entry once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationUse {
	/// The footnote number shared by every use of the entry.
	pub footnote_number: usize,
	/// The formatted citation, with the page reference appended when the
	/// reference had one.
	pub html: String,
	/// Element id of this particular use, e.g. `ref1-0`.
	pub occurrence_id: String,
	/// Element id of the entry in the bibliography listing, e.g. `ref1`.
	pub bibliography_id: String,
}

/// One row of the bibliography listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibliographyItem {
	pub footnote_number: usize,
	pub bibliography_id: String,
	/// Ids of every use of the entry, in the order they were cited.
	pub occurrence_ids: Vec<String>,
	/// The formatted citation, without page references.
	pub html: String,
}

/// A single recorded use of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
	pub id: String,
	pub pages: Option<String>,
}

/// A bibliography entry that has been cited in the current document pass.
///
/// The footnote number is assigned exactly once, before the first use is
/// recorded. Assigning twice or recording a use without a number is a bug in
/// the caller and panics.
#[derive(Debug, Clone)]
pub struct CitationRecord {
	entry: Arc<KnownEntry>,
	footnote_number: Option<usize>,
	bibliography_id: Option<String>,
	occurrences: Vec<Occurrence>,
}

impl CitationRecord {
	pub fn new(entry: Arc<KnownEntry>) -> Self {
		Self {
			entry,
			footnote_number: None,
			bibliography_id: None,
			occurrences: Vec::new(),
		}
	}

	pub fn entry(&self) -> &KnownEntry {
		&self.entry
	}

	pub fn footnote_number(&self) -> Option<usize> {
		self.footnote_number
	}

	pub fn bibliography_id(&self) -> Option<&str> {
		self.bibliography_id.as_deref()
	}

	pub fn occurrences(&self) -> &[Occurrence] {
		&self.occurrences
	}

	/// Give the record its footnote number and bibliography id
	/// (`ref<number>`).
	///
	/// # Panics
	///
	/// Panics if the record already has a footnote number.
	pub fn assign_footnote_number(&mut self, number: usize) {
		assert!(
			self.footnote_number.is_none(),
			"footnote number already assigned to `{}`",
			self.entry.entry().title()
		);

		self.footnote_number = Some(number);
		self.bibliography_id = Some(format!("ref{number}"));
	}

	/// Record another use of the entry by `reference` and return what the
	/// inline footnote needs.
	///
	/// # Panics
	///
	/// Panics if no footnote number has been assigned yet.
	pub fn record_use(&mut self, reference: &str) -> CitationUse {
		let (footnote_number, bibliography_id) = self.assigned("record a use of");
		let occurrence_id = format!("{bibliography_id}-{}", self.occurrences.len());
		let pages = extract_page_suffix(reference);

		let html = match pages {
			Some(pages) => format!("{} {}.", self.entry.html(), escape_text(pages)),
			None => self.entry.html().to_string(),
		};

		self.occurrences.push(Occurrence {
			id: occurrence_id.clone(),
			pages: pages.map(ToString::to_string),
		});

		CitationUse {
			footnote_number,
			html,
			occurrence_id,
			bibliography_id,
		}
	}

	/// The record as a row of the bibliography listing.
	///
	/// # Panics
	///
	/// Panics if no footnote number has been assigned yet.
	pub fn bibliography_entry(&self) -> BibliographyItem {
		let (footnote_number, bibliography_id) = self.assigned("list");

		BibliographyItem {
			footnote_number,
			bibliography_id,
			occurrence_ids: self.occurrences.iter().map(|o| o.id.clone()).collect(),
			html: self.entry.html().to_string(),
		}
	}

	fn assigned(&self, action: &str) -> (usize, String) {
		match (self.footnote_number, &self.bibliography_id) {
			(Some(number), Some(id)) => (number, id.clone()),
			_ => {
				panic!(
					"cannot {action} `{}` before a footnote number is assigned",
					self.entry.entry().title()
				)
			}
		}
	}
}
