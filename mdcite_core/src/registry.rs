use std::sync::Arc;

use crate::Bibliography;
use crate::BibliographyItem;
use crate::BibliographySource;
use crate::CitationRecord;
use crate::CitationUse;
use crate::CiteError;
use crate::CiteResult;
use crate::KnownEntry;

/// Citation state for a single document pass.
///
/// The registry resolves reference strings to bibliography entries and hands
/// out footnote numbers `1, 2, 3, ...` in the order entries are first cited.
/// Every later citation of an entry reuses its number and adds another
/// occurrence.
///
/// The bibliography is loaded from its [`BibliographySource`] the first time
/// a reference is not found among the entries already cited, and the loaded
/// pool is kept for the life of the registry, including across
/// [`reset`](Self::reset).
///
/// ```rust
/// use mdcite_core::BibliographySource;
/// use mdcite_core::CitationRegistry;
///
/// let source = "{{cite book | title = Foo | author = Mary Smith | date = 2004}}";
/// let mut registry = CitationRegistry::new(BibliographySource::Text(source.into()));
///
/// let first = registry.resolve("Mary 2004, p. 23").unwrap();
/// assert_eq!(first.footnote_number, 1);
/// assert!(first.html.ends_with(" p. 23."));
///
/// let second = registry.resolve("Foo").unwrap();
/// assert_eq!(second.footnote_number, 1);
/// assert_eq!(second.occurrence_id, "ref1-1");
/// ```
#[derive(Debug)]
pub struct CitationRegistry {
	source: BibliographySource,
	known: Option<Arc<Bibliography>>,
	used: Vec<CitationRecord>,
	next_footnote_number: usize,
}

impl CitationRegistry {
	pub fn new(source: BibliographySource) -> Self {
		Self {
			source,
			known: None,
			used: Vec::new(),
			next_footnote_number: 1,
		}
	}

	/// Start a new document pass. Cited entries and footnote numbers are
	/// discarded, the loaded bibliography is kept.
	pub fn reset(&mut self) {
		self.used.clear();
		self.next_footnote_number = 1;
	}

	/// Resolve `reference` to an entry and record the use.
	///
	/// Entries already cited in this pass are searched first. Only when none
	/// of them matches is the full bibliography consulted, and then exactly
	/// one entry must match: none is [`CiteError::UnknownReference`], several
	/// is [`CiteError::AmbiguousReference`]. No footnote number is allocated
	/// when resolution fails.
	#[tracing::instrument(level = "trace", skip(self))]
	pub fn resolve(&mut self, reference: &str) -> CiteResult<CitationUse> {
		let used = self.used.iter().map(CitationRecord::entry);
		if let Some(index) = find_unique(reference, used)? {
			let record = &mut self.used[index];
			tracing::trace!(
				footnote = record.footnote_number(),
				uses = record.occurrences().len() + 1,
				"repeated citation"
			);
			return Ok(record.record_use(reference));
		}

		let known = self.known_entries()?;
		let Some(index) = find_unique(reference, known.iter().map(|entry| &**entry))? else {
			return Err(CiteError::UnknownReference {
				reference: reference.to_string(),
			});
		};

		let mut record = CitationRecord::new(Arc::clone(&known[index]));
		let number = self.next_footnote_number;
		record.assign_footnote_number(number);
		self.next_footnote_number += 1;
		tracing::debug!(
			footnote = number,
			title = record.entry().entry().title(),
			"new citation"
		);

		let position = self.used.len();
		self.used.push(record);
		Ok(self.used[position].record_use(reference))
	}

	/// The entries cited so far, in order of first use.
	pub fn bibliography_listing(&self) -> Vec<BibliographyItem> {
		self.used
			.iter()
			.map(CitationRecord::bibliography_entry)
			.collect()
	}

	/// The records cited so far, in order of first use.
	pub fn used(&self) -> &[CitationRecord] {
		&self.used
	}

	/// The full bibliography, loading it if this is the first request.
	pub fn known_entries(&mut self) -> CiteResult<Arc<Bibliography>> {
		if let Some(known) = &self.known {
			return Ok(Arc::clone(known));
		}

		let known = self.source.load()?;
		self.known = Some(Arc::clone(&known));
		Ok(known)
	}
}

/// Index of the only entry matching `reference`, `None` when nothing
/// matches, or an error naming every match when there are several.
fn find_unique<'a>(
	reference: &str,
	entries: impl Iterator<Item = &'a KnownEntry>,
) -> CiteResult<Option<usize>> {
	let matching: Vec<(usize, &KnownEntry)> = entries
		.enumerate()
		.filter(|(_, entry)| entry.matches(reference))
		.collect();

	match matching.as_slice() {
		[] => Ok(None),
		[(index, _)] => Ok(Some(*index)),
		_ => {
			Err(CiteError::AmbiguousReference {
				reference: reference.to_string(),
				candidates: matching
					.iter()
					.map(|(_, entry)| entry.entry().title().to_string())
					.collect(),
			})
		}
	}
}
