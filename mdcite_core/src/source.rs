use std::fmt::Display;
use std::ops::Range;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use derive_more::Deref;
use logos::Logos;

use crate::BibliographyEntry;
use crate::CiteError;
use crate::CiteResult;
use crate::Point;
use crate::format_entry;
use crate::matcher::matches_parts;

/// Raw tokens of a bibliography source. Everything that is not a record
/// delimiter or a field separator is text.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum SourceToken {
	#[token("{{")]
	RecordOpen,
	#[token("}}")]
	RecordClose,
	#[token("|")]
	Pipe,
	#[regex(r"[{}]")]
	Brace,
	#[regex(r"[^{}|]+")]
	Text,
}

/// A record whose closing `}}` has not been reached yet.
struct PendingRecord {
	/// Byte offset of the opening `{{`.
	open: usize,
	/// Spans of the `|` separators seen inside the record.
	separators: Vec<Range<usize>>,
}

impl PendingRecord {
	fn new(open: Range<usize>) -> Self {
		Self {
			open: open.start,
			separators: vec![],
		}
	}

	/// Split the record body into segments and build the entry. `close` is the
	/// offset of the closing `}}` and `index` the 1-based record number.
	fn finish(self, source: &str, close: usize, index: usize) -> CiteResult<BibliographyEntry> {
		let body_start = self.open + 2;
		let starts = std::iter::once(body_start).chain(self.separators.iter().map(|span| span.end));
		let ends = self
			.separators
			.iter()
			.map(|span| span.start)
			.chain(std::iter::once(close));
		let mut segments = starts.zip(ends).map(|(start, end)| (start, &source[start..end]));

		let macro_name = segments.next().map_or("", |(_, text)| text);
		let mut fields = Vec::new();

		for (start, segment) in segments {
			let trimmed = segment.trim();
			if trimmed.is_empty() {
				continue;
			}

			let Some((key, value)) = trimmed.split_once('=') else {
				let offset = start + (segment.len() - segment.trim_start().len());
				return Err(CiteError::MalformedField {
					record: index,
					line: Point::from_offset(source, offset).line,
					field: trimmed.to_string(),
				});
			};

			fields.push((key, value));
		}

		BibliographyEntry::new(macro_name, fields).ok_or_else(|| CiteError::MissingTitle {
			record: index,
			line: Point::from_offset(source, self.open).line,
		})
	}
}

/// Parse every `{{ macro | key = value | ... }}` record in `source`, in
/// source order.
///
/// Text between records is ignored. Keys are trimmed and lower-cased, values
/// are trimmed and may themselves contain `=`. A record without a title, a
/// field without `=`, or a record that is never closed is an error.
///
/// ```rust
/// use mdcite_core::parse_bibliography;
///
/// let entries = parse_bibliography(
/// 	"{{cite journal | Title = Foo | author = Mary Smith | url = http://x.org/?a=b}}",
/// )
/// .unwrap();
///
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].macro_name(), "cite journal");
/// assert_eq!(entries[0].title(), "Foo");
/// assert_eq!(entries[0].url(), Some("http://x.org/?a=b"));
/// ```
pub fn parse_bibliography(source: &str) -> CiteResult<Vec<BibliographyEntry>> {
	let mut entries = Vec::new();
	let mut pending: Option<PendingRecord> = None;

	for (token, span) in SourceToken::lexer(source).spanned() {
		match token {
			Ok(SourceToken::RecordOpen) if pending.is_none() => {
				pending = Some(PendingRecord::new(span));
			}
			Ok(SourceToken::Pipe) => {
				if let Some(record) = pending.as_mut() {
					record.separators.push(span);
				}
			}
			Ok(SourceToken::RecordClose) => {
				if let Some(record) = pending.take() {
					let index = entries.len() + 1;
					entries.push(record.finish(source, span.start, index)?);
				}
			}
			_ => {}
		}
	}

	if let Some(record) = pending {
		return Err(CiteError::UnterminatedRecord {
			line: Point::from_offset(source, record.open).line,
		});
	}

	Ok(entries)
}

/// A bibliography entry prepared for matching and rendering.
///
/// The combined authors string and the formatted HTML are computed once when
/// the pool is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownEntry {
	entry: BibliographyEntry,
	authors: String,
	html: String,
}

impl KnownEntry {
	pub fn new(entry: BibliographyEntry) -> Self {
		let authors = entry.authors();
		let html = format_entry(&entry);

		Self {
			entry,
			authors,
			html,
		}
	}

	pub fn entry(&self) -> &BibliographyEntry {
		&self.entry
	}

	/// The combined authors string used for matching.
	pub fn authors(&self) -> &str {
		&self.authors
	}

	/// The formatted citation, without any page reference.
	pub fn html(&self) -> &str {
		&self.html
	}

	/// Whether `reference` cites this entry. See [`crate::matches`].
	pub fn matches(&self, reference: &str) -> bool {
		matches_parts(
			reference,
			self.entry.title(),
			&self.authors,
			self.entry.date(),
		)
	}
}

/// The pool of every known entry, in source order.
///
/// A loaded pool is immutable, so it can be shared between document passes
/// behind an [`Arc`].
#[derive(Debug, Clone, Default, Deref)]
pub struct Bibliography {
	entries: Vec<Arc<KnownEntry>>,
}

impl Bibliography {
	pub fn new(entries: impl IntoIterator<Item = BibliographyEntry>) -> Self {
		Self {
			entries: entries
				.into_iter()
				.map(|entry| Arc::new(KnownEntry::new(entry)))
				.collect(),
		}
	}

	/// Parse a bibliography source text into a pool.
	pub fn parse(source: &str) -> CiteResult<Self> {
		Ok(Self::new(parse_bibliography(source)?))
	}

	/// Read and parse the bibliography file at `path`.
	pub fn load(path: &Path) -> CiteResult<Self> {
		let content = std::fs::read_to_string(path).map_err(|e| {
			CiteError::BibliographyFile {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		Self::parse(&content)
	}
}

/// Where a registry gets its bibliography from.
///
/// The source is loaded at most once per registry, on the first reference
/// that is not already in use.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum BibliographySource {
	/// A bibliography file on disk.
	File(PathBuf),
	/// Bibliography source text held in memory.
	Text(String),
	/// A pool that has already been loaded, shared read-only.
	Loaded(Arc<Bibliography>),
}

impl BibliographySource {
	/// Load the pool described by this source.
	pub fn load(&self) -> CiteResult<Arc<Bibliography>> {
		let bibliography = match self {
			Self::File(path) => Arc::new(Bibliography::load(path)?),
			Self::Text(text) => Arc::new(Bibliography::parse(text)?),
			Self::Loaded(bibliography) => return Ok(Arc::clone(bibliography)),
		};

		tracing::debug!(source = %self, entries = bibliography.len(), "loaded bibliography");

		Ok(bibliography)
	}
}

impl From<Bibliography> for BibliographySource {
	fn from(bibliography: Bibliography) -> Self {
		Self::Loaded(Arc::new(bibliography))
	}
}

impl Display for BibliographySource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::File(path) => write!(f, "{}", path.display()),
			Self::Text(_) => write!(f, "<inline>"),
			Self::Loaded(bibliography) => write!(f, "<preloaded: {} entries>", bibliography.len()),
		}
	}
}
