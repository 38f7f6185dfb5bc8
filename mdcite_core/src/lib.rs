//! `mdcite_core` is the core library for [mdcite](https://github.com/ifiokjr/mdcite). It turns short inline citations such as `{{Smith 2004, p. 23}}` in markdown into numbered footnotes that link to a generated bibliography, with every citation of the same source sharing one footnote number and one bibliography row.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Bibliography source ({{cite book | title = ... | author = ...}})
//!   → Source parser (logos tokens → BibliographyEntry records)
//!   → Formatter (one HTML citation per entry, computed once)
//!   → Registry (matches a reference against the cited entries, then the whole pool)
//!   → Citation record (footnote number, occurrence ids, page references)
//!   → Renderer (inline footnote markup and the bibliography list)
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading from `mdcite.toml` and bibliography path resolution.
//! - [`document`] - Finding `{{ ... }}` markers in markdown, skipping code and raw HTML, and rendering whole documents.
//!
//! ## Key Types
//!
//! - [`BibliographyEntry`] - One parsed bibliography record.
//! - [`Bibliography`] - The immutable pool of every known entry, shareable between passes.
//! - [`BibliographySource`] - Where a registry loads its pool from (file, text, or an already loaded pool).
//! - [`CitationRegistry`] - Per-document state that assigns footnote numbers in order of first use.
//! - [`CitationRecord`] - A cited entry with its footnote number and every occurrence.
//! - [`FootnoteMarker`] and [`BibliographyList`] - Structured rendered output with `to_html` methods.
//! - [`CiteError`] - Every failure, as a `miette` diagnostic.
//!
//! ## Matching
//!
//! A reference matches an entry when it is the entry's exact title, or when it has the shape `Authors Year[, pages]`, every author word appears in the entry's authors, and the year is part of the entry's date. Entries that have already been cited are searched first. Otherwise exactly one entry of the bibliography must match, or resolution fails with [`CiteError::UnknownReference`] or [`CiteError::AmbiguousReference`].
//!
//! ## Quick Start
//!
//! ```rust
//! use mdcite_core::BibliographySource;
//! use mdcite_core::CitationRegistry;
//! use mdcite_core::document::render_markdown;
//!
//! let bibliography = "{{cite book | title = Foo | author = Mary Smith | date = 2004}}";
//! let mut registry = CitationRegistry::new(BibliographySource::Text(bibliography.into()));
//!
//! let output = render_markdown(
//! 	"As shown before {{Mary 2004, p. 23}}.\n\n{{bibliography}}\n",
//! 	&mut registry,
//! )
//! .unwrap();
//!
//! assert!(output.contains(r##"<a href="#ref1">1</a>"##));
//! assert!(output.contains(r#"<li id="ref1" value="1">"#));
//! ```

pub use citation::*;
pub use config::*;
pub use entry::*;
pub use error::*;
pub use format::*;
pub use matcher::*;
pub use position::*;
pub use reference::*;
pub use registry::*;
pub use render::*;
pub use source::*;

mod citation;
pub mod config;
pub mod document;
mod entry;
#[allow(unused_assignments)]
mod error;
mod format;
mod matcher;
mod position;
mod reference;
mod registry;
mod render;
mod source;

#[cfg(test)]
mod __fixtures;
