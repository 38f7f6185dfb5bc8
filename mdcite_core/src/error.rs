use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum CiteError {
	#[error(transparent)]
	#[diagnostic(code(mdcite::io_error))]
	Io(#[from] std::io::Error),

	#[error("failure to load markdown: {0}")]
	#[diagnostic(code(mdcite::markdown))]
	Markdown(String),

	#[error("unknown reference: `{reference}`")]
	#[diagnostic(
		code(mdcite::unknown_reference),
		help(
			"cite an entry by its exact title or as `Author Year[, pages]`, and check that the \
			 entry exists in the bibliography"
		)
	)]
	UnknownReference { reference: String },

	#[error("ambiguous reference: `{reference}` matches {} entries: {}", .candidates.len(), .candidates.join("; "))]
	#[diagnostic(
		code(mdcite::ambiguous_reference),
		help("add more author names or a more specific year to the citation, or cite the exact title")
	)]
	AmbiguousReference {
		reference: String,
		candidates: Vec<String>,
	},

	#[error("bibliography record {record} (line {line}) has no `title` field")]
	#[diagnostic(
		code(mdcite::missing_title),
		help("every record needs a non-empty `| title = ...` field")
	)]
	MissingTitle { record: usize, line: usize },

	#[error("bibliography record {record} (line {line}) has a malformed field: `{field}`")]
	#[diagnostic(
		code(mdcite::malformed_field),
		help("fields are written as `| key = value`")
	)]
	MalformedField {
		record: usize,
		line: usize,
		field: String,
	},

	#[error("bibliography record starting at line {line} is never closed")]
	#[diagnostic(
		code(mdcite::unterminated_record),
		help("close the record with `}}}}`")
	)]
	UnterminatedRecord { line: usize },

	#[error("no bibliography configured")]
	#[diagnostic(
		code(mdcite::missing_bibliography),
		help(
			"pass `--bibliography <file>`, set `bibliography` in mdcite.toml, or set the \
			 BIBLIOGRAPHY environment variable"
		)
	)]
	MissingBibliography,

	#[error("failed to load bibliography `{path}`: {reason}")]
	#[diagnostic(code(mdcite::bibliography_file))]
	BibliographyFile { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdcite::config_parse),
		help("check that mdcite.toml is valid TOML with a `bibliography` key and/or an [output] section")
	)]
	ConfigParse(String),

	#[error("citation at line {line}, column {column} could not be rendered")]
	#[diagnostic(code(mdcite::citation))]
	Citation {
		line: usize,
		column: usize,
		#[source]
		source: Box<CiteError>,
	},
}

impl CiteError {
	/// Unwraps positional context and returns the error that caused it.
	pub fn root_cause(&self) -> &CiteError {
		match self {
			Self::Citation { source, .. } => source.root_cause(),
			_ => self,
		}
	}
}

pub type CiteResult<T> = Result<T, CiteError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
