use html_escape::encode_double_quoted_attribute;
use html_escape::encode_text;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;

use crate::BibliographyEntry;

/// Resolver for DOI links.
pub const DOI_RESOLVER: &str = "http://dx.doi.org/";
/// Article explaining what a DOI is.
pub const DOI_ABOUT: &str = "http://en.wikipedia.org/wiki/Digital_object_identifier";
/// Lookup service for ISSN links.
pub const ISSN_RESOLVER: &str = "http://www.worldcat.org/issn/";
/// Article explaining what an ISSN is.
pub const ISSN_ABOUT: &str = "http://en.wikipedia.org/wiki/International_Standard_Serial_Number";

/// Characters left unencoded inside an identifier path segment: ASCII
/// alphanumerics plus `_ . - ~ /`.
const IDENTIFIER: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'_')
	.remove(b'.')
	.remove(b'-')
	.remove(b'~')
	.remove(b'/');

/// Format an entry as a single line of HTML.
///
/// The layout is
///
/// ```text
/// Authors (Date). <i>Title</i>. Work Volume (Issue): Pages. doi:DOI, ISSN ISSN. Retrieved AccessDate.
/// ```
///
/// Every optional segment and its punctuation is left out when its field is
/// empty. Without authors the date moves behind the title and work segments.
/// A `url` turns the emphasized title into a link.
///
/// Field text is HTML-escaped, and the ASCII punctuation that starts inline
/// markdown syntax is written as numeric character references, so the
/// citation reads the same after the surrounding markdown is converted.
///
/// ```rust
/// use mdcite_core::BibliographyEntry;
/// use mdcite_core::format_entry;
///
/// let entry = BibliographyEntry::new(
/// 	"cite book",
/// 	[("title", "Foo"), ("author", "Mary Smith"), ("date", "2004")],
/// )
/// .unwrap();
///
/// assert_eq!(format_entry(&entry), "Mary Smith (2004). <i>Foo</i>.");
/// ```
pub fn format_entry(entry: &BibliographyEntry) -> String {
	let authors = entry.authors();
	let date = entry.date();
	let mut html = String::new();

	if !authors.is_empty() {
		html.push_str(&escape_text(&authors));
		if let Some(date) = date {
			html.push_str(" (");
			html.push_str(&escape_text(date));
			html.push(')');
		}
		html.push_str(". ");
	}

	html.push_str(&format_title(entry.title(), entry.url()));
	html.push('.');

	if let Some(work) = entry.work() {
		html.push(' ');
		html.push_str(&escape_text(work));
		if let Some(volume) = entry.volume() {
			html.push(' ');
			html.push_str(&escape_text(volume));
		}
		if let Some(issue) = entry.issue() {
			html.push_str(" (");
			html.push_str(&escape_text(issue));
			html.push(')');
		}
		if let Some(pages) = entry.pages() {
			html.push_str(": ");
			html.push_str(&escape_text(pages));
		}
		html.push('.');
	}

	if authors.is_empty() {
		if let Some(date) = date {
			html.push(' ');
			html.push_str(&escape_text(date));
			html.push('.');
		}
	}

	let mut identifiers = Vec::new();
	if let Some(doi) = entry.doi() {
		identifiers.push(format!(
			r#"<a href="{DOI_ABOUT}">doi</a>:{}"#,
			identifier_link(DOI_RESOLVER, doi)
		));
	}
	if let Some(issn) = entry.issn() {
		identifiers.push(format!(
			r#"<a href="{ISSN_ABOUT}">ISSN</a> {}"#,
			identifier_link(ISSN_RESOLVER, issn)
		));
	}
	if !identifiers.is_empty() {
		html.push(' ');
		html.push_str(&identifiers.join(", "));
		html.push('.');
	}

	if let Some(access_date) = entry.access_date() {
		html.push_str(" Retrieved ");
		html.push_str(&escape_text(access_date));
		html.push('.');
	}

	html
}

fn format_title(title: &str, url: Option<&str>) -> String {
	let title = format!("<i>{}</i>", escape_text(title));

	match url {
		Some(url) => {
			format!(
				r#"<a href="{}">{title}</a>"#,
				encode_double_quoted_attribute(url)
			)
		}
		None => title,
	}
}

fn identifier_link(resolver: &str, identifier: &str) -> String {
	let encoded = utf8_percent_encode(identifier, IDENTIFIER).to_string();

	format!(
		r#"<a href="{resolver}{}">{}</a>"#,
		encode_double_quoted_attribute(&encoded),
		escape_text(identifier)
	)
}

/// Markdown punctuation that is replaced by a character reference in
/// citation text.
const MARKDOWN_PUNCTUATION: [char; 7] = ['\\', '`', '*', '_', '[', ']', '~'];

/// HTML-escape `text` and neutralize inline markdown syntax in it.
///
/// ```text
/// The *real* [story] -> The &#42;real&#42; &#91;story&#93;
/// ```
pub(crate) fn escape_text(text: &str) -> String {
	let escaped = encode_text(text);
	if !escaped.contains(MARKDOWN_PUNCTUATION) {
		return escaped.into_owned();
	}

	let mut output = String::with_capacity(escaped.len() + 8);
	for ch in escaped.chars() {
		if MARKDOWN_PUNCTUATION.contains(&ch) {
			output.push_str(&format!("&#{};", u32::from(ch)));
		} else {
			output.push(ch);
		}
	}

	output
}
