use html_escape::encode_double_quoted_attribute;
use serde::Serialize;

use crate::BibliographyItem;
use crate::CitationUse;

/// Element id of the rendered bibliography list.
pub const BIBLIOGRAPHY_ID: &str = "cite__bibliography";

/// Styles for the rendered markup: footnote markers and back-links are
/// raised, hovering a marker shows the full citation, and the targeted
/// marker or bibliography row is highlighted.
pub const STYLESHEET: &str = r".cite__footnote, .cite__backlink {
  font-size: 60%;
  top: -0.7em;
  position: relative;
}

span.cite__footnote:target {
  background: #DFDFFF;
}

ol#cite__bibliography li:target {
  background: #DFDFFF;
}

.cite__tooltip {
  display: none;
}

.cite__footnote:hover .cite__tooltip {
  font-size: 150%;
  display: block;
  position: absolute;
  left: 1em;
  top: 0.5em;
  z-index: 99;
  background: white;
  margin: 0;
  padding: 0.5em 1em;
  width: 30em;
  border: 1px solid #AAA;
}
";

/// The inline marker for one citation: a bracketed, linked footnote number
/// with the full citation as hover text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FootnoteMarker {
	/// Element id, so the bibliography can link back to this marker.
	pub id: String,
	/// The visible footnote number.
	pub label: usize,
	/// Id of the bibliography row the marker links to.
	pub target: String,
	/// The full citation, including any page reference.
	pub tooltip_html: String,
}

impl FootnoteMarker {
	pub fn to_html(&self) -> String {
		format!(
			r##"<span id="{id}" class="cite__footnote"><span>[</span><a href="#{target}">{label}</a><span>]</span><span class="cite__tooltip">{tooltip}</span></span>"##,
			id = encode_double_quoted_attribute(&self.id),
			target = encode_double_quoted_attribute(&self.target),
			label = self.label,
			tooltip = self.tooltip_html,
		)
	}
}

impl From<&CitationUse> for FootnoteMarker {
	fn from(citation: &CitationUse) -> Self {
		Self {
			id: citation.occurrence_id.clone(),
			label: citation.footnote_number,
			target: citation.bibliography_id.clone(),
			tooltip_html: citation.html.clone(),
		}
	}
}

/// A link from a bibliography row back to one of its citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backlink {
	pub target: String,
	/// `^` for an entry cited once, otherwise `a`, `b`, `c`, ...
	pub label: String,
}

/// One row of the rendered bibliography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibliographyListItem {
	pub id: String,
	pub value: usize,
	pub backlinks: Vec<Backlink>,
	pub html: String,
}

impl From<&BibliographyItem> for BibliographyListItem {
	fn from(item: &BibliographyItem) -> Self {
		let backlinks = match item.occurrence_ids.as_slice() {
			[single] => {
				vec![Backlink {
					target: single.clone(),
					label: "^".to_string(),
				}]
			}
			ids => {
				ids.iter()
					.enumerate()
					.map(|(index, id)| {
						Backlink {
							target: id.clone(),
							label: backlink_label(index),
						}
					})
					.collect()
			}
		};

		Self {
			id: item.bibliography_id.clone(),
			value: item.footnote_number,
			backlinks,
			html: item.html.clone(),
		}
	}
}

impl BibliographyListItem {
	/// Whether the row has lettered back-links rather than a single caret.
	pub fn is_lettered(&self) -> bool {
		self.backlinks.len() > 1
	}

	pub fn to_html(&self) -> String {
		let mut html = format!(
			r#"<li id="{}" value="{}">"#,
			encode_double_quoted_attribute(&self.id),
			self.value
		);

		if self.is_lettered() {
			html.push_str("<span>^ </span>");
			for backlink in &self.backlinks {
				html.push_str(&format!(
					r##"<a href="#{}" class="cite__backlink">{}</a> "##,
					encode_double_quoted_attribute(&backlink.target),
					backlink.label
				));
			}
		} else {
			for backlink in &self.backlinks {
				html.push_str(&format!(
					r##"<a href="#{}">{}</a> "##,
					encode_double_quoted_attribute(&backlink.target),
					backlink.label
				));
			}
		}

		html.push_str(&format!("<span>{}</span></li>", self.html));
		html
	}
}

/// The ordered list of every entry cited so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BibliographyList {
	pub items: Vec<BibliographyListItem>,
}

impl BibliographyList {
	pub fn new(items: &[BibliographyItem]) -> Self {
		Self {
			items: items.iter().map(BibliographyListItem::from).collect(),
		}
	}

	/// Render as a single-line `<ol>`.
	pub fn to_html(&self) -> String {
		let mut html = format!(r#"<ol id="{BIBLIOGRAPHY_ID}">"#);
		for item in &self.items {
			html.push_str(&item.to_html());
		}
		html.push_str("</ol>");
		html
	}
}

/// The letter label for the back-link at `index` (0-based).
///
/// Labels run `a` to `z`, then continue with two letters (`aa`, `ab`, ...,
/// `az`, `ba`, ...), then three, so every index has a distinct label.
///
/// ```rust
/// use mdcite_core::backlink_label;
///
/// assert_eq!(backlink_label(0), "a");
/// assert_eq!(backlink_label(25), "z");
/// assert_eq!(backlink_label(26), "aa");
/// assert_eq!(backlink_label(27), "ab");
/// assert_eq!(backlink_label(52), "ba");
/// ```
pub fn backlink_label(index: usize) -> String {
	let mut letters = Vec::new();
	let mut remaining = index + 1;

	while remaining > 0 {
		remaining -= 1;
		letters.push(b'a' + (remaining % 26) as u8);
		remaining /= 26;
	}

	letters.iter().rev().map(|&byte| byte as char).collect()
}
