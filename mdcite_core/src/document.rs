use std::ops::Range;

use markdown::CompileOptions;
use markdown::Options;
use markdown::ParseOptions;
use markdown::mdast::Node;
use markdown::to_mdast;

use crate::BibliographyItem;
use crate::BibliographyList;
use crate::CitationRegistry;
use crate::CiteError;
use crate::CiteResult;
use crate::FootnoteMarker;
use crate::OutputFormat;
use crate::Point;
use crate::STYLESHEET;

/// Marker text that inserts the bibliography instead of citing an entry.
pub const BIBLIOGRAPHY_DIRECTIVE: &str = "bibliography";

const MARKER_OPEN: &str = "{{";
const MARKER_CLOSE: &str = "}}";

/// A `{{ ... }}` citation marker found in a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker<'a> {
	/// Byte range of the whole marker, braces included.
	pub range: Range<usize>,
	/// The text between the braces, as written.
	pub text: &'a str,
	/// Where the marker starts.
	pub start: Point,
}

impl Marker<'_> {
	/// The marker text with surrounding whitespace removed and every inner
	/// run of whitespace, newlines included, collapsed to one space.
	pub fn reference(&self) -> String {
		self.text.split_whitespace().collect::<Vec<_>>().join(" ")
	}

	/// Whether this marker is the `{{bibliography}}` directive (any case).
	pub fn is_bibliography_directive(&self) -> bool {
		self.text.trim().eq_ignore_ascii_case(BIBLIOGRAPHY_DIRECTIVE)
	}
}

/// Options for [`render_document`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
	pub format: OutputFormat,
	/// Prefix the output with a `<style>` element holding [`STYLESHEET`].
	pub stylesheet: bool,
}

/// Find every citation marker in `source`, in document order.
///
/// Markers inside code blocks, inline code, and raw HTML are skipped, as are
/// markers that would span a blank line.
pub fn find_markers(source: &str) -> CiteResult<Vec<Marker<'_>>> {
	let skipped = skipped_ranges(source)?;
	let mut markers = Vec::new();
	let mut cursor = 0;

	while let Some(found) = source[cursor..].find(MARKER_OPEN) {
		let open = cursor + found;
		let text_start = open + MARKER_OPEN.len();

		if let Some(range) = skipped.iter().find(|range| range.contains(&open)) {
			cursor = range.end.max(text_start);
			continue;
		}

		let Some(length) = source[text_start..].find(MARKER_CLOSE) else {
			break;
		};
		let text_end = text_start + length;
		let close = text_end + MARKER_CLOSE.len();
		let text = &source[text_start..text_end];

		let overlaps_skipped = skipped
			.iter()
			.any(|range| range.start < close && open < range.end);
		if overlaps_skipped || spans_blank_line(text) {
			cursor = text_start;
			continue;
		}

		markers.push(Marker {
			range: open..close,
			text,
			start: Point::from_offset(source, open),
		});
		cursor = close;
	}

	Ok(markers)
}

/// Replace every citation marker in `source` with its rendered markup and
/// return the resulting markdown.
///
/// The registry is reset first, so footnote numbering starts at 1 for every
/// document. A `{{bibliography}}` directive lists the entries cited before
/// it. The first marker that fails to resolve aborts the pass.
pub fn render_markdown(source: &str, registry: &mut CitationRegistry) -> CiteResult<String> {
	registry.reset();

	let markers = find_markers(source)?;
	let mut output = String::with_capacity(source.len());
	let mut cursor = 0;

	for marker in &markers {
		output.push_str(&source[cursor..marker.range.start]);
		output.push_str(&render_marker(marker, registry)?);
		cursor = marker.range.end;
	}

	output.push_str(&source[cursor..]);
	tracing::debug!(
		markers = markers.len(),
		citations = registry.used().len(),
		"rendered document"
	);

	Ok(output)
}

/// Render a markdown document with its citations, as HTML or as markdown
/// depending on `options`.
pub fn render_document(
	source: &str,
	registry: &mut CitationRegistry,
	options: &RenderOptions,
) -> CiteResult<String> {
	let markdown = render_markdown(source, registry)?;
	let body = match options.format {
		OutputFormat::Markdown => markdown,
		OutputFormat::Html => markdown_to_html(&markdown)?,
	};

	if options.stylesheet {
		Ok(format!("<style type=\"text/css\">\n{STYLESHEET}</style>\n{body}"))
	} else {
		Ok(body)
	}
}

/// Resolve every citation in `source` without keeping the output, returning
/// the bibliography the document would produce.
pub fn check_markdown(
	source: &str,
	registry: &mut CitationRegistry,
) -> CiteResult<Vec<BibliographyItem>> {
	render_markdown(source, registry)?;
	Ok(registry.bibliography_listing())
}

fn render_marker(marker: &Marker<'_>, registry: &mut CitationRegistry) -> CiteResult<String> {
	if marker.is_bibliography_directive() {
		let listing = registry.bibliography_listing();
		return Ok(BibliographyList::new(&listing).to_html());
	}

	let citation = registry
		.resolve(&marker.reference())
		.map_err(|e| {
			CiteError::Citation {
				line: marker.start.line,
				column: marker.start.column,
				source: Box::new(e),
			}
		})?;

	Ok(FootnoteMarker::from(&citation).to_html())
}

fn markdown_to_html(markdown: &str) -> CiteResult<String> {
	let options = Options {
		parse: ParseOptions::gfm(),
		compile: CompileOptions {
			allow_dangerous_html: true,
			..CompileOptions::gfm()
		},
	};

	markdown::to_html_with_options(markdown, &options).map_err(|e| CiteError::Markdown(e.to_string()))
}

/// Byte ranges of code and raw HTML, where markers are left alone.
fn skipped_ranges(source: &str) -> CiteResult<Vec<Range<usize>>> {
	let mdast =
		to_mdast(source, &ParseOptions::gfm()).map_err(|e| CiteError::Markdown(e.to_string()))?;
	let mut ranges = vec![];
	collect_skipped(&mdast, &mut ranges);
	ranges.sort_by_key(|range| range.start);

	Ok(ranges)
}

fn collect_skipped(node: &Node, ranges: &mut Vec<Range<usize>>) {
	match node {
		Node::Code(_) | Node::InlineCode(_) | Node::Html(_) => {
			if let Some(position) = node.position() {
				ranges.push(position.start.offset..position.end.offset);
			}
		}
		_ => {
			if let Some(children) = node.children() {
				for child in children {
					collect_skipped(child, ranges);
				}
			}
		}
	}
}

/// Whether the marker text contains an empty line, which would put the two
/// braces in different paragraphs.
fn spans_blank_line(text: &str) -> bool {
	let lines: Vec<&str> = text.split('\n').collect();
	lines.len() > 2 && lines[1..lines.len() - 1].iter().any(|line| line.trim().is_empty())
}
