/// The parts of a shorthand citation such as `Mary Smith 2004, p. 23`.
///
/// A reference has the shape `<authors> <date>[, <pages>]`:
///
/// - `authors` contains no comma or digit and must be non-empty. It ends at
///   the last space before the first comma or digit that is directly
///   followed by a digit or hyphen.
/// - `date` is the run of digits and hyphens after that space (`2004`,
///   `2004-2006`, `-2004`).
/// - `pages` is whatever follows a `", "` directly after the date, up to the
///   end of the line.
///
/// Anything after the date that is not a `", "` separator is ignored, so
/// `Smith 2004a` parses with the date `2004` and no pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceText<'a> {
	pub authors: &'a str,
	pub date: &'a str,
	pub pages: Option<&'a str>,
}

impl<'a> ReferenceText<'a> {
	/// Parse `text`, returning `None` if it does not have the reference shape.
	///
	/// ```rust
	/// use mdcite_core::ReferenceText;
	///
	/// let reference = ReferenceText::parse("Mary 2004, p. 23").unwrap();
	/// assert_eq!(reference.authors, "Mary");
	/// assert_eq!(reference.date, "2004");
	/// assert_eq!(reference.pages, Some("p. 23"));
	///
	/// assert!(ReferenceText::parse("Smith, 2004").is_none());
	/// ```
	pub fn parse(text: &'a str) -> Option<Self> {
		let prefix_len = text
			.find(|ch: char| ch == ',' || ch.is_ascii_digit())
			.unwrap_or(text.len());
		let split = text[..prefix_len]
			.rmatch_indices(' ')
			.map(|(index, _)| index)
			.find(|&index| index > 0 && text[index + 1..].starts_with(is_date_char))?;

		let authors = &text[..split];
		let rest = &text[split + 1..];
		let date_len = rest
			.find(|ch: char| !is_date_char(ch))
			.unwrap_or(rest.len());
		let (date, rest) = rest.split_at(date_len);

		let pages = rest
			.strip_prefix(", ")
			.map(|pages| pages.split('\n').next().unwrap_or(pages))
			.filter(|pages| !pages.is_empty());

		Some(Self {
			authors,
			date,
			pages,
		})
	}

	/// The word tokens of the authors fragment.
	///
	/// Words are maximal runs of alphanumeric characters and underscores, so
	/// `"Smith & Jones"` yields `Smith` and `Jones`.
	pub fn author_words(&self) -> impl Iterator<Item = &'a str> {
		self.authors
			.split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
			.filter(|word| !word.is_empty())
	}
}

fn is_date_char(ch: char) -> bool {
	ch.is_ascii_digit() || ch == '-'
}
