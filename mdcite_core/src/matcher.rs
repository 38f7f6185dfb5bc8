use crate::BibliographyEntry;
use crate::ReferenceText;

/// Decide whether `reference` cites `entry`.
///
/// A reference matches when it is exactly the entry's title. Otherwise it
/// must parse as a [`ReferenceText`] and either its authors fragment is the
/// title, or
///
/// - every author word appears somewhere in the entry's combined authors,
///   and
/// - the reference date is contained in the entry's date, when the entry has
///   one.
///
/// ```rust
/// use mdcite_core::BibliographyEntry;
/// use mdcite_core::matches;
///
/// let entry = BibliographyEntry::new(
/// 	"cite book",
/// 	[("title", "Foo"), ("author", "Mary Smith"), ("date", "2004-2006")],
/// )
/// .unwrap();
///
/// assert!(matches("Foo", &entry));
/// assert!(matches("Mary Smith 2005, p. 3", &entry));
/// assert!(!matches("Mary Jones 2004", &entry));
/// ```
pub fn matches(reference: &str, entry: &BibliographyEntry) -> bool {
	matches_parts(reference, entry.title(), &entry.authors(), entry.date())
}

/// The page reference of `reference`, if it has one.
///
/// ```rust
/// use mdcite_core::extract_page_suffix;
///
/// assert_eq!(extract_page_suffix("Smith 2004, pp. 3-5"), Some("pp. 3-5"));
/// assert_eq!(extract_page_suffix("Smith 2004"), None);
/// assert_eq!(extract_page_suffix("Some Title"), None);
/// ```
pub fn extract_page_suffix(reference: &str) -> Option<&str> {
	ReferenceText::parse(reference).and_then(|parsed| parsed.pages)
}

/// Matching against precomputed entry parts so callers can cache the
/// combined authors string.
pub(crate) fn matches_parts(
	reference: &str,
	title: &str,
	authors: &str,
	date: Option<&str>,
) -> bool {
	if reference == title {
		return true;
	}

	let Some(parsed) = ReferenceText::parse(reference) else {
		return false;
	};

	if parsed.authors == title {
		return true;
	}

	if !parsed.author_words().all(|word| authors.contains(word)) {
		return false;
	}

	date.is_none_or(|date| date.contains(parsed.date))
}
