use crate::BibliographyEntry;
use crate::BibliographySource;
use crate::CitationRegistry;

/// A single book by Mary Smith.
pub const SMITH_FOO: &str = "{{cite book | title = Foo | author = Mary Smith | date = 2004}}";

/// A small bibliography with every kind of field in use.
pub const LIBRARY: &str = r"
Books and articles cited in the essay.

{{cite book
 | title = Foo
 | author = Mary Smith
 | date = 2004
}}

{{cite journal
 | title = On Bars & Bazzes
 | last = Jones
 | first = Peter
 | coauthors = Ann Lee
 | date = 1999-2001
 | journal = Journal of <Things>
 | volume = 12
 | issue = 3
 | pages = 45-67
 | doi = 10.1000/182
 | issn = 1234-5678
 | accessdate = 2010-05-01
 | url = http://example.org/bars?x=1&y=2
}}

{{cite web
 | title = Anonymous Pamphlet
 | date = 1850
 | newspaper = The Daily Bugle
}}
";

/// Two books by different Smiths whose dates overlap.
pub const TWO_SMITHS: &str = r"
{{cite book | title = First Book | author = John Smith | date = 2004}}
{{cite book | title = Second Book | author = Anna Smith | date = 2004-2006}}
";

pub fn registry(source: &str) -> CitationRegistry {
	CitationRegistry::new(BibliographySource::Text(source.to_string()))
}

pub fn entry(fields: &[(&str, &str)]) -> BibliographyEntry {
	BibliographyEntry::new("cite book", fields.iter().copied())
		.unwrap_or_else(|| panic!("fixture entry without a title: {fields:?}"))
}
