use std::collections::BTreeMap;

use serde::Serialize;

/// Field names checked, in order, for the containing work of an entry.
pub const WORK_FIELDS: [&str; 6] = [
	"work",
	"journal",
	"newspaper",
	"magazine",
	"periodical",
	"encyclopedia",
];

/// One record of the bibliography: a macro name and its fields.
///
/// Field names are stored trimmed and lower-cased. The `title` field is
/// guaranteed to be present and non-empty. Every other accessor treats an
/// empty value the same as a missing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibliographyEntry {
	macro_name: String,
	fields: BTreeMap<String, String>,
}

impl BibliographyEntry {
	/// Build an entry from raw `(key, value)` pairs.
	///
	/// Keys are normalized, values are trimmed, and later duplicates win.
	/// Returns `None` when there is no non-empty `title` field.
	pub fn new<I, K, V>(macro_name: impl Into<String>, fields: I) -> Option<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let fields: BTreeMap<String, String> = fields
			.into_iter()
			.map(|(key, value)| {
				(
					key.as_ref().trim().to_lowercase(),
					value.as_ref().trim().to_string(),
				)
			})
			.collect();

		if fields.get("title").is_none_or(String::is_empty) {
			return None;
		}

		Some(Self {
			macro_name: macro_name.into().trim().to_string(),
			fields,
		})
	}

	/// The template name the record was written with, e.g. `cite book`.
	pub fn macro_name(&self) -> &str {
		&self.macro_name
	}

	/// All fields of the record.
	pub fn fields(&self) -> &BTreeMap<String, String> {
		&self.fields
	}

	/// The value of `name`, or `None` when it is missing or empty.
	pub fn field(&self, name: &str) -> Option<&str> {
		self.fields
			.get(name)
			.map(String::as_str)
			.filter(|value| !value.is_empty())
	}

	pub fn title(&self) -> &str {
		self.fields.get("title").map_or("", String::as_str)
	}

	pub fn date(&self) -> Option<&str> {
		self.field("date")
	}

	/// The first non-empty work-like field (`work`, `journal`, `newspaper`,
	/// ...).
	pub fn work(&self) -> Option<&str> {
		WORK_FIELDS.iter().find_map(|name| self.field(name))
	}

	pub fn volume(&self) -> Option<&str> {
		self.field("volume")
	}

	pub fn issue(&self) -> Option<&str> {
		self.field("issue")
	}

	pub fn pages(&self) -> Option<&str> {
		self.field("pages")
	}

	pub fn doi(&self) -> Option<&str> {
		self.field("doi")
	}

	pub fn issn(&self) -> Option<&str> {
		self.field("issn")
	}

	pub fn access_date(&self) -> Option<&str> {
		self.field("accessdate")
	}

	pub fn url(&self) -> Option<&str> {
		self.field("url")
	}

	/// Every author-like field joined with `", "`.
	///
	/// The order is `author`, `authors`, `coauthors`, then `first last`
	/// (either half alone when the other is missing), then `others`.
	pub fn authors(&self) -> String {
		let mut names: Vec<String> = Vec::new();

		for name in ["author", "authors", "coauthors"] {
			if let Some(value) = self.field(name) {
				names.push(value.to_string());
			}
		}

		match (self.field("first"), self.field("last")) {
			(Some(first), Some(last)) => names.push(format!("{first} {last}")),
			(Some(only), None) | (None, Some(only)) => names.push(only.to_string()),
			(None, None) => {}
		}

		if let Some(others) = self.field("others") {
			names.push(others.to_string());
		}

		names.join(", ")
	}
}
