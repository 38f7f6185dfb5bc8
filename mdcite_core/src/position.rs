use std::fmt::Display;

/// A location in a source text.
///
/// `line` and `column` are 1-indexed and count characters, `offset` is the
/// 0-indexed byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
	pub line: usize,
	pub column: usize,
	pub offset: usize,
}

impl Default for Point {
	fn default() -> Self {
		Self::new(1, 1, 0)
	}
}

impl Point {
	pub const fn new(line: usize, column: usize, offset: usize) -> Self {
		Self {
			line,
			column,
			offset,
		}
	}

	/// Move the point past `text`.
	pub fn advance_str(&mut self, text: &str) {
		for ch in text.chars() {
			if ch == '\n' {
				self.line += 1;
				self.column = 1;
			} else {
				self.column += 1;
			}
		}

		self.offset += text.len();
	}

	/// Compute the point for the byte `offset` within `source`.
	///
	/// Offsets past the end of `source` are clamped to its length, and
	/// offsets inside a multi-byte character are moved back to its start.
	pub fn from_offset(source: &str, offset: usize) -> Self {
		let mut offset = offset.min(source.len());
		while !source.is_char_boundary(offset) {
			offset -= 1;
		}

		let mut point = Self::default();
		point.advance_str(&source[..offset]);
		point
	}
}

impl Display for Point {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}
