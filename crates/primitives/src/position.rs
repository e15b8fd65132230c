use std::fmt;

use serde::{Deserialize, Serialize};

/// Returns true for chars that end a line.
///
/// These are the rope's line breaks, so positions computed from raw text
/// agree with positions the buffer resolves. A `\r` directly followed by
/// `\n` is one break, not two.
pub fn is_line_break(c: char) -> bool {
	matches!(c, '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// A buffer position, zero-based.
///
/// `column` counts characters, not bytes. Positions order by line first,
/// then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
	/// Zero-based line index.
	pub line: usize,
	/// Zero-based character column within the line.
	pub column: usize,
}

impl Position {
	/// Document start.
	pub const ZERO: Self = Self { line: 0, column: 0 };

	/// Creates a position from a line and column.
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}

	/// Returns the position `n` columns further along the same line.
	pub fn offset_columns(self, n: usize) -> Self {
		Self {
			line: self.line,
			column: self.column + n,
		}
	}

	/// Returns the position reached after writing `text` starting here.
	pub fn advance(self, text: &str) -> Self {
		let mut pos = self;
		let mut chars = text.chars().peekable();
		while let Some(c) = chars.next() {
			if c == '\r' && chars.peek() == Some(&'\n') {
				continue;
			}
			if is_line_break(c) {
				pos.line += 1;
				pos.column = 0;
			} else {
				pos.column += 1;
			}
		}
		pos
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

impl From<(usize, usize)> for Position {
	fn from((line, column): (usize, usize)) -> Self {
		Self { line, column }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn orders_by_line_then_column() {
		assert!(Position::new(0, 9) < Position::new(1, 0));
		assert!(Position::new(2, 1) < Position::new(2, 3));
		assert_eq!(Position::new(1, 1).max(Position::new(1, 0)), Position::new(1, 1));
	}

	#[test]
	fn advance_counts_every_line_break_once() {
		let start = Position::new(2, 4);
		assert_eq!(start.advance("abc"), Position::new(2, 7));
		assert_eq!(start.advance("a\nbc"), Position::new(3, 2));
		assert_eq!(start.advance("a\r\nb"), Position::new(3, 1));
		assert_eq!(start.advance("a\rb\r"), Position::new(4, 0));
		assert_eq!(start.advance("é\u{2028}"), Position::new(3, 0));
	}

	#[test]
	fn displays_as_line_colon_column() {
		assert_eq!(Position::new(3, 7).to_string(), "3:7");
	}
}
