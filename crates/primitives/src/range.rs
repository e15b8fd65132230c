use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// An offset in the text, measured in characters (not bytes).
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// A half-open span of buffer positions, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
	/// Inclusive start.
	pub from: Position,
	/// Exclusive end.
	pub to: Position,
}

impl Range {
	/// Creates a range, swapping the endpoints if they are given in reverse.
	pub fn new(a: Position, b: Position) -> Self {
		if a <= b { Self { from: a, to: b } } else { Self { from: b, to: a } }
	}

	/// Creates a zero-width range at `pos`.
	pub fn point(pos: Position) -> Self {
		Self { from: pos, to: pos }
	}

	/// Returns true if the range covers no text.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.from == self.to
	}

	/// Returns true if `pos` lies within `[from, to)`.
	#[inline]
	pub fn contains(&self, pos: Position) -> bool {
		pos >= self.from && pos < self.to
	}

	/// Returns true if `pos` lies within `[from, to]`.
	#[inline]
	pub fn touches(&self, pos: Position) -> bool {
		pos >= self.from && pos <= self.to
	}

	/// Returns true if `other` lies entirely within this range.
	pub fn contains_range(&self, other: &Range) -> bool {
		other.from >= self.from && other.to <= self.to
	}

	/// Returns true if the two ranges share at least one character.
	///
	/// Two empty ranges at the same position also overlap.
	pub fn overlaps(&self, other: &Range) -> bool {
		if self.from < other.to && other.from < self.to {
			return true;
		}
		self.is_empty() && other.is_empty() && self.from == other.from
	}

	/// Returns true if this range ends at or before `other` starts.
	#[inline]
	pub fn precedes(&self, other: &Range) -> bool {
		self.to <= other.from
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}..{}", self.from, self.to)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pos(line: usize, column: usize) -> Position {
		Position::new(line, column)
	}

	#[test]
	fn new_normalizes_reversed_endpoints() {
		let r = Range::new(pos(1, 4), pos(0, 2));
		assert_eq!(r.from, pos(0, 2));
		assert_eq!(r.to, pos(1, 4));
	}

	#[test]
	fn contains_is_half_open() {
		let r = Range::new(pos(0, 2), pos(0, 5));
		assert!(!r.contains(pos(0, 1)));
		assert!(r.contains(pos(0, 2)));
		assert!(r.contains(pos(0, 4)));
		assert!(!r.contains(pos(0, 5)));
		assert!(r.touches(pos(0, 5)));
	}

	#[test]
	fn overlap_rules() {
		let a = Range::new(pos(0, 0), pos(0, 4));
		let b = Range::new(pos(0, 3), pos(0, 8));
		let c = Range::new(pos(0, 4), pos(0, 8));
		assert!(a.overlaps(&b));
		assert!(!a.overlaps(&c));
		assert!(a.precedes(&c));
		assert!(Range::point(pos(2, 2)).overlaps(&Range::point(pos(2, 2))));
	}

	#[test]
	fn nested_ranges() {
		let outer = Range::new(pos(0, 0), pos(2, 0));
		let inner = Range::new(pos(1, 1), pos(1, 3));
		assert!(outer.contains_range(&inner));
		assert!(!inner.contains_range(&outer));
	}
}
