use std::fmt;

/// Handle to a buffer bookmark: a position marker that follows edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookmarkId(pub u64);

/// Handle to a buffer mark: a decorated range that follows edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl fmt::Display for BookmarkId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "bookmark#{}", self.0)
	}
}

impl fmt::Display for MarkId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "mark#{}", self.0)
	}
}
