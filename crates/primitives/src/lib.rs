//! Core types for block editing: positions, ranges, changesets, keys, and marks.

/// Identifier types for buffer-owned entities.
pub mod ids;
/// Keyboard event types.
pub mod key;
/// Decoration options accepted by the marking entry point.
pub mod mark;
/// Line/column positions.
pub mod position;
/// Half-open position ranges.
pub mod range;
/// Char-offset changesets used for edits, undo, and position tracking.
pub mod transaction;

pub use ids::{BookmarkId, MarkId};
pub use key::{Key, KeyCode, KeyParseError, Modifiers};
pub use mark::{MarkOptions, UnsupportedMarkOption};
pub use position::{Position, is_line_break};
pub use range::{CharIdx, CharLen, Range};
pub use ropey::{Rope, RopeSlice};
pub use transaction::{Bias, ChangeSet};
