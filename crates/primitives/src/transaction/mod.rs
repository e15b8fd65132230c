//! Char-offset changesets.
//!
//! Every buffer edit is recorded as a [`ChangeSet`]: a retain/delete/insert
//! sequence spanning the whole document. The same value drives three things:
//! applying the edit, inverting it for undo, and carrying bookmarks and marks
//! across it with [`ChangeSet::map_pos`].

mod changeset;
mod types;

#[cfg(test)]
mod tests;

pub use changeset::ChangeSet;
pub use types::{Bias, Change, Insertion, Operation, Tendril};
