//! Modifier keys held during a key event.

use std::fmt;

/// Modifier state of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Control held.
	pub ctrl: bool,
	/// Alt / Option held.
	pub alt: bool,
	/// Shift held.
	pub shift: bool,
	/// Super / Command held.
	pub meta: bool,
}

impl Modifiers {
	/// No modifiers.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		meta: false,
	};

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Meta added.
	pub fn meta(self) -> Self {
		Self { meta: true, ..self }
	}

	/// Returns true if no modifiers are set.
	pub fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift && !self.meta
	}

	/// Returns true if a modifier that turns a key into a command is held.
	///
	/// Shift alone still produces printable input.
	pub fn is_command(self) -> bool {
		self.ctrl || self.alt || self.meta
	}
}

impl fmt::Display for Modifiers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (held, name) in [(self.ctrl, "ctrl-"), (self.alt, "alt-"), (self.meta, "meta-"), (self.shift, "shift-")] {
			if held {
				f.write_str(name)?;
			}
		}
		Ok(())
	}
}
