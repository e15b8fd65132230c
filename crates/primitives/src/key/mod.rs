//! Key events and their textual form (`ctrl-z`, `shift-tab`, `backspace`).

mod modifiers;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

pub use modifiers::Modifiers;
use thiserror::Error;

/// The physical or logical key of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	/// A printable character.
	Char(char),
	Backspace,
	Delete,
	Enter,
	Esc,
	Tab,
	Left,
	Right,
	Up,
	Down,
	Home,
	End,
	PageUp,
	PageDown,
	/// Function key `F(n)`.
	F(u8),
}

/// A key press together with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl Key {
	/// Creates an unmodified key.
	pub const fn new(code: KeyCode) -> Self {
		Self {
			code,
			modifiers: Modifiers::NONE,
		}
	}

	/// Creates an unmodified character key.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c))
	}

	/// Creates a Ctrl-modified character key.
	pub fn ctrl(c: char) -> Self {
		Self::char(c).with_modifiers(Modifiers::NONE.ctrl())
	}

	/// Returns a copy carrying `modifiers`.
	pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
		Self { modifiers, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn with_shift(self) -> Self {
		self.with_modifiers(self.modifiers.shift())
	}

	/// The character this key would type, if it is plain printable input.
	pub fn printable(&self) -> Option<char> {
		match self.code {
			KeyCode::Char(c) if !self.modifiers.is_command() && !c.is_control() => Some(c),
			_ => None,
		}
	}
}

/// Failure to read a key description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
	/// The description was empty.
	#[error("empty key description")]
	Empty,
	/// A modifier prefix was not recognized.
	#[error("unknown modifier `{0}`")]
	UnknownModifier(String),
	/// The key name was not recognized.
	#[error("unknown key `{0}`")]
	UnknownKey(String),
}

impl FromStr for Key {
	type Err = KeyParseError;

	/// Reads `[mod-]*key`, e.g. `ctrl-shift-z`, `tab`, `a`, `-`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			return Err(KeyParseError::Empty);
		}

		let (prefix, name) = match s.rfind('-') {
			Some(idx) if idx + 1 < s.len() => (&s[..idx], &s[idx + 1..]),
			Some(idx) if idx > 0 => (&s[..idx - 1], "-"),
			_ => ("", s),
		};

		let mut modifiers = Modifiers::NONE;
		for part in prefix.split('-').filter(|p| !p.is_empty()) {
			modifiers = match part.to_ascii_lowercase().as_str() {
				"ctrl" | "c" => modifiers.ctrl(),
				"alt" | "a" => modifiers.alt(),
				"shift" | "s" => modifiers.shift(),
				"meta" | "cmd" | "super" => modifiers.meta(),
				_ => return Err(KeyParseError::UnknownModifier(part.to_string())),
			};
		}

		let code = match name.to_ascii_lowercase().as_str() {
			"backspace" | "bs" => KeyCode::Backspace,
			"delete" | "del" => KeyCode::Delete,
			"enter" | "ret" | "return" => KeyCode::Enter,
			"esc" | "escape" => KeyCode::Esc,
			"tab" => KeyCode::Tab,
			"left" => KeyCode::Left,
			"right" => KeyCode::Right,
			"up" => KeyCode::Up,
			"down" => KeyCode::Down,
			"home" => KeyCode::Home,
			"end" => KeyCode::End,
			"pageup" => KeyCode::PageUp,
			"pagedown" => KeyCode::PageDown,
			"space" => KeyCode::Char(' '),
			lower => {
				let mut chars = name.chars();
				match (chars.next(), chars.next()) {
					(Some(c), None) => KeyCode::Char(c),
					_ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
						Some(n) if (1..=24).contains(&n) => KeyCode::F(n),
						_ => return Err(KeyParseError::UnknownKey(name.to_string())),
					},
				}
			}
		};

		Ok(Key { code, modifiers })
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.modifiers)?;
		match self.code {
			KeyCode::Char(' ') => f.write_str("space"),
			KeyCode::Char(c) => write!(f, "{c}"),
			KeyCode::F(n) => write!(f, "f{n}"),
			other => f.write_str(&format!("{other:?}").to_ascii_lowercase()),
		}
	}
}
