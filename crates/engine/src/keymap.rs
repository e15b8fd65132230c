//! Key to command resolution for keys the engine does not handle itself.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tessel_buffer::TextBuffer;
use tessel_primitives::Key;

use crate::error::ConfigError;

/// A function bound to a key. Receives the buffer directly.
pub type KeyFn = Rc<dyn Fn(&mut dyn TextBuffer)>;

/// What a key resolves to.
#[derive(Clone)]
pub enum KeyBinding {
	/// A named buffer command, run through [`TextBuffer::exec_command`].
	Command(String),
	Function(KeyFn),
}

impl fmt::Debug for KeyBinding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Command(name) => f.debug_tuple("Command").field(name).finish(),
			Self::Function(_) => f.write_str("Function(..)"),
		}
	}
}

/// Active key bindings.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
	bindings: FxHashMap<Key, KeyBinding>,
}

impl Keymap {
	/// Builds a keymap from `key string -> command name` entries.
	pub fn from_config<'a>(
		entries: impl IntoIterator<Item = (&'a String, &'a String)>,
	) -> Result<Self, ConfigError> {
		let mut keymap = Self::default();
		for (key, command) in entries {
			let parsed = key.parse::<Key>().map_err(|source| ConfigError::Key {
				key: key.clone(),
				source,
			})?;
			if command.trim().is_empty() {
				return Err(ConfigError::EmptyCommand(key.clone()));
			}
			keymap.bind_command(parsed, command.trim());
		}
		Ok(keymap)
	}

	pub fn bind_command(&mut self, key: Key, command: impl Into<String>) {
		self.bindings.insert(key, KeyBinding::Command(command.into()));
	}

	pub fn bind_fn(&mut self, key: Key, f: impl Fn(&mut dyn TextBuffer) + 'static) {
		self.bindings.insert(key, KeyBinding::Function(Rc::new(f)));
	}

	/// Removes a binding. Returns true if one existed.
	pub fn unbind(&mut self, key: Key) -> bool {
		self.bindings.remove(&key).is_some()
	}

	pub fn lookup(&self, key: Key) -> Option<&KeyBinding> {
		self.bindings.get(&key)
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use tessel_primitives::{KeyCode, KeyParseError};

	use super::*;
	use crate::config::EngineConfig;

	#[test]
	fn default_config_binds_undo_and_redo() {
		let config = EngineConfig::default();
		let keymap = Keymap::from_config(&config.keymap).unwrap();
		assert_eq!(keymap.len(), 3);
		assert!(matches!(keymap.lookup(Key::ctrl('z')), Some(KeyBinding::Command(c)) if c == "undo"));
		assert!(matches!(
			keymap.lookup(Key::ctrl('z').with_shift()),
			Some(KeyBinding::Command(c)) if c == "redo"
		));
		assert!(keymap.lookup(Key::char('z')).is_none());
	}

	#[test]
	fn bad_keys_name_the_entry() {
		let mut entries = BTreeMap::new();
		entries.insert("hyper-q".to_string(), "undo".to_string());
		let err = Keymap::from_config(&entries).unwrap_err();
		match err {
			ConfigError::Key { key, source } => {
				assert_eq!(key, "hyper-q");
				assert!(matches!(source, KeyParseError::UnknownModifier(_)));
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn empty_command_is_rejected() {
		let mut entries = BTreeMap::new();
		entries.insert("f5".to_string(), "  ".to_string());
		assert!(matches!(
			Keymap::from_config(&entries),
			Err(ConfigError::EmptyCommand(k)) if k == "f5"
		));
	}

	#[test]
	fn functions_replace_commands() {
		let mut keymap = Keymap::default();
		let key = Key::new(KeyCode::F(2));
		keymap.bind_command(key, "undo");
		keymap.bind_fn(key, |buf| buf.set_cursor(buf.end()));
		assert!(matches!(keymap.lookup(key), Some(KeyBinding::Function(_))));
		assert!(keymap.unbind(key));
		assert!(keymap.is_empty());
	}
}
