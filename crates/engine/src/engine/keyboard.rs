//! Keydown dispatch.

use tessel_buffer::TextBuffer;
use tessel_primitives::{Key, KeyCode, Modifiers};
use tessel_syntax::{NodeId, Parser};
use tracing::{debug, warn};

use super::Engine;
use crate::error::Result;
use crate::keymap::KeyBinding;
use crate::render::Renderer;

/// Whether the engine consumed a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
	/// Consumed: the host must not apply its default behavior.
	Handled,
	/// Not consumed: the buffer's own key handling applies.
	Unhandled,
}

impl KeyOutcome {
	pub fn is_handled(self) -> bool {
		self == KeyOutcome::Handled
	}
}

impl<B: TextBuffer, P: Parser, R: Renderer> Engine<B, P, R> {
	/// Handles one keydown.
	///
	/// While editing, editing keys go to the session; pending provisional
	/// input opens its session first. Otherwise, in order:
	/// Enter edits the selected literal or blank, Backspace deletes the
	/// selected node, Tab and Shift-Tab move between visible nodes, and
	/// anything else is looked up in the keymap.
	pub fn handle_key(&mut self, key: Key) -> Result<KeyOutcome> {
		if self.enter_pending_edit() {
			return self.session_key(key);
		}
		if !self.mode.is_active() {
			return Ok(KeyOutcome::Unhandled);
		}

		let plain = key.modifiers.is_empty();
		let selected = self.selected_node();
		match key.code {
			KeyCode::Enter if plain => {
				if let Some(id) = selected.filter(|&id| self.is_editable(id)) {
					self.begin_edit(id)?;
					return Ok(KeyOutcome::Handled);
				}
			}
			KeyCode::Backspace if plain => {
				if let Some(id) = selected {
					self.delete_node(id)?;
					return Ok(KeyOutcome::Handled);
				}
			}
			KeyCode::Tab if plain => {
				self.select_next()?;
				return Ok(KeyOutcome::Handled);
			}
			KeyCode::Tab if key.modifiers == Modifiers::NONE.shift() => {
				self.select_previous()?;
				return Ok(KeyOutcome::Handled);
			}
			_ => {}
		}

		let Some(binding) = self.keymap.lookup(key).cloned() else {
			return Ok(KeyOutcome::Unhandled);
		};
		match binding {
			KeyBinding::Command(name) => {
				if !self.buffer.exec_command(&name) {
					warn!(command = %name, %key, "unknown buffer command");
				}
			}
			KeyBinding::Function(f) => f(&mut self.buffer),
		}
		self.sync()?;
		Ok(KeyOutcome::Handled)
	}

	fn session_key(&mut self, key: Key) -> Result<KeyOutcome> {
		if key.modifiers.is_command() {
			return Ok(KeyOutcome::Unhandled);
		}
		match key.code {
			KeyCode::Enter => {
				self.commit_edit()?;
			}
			KeyCode::Esc => {
				self.cancel_edit();
			}
			KeyCode::Backspace => {
				self.edit_backspace();
			}
			KeyCode::Delete => {
				self.edit_delete();
			}
			KeyCode::Left => {
				self.edit_left();
			}
			KeyCode::Right => {
				self.edit_right();
			}
			KeyCode::Home => {
				self.edit_home();
			}
			KeyCode::End => {
				self.edit_end();
			}
			_ => return Ok(KeyOutcome::Unhandled),
		}
		Ok(KeyOutcome::Handled)
	}

	/// Removes a node's text from the buffer.
	pub fn delete_node(&mut self, id: NodeId) -> Result<()> {
		let range = self.node_range(id)?;
		self.buffer.replace(range, "");
		self.buffer.set_cursor(range.from);
		self.set_focus(None);
		debug!(node = %id, %range, "node deleted");
		self.sync()?;
		Ok(())
	}
}
