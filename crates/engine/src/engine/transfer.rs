//! Copy and cut of the selected node.

use tessel_buffer::TextBuffer;
use tessel_primitives::Range;
use tessel_syntax::{NodeId, Parser};
use tracing::{debug, warn};

use super::Engine;
use crate::deferred::Task;
use crate::error::Result;
use crate::render::Renderer;

impl<B: TextBuffer, P: Parser, R: Renderer> Engine<B, P, R> {
	/// Text held for the native copy, until the copy delay has passed.
	pub fn transfer(&self) -> Option<&str> {
		self.transfer.as_deref()
	}

	/// Copies the selected node's text. Returns false with nothing selected.
	///
	/// Focus moves to the transfer text and comes back to the node once the
	/// copy delay has passed. A failing native clipboard is logged only.
	pub fn copy(&mut self) -> Result<bool> {
		let Some(id) = self.selected_node() else {
			return Ok(false);
		};
		let range = self.node_range(id)?;
		self.copy_range(id, range);
		Ok(true)
	}

	/// Copies the selected node's text, then deletes it from the buffer.
	pub fn cut(&mut self) -> Result<bool> {
		let Some(id) = self.selected_node() else {
			return Ok(false);
		};
		let range = self.node_range(id)?;
		self.copy_range(id, range);
		self.buffer.replace(range, "");
		self.buffer.set_cursor(range.from);
		debug!(node = %id, %range, "cut");
		self.sync()?;
		Ok(true)
	}

	fn copy_range(&mut self, id: NodeId, range: Range) {
		let text = self.buffer.slice(range);
		if let Err(err) = self.clipboard.copy(&text) {
			warn!(error = %err, node = %id, "native copy failed");
		}
		self.transfer = Some(text);
		self.set_focus(None);

		let delay = self.config.delays.copy();
		let generation = self.generation;
		self.schedule(Task::Refocus { node: id, generation }, delay);
		self.schedule(Task::ReleaseTransfer, delay);
		debug!(node = %id, %range, "copied");
	}
}
