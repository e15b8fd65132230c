//! Named editing commands reachable from keymaps.

use tessel_primitives::{Position, Range};
use tracing::debug;

use super::RopeBuffer;
use crate::TextBuffer;

/// Every command name [`run`] understands.
pub const COMMANDS: &[&str] = &[
	"undo",
	"redo",
	"go-doc-start",
	"go-doc-end",
	"go-line-start",
	"go-line-end",
	"go-char-left",
	"go-char-right",
	"delete-char-before",
	"delete-char-after",
	"newline",
];

pub(super) fn run(buffer: &mut RopeBuffer, name: &str) -> bool {
	let cursor = buffer.cursor;
	match name {
		"undo" => {
			buffer.undo();
		}
		"redo" => {
			buffer.redo();
		}
		"go-doc-start" => buffer.cursor = 0,
		"go-doc-end" => buffer.cursor = buffer.doc.len_chars(),
		"go-line-start" => {
			let pos = buffer.cursor();
			buffer.set_cursor(Position::new(pos.line, 0));
		}
		"go-line-end" => {
			let pos = buffer.cursor();
			buffer.set_cursor(Position::new(pos.line, usize::MAX));
		}
		"go-char-left" => buffer.cursor = cursor.saturating_sub(1),
		"go-char-right" => buffer.cursor = (cursor + 1).min(buffer.doc.len_chars()),
		"delete-char-before" if cursor > 0 => {
			let range = Range::new(buffer.char_to_pos(cursor - 1), buffer.char_to_pos(cursor));
			buffer.replace(range, "");
		}
		"delete-char-after" if cursor < buffer.doc.len_chars() => {
			let range = Range::new(buffer.char_to_pos(cursor), buffer.char_to_pos(cursor + 1));
			buffer.replace(range, "");
		}
		"delete-char-before" | "delete-char-after" => {}
		"newline" => buffer.insert_at_cursor("\n"),
		_ => {
			debug!(command = name, "unknown buffer command");
			return false;
		}
	}
	true
}
