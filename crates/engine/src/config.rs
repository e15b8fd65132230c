//! Engine configuration, loaded from TOML.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mode::Mode;

/// Settings for one engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	/// Block mode entered by [`Engine::activate`](crate::Engine::activate).
	pub mode: String,
	/// Appended to text committed out of quarantine.
	pub separator: char,
	pub delays: Delays,
	pub render: RenderOptions,
	/// Key string to named buffer command.
	pub keymap: BTreeMap<String, String>,
}

impl Default for EngineConfig {
	fn default() -> Self {
		let keymap = [("ctrl-z", "undo"), ("ctrl-y", "redo"), ("ctrl-shift-z", "redo")]
			.into_iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		Self {
			mode: "blocks".to_string(),
			separator: ' ',
			delays: Delays::default(),
			render: RenderOptions::default(),
			keymap,
		}
	}
}

impl EngineConfig {
	/// Parses a TOML document. Missing fields take their defaults; unknown
	/// fields are rejected.
	pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}

	pub fn block_mode(&self) -> Mode {
		Mode::blocks(self.mode.clone())
	}
}

/// Delays before deferred tasks run, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Delays {
	/// Before a provisional node enters editing.
	pub edit_entry_ms: u64,
	/// Before a rejected edit is refocused.
	pub refocus_ms: u64,
	/// Before the transfer buffer of a copy is released.
	pub copy_ms: u64,
}

impl Default for Delays {
	fn default() -> Self {
		Self {
			edit_entry_ms: 50,
			refocus_ms: 50,
			copy_ms: 200,
		}
	}
}

impl Delays {
	pub fn edit_entry(&self) -> Duration {
		Duration::from_millis(self.edit_entry_ms)
	}

	pub fn refocus(&self) -> Duration {
		Duration::from_millis(self.refocus_ms)
	}

	pub fn copy(&self) -> Duration {
		Duration::from_millis(self.copy_ms)
	}
}

/// Options passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
	/// Render comment nodes; hidden otherwise.
	pub show_comments: bool,
	/// Spaces per nesting level in text outlines.
	pub indent: usize,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			show_comments: true,
			indent: 2,
		}
	}
}
