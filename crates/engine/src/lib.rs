//! Keeps a block tree and a text buffer in sync.
//!
//! The [`Engine`] owns the parsed [`Tree`](tessel_syntax::Tree) of a
//! [`TextBuffer`](tessel_buffer::TextBuffer) and every piece of interaction
//! state layered on it: the selected node, the in-place edit session, the
//! provisional node of a quarantined insertion, and an in-flight drag. Every
//! mutation it makes goes through the buffer and ends with a re-render, so
//! tree and text never disagree for longer than one call.

pub mod clipboard;
pub mod config;
pub mod deferred;
pub mod elements;
mod engine;
pub mod error;
pub mod keymap;
pub mod mode;
pub mod render;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, NoClipboard};
pub use config::{Delays, EngineConfig, RenderOptions};
pub use elements::{Anchor, Element, Elements};
pub use engine::{
	DragPayload, DropEvent, DropOutcome, DropRejection, EditOutcome, EditSession, EditState, EditTarget, Engine,
	KeyOutcome, NavOrigin, PROVISIONAL_NODE, Provisional, Quarantine,
};
pub use error::{ConfigError, EngineError, Result};
pub use keymap::{KeyBinding, Keymap};
pub use mode::Mode;
pub use render::{OutlineRenderer, Renderer};
