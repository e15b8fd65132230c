//! Error types for engine operations.

use tessel_primitives::{KeyParseError, UnsupportedMarkOption};
use tessel_syntax::{NodeId, ParseError};
use thiserror::Error;

/// Errors returned by fallible engine operations.
///
/// Validation failures of in-place edits are not errors: they surface as
/// the erroring edit state. Stale drags and clipboard failures are logged
/// and reported through outcome values instead.
#[derive(Debug, Error)]
pub enum EngineError {
	/// The buffer could not be parsed during a re-render.
	#[error("failed to parse document: {0}")]
	Parse(#[from] ParseError),

	/// A caller asked for a decoration option the engine does not support.
	#[error(transparent)]
	UnsupportedMarkOption(#[from] UnsupportedMarkOption),

	/// A node id that does not resolve in the current tree.
	#[error("{0} does not exist in the current tree")]
	StaleNode(NodeId),

	/// The operation needs block mode.
	#[error("block mode is off")]
	Inactive,

	/// The node is not a literal or blank.
	#[error("{0} cannot be edited in place")]
	NotEditable(NodeId),

	/// Another node is already being edited.
	#[error("another edit is in progress")]
	EditInProgress,

	/// Configuration could not be applied.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Errors loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML source was malformed or had unknown fields.
	#[error("invalid engine config: {0}")]
	Toml(#[from] toml::de::Error),

	/// A keymap entry named a key that could not be read.
	#[error("invalid key `{key}` in keymap: {source}")]
	Key {
		key: String,
		#[source]
		source: KeyParseError,
	},

	/// A keymap entry bound a key to an empty command name.
	#[error("key `{0}` is bound to an empty command")]
	EmptyCommand(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
