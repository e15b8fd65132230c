use std::fmt;

/// Whether the buffer is shown as plain text or as a named block view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
	#[default]
	Off,
	Blocks(String),
}

impl Mode {
	pub fn blocks(name: impl Into<String>) -> Self {
		Mode::Blocks(name.into())
	}

	pub fn is_active(&self) -> bool {
		matches!(self, Mode::Blocks(_))
	}

	/// Class set on the buffer's outer container for this mode.
	pub fn class_name(&self) -> String {
		match self {
			Mode::Off => "tessel-mode-off".to_string(),
			Mode::Blocks(name) => format!("tessel-mode-{name}"),
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Mode::Off => f.write_str("off"),
			Mode::Blocks(name) => f.write_str(name),
		}
	}
}
