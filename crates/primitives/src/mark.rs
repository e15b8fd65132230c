//! Options accepted when decorating a buffer range.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A decoration option key the marking entry point does not support.
///
/// Raised instead of silently dropping the option: asking for one is a
/// programming error in the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported mark option `{0}` (expected one of: css, className, title)")]
pub struct UnsupportedMarkOption(pub String);

/// Presentation attached to a marked range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MarkOptions {
	/// Inline style applied to the range.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub css: Option<String>,
	/// Class name applied to the range.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub class_name: Option<String>,
	/// Hover text for the range.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
}

impl MarkOptions {
	/// Builds options from loosely typed key/value pairs.
	///
	/// Fails on the first key outside `css`, `className`, `title`.
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, UnsupportedMarkOption>
	where
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut options = Self::default();
		for (key, value) in pairs {
			let slot = match key.as_ref() {
				"css" => &mut options.css,
				"className" | "class_name" => &mut options.class_name,
				"title" => &mut options.title,
				other => return Err(UnsupportedMarkOption(other.to_string())),
			};
			*slot = Some(value.into());
		}
		Ok(options)
	}

	/// Sets the class name.
	pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
		self.class_name = Some(class_name.into());
		self
	}

	/// Sets the hover title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Sets the inline style.
	pub fn with_css(mut self, css: impl Into<String>) -> Self {
		self.css = Some(css.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_supported_keys() {
		let opts = MarkOptions::from_pairs([("css", "color: red"), ("className", "hl"), ("title", "hi")]).unwrap();
		assert_eq!(opts.css.as_deref(), Some("color: red"));
		assert_eq!(opts.class_name.as_deref(), Some("hl"));
		assert_eq!(opts.title.as_deref(), Some("hi"));
	}

	#[test]
	fn unsupported_key_fails_fast() {
		let err = MarkOptions::from_pairs([("title", "x"), ("readOnly", "true")]).unwrap_err();
		assert_eq!(err, UnsupportedMarkOption("readOnly".into()));
	}

	#[test]
	fn deserialize_rejects_unknown_fields() {
		let ok: MarkOptions = toml::from_str(r#"className = "hl""#).unwrap();
		assert_eq!(ok, MarkOptions::default().with_class("hl"));
		assert!(toml::from_str::<MarkOptions>(r#"atomic = true"#).is_err());
	}
}
