use tessel_primitives::Position;
use thiserror::Error;

use crate::tree::{Tree, TreeError};

/// What went wrong while parsing or lexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
	/// A character that cannot start any token.
	UnexpectedChar(char),
	/// A closing delimiter with nothing open.
	UnexpectedCloser(char),
	/// An opening delimiter never closed.
	Unclosed(char),
	/// A string literal running into end of input.
	UnterminatedString,
	/// A fragment with no token in it.
	Empty,
	/// A fragment holding more than one token, or a non-literal token.
	NotALiteral,
	/// The parser produced an inconsistent tree.
	Tree(TreeError),
}

/// A parse or lex failure at a position.
///
/// The `Display` form is terse; user-facing text comes from
/// [`Parser::error_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at {at}: {kind:?}")]
pub struct ParseError {
	pub kind: ParseErrorKind,
	pub at: Position,
}

impl ParseError {
	pub fn new(kind: ParseErrorKind, at: Position) -> Self {
		Self { kind, at }
	}
}

impl From<TreeError> for ParseError {
	fn from(err: TreeError) -> Self {
		let at = err.position();
		Self::new(ParseErrorKind::Tree(err), at)
	}
}

/// The language front end the engine consumes.
pub trait Parser {
	/// Parses a whole document.
	fn parse(&self, text: &str) -> Result<Tree, ParseError>;

	/// Checks that `fragment` is a single valid literal token.
	fn lex(&self, fragment: &str) -> Result<(), ParseError>;

	/// Renders a user-facing message for `error`.
	///
	/// May fail; callers fall back to an empty message.
	fn error_message(&self, error: &ParseError) -> anyhow::Result<String>;
}
