//! A small s-expression language used by the CLI and the engine tests.
//!
//! Atoms (symbols, numbers, strings) and `...` blanks are leaves, `;` comments
//! are leaves, and parenthesized lists are expressions. Whitespace is not
//! materialized as nodes.

mod lexer;

#[cfg(test)]
mod tests;

use lexer::{Lexer, TokenKind};
use tessel_primitives::Position;
use tracing::trace;

use crate::parser::{ParseError, ParseErrorKind, Parser};
use crate::tree::{NodeKind, Tree};

/// [`Parser`] for s-expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SexprParser;

impl SexprParser {
	pub fn new() -> Self {
		Self
	}
}

/// One-based `line N, column M` for messages.
fn human(at: Position) -> String {
	format!("line {}, column {}", at.line + 1, at.column + 1)
}

impl Parser for SexprParser {
	fn parse(&self, text: &str) -> Result<Tree, ParseError> {
		let mut builder = Tree::builder();
		let mut open: Vec<Position> = Vec::new();

		for token in Lexer::new(text) {
			let token = token?;
			let range = token.range;
			match token.kind {
				TokenKind::Open => {
					builder.open(NodeKind::Expression, range.from)?;
					open.push(range.from);
				}
				TokenKind::Close => {
					if open.pop().is_none() {
						return Err(ParseError::new(ParseErrorKind::UnexpectedCloser(')'), range.from));
					}
					builder.close(range.to)?;
				}
				TokenKind::Atom | TokenKind::Str => {
					builder.leaf(NodeKind::Literal, range)?;
				}
				TokenKind::Blank => {
					builder.leaf(NodeKind::Blank, range)?;
				}
				TokenKind::Comment => {
					builder.leaf(NodeKind::Comment, range)?;
				}
			}
		}

		if let Some(&at) = open.last() {
			return Err(ParseError::new(ParseErrorKind::Unclosed('('), at));
		}
		let tree = builder.finish()?;
		trace!(nodes = tree.len(), roots = tree.roots().len(), "parsed s-expression document");
		Ok(tree)
	}

	fn lex(&self, fragment: &str) -> Result<(), ParseError> {
		let mut tokens = Lexer::new(fragment);
		let first = match tokens.next() {
			None => return Err(ParseError::new(ParseErrorKind::Empty, Position::ZERO)),
			Some(token) => token?,
		};
		if !first.kind.is_literal() {
			return Err(ParseError::new(ParseErrorKind::NotALiteral, first.range.from));
		}
		match tokens.next() {
			None => Ok(()),
			Some(Ok(extra)) => Err(ParseError::new(ParseErrorKind::NotALiteral, extra.range.from)),
			Some(Err(err)) => Err(err),
		}
	}

	fn error_message(&self, error: &ParseError) -> anyhow::Result<String> {
		let at = error.at;
		Ok(match &error.kind {
			ParseErrorKind::UnexpectedChar(c) => format!("Unexpected character {c:?} at {}", human(at)),
			ParseErrorKind::UnexpectedCloser(c) => format!("Unexpected '{c}' at {}", human(at)),
			ParseErrorKind::Unclosed(c) => format!("'{c}' opened at {} is never closed", human(at)),
			ParseErrorKind::UnterminatedString => format!("String starting at {} is never closed", human(at)),
			ParseErrorKind::Empty => "Expected a value".to_string(),
			ParseErrorKind::NotALiteral => format!("Expected a single value, found more at {}", human(at)),
			ParseErrorKind::Tree(err) => anyhow::bail!("no user-facing message for tree error: {err}"),
		})
	}
}
