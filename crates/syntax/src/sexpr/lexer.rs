use std::iter::Peekable;
use std::str::Chars;

use tessel_primitives::{Position, Range, is_line_break};

use crate::parser::{ParseError, ParseErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
	Open,
	Close,
	/// Symbol or number.
	Atom,
	/// The `...` placeholder.
	Blank,
	Str,
	/// `;` to end of line.
	Comment,
}

impl TokenKind {
	pub fn is_literal(self) -> bool {
		matches!(self, TokenKind::Atom | TokenKind::Blank | TokenKind::Str)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
	pub kind: TokenKind,
	pub range: Range,
}

pub(crate) const BLANK: &str = "...";

fn is_atom_char(c: char) -> bool {
	!c.is_whitespace() && !c.is_control() && !matches!(c, '(' | ')' | '"' | ';')
}

/// Splits source text into tokens, tracking line/column positions.
pub(crate) struct Lexer<'a> {
	chars: Peekable<Chars<'a>>,
	pos: Position,
}

impl<'a> Lexer<'a> {
	pub fn new(text: &'a str) -> Self {
		Self {
			chars: text.chars().peekable(),
			pos: Position::ZERO,
		}
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.chars.next()?;
		if c == '\r' && self.chars.peek() == Some(&'\n') {
			return Some(c);
		}
		if is_line_break(c) {
			self.pos.line += 1;
			self.pos.column = 0;
		} else {
			self.pos.column += 1;
		}
		Some(c)
	}

	fn bump_while(&mut self, mut pred: impl FnMut(char) -> bool) -> String {
		let mut out = String::new();
		while let Some(&c) = self.chars.peek() {
			if !pred(c) {
				break;
			}
			out.push(c);
			self.bump();
		}
		out
	}

	fn string(&mut self, start: Position) -> Result<TokenKind, ParseError> {
		self.bump();
		let mut escaped = false;
		while let Some(c) = self.bump() {
			match c {
				'\\' if !escaped => escaped = true,
				'"' if !escaped => return Ok(TokenKind::Str),
				_ => escaped = false,
			}
		}
		Err(ParseError::new(ParseErrorKind::UnterminatedString, start))
	}
}

impl Iterator for Lexer<'_> {
	type Item = Result<Token, ParseError>;

	fn next(&mut self) -> Option<Self::Item> {
		self.bump_while(char::is_whitespace);
		let start = self.pos;
		let c = *self.chars.peek()?;

		let kind = match c {
			'(' => {
				self.bump();
				Ok(TokenKind::Open)
			}
			')' => {
				self.bump();
				Ok(TokenKind::Close)
			}
			'"' => self.string(start),
			';' => {
				self.bump_while(|c| !is_line_break(c));
				Ok(TokenKind::Comment)
			}
			c if is_atom_char(c) => {
				let text = self.bump_while(is_atom_char);
				Ok(if text == BLANK { TokenKind::Blank } else { TokenKind::Atom })
			}
			other => {
				self.bump();
				Err(ParseError::new(ParseErrorKind::UnexpectedChar(other), start))
			}
		};

		Some(kind.map(|kind| Token {
			kind,
			range: Range::new(start, self.pos),
		}))
	}
}
