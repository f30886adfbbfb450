use std::fmt;
use std::result;

use source_span::Span;

use super::Token;
use crate::Located;

#[derive(Debug)]
pub enum Error {
	IO(std::io::Error),
	/// End of input in the middle of a token or of a production.
	UnexpectedEof,
	/// A character the lexical grammar forbids at this point.
	UnexpectedChar(char),
	/// A token the grammar forbids at this point, with the expected token
	/// when a single one would do.
	UnexpectedToken(Token, Option<Token>),
	/// An `(error "...")` answer from a solver process.
	Server(String)
}

impl Error {
	pub fn at(self, span: Span) -> Located<Error> {
		Located::new(self, span)
	}
}

pub type Result<T> = result::Result<T, Located<Error>>;

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use self::Error::*;
		match self {
			IO(e) => write!(f, "io: {}", e),
			UnexpectedEof => write!(f, "unexpected end of stream"),
			UnexpectedChar(c) => write!(f, "unexpected character `{}'", c),
			UnexpectedToken(t, None) => write!(f, "unexpected token `{}'", t),
			UnexpectedToken(t, Some(e)) => {
				write!(f, "unexpected token: expected `{}', got `{}'", e, t)
			}
			Server(msg) => write!(f, "server error: {}", msg)
		}
	}
}
