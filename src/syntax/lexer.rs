use std::io;
use std::iter::Peekable;

use source_span::{DefaultMetrics, Position, Span, DEFAULT_METRICS};

use super::ast::{Binary, Constant, Decimal, Hexadecimal, Numeral};
use super::token::{is_symbol_char, Reserved};
use super::{Error, Result, Token};
use crate::Located;

/**
 * Streaming tokenizer over a fallible character reader.
 *
 * One character of lookahead, one token per `next` call. Every token carries
 * the span of its characters; the span never takes part in token equality.
 */
pub struct Lexer<R: Iterator<Item = io::Result<char>>> {
	chars: Peekable<R>,
	location: Span,
	metrics: DefaultMetrics
}

impl<R: Iterator<Item = io::Result<char>>> Lexer<R> {
	pub fn new(source: R, cursor: Position) -> Lexer<R> {
		Lexer {
			chars: source.peekable(),
			location: cursor.into(),
			metrics: DEFAULT_METRICS
		}
	}

	pub fn location(&self) -> Span {
		self.location
	}

	fn peek_char(&mut self) -> Result<Option<char>> {
		match self.chars.peek() {
			Some(Ok(c)) => Ok(Some(*c)),
			Some(Err(_)) => {
				Ok(Some(self.consume()?)) // this will always fail.
			}
			None => Ok(None)
		}
	}

	fn consume(&mut self) -> Result<char> {
		match self.chars.next() {
			Some(Ok(c)) => {
				self.location.push(c, &self.metrics);
				Ok(c)
			}
			Some(Err(e)) => Err(Error::IO(e).at(self.location)),
			None => Err(Error::UnexpectedEof.at(self.location))
		}
	}

	fn skip_whitespaces(&mut self) -> Result<()> {
		loop {
			match self.peek_char()? {
				Some(';') => self.skip_line()?,
				Some(c) if c.is_whitespace() => {
					self.consume()?;
				}
				_ => break
			}
		}

		Ok(())
	}

	/**
	 * Skip all chars up to and including the next line break.
	 */
	fn skip_line(&mut self) -> Result<()> {
		loop {
			match self.peek_char()? {
				Some('\n') => {
					self.consume()?;
					break;
				}
				Some(_) => {
					self.consume()?;
				}
				None => break // a comment may end the input.
			}
		}

		Ok(())
	}

	fn emit(&mut self, token: Token) -> Located<Token> {
		let location = self.location;
		self.location.clear();
		token.at(location)
	}

	/**
	 * Maximal run of simple-symbol characters. A `\` keeps the following
	 * character verbatim, whatever it is.
	 */
	fn read_symbol_body(&mut self) -> Result<String> {
		let mut name = String::new();

		loop {
			match self.peek_char()? {
				Some('\\') => {
					self.consume()?;
					name.push(self.consume()?);
				}
				Some(c) if is_symbol_char(c) => {
					self.consume()?;
					name.push(c);
				}
				_ => break
			}
		}

		Ok(name)
	}

	fn read_symbol(&mut self) -> Result<Located<Token>> {
		let name = self.read_symbol_body()?;

		let token = match Reserved::of_symbol(&name) {
			Some(word) => Token::Reserved(word),
			None => Token::Sym(name)
		};

		Ok(self.emit(token))
	}

	/**
	 * Keyword body, after the `:` has been consumed. Unlike a plain symbol
	 * it may start with a digit.
	 */
	fn read_keyword(&mut self) -> Result<Located<Token>> {
		let name = self.read_symbol_body()?;

		if name.is_empty() {
			return match self.peek_char()? {
				Some(c) => Err(Error::UnexpectedChar(c).at(self.location)),
				None => Err(Error::UnexpectedEof.at(self.location))
			};
		}

		Ok(self.emit(Token::Keyword(name)))
	}

	/**
	 * Quoted symbol, after the opening `|`. A `\` keeps the following
	 * character verbatim; everything else up to the closing `|` is literal.
	 */
	fn read_quoted_symbol(&mut self) -> Result<Located<Token>> {
		let mut name = String::new();

		loop {
			match self.consume()? {
				'|' => break,
				'\\' => name.push(self.consume()?),
				c => name.push(c)
			}
		}

		Ok(self.emit(Token::Sym(name)))
	}

	/**
	 * String literal, after the opening `"`. Only `\"` and `\\` are escape
	 * sequences; any other character, backslash included, is literal.
	 */
	fn read_string(&mut self) -> Result<Located<Token>> {
		let mut string = String::new();

		loop {
			match self.consume()? {
				'"' => break,
				'\\' => match self.peek_char()? {
					Some('"') | Some('\\') => {
						string.push(self.consume()?);
					}
					_ => string.push('\\')
				},
				c => string.push(c)
			}
		}

		Ok(self.emit(Token::Const(Constant::String(string))))
	}

	/**
	 * Numeral or decimal. The digit sequences are accumulated exactly; a
	 * decimal requires at least one fractional digit after the dot.
	 */
	fn read_number(&mut self) -> Result<Located<Token>> {
		let mut integer = Numeral::from(0u32);

		while let Some(c) = self.peek_char()? {
			if c.is_ascii_digit() {
				self.consume()?;
				integer = integer * 10u32 + (c as u32 - '0' as u32);
			} else {
				break;
			}
		}

		let constant = match self.peek_char()? {
			Some('.') => {
				self.consume()?;
				let mut fraction = String::new();
				while let Some(c) = self.peek_char()? {
					if c.is_ascii_digit() {
						self.consume()?;
						fraction.push(c);
					} else {
						break;
					}
				}
				if fraction.is_empty() {
					return match self.peek_char()? {
						Some(c) => Err(Error::UnexpectedChar(c).at(self.location)),
						None => Err(Error::UnexpectedEof.at(self.location))
					};
				}
				Constant::Decimal(Decimal {
					integer: integer,
					fraction: fraction
				})
			}
			_ => Constant::Numeral(integer)
		};

		Ok(self.emit(Token::Const(constant)))
	}

	/**
	 * Binary or hexadecimal literal, after the `#`. The next character
	 * selects the radix; at least one digit is required.
	 */
	fn read_radixed(&mut self) -> Result<Located<Token>> {
		let constant = match self.peek_char()? {
			Some('b') => {
				self.consume()?;
				let mut bits = Vec::new();
				while let Some(c) = self.peek_char()? {
					match c {
						'0' => {
							self.consume()?;
							bits.push(false);
						}
						'1' => {
							self.consume()?;
							bits.push(true);
						}
						_ => break
					}
				}
				if bits.is_empty() {
					return self.empty_body_error();
				}
				Constant::Binary(Binary(bits))
			}
			Some('x') => {
				self.consume()?;
				let mut digits = Vec::new();
				while let Some(c) = self.peek_char()? {
					match c.to_digit(16) {
						Some(d) => {
							self.consume()?;
							digits.push(d as u8);
						}
						None => break
					}
				}
				if digits.is_empty() {
					return self.empty_body_error();
				}
				Constant::Hexadecimal(Hexadecimal(digits))
			}
			Some(c) => return Err(Error::UnexpectedChar(c).at(self.location)),
			None => return Err(Error::UnexpectedEof.at(self.location))
		};

		Ok(self.emit(Token::Const(constant)))
	}

	fn empty_body_error(&mut self) -> Result<Located<Token>> {
		match self.peek_char()? {
			Some(c) => Err(Error::UnexpectedChar(c).at(self.location)),
			None => Err(Error::UnexpectedEof.at(self.location))
		}
	}

	fn read_token(&mut self) -> Result<Option<Located<Token>>> {
		self.skip_whitespaces()?;
		self.location.clear();
		match self.peek_char()? {
			Some(c) => {
				let token = match c {
					'(' => {
						self.consume()?;
						self.emit(Token::Begin)
					}

					')' => {
						self.consume()?;
						self.emit(Token::End)
					}

					':' => {
						self.consume()?;
						self.read_keyword()?
					}

					'"' => {
						self.consume()?;
						self.read_string()?
					}

					'#' => {
						self.consume()?;
						self.read_radixed()?
					}

					'|' => {
						self.consume()?;
						self.read_quoted_symbol()?
					}

					c if c.is_ascii_digit() => self.read_number()?,

					c if is_symbol_char(c) || c == '\\' => self.read_symbol()?,

					c => {
						self.consume()?;
						return Err(Error::UnexpectedChar(c).at(self.location));
					}
				};

				Ok(Some(token))
			}
			None => Ok(None)
		}
	}
}

impl<R: Iterator<Item = io::Result<char>>> Iterator for Lexer<R> {
	type Item = Result<Located<Token>>;

	fn next(&mut self) -> Option<Result<Located<Token>>> {
		self.read_token().transpose()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(input: &str) -> Vec<Token> {
		Lexer::new(input.chars().map(Ok), Position::default())
			.map(|t| t.unwrap().into_inner())
			.collect()
	}

	fn lex_error(input: &str) -> Error {
		let mut lexer = Lexer::new(input.chars().map(Ok), Position::default());
		loop {
			match lexer.next() {
				Some(Ok(_)) => (),
				Some(Err(e)) => return e.into_inner(),
				None => panic!("no lexical error in {:?}", input)
			}
		}
	}

	#[test]
	fn structural_tokens_and_comments() {
		assert_eq!(
			tokens("(check-sat) ; trailing comment\n()"),
			vec![
				Token::Begin,
				Token::Reserved(Reserved::CheckSat),
				Token::End,
				Token::Begin,
				Token::End
			]
		);
	}

	#[test]
	fn comment_may_end_the_input() {
		assert_eq!(tokens("x ; no newline after this"), vec![Token::Sym("x".to_string())]);
	}

	#[test]
	fn symbols_and_keywords() {
		assert_eq!(
			tokens("foo :foo :0bar |quoted sym|"),
			vec![
				Token::Sym("foo".to_string()),
				Token::Keyword("foo".to_string()),
				Token::Keyword("0bar".to_string()),
				Token::Sym("quoted sym".to_string())
			]
		);
	}

	#[test]
	fn quoted_symbol_escapes() {
		assert_eq!(
			tokens(r"|a\|b\\c|"),
			vec![Token::Sym(r"a|b\c".to_string())]
		);
	}

	#[test]
	fn backslash_keeps_the_next_char_in_plain_symbols() {
		// The standard does not sanction this escape; it is part of this
		// lexer's contract and pinned here.
		assert_eq!(tokens(r"a\ b"), vec![Token::Sym("a b".to_string())]);
	}

	#[test]
	fn string_escapes() {
		assert_eq!(
			tokens(r#""a\"b\\c""#),
			vec![Token::Const(Constant::String(r#"a"b\c"#.to_string()))]
		);
		// a backslash before anything else stays a backslash.
		assert_eq!(
			tokens(r#""a\nb""#),
			vec![Token::Const(Constant::String(r"a\nb".to_string()))]
		);
	}

	#[test]
	fn numerals_and_decimals() {
		assert_eq!(
			tokens("42 0 1.50"),
			vec![
				Token::Const(Constant::Numeral(Numeral::from(42u32))),
				Token::Const(Constant::Numeral(Numeral::from(0u32))),
				Token::Const(Constant::Decimal(Decimal {
					integer: Numeral::from(1u32),
					fraction: "50".to_string()
				}))
			]
		);
	}

	#[test]
	fn big_numerals_do_not_overflow() {
		let input = "123456789012345678901234567890";
		match &tokens(input)[..] {
			[Token::Const(Constant::Numeral(n))] => {
				assert_eq!(n.to_string(), input);
			}
			other => panic!("unexpected tokens {:?}", other)
		}
	}

	#[test]
	fn binary_and_hexadecimal() {
		assert_eq!(
			tokens("#b0110 #xDeadBeef"),
			vec![
				Token::Const(Constant::Binary(Binary(vec![false, true, true, false]))),
				Token::Const(Constant::Hexadecimal(Hexadecimal(vec![
					0xD, 0xE, 0xA, 0xD, 0xB, 0xE, 0xE, 0xF
				])))
			]
		);
	}

	#[test]
	fn radix_failures() {
		assert!(matches!(lex_error("#z0"), Error::UnexpectedChar('z')));
		assert!(matches!(lex_error("#b2"), Error::UnexpectedChar('2')));
		assert!(matches!(lex_error("#x"), Error::UnexpectedEof));
		assert!(matches!(lex_error("#"), Error::UnexpectedEof));
	}

	#[test]
	fn unterminated_tokens() {
		assert!(matches!(lex_error("\"abc"), Error::UnexpectedEof));
		assert!(matches!(lex_error("|abc"), Error::UnexpectedEof));
		assert!(matches!(lex_error("1."), Error::UnexpectedEof));
	}

	#[test]
	fn token_positions() {
		let mut lexer = Lexer::new("(a\nbc)".chars().map(Ok), Position::default());
		let open = lexer.next().unwrap().unwrap();
		assert_eq!(open.span().start(), Position::new(0, 0));
		let a = lexer.next().unwrap().unwrap();
		assert_eq!(a.span().start(), Position::new(0, 1));
		let bc = lexer.next().unwrap().unwrap();
		assert_eq!(bc.span().start(), Position::new(1, 0));
	}
}
