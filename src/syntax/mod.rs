/**
 * SMT-LIB 2 syntax: tokens, AST, parser and printers.
 */
use std::iter::Peekable;

use source_span::Span;

use crate::Located;

pub mod ast;
pub mod display;
pub mod error;
pub mod lexer;
pub mod response;
pub mod token;

pub use ast::*;
pub use display::{DeepPrint, Print};
pub use error::{Error, Result};
pub use lexer::Lexer;
pub use token::{Reserved, Token};

pub trait Parsable: Sized {
	/**
	 * Parse from a lexer.
	 */
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Self>>
	where
		L: Iterator<Item = Result<Located<Token>>>;
}

/**
 * Peek the next token from a lexer.
 */
pub(crate) fn peek<L>(lexer: &mut Peekable<L>) -> Result<Located<Token>>
where
	L: Iterator<Item = Result<Located<Token>>>,
{
	match lexer.peek() {
		Some(Ok(token)) => Ok(token.clone()),
		None => Ok(Token::EndOfFile.at(Span::default())),
		Some(Err(_)) => consume(lexer),
	}
}

/**
 * Consume the next token from a lexer.
 */
pub(crate) fn consume<L>(lexer: &mut Peekable<L>) -> Result<Located<Token>>
where
	L: Iterator<Item = Result<Located<Token>>>,
{
	match lexer.next() {
		Some(Ok(token)) => Ok(token),
		None => Ok(Token::EndOfFile.at(Span::default())),
		Some(Err(error)) => Err(error),
	}
}

/**
 * Consume the next token and ensure it is of the given kind.
 */
pub(crate) fn consume_token<L>(lexer: &mut Peekable<L>, kind: Token) -> Result<Span>
where
	L: Iterator<Item = Result<Located<Token>>>,
{
	let token = consume(lexer)?;
	if *token == kind {
		Ok(token.span())
	} else {
		let span = token.span();
		Err(Error::UnexpectedToken(token.into_inner(), Some(kind)).at(span))
	}
}

/**
 * Parse elements until the closing parenthesis, which is consumed.
 */
pub(crate) fn parse_list<L, T: Parsable>(
	lexer: &mut Peekable<L>,
	loc: &mut Span,
) -> Result<Vec<Located<T>>>
where
	L: Iterator<Item = Result<Located<Token>>>,
{
	let mut list = Vec::new();

	loop {
		let token = peek(lexer)?;
		match *token {
			Token::End => {
				consume(lexer)?;
				*loc = loc.union(token.span());
				break;
			}
			_ => {
				let t = T::parse(lexer)?;
				list.push(t);
			}
		}
	}

	Ok(list)
}

/**
 * Parse one or more elements until the closing parenthesis, which is
 * consumed. Positions where the grammar requires a non-empty list go
 * through here.
 */
pub(crate) fn parse_nonempty<L, T: Parsable>(
	lexer: &mut Peekable<L>,
	loc: &mut Span,
) -> Result<NonEmpty<Located<T>>>
where
	L: Iterator<Item = Result<Located<Token>>>,
{
	let head = T::parse(lexer)?;
	let mut tail = Vec::new();

	loop {
		let token = peek(lexer)?;
		match *token {
			Token::End => {
				consume(lexer)?;
				*loc = loc.union(token.span());
				break;
			}
			_ => {
				let t = T::parse(lexer)?;
				tail.push(t);
			}
		}
	}

	Ok(NonEmpty {
		head: head,
		tail: tail,
	})
}

pub(crate) fn parse_bool<L>(lexer: &mut Peekable<L>) -> Result<Located<bool>>
where
	L: Iterator<Item = Result<Located<Token>>>,
{
	let token = consume(lexer)?;
	let loc = token.span();
	match token.as_ref() {
		Token::Sym(name) if name == "true" => Ok(Located::new(true, loc)),
		Token::Sym(name) if name == "false" => Ok(Located::new(false, loc)),
		_ => Err(Error::UnexpectedToken(token.into_inner(), None).at(loc)),
	}
}

pub(crate) fn parse_string_literal<L>(lexer: &mut Peekable<L>) -> Result<Located<String>>
where
	L: Iterator<Item = Result<Located<Token>>>,
{
	let token = consume(lexer)?;
	let loc = token.span();
	match token.into_inner() {
		Token::Const(Constant::String(s)) => Ok(Located::new(s, loc)),
		unexpected => Err(Error::UnexpectedToken(unexpected, None).at(loc)),
	}
}

impl Parsable for Symbol {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Symbol>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let token = consume(lexer)?;
		let loc = token.span();
		match token.into_inner() {
			Token::Sym(name) => Ok(Located::new(Symbol { id: name }, loc)),
			unexpected => Err(Error::UnexpectedToken(unexpected, None).at(loc)),
		}
	}
}

impl Parsable for Keyword {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Keyword>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let token = consume(lexer)?;
		let loc = token.span();
		match token.into_inner() {
			Token::Keyword(name) => Ok(Located::new(Keyword { id: name }, loc)),
			unexpected => Err(Error::UnexpectedToken(unexpected, None).at(loc)),
		}
	}
}

impl Parsable for Numeral {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Numeral>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let token = consume(lexer)?;
		let loc = token.span();
		match token.into_inner() {
			Token::Const(Constant::Numeral(n)) => Ok(Located::new(n, loc)),
			unexpected => Err(Error::UnexpectedToken(unexpected, None).at(loc)),
		}
	}
}

/**
 * Rest of an indexed identifier, after `(` has been consumed and with the
 * `_` as the next token. Consumes the closing parenthesis.
 */
fn finish_indexed_ident<L>(lexer: &mut Peekable<L>, mut loc: Span) -> Result<Located<Ident>>
where
	L: Iterator<Item = Result<Located<Token>>>,
{
	consume_token(lexer, Token::Reserved(Reserved::Underscore))?;
	let id = Symbol::parse(lexer)?;

	let head = Numeral::parse(lexer)?;
	let mut indexes = vec![head];

	loop {
		let token = peek(lexer)?;
		match *token {
			Token::End => {
				consume(lexer)?;
				loc = loc.union(token.span());
				break;
			}
			_ => indexes.push(Numeral::parse(lexer)?),
		}
	}

	Ok(Located::new(
		Ident {
			id: id,
			indexes: indexes,
		},
		loc,
	))
}

impl Parsable for Ident {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Ident>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let token = peek(lexer)?;
		let loc = token.span();

		match token.as_ref() {
			Token::Sym(_) => {
				let id = Symbol::parse(lexer)?;
				Ok(id.into())
			}
			Token::Begin => {
				consume(lexer)?;
				finish_indexed_ident(lexer, loc)
			}
			unexpected => Err(Error::UnexpectedToken(unexpected.clone(), None).at(loc)),
		}
	}
}

/**
 * Rest of a sort coercion, after `(` has been consumed and with the `as`
 * as the next token. Consumes the closing parenthesis.
 */
fn finish_coercion<L>(lexer: &mut Peekable<L>, mut loc: Span) -> Result<Located<QualIdent>>
where
	L: Iterator<Item = Result<Located<Token>>>,
{
	consume_token(lexer, Token::Reserved(Reserved::As))?;
	let id = Ident::parse(lexer)?;
	let sort = Sort::parse(lexer)?;
	loc = loc.union(consume_token(lexer, Token::End)?);

	Ok(Located::new(
		QualIdent {
			id: id,
			sort: Some(sort),
		},
		loc,
	))
}

impl Parsable for QualIdent {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<QualIdent>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let token = peek(lexer)?;
		let loc = token.span();

		match token.as_ref() {
			Token::Sym(_) => {
				let id = Ident::parse(lexer)?;
				let span = id.span();
				Ok(Located::new(QualIdent { id: id, sort: None }, span))
			}
			Token::Begin => {
				consume(lexer)?;
				let token = peek(lexer)?;
				match token.as_ref() {
					Token::Reserved(Reserved::Underscore) => {
						let id = finish_indexed_ident(lexer, loc)?;
						let span = id.span();
						Ok(Located::new(QualIdent { id: id, sort: None }, span))
					}
					Token::Reserved(Reserved::As) => finish_coercion(lexer, loc),
					unexpected => {
						Err(Error::UnexpectedToken(unexpected.clone(), None).at(token.span()))
					}
				}
			}
			unexpected => Err(Error::UnexpectedToken(unexpected.clone(), None).at(loc)),
		}
	}
}

impl Parsable for Sort {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Sort>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let token = peek(lexer)?;
		let mut loc = token.span();

		match token.as_ref() {
			Token::Sym(_) => {
				let id = Ident::parse(lexer)?;
				let span = id.span();
				Ok(Located::new(
					Sort {
						id: id,
						parameters: Vec::new(),
					},
					span,
				))
			}
			Token::Begin => {
				consume(lexer)?;
				let token = peek(lexer)?;
				match token.as_ref() {
					Token::Reserved(Reserved::Underscore) => {
						let id = finish_indexed_ident(lexer, loc)?;
						let span = id.span();
						Ok(Located::new(
							Sort {
								id: id,
								parameters: Vec::new(),
							},
							span,
						))
					}
					_ => {
						let id = Ident::parse(lexer)?;
						let parameters = parse_nonempty(lexer, &mut loc)?;
						let mut list = Vec::with_capacity(parameters.len());
						list.push(parameters.head);
						list.extend(parameters.tail);
						Ok(Located::new(
							Sort {
								id: id,
								parameters: list,
							},
							loc,
						))
					}
				}
			}
			unexpected => Err(Error::UnexpectedToken(unexpected.clone(), None).at(loc)),
		}
	}
}

impl Parsable for SExpr {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<SExpr>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let token = peek(lexer)?;
		let mut loc = token.span();

		let kind = match token.as_ref() {
			Token::Const(_) => {
				let token = consume(lexer)?;
				match token.into_inner() {
					Token::Const(c) => SExpr::Const(c),
					_ => unreachable!(),
				}
			}

			Token::Sym(_) => {
				let sym = Symbol::parse(lexer)?;
				SExpr::Sym(sym.into_inner())
			}

			// Reserved words are ordinary symbols at the S-expression
			// level; model responses embed `define-fun` and friends.
			Token::Reserved(word) => {
				let word = *word;
				consume(lexer)?;
				SExpr::Sym(Symbol::new(word.as_str()))
			}

			Token::Keyword(_) => {
				let key = Keyword::parse(lexer)?;
				SExpr::Keyword(key.into_inner())
			}

			Token::Begin => {
				consume(lexer)?;
				let mut exprs = Vec::new();

				loop {
					let token = peek(lexer)?;
					match *token {
						Token::End => {
							consume(lexer)?;
							loc = loc.union(token.span());
							break;
						}
						_ => {
							let expr = SExpr::parse(lexer)?;
							exprs.push(expr);
						}
					}
				}

				SExpr::List(exprs)
			}

			unexpected => {
				return Err(Error::UnexpectedToken(unexpected.clone(), None).at(loc));
			}
		};

		Ok(Located::new(kind, loc))
	}
}

impl Parsable for Attribute {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Attribute>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let key = Keyword::parse(lexer)?;
		let token = peek(lexer)?;

		let value = match token.as_ref() {
			Token::End | Token::EndOfFile | Token::Keyword(_) => None,
			_ => Some(SExpr::parse(lexer)?),
		};

		let loc = match &value {
			Some(value) => key.span().union(value.span()),
			None => key.span(),
		};

		Ok(Located::new(
			Attribute {
				key: key,
				value: value,
			},
			loc,
		))
	}
}

impl Parsable for Term {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Term>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let token = peek(lexer)?;
		let mut loc = token.span();

		let kind = match token.as_ref() {
			Token::Const(_) => {
				let token = consume(lexer)?;
				match token.into_inner() {
					Token::Const(c) => Term::Const(c),
					_ => unreachable!(),
				}
			}

			Token::Sym(_) => {
				let id = QualIdent::parse(lexer)?;
				Term::Ident(id.into_inner())
			}

			Token::Begin => {
				consume(lexer)?;
				let token = peek(lexer)?;

				match token.as_ref() {
					Token::Reserved(Reserved::Let) => {
						consume(lexer)?;
						consume_token(lexer, Token::Begin)?; // beginning of the bindings list
						let bindings = parse_nonempty(lexer, &mut loc)?;
						let body = Term::parse(lexer)?;
						loc = loc.union(consume_token(lexer, Token::End)?); // end of the term.

						Term::Let {
							bindings: bindings,
							body: Box::new(body),
						}
					}

					Token::Reserved(Reserved::Forall) => {
						consume(lexer)?;
						consume_token(lexer, Token::Begin)?; // beginning of the vars list
						let vars = parse_nonempty(lexer, &mut loc)?;
						let body = Term::parse(lexer)?;
						loc = loc.union(consume_token(lexer, Token::End)?); // end of the term.

						Term::Forall {
							vars: vars,
							body: Box::new(body),
						}
					}

					Token::Reserved(Reserved::Exists) => {
						consume(lexer)?;
						consume_token(lexer, Token::Begin)?; // beginning of the vars list
						let vars = parse_nonempty(lexer, &mut loc)?;
						let body = Term::parse(lexer)?;
						loc = loc.union(consume_token(lexer, Token::End)?); // end of the term.

						Term::Exists {
							vars: vars,
							body: Box::new(body),
						}
					}

					Token::Reserved(Reserved::Bang) => {
						consume(lexer)?;
						let term = Term::parse(lexer)?;
						let attributes = parse_nonempty(lexer, &mut loc)?; // ends the term.

						Term::Annotated {
							term: Box::new(term),
							attributes: attributes,
						}
					}

					Token::Reserved(Reserved::As) => {
						let id = finish_coercion(lexer, loc)?;
						loc = id.span();
						Term::Ident(id.into_inner())
					}

					Token::Reserved(Reserved::Underscore) => {
						let id = finish_indexed_ident(lexer, loc)?;
						loc = id.span();
						Term::Ident(QualIdent { id: id, sort: None })
					}

					Token::Sym(_) | Token::Begin => {
						let fun = QualIdent::parse(lexer)?;
						let args = parse_nonempty(lexer, &mut loc)?; // ends the application.

						Term::Apply {
							fun: fun,
							args: Box::new(args),
						}
					}

					unexpected => {
						return Err(
							Error::UnexpectedToken(unexpected.clone(), None).at(token.span())
						)
					}
				}
			}

			unexpected => {
				return Err(Error::UnexpectedToken(unexpected.clone(), None).at(loc));
			}
		};

		Ok(Located::new(kind, loc))
	}
}

impl Parsable for Binding {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Binding>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let mut loc = consume_token(lexer, Token::Begin)?;
		let id = Symbol::parse(lexer)?;
		let term = Term::parse(lexer)?;
		loc = loc.union(consume_token(lexer, Token::End)?);

		Ok(Located::new(
			Binding {
				id: id,
				value: Box::new(term),
			},
			loc,
		))
	}
}

impl Parsable for SortedVar {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<SortedVar>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let mut loc = consume_token(lexer, Token::Begin)?;
		let id = Symbol::parse(lexer)?;
		let sort = Sort::parse(lexer)?;
		loc = loc.union(consume_token(lexer, Token::End)?);

		Ok(Located::new(SortedVar { id: id, sort: sort }, loc))
	}
}

impl Parsable for DataTypeDeclaration {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<DataTypeDeclaration>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let mut loc = consume_token(lexer, Token::Begin)?;
		let id = Symbol::parse(lexer)?;
		let constructors = parse_nonempty(lexer, &mut loc)?;

		Ok(Located::new(
			DataTypeDeclaration {
				id: id,
				constructors: constructors,
			},
			loc,
		))
	}
}

impl Parsable for ConstructorDeclaration {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<ConstructorDeclaration>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let mut loc = consume_token(lexer, Token::Begin)?;
		let id = Symbol::parse(lexer)?;
		let selectors = parse_list(lexer, &mut loc)?;

		Ok(Located::new(
			ConstructorDeclaration {
				id: id,
				selectors: selectors,
			},
			loc,
		))
	}
}

impl Parsable for SelectorDeclaration {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<SelectorDeclaration>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let mut loc = consume_token(lexer, Token::Begin)?;
		let id = Symbol::parse(lexer)?;
		let sort = Sort::parse(lexer)?;
		loc = loc.union(consume_token(lexer, Token::End)?);

		Ok(Located::new(
			SelectorDeclaration { id: id, sort: sort },
			loc,
		))
	}
}

impl Parsable for SmtOption {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<SmtOption>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		use SmtOption::*;

		let key = Keyword::parse(lexer)?;
		let mut loc = key.span();

		let option = match key.id.as_str() {
			"print-success" => PrintSuccess(*with_loc(&mut loc, parse_bool(lexer)?)),
			"expand-definitions" => ExpandDefinitions(*with_loc(&mut loc, parse_bool(lexer)?)),
			"interactive-mode" => InteractiveMode(*with_loc(&mut loc, parse_bool(lexer)?)),
			"produce-proofs" => ProduceProofs(*with_loc(&mut loc, parse_bool(lexer)?)),
			"produce-unsat-cores" => ProduceUnsatCores(*with_loc(&mut loc, parse_bool(lexer)?)),
			"produce-models" => ProduceModels(*with_loc(&mut loc, parse_bool(lexer)?)),
			"produce-assignments" => ProduceAssignments(*with_loc(&mut loc, parse_bool(lexer)?)),
			"regular-output-channel" => {
				let channel = parse_string_literal(lexer)?;
				loc = loc.union(channel.span());
				RegularOutputChannel(channel.into_inner())
			}
			"diagnostic-output-channel" => {
				let channel = parse_string_literal(lexer)?;
				loc = loc.union(channel.span());
				DiagnosticOutputChannel(channel.into_inner())
			}
			"random-seed" => {
				let seed = Numeral::parse(lexer)?;
				loc = loc.union(seed.span());
				RandomSeed(seed.into_inner())
			}
			"verbosity" => {
				let level = Numeral::parse(lexer)?;
				loc = loc.union(level.span());
				Verbosity(level.into_inner())
			}
			_ => {
				let token = peek(lexer)?;
				let value = match token.as_ref() {
					Token::End | Token::EndOfFile | Token::Keyword(_) => None,
					_ => Some(SExpr::parse(lexer)?),
				};
				if let Some(value) = &value {
					loc = loc.union(value.span());
				}
				Attr(Attribute {
					key: key,
					value: value,
				})
			}
		};

		Ok(Located::new(option, loc))
	}
}

fn with_loc<T>(loc: &mut Span, value: Located<T>) -> Located<T> {
	*loc = loc.union(value.span());
	value
}

impl Parsable for InfoFlag {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<InfoFlag>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		use InfoFlag::*;

		let key = ast::Keyword::parse(lexer)?;
		let loc = key.span();

		let flag = match key.id.as_str() {
			"error-behavior" => ErrorBehavior,
			"name" => Name,
			"authors" => Authors,
			"version" => Version,
			"status" => Status,
			"reason-unknown" => ReasonUnknown,
			"all-statistics" => AllStatistics,
			_ => Keyword(key.into_inner().id),
		};

		Ok(Located::new(flag, loc))
	}
}

impl Parsable for Command {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Command>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let mut loc = consume_token(lexer, Token::Begin)?;

		let token = consume(lexer)?;
		let name_loc = token.span();
		let kind = match token.as_ref() {
			Token::Reserved(word) => match word {
				Reserved::Assert => {
					let term = Term::parse(lexer)?;
					Command::Assert(term)
				}

				Reserved::CheckSat => Command::CheckSat,

				Reserved::DeclareDatatypes => {
					consume_token(lexer, Token::Begin)?; // sort parameter list,
					consume_token(lexer, Token::End)?; // fixed empty.
					consume_token(lexer, Token::Begin)?;
					let decls = parse_nonempty(lexer, &mut loc)?;
					Command::DeclareDatatypes(decls)
				}

				Reserved::DeclareFun => {
					let id = Symbol::parse(lexer)?;
					consume_token(lexer, Token::Begin)?;
					let args = parse_list(lexer, &mut loc)?;
					let result = Sort::parse(lexer)?;
					Command::DeclareFun(id, args, result)
				}

				Reserved::DeclareSort => {
					let id = Symbol::parse(lexer)?;
					let arity = Numeral::parse(lexer)?;
					Command::DeclareSort(id, arity)
				}

				Reserved::DefineFun => {
					let id = Symbol::parse(lexer)?;
					consume_token(lexer, Token::Begin)?;
					let vars = parse_list(lexer, &mut loc)?;
					let result = Sort::parse(lexer)?;
					let body = Term::parse(lexer)?;
					Command::DefineFun(id, vars, result, body)
				}

				Reserved::DefineSort => {
					let id = Symbol::parse(lexer)?;
					consume_token(lexer, Token::Begin)?;
					let params = parse_list(lexer, &mut loc)?;
					let sort = Sort::parse(lexer)?;
					Command::DefineSort(id, params, sort)
				}

				Reserved::Exit => Command::Exit,

				Reserved::GetAssertions => Command::GetAssertions,

				Reserved::GetAssignment => Command::GetAssignment,

				Reserved::GetInfo => {
					let flag = InfoFlag::parse(lexer)?;
					Command::GetInfo(flag)
				}

				Reserved::GetOption => {
					let key = Keyword::parse(lexer)?;
					Command::GetOption(key)
				}

				Reserved::GetProof => Command::GetProof,

				Reserved::GetUnsatCore => Command::GetUnsatCore,

				Reserved::GetValue => {
					consume_token(lexer, Token::Begin)?;
					let terms = parse_nonempty(lexer, &mut loc)?;
					Command::GetValue(terms)
				}

				Reserved::Pop => {
					let n = Numeral::parse(lexer)?;
					Command::Pop(n)
				}

				Reserved::Push => {
					let n = Numeral::parse(lexer)?;
					Command::Push(n)
				}

				Reserved::SetInfo => {
					let attr = Attribute::parse(lexer)?;
					Command::SetInfo(attr)
				}

				Reserved::SetLogic => {
					let logic = Symbol::parse(lexer)?;
					Command::SetLogic(logic)
				}

				Reserved::SetOption => {
					let option = SmtOption::parse(lexer)?;
					Command::SetOption(option)
				}

				_ => {
					return Err(
						Error::UnexpectedToken(token.as_ref().clone(), None).at(name_loc)
					)
				}
			},

			// `get-model` is not a reserved word, so it arrives as a
			// plain symbol.
			Token::Sym(name) if name == "get-model" => Command::GetModel,

			// Anything else parenthesized and headed by a symbol travels
			// as a non-standard command.
			Token::Sym(name) => {
				let mut exprs = vec![Located::new(
					SExpr::Sym(Symbol::new(name.as_str())),
					name_loc,
				)];

				loop {
					let token = peek(lexer)?;
					match *token {
						Token::End => {
							consume(lexer)?;
							loc = loc.union(token.span());
							break;
						}
						_ => exprs.push(SExpr::parse(lexer)?),
					}
				}

				return Ok(Located::new(
					Command::NonStandard(Located::new(SExpr::List(exprs), loc)),
					loc,
				));
			}

			unexpected => {
				return Err(Error::UnexpectedToken(unexpected.clone(), None).at(name_loc))
			}
		};

		loc = loc.union(consume_token(lexer, Token::End)?);

		Ok(Located::new(kind, loc))
	}
}

impl Parsable for Script {
	fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Script>>
	where
		L: Iterator<Item = Result<Located<Token>>>,
	{
		let mut commands = Vec::new();
		let mut loc = Span::default();

		loop {
			let token = peek(lexer)?;
			match *token {
				Token::EndOfFile => break,
				_ => {
					let command = Command::parse(lexer)?;
					loc = loc.union(command.span());
					commands.push(command);
				}
			}
		}

		Ok(Located::new(Script(commands), loc))
	}
}
