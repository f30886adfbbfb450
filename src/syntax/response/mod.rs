/**
 * Solver responses. Each response kind has its own parser entry, since the
 * same text reads differently depending on the command it answers.
 */
use std::iter::Peekable;

use source_span::Span;

use super::{
    consume, consume_token, parse_bool, parse_list, parse_nonempty, parse_string_literal, peek,
    Attribute, Constant, Error, Keyword, NonEmpty, Parsable, Result, SExpr, Symbol, Term, Token,
};
use crate::Located;

mod ast;
mod display;

pub use ast::*;

/**
 * Rest of an `(error "...")` answer, after the opening parenthesis has been
 * consumed. Returns the error for the caller to raise.
 */
fn server_error<L>(lexer: &mut Peekable<L>, mut loc: Span) -> Result<Located<Error>>
where
    L: Iterator<Item = Result<Located<Token>>>,
{
    let token = consume(lexer)?;
    let id_loc = token.span();
    match token.as_ref() {
        Token::Sym(name) if name == "error" => {
            let message = parse_string_literal(lexer)?;
            loc = loc.union(consume_token(lexer, Token::End)?);
            Ok(Error::Server(message.into_inner()).at(loc))
        }
        unexpected => Err(Error::UnexpectedToken(unexpected.clone(), None).at(id_loc)),
    }
}

/**
 * Raise if the solver answered `(error "...")` where a response body was
 * expected. Call right after the response's opening parenthesis.
 */
fn peek_server_error<L>(lexer: &mut Peekable<L>, loc: &Span) -> Result<()>
where
    L: Iterator<Item = Result<Located<Token>>>,
{
    let token = peek(lexer)?;
    match token.as_ref() {
        Token::Sym(name) if name == "error" => Err(server_error(lexer, *loc)?),
        _ => Ok(()),
    }
}

fn as_server_error(expr: &SExpr) -> Option<String> {
    if let SExpr::List(items) = expr {
        if let [head, message] = &items[..] {
            if let (SExpr::Sym(name), SExpr::Const(Constant::String(msg))) =
                (head.as_ref(), message.as_ref())
            {
                if name.id == "error" {
                    return Some(msg.clone());
                }
            }
        }
    }
    None
}

impl Parsable for GenResponse {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<GenResponse>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let token = consume(lexer)?;
        let mut loc = token.span();
        match token.as_ref() {
            Token::Sym(name) if name == "success" => {
                Ok(Located::new(GenResponse::Success, loc))
            }
            Token::Sym(name) if name == "unsupported" => {
                Ok(Located::new(GenResponse::Unsupported, loc))
            }
            Token::Begin => {
                // The error form is data here, not a failure.
                let token = consume(lexer)?;
                let id_loc = token.span();
                match token.as_ref() {
                    Token::Sym(name) if name == "error" => {
                        let message = parse_string_literal(lexer)?;
                        loc = loc.union(consume_token(lexer, Token::End)?);
                        Ok(Located::new(GenResponse::Error(message.into_inner()), loc))
                    }
                    unexpected => {
                        Err(Error::UnexpectedToken(unexpected.clone(), None).at(id_loc))
                    }
                }
            }
            unexpected => Err(Error::UnexpectedToken(unexpected.clone(), None).at(loc)),
        }
    }
}

impl Parsable for CheckSat {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<CheckSat>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let token = consume(lexer)?;
        let loc = token.span();
        match token.as_ref() {
            Token::Sym(name) if name == "sat" => Ok(Located::new(CheckSat::Sat, loc)),
            Token::Sym(name) if name == "unsat" => Ok(Located::new(CheckSat::Unsat, loc)),
            Token::Sym(name) if name == "unknown" => Ok(Located::new(CheckSat::Unknown, loc)),
            Token::Begin => Err(server_error(lexer, loc)?),
            unexpected => Err(Error::UnexpectedToken(unexpected.clone(), None).at(loc)),
        }
    }
}

impl Parsable for Assertions {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Assertions>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let mut loc = consume_token(lexer, Token::Begin)?;
        peek_server_error(lexer, &loc)?;
        let assertions = parse_list(lexer, &mut loc)?;

        Ok(Located::new(Assertions(assertions), loc))
    }
}

impl Parsable for Assignment {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Assignment>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let mut loc = consume_token(lexer, Token::Begin)?;
        peek_server_error(lexer, &loc)?;

        let mut pairs = Vec::new();
        loop {
            let token = peek(lexer)?;
            match *token {
                Token::End => {
                    consume(lexer)?;
                    loc = loc.union(token.span());
                    break;
                }
                _ => {
                    consume_token(lexer, Token::Begin)?;
                    let id = Symbol::parse(lexer)?;
                    let value = parse_bool(lexer)?;
                    consume_token(lexer, Token::End)?;
                    pairs.push((id, *value));
                }
            }
        }

        Ok(Located::new(Assignment(pairs), loc))
    }
}

fn parse_valuation_pair<L>(lexer: &mut Peekable<L>) -> Result<(Located<Term>, Located<Term>)>
where
    L: Iterator<Item = Result<Located<Token>>>,
{
    consume_token(lexer, Token::Begin)?;
    let term = Term::parse(lexer)?;
    let value = Term::parse(lexer)?;
    consume_token(lexer, Token::End)?;
    Ok((term, value))
}

impl Parsable for Valuation {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Valuation>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let mut loc = consume_token(lexer, Token::Begin)?;
        peek_server_error(lexer, &loc)?;

        let head = parse_valuation_pair(lexer)?;
        let mut tail = Vec::new();
        loop {
            let token = peek(lexer)?;
            match *token {
                Token::End => {
                    consume(lexer)?;
                    loc = loc.union(token.span());
                    break;
                }
                _ => tail.push(parse_valuation_pair(lexer)?),
            }
        }

        Ok(Located::new(
            Valuation(NonEmpty {
                head: head,
                tail: tail,
            }),
            loc,
        ))
    }
}

impl Parsable for Proof {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Proof>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let expr = SExpr::parse(lexer)?;
        let loc = expr.span();
        if let Some(message) = as_server_error(&expr) {
            return Err(Error::Server(message).at(loc));
        }

        Ok(Located::new(Proof(expr), loc))
    }
}

impl Parsable for UnsatCore {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<UnsatCore>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let mut loc = consume_token(lexer, Token::Begin)?;
        peek_server_error(lexer, &loc)?;
        let core = parse_list(lexer, &mut loc)?;

        Ok(Located::new(UnsatCore(core), loc))
    }
}

impl Parsable for OptionValue {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<OptionValue>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let expr = SExpr::parse(lexer)?;
        let loc = expr.span();
        if let Some(message) = as_server_error(&expr) {
            return Err(Error::Server(message).at(loc));
        }

        Ok(Located::new(OptionValue(expr), loc))
    }
}

impl Parsable for InfoResponse {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<InfoResponse>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let token = consume(lexer)?;
        let key_loc = token.span();
        let mut loc = key_loc;
        let key = match token.into_inner() {
            Token::Keyword(name) => name,
            unexpected => return Err(Error::UnexpectedToken(unexpected, None).at(loc)),
        };

        let info = match key.as_str() {
            "error-behavior" => {
                let token = consume(lexer)?;
                let value_loc = token.span();
                loc = loc.union(value_loc);
                match token.as_ref() {
                    Token::Sym(name) if name == "immediate-exit" => {
                        InfoResponse::ErrorBehavior(ErrorBehavior::ImmediateExit)
                    }
                    Token::Sym(name) if name == "continued-execution" => {
                        InfoResponse::ErrorBehavior(ErrorBehavior::ContinuedExecution)
                    }
                    unexpected => {
                        return Err(
                            Error::UnexpectedToken(unexpected.clone(), None).at(value_loc)
                        )
                    }
                }
            }
            "name" => {
                let value = parse_string_literal(lexer)?;
                loc = loc.union(value.span());
                InfoResponse::Name(value.into_inner())
            }
            "authors" => {
                let value = parse_string_literal(lexer)?;
                loc = loc.union(value.span());
                InfoResponse::Authors(value.into_inner())
            }
            "version" => {
                let value = parse_string_literal(lexer)?;
                loc = loc.union(value.span());
                InfoResponse::Version(value.into_inner())
            }
            "reason-unknown" => {
                let token = consume(lexer)?;
                let value_loc = token.span();
                loc = loc.union(value_loc);
                match token.as_ref() {
                    Token::Sym(name) if name == "memout" => {
                        InfoResponse::ReasonUnknown(ReasonUnknown::Memout)
                    }
                    Token::Sym(name) if name == "incomplete" => {
                        InfoResponse::ReasonUnknown(ReasonUnknown::Incomplete)
                    }
                    unexpected => {
                        return Err(
                            Error::UnexpectedToken(unexpected.clone(), None).at(value_loc)
                        )
                    }
                }
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
                InfoResponse::Attr(Attribute {
                    key: Located::new(Keyword { id: key }, key_loc),
                    value: value,
                })
            }
        };

        Ok(Located::new(info, loc))
    }
}

impl Parsable for Info {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Info>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let mut loc = consume_token(lexer, Token::Begin)?;
        peek_server_error(lexer, &loc)?;
        let items = parse_nonempty(lexer, &mut loc)?;

        Ok(Located::new(Info(items), loc))
    }
}

impl Parsable for Model {
    fn parse<L>(lexer: &mut Peekable<L>) -> Result<Located<Model>>
    where
        L: Iterator<Item = Result<Located<Token>>>,
    {
        let mut loc = consume_token(lexer, Token::Begin)?;
        peek_server_error(lexer, &loc)?;

        // Solvers disagree on the leading `model` symbol; accept both.
        let token = peek(lexer)?;
        if let Token::Sym(name) = token.as_ref() {
            if name == "model" {
                consume(lexer)?;
            }
        }

        let definitions = parse_list(lexer, &mut loc)?;

        Ok(Located::new(Model(definitions), loc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Lexer;
    use source_span::Position;

    fn lexer(
        input: &str,
    ) -> Peekable<Lexer<impl Iterator<Item = std::io::Result<char>> + '_>> {
        Lexer::new(input.chars().map(Ok), Position::default()).peekable()
    }

    #[test]
    fn acknowledgements() {
        assert_eq!(
            *GenResponse::parse(&mut lexer("success")).unwrap(),
            GenResponse::Success
        );
        assert_eq!(
            *GenResponse::parse(&mut lexer("unsupported")).unwrap(),
            GenResponse::Unsupported
        );
        assert_eq!(
            *GenResponse::parse(&mut lexer("(error \"out of scope\")")).unwrap(),
            GenResponse::Error("out of scope".to_string())
        );
    }

    #[test]
    fn check_sat_answers() {
        assert_eq!(*CheckSat::parse(&mut lexer("sat")).unwrap(), CheckSat::Sat);
        assert_eq!(*CheckSat::parse(&mut lexer("unsat")).unwrap(), CheckSat::Unsat);
        assert_eq!(
            *CheckSat::parse(&mut lexer("unknown")).unwrap(),
            CheckSat::Unknown
        );
    }

    #[test]
    fn check_sat_error_answer_is_a_server_error() {
        let err = CheckSat::parse(&mut lexer("(error \"timeout\")"))
            .err()
            .expect("must fail");
        assert!(matches!(err.into_inner(), Error::Server(msg) if msg == "timeout"));
    }

    #[test]
    fn assignment_pairs() {
        let a = Assignment::parse(&mut lexer("((p true) (q false))")).unwrap();
        assert_eq!(a.0.len(), 2);
        assert_eq!(*a.0[0].0, Symbol::new("p"));
        assert!(a.0[0].1);
        assert!(!a.0[1].1);
        assert_eq!(a.to_string(), "((p true) (q false))");
    }

    #[test]
    fn valuation_requires_a_pair() {
        assert!(Valuation::parse(&mut lexer("()")).is_err());
    }

    #[test]
    fn info_items() {
        let info = Info::parse(&mut lexer(
            "(:name \"z3\" :error-behavior continued-execution :reason-unknown memout)",
        ))
        .unwrap();
        assert_eq!(info.0.len(), 3);
        assert_eq!(
            info.to_string(),
            "(:name \"z3\" :error-behavior continued-execution :reason-unknown memout)"
        );
    }

    #[test]
    fn model_with_and_without_head() {
        let with = Model::parse(&mut lexer("(model (define-fun x () Int 1))")).unwrap();
        let without = Model::parse(&mut lexer("((define-fun x () Int 1))")).unwrap();
        assert_eq!(*with, *without);
        assert_eq!(with.to_string(), "(model\n(define-fun x () Int 1)\n)");
    }
}
