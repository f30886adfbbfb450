use std::fmt;
use std::io;

use source_span::Position;
use utf8_decode::UnsafeDecoder;

pub mod location;
pub use location::*;

pub mod syntax;
pub use syntax::{DeepPrint, Lexer, Parsable, Print};

pub use syntax::ast;
pub use syntax::response;

pub mod client;
pub use client::Solver;

/**
 * Printable list.
 */
pub(crate) struct PList<'a, T: 'a>(pub &'a Vec<T>);

impl<'a, T: 'a + fmt::Display> fmt::Display for PList<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.split_first() {
            Some((e, list)) => {
                e.fmt(f)?;
                for e in list.iter() {
                    write!(f, " ")?;
                    e.fmt(f)?
                }
            }
            None => ()
        }

        Ok(())
    }
}

/**
 * Token stream over a byte reader, decoding UTF-8 on the fly.
 */
pub fn tokenize<R: io::Read>(input: R) -> Lexer<UnsafeDecoder<io::Bytes<R>>> {
    Lexer::new(UnsafeDecoder::new(input.bytes()), Position::default())
}

macro_rules! parse_entry {
    ($($name:ident, $from_str:ident => $ty:ty),* $(,)?) => {$(
        pub fn $name<R: io::Read>(input: R) -> syntax::Result<Located<$ty>> {
            <$ty as Parsable>::parse(&mut tokenize(input).peekable())
        }

        pub fn $from_str(input: &str) -> syntax::Result<Located<$ty>> {
            let chars = input.chars().map(io::Result::Ok);
            <$ty as Parsable>::parse(&mut Lexer::new(chars, Position::default()).peekable())
        }
    )*};
}

parse_entry! {
    parse_term, parse_term_from_str => ast::Term,
    parse_sort, parse_sort_from_str => ast::Sort,
    parse_command, parse_command_from_str => ast::Command,
    parse_script, parse_script_from_str => ast::Script,
    parse_gen_response, parse_gen_response_from_str => response::GenResponse,
    parse_check_sat_response, parse_check_sat_response_from_str => response::CheckSat,
    parse_get_assertions_response, parse_get_assertions_response_from_str => response::Assertions,
    parse_get_assignment_response, parse_get_assignment_response_from_str => response::Assignment,
    parse_get_value_response, parse_get_value_response_from_str => response::Valuation,
    parse_get_proof_response, parse_get_proof_response_from_str => response::Proof,
    parse_get_unsat_core_response, parse_get_unsat_core_response_from_str => response::UnsatCore,
    parse_get_option_response, parse_get_option_response_from_str => response::OptionValue,
    parse_get_info_response, parse_get_info_response_from_str => response::Info,
    parse_get_model_response, parse_get_model_response_from_str => response::Model,
}
