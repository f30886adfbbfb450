use crate::syntax::{Attribute, NonEmpty, SExpr, Symbol, Term};
use crate::Located;

/// (check-sat) command response.
/// <check_sat_response> ::= sat | unsat | unknown
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CheckSat {
    Sat,
    Unsat,
    Unknown
}

/// Response of the commands that only acknowledge.
/// <general_response> ::= success | unsupported | ( error <string> )
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum GenResponse {
    Success,
    Unsupported,
    Error(String)
}

/// (get-assertions) command response.
/// <get_assertions_response> ::= ( <term>* )
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Assertions(pub Vec<Located<Term>>);

/// (get-assignment) command response.
/// <get_assignment_response> ::= ( ( <symbol> <b_value> )* )
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Assignment(pub Vec<(Located<Symbol>, bool)>);

/// (get-value) command response.
/// <get_value_response> ::= ( ( <term> <term> )+ )
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Valuation(pub NonEmpty<(Located<Term>, Located<Term>)>);

/// (get-proof) command response: one S-expression, solver-defined.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Proof(pub Located<SExpr>);

/// (get-unsat-core) command response.
/// <get_unsat_core_response> ::= ( <symbol>* )
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct UnsatCore(pub Vec<Located<Symbol>>);

/// (get-option) command response: the option value as an S-expression.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct OptionValue(pub Located<SExpr>);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorBehavior {
    ImmediateExit,
    ContinuedExecution
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ReasonUnknown {
    Memout,
    Incomplete
}

/// One item of a (get-info) command response.
/// <info_response> ::= :error-behavior <error-behavior>
///                   | :name <string> | :authors <string> | :version <string>
///                   | :reason-unknown <reason-unknown>
///                   | <attribute>
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum InfoResponse {
    ErrorBehavior(ErrorBehavior),
    Name(String),
    Authors(String),
    Version(String),
    ReasonUnknown(ReasonUnknown),
    Attr(Attribute)
}

/// (get-info) command response.
/// <get_info_response> ::= ( <info_response>+ )
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Info(pub NonEmpty<Located<InfoResponse>>);

/// (get-model) command response. Each entry is an S-expression; commands
/// and terms lower into `SExpr` structurally, so definitions embed as-is.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Model(pub Vec<Located<SExpr>>);

/**
 * Any solver answer, as returned by the process driver. The parser entry
 * points stay per-kind since the same text reads differently depending on
 * the command it answers.
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Response {
    Success,
    Unsupported,
    Error(String),
    CheckSat(CheckSat),
    Assertions(Assertions),
    Assignment(Assignment),
    Valuation(Valuation),
    Proof(Proof),
    UnsatCore(UnsatCore),
    OptionValue(OptionValue),
    Info(Info),
    Model(Model)
}

impl From<GenResponse> for Response {
    fn from(r: GenResponse) -> Response {
        match r {
            GenResponse::Success => Response::Success,
            GenResponse::Unsupported => Response::Unsupported,
            GenResponse::Error(msg) => Response::Error(msg)
        }
    }
}
