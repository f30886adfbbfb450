use std::fmt;

use super::*;
use crate::syntax::ast::write_string_literal;
use crate::PList;

impl fmt::Display for CheckSat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckSat::Sat => write!(f, "sat"),
            CheckSat::Unsat => write!(f, "unsat"),
            CheckSat::Unknown => write!(f, "unknown")
        }
    }
}

impl fmt::Display for GenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenResponse::Success => write!(f, "success"),
            GenResponse::Unsupported => write!(f, "unsupported"),
            GenResponse::Error(msg) => {
                write!(f, "(error ")?;
                write_string_literal(f, msg)?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Assertions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", PList(&self.0))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (id, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "({} {})", id, value)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Valuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (term, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "({} {})", term, value)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for UnsatCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", PList(&self.0))
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for ErrorBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBehavior::ImmediateExit => write!(f, "immediate-exit"),
            ErrorBehavior::ContinuedExecution => write!(f, "continued-execution")
        }
    }
}

impl fmt::Display for ReasonUnknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonUnknown::Memout => write!(f, "memout"),
            ReasonUnknown::Incomplete => write!(f, "incomplete")
        }
    }
}

impl fmt::Display for InfoResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use InfoResponse::*;
        match self {
            ErrorBehavior(b) => write!(f, ":error-behavior {}", b),
            Name(s) => {
                write!(f, ":name ")?;
                write_string_literal(f, s)
            }
            Authors(s) => {
                write!(f, ":authors ")?;
                write_string_literal(f, s)
            }
            Version(s) => {
                write!(f, ":version ")?;
                write_string_literal(f, s)
            }
            ReasonUnknown(r) => write!(f, ":reason-unknown {}", r),
            Attr(a) => a.fmt(f)
        }
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(model")?;
        for definition in &self.0 {
            write!(f, "\n{}", definition)?;
        }
        write!(f, "\n)")
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Response::*;
        match self {
            Success => write!(f, "success"),
            Unsupported => write!(f, "unsupported"),
            Error(msg) => {
                write!(f, "(error ")?;
                write_string_literal(f, msg)?;
                write!(f, ")")
            }
            CheckSat(r) => r.fmt(f),
            Assertions(r) => r.fmt(f),
            Assignment(r) => r.fmt(f),
            Valuation(r) => r.fmt(f),
            Proof(r) => r.fmt(f),
            UnsatCore(r) => r.fmt(f),
            OptionValue(r) => r.fmt(f),
            Info(r) => r.fmt(f),
            Model(r) => r.fmt(f)
        }
    }
}
