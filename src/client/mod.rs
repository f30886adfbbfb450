use std::io::{self, Read, Write};
use std::iter::Peekable;
use std::process::{self, Child, ChildStdout, Stdio};

use log::{debug, warn};
use source_span::Position;
use utf8_decode::UnsafeDecoder;

use crate::syntax::response::{
    Assertions, Assignment, CheckSat, GenResponse, Info, Model, OptionValue, Proof, Response,
    UnsatCore, Valuation,
};
use crate::syntax::{
    Command, DeepPrint, Error, InfoFlag, Keyword, Lexer, NonEmpty, Parsable, SmtOption, Symbol,
    Term,
};
use crate::Located;

/**
 * Handle on a running solver process speaking SMT-LIB 2 over its standard
 * streams.
 *
 * Each command is printed followed by a newline and a flush, then answered
 * by the response parser matching the command kind. A parse or IO failure
 * while reading becomes an `Error` response, except for `check-sat` where
 * it degrades to `unknown`.
 */
pub struct Solver {
    server: Child,
}

impl Solver {
    /**
     * Spawn the solver with piped standard streams.
     *
     * `:print-success` is switched on right away so that every later
     * command has a readable acknowledgement.
     */
    pub fn spawn(mut command: process::Command) -> io::Result<Solver> {
        let server = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let mut solver = Solver { server: server };

        let handshake = solver.issue(&Command::SetOption(
            SmtOption::PrintSuccess(true).into(),
        ));
        if let Response::Error(message) = &handshake {
            warn!("solver rejected :print-success: {}", message);
        }

        Ok(solver)
    }

    fn lexer(
        &mut self,
    ) -> Peekable<Lexer<UnsafeDecoder<io::Bytes<&mut ChildStdout>>>> {
        Lexer::new(
            UnsafeDecoder::new(self.server.stdout.as_mut().unwrap().by_ref().bytes()),
            Position::default(),
        )
        .peekable()
    }

    fn send(&mut self, command: &Command) -> io::Result<()> {
        debug!("-> {}", DeepPrint(command));
        let stdin = self.server.stdin.as_mut().unwrap();
        write!(stdin, "{}\n", DeepPrint(command))?;
        stdin.flush()
    }

    /**
     * Send a command and read the response its kind calls for.
     */
    pub fn issue(&mut self, command: &Command) -> Response {
        if let Err(e) = self.send(command) {
            return Response::Error(e.to_string());
        }
        let response = self.read_response(command);
        debug!("<- {}", response);
        response
    }

    fn read_response(&mut self, command: &Command) -> Response {
        let mut lexer = self.lexer();
        match command {
            Command::CheckSat => match CheckSat::parse(&mut lexer) {
                Ok(r) => Response::CheckSat(r.into_inner()),
                Err(_) => Response::CheckSat(CheckSat::Unknown),
            },
            Command::GetAssertions => match Assertions::parse(&mut lexer) {
                Ok(r) => Response::Assertions(r.into_inner()),
                Err(e) => error_response(e),
            },
            Command::GetAssignment => match Assignment::parse(&mut lexer) {
                Ok(r) => Response::Assignment(r.into_inner()),
                Err(e) => error_response(e),
            },
            Command::GetValue(_) => match Valuation::parse(&mut lexer) {
                Ok(r) => Response::Valuation(r.into_inner()),
                Err(e) => error_response(e),
            },
            Command::GetProof => match Proof::parse(&mut lexer) {
                Ok(r) => Response::Proof(r.into_inner()),
                Err(e) => error_response(e),
            },
            Command::GetUnsatCore => match UnsatCore::parse(&mut lexer) {
                Ok(r) => Response::UnsatCore(r.into_inner()),
                Err(e) => error_response(e),
            },
            Command::GetOption(_) => match OptionValue::parse(&mut lexer) {
                Ok(r) => Response::OptionValue(r.into_inner()),
                Err(e) => error_response(e),
            },
            Command::GetInfo(_) => match Info::parse(&mut lexer) {
                Ok(r) => Response::Info(r.into_inner()),
                Err(e) => error_response(e),
            },
            Command::GetModel => match Model::parse(&mut lexer) {
                Ok(r) => Response::Model(r.into_inner()),
                Err(e) => error_response(e),
            },
            _ => match GenResponse::parse(&mut lexer) {
                Ok(r) => r.into_inner().into(),
                Err(e) => error_response(e),
            },
        }
    }

    pub fn set_logic<L: Into<Symbol>>(&mut self, logic: L) -> Response {
        let logic: Symbol = logic.into();
        self.issue(&Command::SetLogic(logic.into()))
    }

    pub fn set_option(&mut self, option: SmtOption) -> Response {
        self.issue(&Command::SetOption(option.into()))
    }

    pub fn assert(&mut self, term: Located<Term>) -> Response {
        self.issue(&Command::Assert(term))
    }

    pub fn check_sat(&mut self) -> CheckSat {
        match self.issue(&Command::CheckSat) {
            Response::CheckSat(r) => r,
            _ => CheckSat::Unknown,
        }
    }

    pub fn get_value(&mut self, terms: NonEmpty<Located<Term>>) -> Response {
        self.issue(&Command::GetValue(terms))
    }

    pub fn get_info(&mut self, flag: InfoFlag) -> Response {
        self.issue(&Command::GetInfo(flag.into()))
    }

    pub fn get_option<K: Into<Keyword>>(&mut self, key: K) -> Response {
        let key: Keyword = key.into();
        self.issue(&Command::GetOption(key.into()))
    }

    pub fn get_model(&mut self) -> Response {
        self.issue(&Command::GetModel)
    }

    /**
     * Print `(exit)`, close the solver's input and wait for it to
     * terminate.
     */
    pub fn exit(mut self) -> io::Result<process::ExitStatus> {
        self.send(&Command::Exit)?;
        drop(self.server.stdin.take());
        self.server.wait()
    }
}

fn error_response(error: Located<Error>) -> Response {
    match error.into_inner() {
        Error::Server(message) => Response::Error(message),
        other => Response::Error(other.to_string()),
    }
}
