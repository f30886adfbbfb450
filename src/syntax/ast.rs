use std::fmt;

use crate::{Located, PList};

use super::token::is_symbol_char;

/**
 * Numeral constant.
 *
 * <numeral> ::= 0 | [1-9][0-9]*
 */
pub type Numeral = num_bigint::BigUint;

/**
 * Decimal constant. The fractional digit sequence is kept verbatim so that
 * `1.5` and `1.50` stay distinct values and print back exactly.
 *
 * <decimal> ::= <numeral>.[0-9]+
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Decimal {
    pub integer: Numeral,
    pub fraction: String
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.integer, self.fraction)
    }
}

/**
 * Hexadecimal constant, stored as nibble values in source order.
 * Lexing normalizes digit case, so `#xaB` and `#xAB` are the same value;
 * printing is always uppercase.
 *
 * <hexadecimal> ::= #x[0-9a-fA-F]+
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Hexadecimal(pub Vec<u8>);

impl fmt::Display for Hexadecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#x")?;
        for digit in &self.0 {
            write!(f, "{:X}", digit)?;
        }
        Ok(())
    }
}

/**
 * Binary constant. The bit at index 0 is the first bit of the source text,
 * and the length is significant: `#b01` and `#b1` are different values.
 *
 * <binary> ::= #b[01]+
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Binary(pub Vec<bool>);

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#b")?;
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Write `s` as a string literal, escaping `"` and `\` the way the lexer
/// undoes them.
pub(crate) fn write_string_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    use fmt::Write;
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => f.write_char(c)?
        }
    }
    f.write_char('"')
}

/**
 * Literal constant.
 *
 * <spec_constant> ::= <numeral> | <decimal> | <hexadecimal> | <binary> | <string>
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Constant {
    Numeral(Numeral),
    Decimal(Decimal),
    Hexadecimal(Hexadecimal),
    Binary(Binary),
    String(String)
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Constant::*;
        match self {
            Numeral(n) => n.fmt(f),
            Decimal(d) => d.fmt(f),
            Hexadecimal(h) => h.fmt(f),
            Binary(b) => b.fmt(f),
            String(s) => write_string_literal(f, s)
        }
    }
}

/**
 * Symbol.
 *
 * <symbol> ::= <simple_symbol> | <quoted_symbol>
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Symbol {
    pub id: String
}

impl Symbol {
    pub fn new<S: Into<String>>(id: S) -> Symbol {
        Symbol { id: id.into() }
    }

    /// Whether the symbol can be printed without `|` quotes: non-empty,
    /// not starting with a digit, every char in the simple-symbol alphabet.
    pub fn is_simple(&self) -> bool {
        let mut chars = self.id.chars();
        match chars.next() {
            None => false,
            Some(c) if c.is_ascii_digit() => false,
            Some(c) if !is_symbol_char(c) => false,
            Some(_) => self.id.chars().all(is_symbol_char)
        }
    }
}

impl From<&str> for Symbol {
    fn from(id: &str) -> Symbol {
        Symbol::new(id)
    }
}

impl From<String> for Symbol {
    fn from(id: String) -> Symbol {
        Symbol::new(id)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.id == other
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        if self.is_simple() {
            f.write_str(&self.id)
        } else {
            f.write_char('|')?;
            for c in self.id.chars() {
                if c == '|' || c == '\\' {
                    f.write_char('\\')?;
                }
                f.write_char(c)?;
            }
            f.write_char('|')
        }
    }
}

/**
 * Keyword.
 *
 * <keyword> ::= :<symbol body>
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Keyword {
    pub id: String
}

impl Keyword {
    pub fn new<S: Into<String>>(id: S) -> Keyword {
        Keyword { id: id.into() }
    }
}

impl From<&str> for Keyword {
    fn from(id: &str) -> Keyword {
        Keyword::new(id)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.id)
    }
}

/**
 * Identifier.
 *
 * <identifier> ::= <symbol> | ( _ <symbol> <numeral>+ )
 *
 * An empty index list is the plain-symbol form.
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Ident {
    pub id: Located<Symbol>,
    pub indexes: Vec<Located<Numeral>>
}

impl From<Symbol> for Ident {
    fn from(sym: Symbol) -> Ident {
        Ident {
            id: sym.into(),
            indexes: Vec::new()
        }
    }
}

impl From<&str> for Ident {
    fn from(id: &str) -> Ident {
        Symbol::from(id).into()
    }
}

impl From<Located<Symbol>> for Located<Ident> {
    fn from(sym: Located<Symbol>) -> Self {
        let span = sym.span();
        Located::new(
            Ident {
                id: sym,
                indexes: Vec::new()
            },
            span
        )
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.indexes.is_empty() {
            self.id.fmt(f)
        } else {
            write!(f, "(_ {} {})", self.id, PList(&self.indexes))
        }
    }
}

/**
 * Identifier with an optional sort coercion.
 *
 * <qual_identifier> ::= <identifier> | ( as <identifier> <sort> )
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct QualIdent {
    pub id: Located<Ident>,
    pub sort: Option<Located<Sort>>
}

impl From<Ident> for QualIdent {
    fn from(id: Ident) -> QualIdent {
        QualIdent {
            id: id.into(),
            sort: None
        }
    }
}

impl From<Symbol> for QualIdent {
    fn from(sym: Symbol) -> QualIdent {
        Ident::from(sym).into()
    }
}

impl From<&str> for QualIdent {
    fn from(id: &str) -> QualIdent {
        Ident::from(id).into()
    }
}

impl fmt::Display for QualIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sort {
            None => self.id.fmt(f),
            Some(sort) => write!(f, "(as {} {})", self.id, sort)
        }
    }
}

/**
 * Sort.
 *
 * <sort> ::= <identifier> | ( <identifier> <sort>+ )
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Sort {
    pub id: Located<Ident>,
    pub parameters: Vec<Located<Sort>>
}

impl From<Ident> for Sort {
    fn from(id: Ident) -> Sort {
        Sort {
            id: id.into(),
            parameters: Vec::new()
        }
    }
}

impl From<&str> for Sort {
    fn from(id: &str) -> Sort {
        Ident::from(id).into()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parameters.is_empty() {
            self.id.fmt(f)
        } else {
            write!(f, "({} {})", self.id, PList(&self.parameters))
        }
    }
}

/**
 * List with at least one element.
 *
 * The wire grammar requires non-empty lists under binders, applications and
 * a few command arguments; the head/tail split makes that unforgeable.
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct NonEmpty<T> {
    pub head: T,
    pub tail: Vec<T>
}

impl<T> NonEmpty<T> {
    pub fn new(head: T) -> NonEmpty<T> {
        NonEmpty {
            head: head,
            tail: Vec::new()
        }
    }

    /// `None` when the list is empty.
    pub fn from_vec(mut list: Vec<T>) -> Option<NonEmpty<T>> {
        if list.is_empty() {
            None
        } else {
            let head = list.remove(0);
            Some(NonEmpty { head: head, tail: list })
        }
    }

    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }
}

impl<T: fmt::Display> fmt::Display for NonEmpty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.head.fmt(f)?;
        for e in &self.tail {
            write!(f, " ")?;
            e.fmt(f)?
        }
        Ok(())
    }
}

/**
 * Term.
 *
 * <term> ::= <spec_constant>
 *          | <qual_identifier>
 *          | ( <qual_identifier> <term>+ )
 *          | ( let ( <var_binding>+ ) <term> )
 *          | ( forall ( <sorted_var>+ ) <term> )
 *          | ( exists ( <sorted_var>+ ) <term> )
 *          | ( ! <term> <attribute>+ )
 *
 * There is no zero-argument application: such a term is a bare
 * `<qual_identifier>`, and the constructor shape keeps it that way.
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Term {
    Const(Constant),
    Ident(QualIdent),
    Apply {
        fun: Located<QualIdent>,
        args: Box<NonEmpty<Located<Term>>>
    },
    Let {
        bindings: NonEmpty<Located<Binding>>,
        body: Box<Located<Term>>
    },
    Forall {
        vars: NonEmpty<Located<SortedVar>>,
        body: Box<Located<Term>>
    },
    Exists {
        vars: NonEmpty<Located<SortedVar>>,
        body: Box<Located<Term>>
    },
    Annotated {
        term: Box<Located<Term>>,
        attributes: NonEmpty<Located<Attribute>>
    }
}

impl From<QualIdent> for Term {
    fn from(id: QualIdent) -> Term {
        Term::Ident(id)
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Term {
        Term::Const(c)
    }
}

impl From<&str> for Term {
    fn from(id: &str) -> Term {
        Term::Ident(id.into())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Term::*;
        match self {
            Const(c) => c.fmt(f),
            Ident(id) => id.fmt(f),
            Apply { fun, args } => write!(f, "({} {})", fun, args),
            Let { bindings, body } => write!(f, "(let ({}) {})", bindings, body),
            Forall { vars, body } => write!(f, "(forall ({}) {})", vars, body),
            Exists { vars, body } => write!(f, "(exists ({}) {})", vars, body),
            Annotated { term, attributes } => write!(f, "(! {} {})", term, attributes)
        }
    }
}

/**
 * <var_binding> ::= ( <symbol> <term> )
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Binding {
    pub id: Located<Symbol>,
    pub value: Box<Located<Term>>
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.id, self.value)
    }
}

/**
 * <sorted_var> ::= ( <symbol> <sort> )
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SortedVar {
    pub id: Located<Symbol>,
    pub sort: Located<Sort>
}

impl fmt::Display for SortedVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.id, self.sort)
    }
}

/**
 * <attribute> ::= <keyword> | <keyword> <attribute_value>
 *
 * The value, when present, is an arbitrary S-expression.
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Attribute {
    pub key: Located<Keyword>,
    pub value: Option<Located<SExpr>>
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {}", self.key, value),
            None => self.key.fmt(f)
        }
    }
}

/**
 * <s_expr> ::= <spec_constant> | <symbol> | <keyword> | ( <s_expr>* )
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum SExpr {
    Const(Constant),
    Sym(Symbol),
    Keyword(Keyword),
    List(Vec<Located<SExpr>>)
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SExpr::*;
        match self {
            Const(c) => c.fmt(f),
            Sym(s) => s.fmt(f),
            Keyword(k) => k.fmt(f),
            List(l) => write!(f, "({})", PList(l))
        }
    }
}

fn sexpr_sym(name: &str) -> Located<SExpr> {
    SExpr::Sym(Symbol::new(name)).into()
}

fn sexpr_bool(value: bool) -> Located<SExpr> {
    sexpr_sym(if value { "true" } else { "false" })
}

fn push_attribute(exprs: &mut Vec<Located<SExpr>>, attr: &Attribute) {
    let key = attr.key.as_ref().clone();
    exprs.push(Located::new(SExpr::Keyword(key), attr.key.span()));
    if let Some(value) = &attr.value {
        exprs.push(value.clone());
    }
}

impl From<&Ident> for SExpr {
    fn from(id: &Ident) -> SExpr {
        if id.indexes.is_empty() {
            SExpr::Sym(id.id.as_ref().clone())
        } else {
            let mut exprs = Vec::with_capacity(id.indexes.len() + 2);
            exprs.push(sexpr_sym("_"));
            exprs.push(Located::new(
                SExpr::Sym(id.id.as_ref().clone()),
                id.id.span()
            ));
            for i in &id.indexes {
                exprs.push(Located::new(
                    SExpr::Const(Constant::Numeral(i.as_ref().clone())),
                    i.span()
                ));
            }
            SExpr::List(exprs)
        }
    }
}

impl From<&QualIdent> for SExpr {
    fn from(id: &QualIdent) -> SExpr {
        match &id.sort {
            None => SExpr::from(id.id.as_ref()),
            Some(sort) => SExpr::List(vec![
                sexpr_sym("as"),
                Located::new(SExpr::from(id.id.as_ref()), id.id.span()),
                Located::new(SExpr::from(sort.as_ref()), sort.span())
            ])
        }
    }
}

impl From<&Sort> for SExpr {
    fn from(sort: &Sort) -> SExpr {
        if sort.parameters.is_empty() {
            SExpr::from(sort.id.as_ref())
        } else {
            let mut exprs = Vec::with_capacity(sort.parameters.len() + 1);
            exprs.push(Located::new(SExpr::from(sort.id.as_ref()), sort.id.span()));
            for p in &sort.parameters {
                exprs.push(Located::new(SExpr::from(p.as_ref()), p.span()));
            }
            SExpr::List(exprs)
        }
    }
}

impl From<&Binding> for SExpr {
    fn from(binding: &Binding) -> SExpr {
        SExpr::List(vec![
            Located::new(SExpr::Sym(binding.id.as_ref().clone()), binding.id.span()),
            Located::new(SExpr::from(&**binding.value), binding.value.span())
        ])
    }
}

impl From<&SortedVar> for SExpr {
    fn from(var: &SortedVar) -> SExpr {
        SExpr::List(vec![
            Located::new(SExpr::Sym(var.id.as_ref().clone()), var.id.span()),
            Located::new(SExpr::from(var.sort.as_ref()), var.sort.span())
        ])
    }
}

/// Structural lowering of a term into the S-expression it prints as.
/// `SExpr::from(&t).to_string()` equals `t.to_string()`, which lets model
/// producers embed terms in responses without a dedicated wrapper case.
impl From<&Term> for SExpr {
    fn from(term: &Term) -> SExpr {
        use Term::*;
        match term {
            Const(c) => SExpr::Const(c.clone()),
            Ident(id) => SExpr::from(id),
            Apply { fun, args } => {
                let mut exprs = Vec::with_capacity(args.len() + 1);
                exprs.push(Located::new(SExpr::from(fun.as_ref()), fun.span()));
                for t in args.iter() {
                    exprs.push(Located::new(SExpr::from(t.as_ref()), t.span()));
                }
                SExpr::List(exprs)
            }
            Let { bindings, body } => {
                let list = bindings
                    .iter()
                    .map(|b| Located::new(SExpr::from(b.as_ref()), b.span()))
                    .collect();
                SExpr::List(vec![
                    sexpr_sym("let"),
                    SExpr::List(list).into(),
                    Located::new(SExpr::from(&***body), body.span())
                ])
            }
            Forall { vars, body } => quantifier_sexpr("forall", vars, body),
            Exists { vars, body } => quantifier_sexpr("exists", vars, body),
            Annotated { term, attributes } => {
                let mut exprs = Vec::with_capacity(2 + 2 * attributes.len());
                exprs.push(sexpr_sym("!"));
                exprs.push(Located::new(SExpr::from(&***term), term.span()));
                for a in attributes.iter() {
                    push_attribute(&mut exprs, a);
                }
                SExpr::List(exprs)
            }
        }
    }
}

fn quantifier_sexpr(
    head: &str,
    vars: &NonEmpty<Located<SortedVar>>,
    body: &Located<Term>
) -> SExpr {
    let list = vars
        .iter()
        .map(|v| Located::new(SExpr::from(v.as_ref()), v.span()))
        .collect();
    SExpr::List(vec![
        sexpr_sym(head),
        SExpr::List(list).into(),
        Located::new(SExpr::from(body.as_ref()), body.span())
    ])
}

/**
 * One datatype of a `declare-datatypes` command.
 *
 * <datatype_dec> ::= ( <symbol> <constructor_dec>+ )
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DataTypeDeclaration {
    pub id: Located<Symbol>,
    pub constructors: NonEmpty<Located<ConstructorDeclaration>>
}

impl fmt::Display for DataTypeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.id, self.constructors)
    }
}

/**
 * <constructor_dec> ::= ( <symbol> <selector_dec>* )
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ConstructorDeclaration {
    pub id: Located<Symbol>,
    pub selectors: Vec<Located<SelectorDeclaration>>
}

impl ConstructorDeclaration {
    pub fn simple<Id: Into<Symbol>>(id: Id) -> ConstructorDeclaration {
        let id: Symbol = id.into();
        ConstructorDeclaration {
            id: id.into(),
            selectors: Vec::new()
        }
    }
}

impl fmt::Display for ConstructorDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.selectors.is_empty() {
            write!(f, "({})", self.id)
        } else {
            write!(f, "({} {})", self.id, PList(&self.selectors))
        }
    }
}

/**
 * <selector_dec> ::= ( <symbol> <sort> )
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SelectorDeclaration {
    pub id: Located<Symbol>,
    pub sort: Located<Sort>
}

impl fmt::Display for SelectorDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.id, self.sort)
    }
}

/**
 * Argument to `set-option`. The standard options are first-class; anything
 * else travels as a raw attribute.
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum SmtOption {
    PrintSuccess(bool),
    ExpandDefinitions(bool),
    InteractiveMode(bool),
    ProduceProofs(bool),
    ProduceUnsatCores(bool),
    ProduceModels(bool),
    ProduceAssignments(bool),
    RegularOutputChannel(String),
    DiagnosticOutputChannel(String),
    RandomSeed(Numeral),
    Verbosity(Numeral),
    Attr(Attribute)
}

impl fmt::Display for SmtOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SmtOption::*;
        match self {
            PrintSuccess(b) => write!(f, ":print-success {}", b),
            ExpandDefinitions(b) => write!(f, ":expand-definitions {}", b),
            InteractiveMode(b) => write!(f, ":interactive-mode {}", b),
            ProduceProofs(b) => write!(f, ":produce-proofs {}", b),
            ProduceUnsatCores(b) => write!(f, ":produce-unsat-cores {}", b),
            ProduceModels(b) => write!(f, ":produce-models {}", b),
            ProduceAssignments(b) => write!(f, ":produce-assignments {}", b),
            RegularOutputChannel(s) => {
                write!(f, ":regular-output-channel ")?;
                write_string_literal(f, s)
            }
            DiagnosticOutputChannel(s) => {
                write!(f, ":diagnostic-output-channel ")?;
                write_string_literal(f, s)
            }
            RandomSeed(n) => write!(f, ":random-seed {}", n),
            Verbosity(n) => write!(f, ":verbosity {}", n),
            Attr(a) => a.fmt(f)
        }
    }
}

/**
 * Argument to `get-info`.
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum InfoFlag {
    ErrorBehavior,
    Name,
    Authors,
    Version,
    Status,
    ReasonUnknown,
    AllStatistics,
    Keyword(String)
}

impl fmt::Display for InfoFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use InfoFlag::*;
        match self {
            ErrorBehavior => write!(f, ":error-behavior"),
            Name => write!(f, ":name"),
            Authors => write!(f, ":authors"),
            Version => write!(f, ":version"),
            Status => write!(f, ":status"),
            ReasonUnknown => write!(f, ":reason-unknown"),
            AllStatistics => write!(f, ":all-statistics"),
            Keyword(name) => write!(f, ":{}", name)
        }
    }
}

/**
 * Command.
 *
 * One variant per standard command; anything else a script may contain is a
 * `NonStandard` S-expression that prints verbatim.
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Command {
    SetLogic(Located<Symbol>),
    SetOption(Located<SmtOption>),
    SetInfo(Located<Attribute>),
    DeclareSort(Located<Symbol>, Located<Numeral>),
    DefineSort(Located<Symbol>, Vec<Located<Symbol>>, Located<Sort>),
    DeclareFun(Located<Symbol>, Vec<Located<Sort>>, Located<Sort>),
    DefineFun(
        Located<Symbol>,
        Vec<Located<SortedVar>>,
        Located<Sort>,
        Located<Term>
    ),
    Push(Located<Numeral>),
    Pop(Located<Numeral>),
    Assert(Located<Term>),
    CheckSat,
    GetAssertions,
    GetProof,
    GetUnsatCore,
    GetValue(NonEmpty<Located<Term>>),
    GetAssignment,
    GetOption(Located<Keyword>),
    GetInfo(Located<InfoFlag>),
    Exit,
    GetModel,
    DeclareDatatypes(NonEmpty<Located<DataTypeDeclaration>>),
    NonStandard(Located<SExpr>)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Command::*;
        match self {
            SetLogic(l) => write!(f, "(set-logic {})", l),
            SetOption(o) => write!(f, "(set-option {})", o),
            SetInfo(a) => write!(f, "(set-info {})", a),
            DeclareSort(id, arity) => write!(f, "(declare-sort {} {})", id, arity),
            DefineSort(id, params, sort) => {
                write!(f, "(define-sort {} ({}) {})", id, PList(params), sort)
            }
            DeclareFun(id, args, result) => {
                write!(f, "(declare-fun {} ({}) {})", id, PList(args), result)
            }
            DefineFun(id, vars, result, body) => {
                write!(f, "(define-fun {} ({}) {} {})", id, PList(vars), result, body)
            }
            Push(n) => write!(f, "(push {})", n),
            Pop(n) => write!(f, "(pop {})", n),
            Assert(t) => write!(f, "(assert {})", t),
            CheckSat => write!(f, "(check-sat)"),
            GetAssertions => write!(f, "(get-assertions)"),
            GetProof => write!(f, "(get-proof)"),
            GetUnsatCore => write!(f, "(get-unsat-core)"),
            GetValue(terms) => write!(f, "(get-value ({}))", terms),
            GetAssignment => write!(f, "(get-assignment)"),
            GetOption(k) => write!(f, "(get-option {})", k),
            GetInfo(flag) => write!(f, "(get-info {})", flag),
            Exit => write!(f, "(exit)"),
            GetModel => write!(f, "(get-model)"),
            DeclareDatatypes(decls) => write!(f, "(declare-datatypes () ({}))", decls),
            NonStandard(e) => e.fmt(f)
        }
    }
}

/// Structural lowering of a command into the S-expression it prints as.
impl From<&Command> for SExpr {
    fn from(command: &Command) -> SExpr {
        use Command::*;
        let mut exprs = Vec::new();
        match command {
            SetLogic(l) => {
                exprs.push(sexpr_sym("set-logic"));
                exprs.push(Located::new(SExpr::Sym(l.as_ref().clone()), l.span()));
            }
            SetOption(o) => {
                exprs.push(sexpr_sym("set-option"));
                push_option(&mut exprs, o);
            }
            SetInfo(a) => {
                exprs.push(sexpr_sym("set-info"));
                push_attribute(&mut exprs, a);
            }
            DeclareSort(id, arity) => {
                exprs.push(sexpr_sym("declare-sort"));
                exprs.push(Located::new(SExpr::Sym(id.as_ref().clone()), id.span()));
                exprs.push(Located::new(
                    SExpr::Const(Constant::Numeral(arity.as_ref().clone())),
                    arity.span()
                ));
            }
            DefineSort(id, params, sort) => {
                exprs.push(sexpr_sym("define-sort"));
                exprs.push(Located::new(SExpr::Sym(id.as_ref().clone()), id.span()));
                let list = params
                    .iter()
                    .map(|p| Located::new(SExpr::Sym(p.as_ref().clone()), p.span()))
                    .collect();
                exprs.push(SExpr::List(list).into());
                exprs.push(Located::new(SExpr::from(sort.as_ref()), sort.span()));
            }
            DeclareFun(id, args, result) => {
                exprs.push(sexpr_sym("declare-fun"));
                exprs.push(Located::new(SExpr::Sym(id.as_ref().clone()), id.span()));
                let list = args
                    .iter()
                    .map(|s| Located::new(SExpr::from(s.as_ref()), s.span()))
                    .collect();
                exprs.push(SExpr::List(list).into());
                exprs.push(Located::new(SExpr::from(result.as_ref()), result.span()));
            }
            DefineFun(id, vars, result, body) => {
                exprs.push(sexpr_sym("define-fun"));
                exprs.push(Located::new(SExpr::Sym(id.as_ref().clone()), id.span()));
                let list = vars
                    .iter()
                    .map(|v| Located::new(SExpr::from(v.as_ref()), v.span()))
                    .collect();
                exprs.push(SExpr::List(list).into());
                exprs.push(Located::new(SExpr::from(result.as_ref()), result.span()));
                exprs.push(Located::new(SExpr::from(body.as_ref()), body.span()));
            }
            Push(n) => {
                exprs.push(sexpr_sym("push"));
                exprs.push(Located::new(
                    SExpr::Const(Constant::Numeral(n.as_ref().clone())),
                    n.span()
                ));
            }
            Pop(n) => {
                exprs.push(sexpr_sym("pop"));
                exprs.push(Located::new(
                    SExpr::Const(Constant::Numeral(n.as_ref().clone())),
                    n.span()
                ));
            }
            Assert(t) => {
                exprs.push(sexpr_sym("assert"));
                exprs.push(Located::new(SExpr::from(t.as_ref()), t.span()));
            }
            CheckSat => exprs.push(sexpr_sym("check-sat")),
            GetAssertions => exprs.push(sexpr_sym("get-assertions")),
            GetProof => exprs.push(sexpr_sym("get-proof")),
            GetUnsatCore => exprs.push(sexpr_sym("get-unsat-core")),
            GetValue(terms) => {
                exprs.push(sexpr_sym("get-value"));
                let list = terms
                    .iter()
                    .map(|t| Located::new(SExpr::from(t.as_ref()), t.span()))
                    .collect();
                exprs.push(SExpr::List(list).into());
            }
            GetAssignment => exprs.push(sexpr_sym("get-assignment")),
            GetOption(k) => {
                exprs.push(sexpr_sym("get-option"));
                exprs.push(Located::new(SExpr::Keyword(k.as_ref().clone()), k.span()));
            }
            GetInfo(flag) => {
                exprs.push(sexpr_sym("get-info"));
                let name = flag.to_string();
                exprs.push(Located::new(
                    SExpr::Keyword(Keyword::new(&name[1..])),
                    flag.span()
                ));
            }
            Exit => exprs.push(sexpr_sym("exit")),
            GetModel => exprs.push(sexpr_sym("get-model")),
            DeclareDatatypes(decls) => {
                exprs.push(sexpr_sym("declare-datatypes"));
                exprs.push(SExpr::List(Vec::new()).into());
                let list = decls
                    .iter()
                    .map(|d| Located::new(datatype_sexpr(d), d.span()))
                    .collect();
                exprs.push(SExpr::List(list).into());
            }
            NonStandard(e) => return e.as_ref().clone()
        }
        SExpr::List(exprs)
    }
}

fn push_option(exprs: &mut Vec<Located<SExpr>>, option: &SmtOption) {
    use SmtOption::*;
    let (name, value) = match option {
        PrintSuccess(b) => ("print-success", sexpr_bool(*b)),
        ExpandDefinitions(b) => ("expand-definitions", sexpr_bool(*b)),
        InteractiveMode(b) => ("interactive-mode", sexpr_bool(*b)),
        ProduceProofs(b) => ("produce-proofs", sexpr_bool(*b)),
        ProduceUnsatCores(b) => ("produce-unsat-cores", sexpr_bool(*b)),
        ProduceModels(b) => ("produce-models", sexpr_bool(*b)),
        ProduceAssignments(b) => ("produce-assignments", sexpr_bool(*b)),
        RegularOutputChannel(s) => (
            "regular-output-channel",
            SExpr::Const(Constant::String(s.clone())).into()
        ),
        DiagnosticOutputChannel(s) => (
            "diagnostic-output-channel",
            SExpr::Const(Constant::String(s.clone())).into()
        ),
        RandomSeed(n) => ("random-seed", SExpr::Const(Constant::Numeral(n.clone())).into()),
        Verbosity(n) => ("verbosity", SExpr::Const(Constant::Numeral(n.clone())).into()),
        Attr(a) => {
            push_attribute(exprs, a);
            return;
        }
    };
    exprs.push(SExpr::Keyword(Keyword::new(name)).into());
    exprs.push(value);
}

fn datatype_sexpr(decl: &DataTypeDeclaration) -> SExpr {
    let mut exprs = Vec::with_capacity(decl.constructors.len() + 1);
    exprs.push(Located::new(
        SExpr::Sym(decl.id.as_ref().clone()),
        decl.id.span()
    ));
    for ctor in decl.constructors.iter() {
        let mut c = Vec::with_capacity(ctor.selectors.len() + 1);
        c.push(Located::new(SExpr::Sym(ctor.id.as_ref().clone()), ctor.id.span()));
        for sel in &ctor.selectors {
            c.push(Located::new(
                SExpr::List(vec![
                    Located::new(SExpr::Sym(sel.id.as_ref().clone()), sel.id.span()),
                    Located::new(SExpr::from(sel.sort.as_ref()), sel.sort.span())
                ]),
                sel.span()
            ));
        }
        exprs.push(Located::new(SExpr::List(c), ctor.span()));
    }
    SExpr::List(exprs)
}

/**
 * Whole script: an ordered command sequence. Prints one command per line,
 * each terminated by a newline.
 *
 * <script> ::= <command>*
 */
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Script(pub Vec<Located<Command>>);

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.0 {
            writeln!(f, "{}", command)?;
        }
        Ok(())
    }
}
