use std::fmt;

use super::ast::*;
use super::response;
use crate::Located;

/**
 * Depth-insensitive printer.
 *
 * `DeepPrint(&node)` displays exactly what `node` displays, but drives an
 * explicit work stack instead of recursing, so pathologically deep terms
 * (a binder chain tens of thousands of levels deep) print in constant
 * native-stack space. Flat leaves (symbols, keywords, constants, plain
 * identifiers) go through their `Display` impl directly.
 */
pub struct DeepPrint<'a, T: ?Sized>(pub &'a T);

/// A unit of pending work for the printer.
enum Frame<'a> {
    Str(&'static str),
    Atom(&'a dyn fmt::Display),
    Node(Kind<'a>)
}

/// What the stack-safe printer can be pointed at.
pub struct Node<'a>(Kind<'a>);

enum Kind<'a> {
    Atom(&'a dyn fmt::Display),
    Term(&'a Term),
    QualIdent(&'a QualIdent),
    Sort(&'a Sort),
    SExpr(&'a SExpr),
    Binding(&'a Binding),
    SortedVar(&'a SortedVar),
    Attribute(&'a Attribute),
    Option(&'a SmtOption),
    Command(&'a Command),
    Script(&'a Script),
    DataType(&'a DataTypeDeclaration),
    Constructor(&'a ConstructorDeclaration),
    Selector(&'a SelectorDeclaration),
    Assertions(&'a response::Assertions),
    Valuation(&'a response::Valuation),
    Info(&'a response::Info),
    InfoResponse(&'a response::InfoResponse),
    Model(&'a response::Model),
    Response(&'a response::Response)
}

pub trait Print {
    fn node(&self) -> Node<'_>;
}

impl<T: Print> Print for Located<T> {
    fn node(&self) -> Node<'_> {
        (**self).node()
    }
}

macro_rules! atom_print {
    ($($ty:ty),* $(,)?) => {$(
        impl Print for $ty {
            fn node(&self) -> Node<'_> {
                Node(Kind::Atom(self))
            }
        }
    )*};
}

macro_rules! node_print {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Print for $ty {
            fn node(&self) -> Node<'_> {
                Node(Kind::$kind(self))
            }
        }
    )*};
}

atom_print! {
    Symbol,
    Keyword,
    Constant,
    Ident,
    InfoFlag,
    response::CheckSat,
    response::GenResponse,
    response::Assignment,
    response::UnsatCore,
}

node_print! {
    Term => Term,
    QualIdent => QualIdent,
    Sort => Sort,
    SExpr => SExpr,
    Binding => Binding,
    SortedVar => SortedVar,
    Attribute => Attribute,
    SmtOption => Option,
    Command => Command,
    Script => Script,
    DataTypeDeclaration => DataType,
    ConstructorDeclaration => Constructor,
    SelectorDeclaration => Selector,
    response::Assertions => Assertions,
    response::Valuation => Valuation,
    response::Info => Info,
    response::InfoResponse => InfoResponse,
    response::Model => Model,
    response::Response => Response,
}

impl Print for response::Proof {
    fn node(&self) -> Node<'_> {
        Node(Kind::SExpr(&self.0))
    }
}

impl Print for response::OptionValue {
    fn node(&self) -> Node<'_> {
        Node(Kind::SExpr(&self.0))
    }
}

impl<'a, T: Print + ?Sized> fmt::Display for DeepPrint<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Frame::Node(self.0.node().0)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Str(text) => f.write_str(text)?,
                Frame::Atom(atom) => atom.fmt(f)?,
                Frame::Node(kind) => expand(kind, &mut stack)
            }
        }

        Ok(())
    }
}

/// Replace one node by the frames of its printed form, pushed in reverse
/// so that they pop in output order.
fn expand<'a>(kind: Kind<'a>, stack: &mut Vec<Frame<'a>>) {
    match kind {
        Kind::Atom(atom) => stack.push(Frame::Atom(atom)),

        Kind::Term(term) => match term {
            Term::Const(c) => stack.push(Frame::Atom(c)),
            Term::Ident(id) => stack.push(Frame::Node(Kind::QualIdent(id))),
            Term::Apply { fun, args } => {
                stack.push(Frame::Str(")"));
                for t in args.tail.iter().rev() {
                    stack.push(Frame::Node(Kind::Term(t)));
                    stack.push(Frame::Str(" "));
                }
                stack.push(Frame::Node(Kind::Term(&args.head)));
                stack.push(Frame::Str(" "));
                stack.push(Frame::Node(Kind::QualIdent(fun)));
                stack.push(Frame::Str("("));
            }
            Term::Let { bindings, body } => {
                stack.push(Frame::Str(")"));
                stack.push(Frame::Node(Kind::Term(body)));
                stack.push(Frame::Str(") "));
                for b in bindings.tail.iter().rev() {
                    stack.push(Frame::Node(Kind::Binding(b)));
                    stack.push(Frame::Str(" "));
                }
                stack.push(Frame::Node(Kind::Binding(&bindings.head)));
                stack.push(Frame::Str("(let ("));
            }
            Term::Forall { vars, body } => {
                expand_quantifier("(forall (", vars, body, stack);
            }
            Term::Exists { vars, body } => {
                expand_quantifier("(exists (", vars, body, stack);
            }
            Term::Annotated { term, attributes } => {
                stack.push(Frame::Str(")"));
                for a in attributes.tail.iter().rev() {
                    stack.push(Frame::Node(Kind::Attribute(a)));
                    stack.push(Frame::Str(" "));
                }
                stack.push(Frame::Node(Kind::Attribute(&attributes.head)));
                stack.push(Frame::Str(" "));
                stack.push(Frame::Node(Kind::Term(term)));
                stack.push(Frame::Str("(! "));
            }
        },

        Kind::QualIdent(id) => match &id.sort {
            None => stack.push(Frame::Atom(&id.id)),
            Some(sort) => {
                stack.push(Frame::Str(")"));
                stack.push(Frame::Node(Kind::Sort(sort)));
                stack.push(Frame::Str(" "));
                stack.push(Frame::Atom(&id.id));
                stack.push(Frame::Str("(as "));
            }
        },

        Kind::Sort(sort) => {
            if sort.parameters.is_empty() {
                stack.push(Frame::Atom(&sort.id));
            } else {
                stack.push(Frame::Str(")"));
                for p in sort.parameters.iter().rev() {
                    stack.push(Frame::Node(Kind::Sort(p)));
                    stack.push(Frame::Str(" "));
                }
                stack.push(Frame::Atom(&sort.id));
                stack.push(Frame::Str("("));
            }
        }

        Kind::SExpr(expr) => match expr {
            SExpr::Const(c) => stack.push(Frame::Atom(c)),
            SExpr::Sym(s) => stack.push(Frame::Atom(s)),
            SExpr::Keyword(k) => stack.push(Frame::Atom(k)),
            SExpr::List(items) => {
                stack.push(Frame::Str(")"));
                for (i, e) in items.iter().enumerate().rev() {
                    stack.push(Frame::Node(Kind::SExpr(e)));
                    if i > 0 {
                        stack.push(Frame::Str(" "));
                    }
                }
                stack.push(Frame::Str("("));
            }
        },

        Kind::Binding(binding) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Node(Kind::Term(&binding.value)));
            stack.push(Frame::Str(" "));
            stack.push(Frame::Atom(&binding.id));
            stack.push(Frame::Str("("));
        }

        Kind::SortedVar(var) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Node(Kind::Sort(&var.sort)));
            stack.push(Frame::Str(" "));
            stack.push(Frame::Atom(&var.id));
            stack.push(Frame::Str("("));
        }

        Kind::Attribute(attr) => match &attr.value {
            None => stack.push(Frame::Atom(&attr.key)),
            Some(value) => {
                stack.push(Frame::Node(Kind::SExpr(value)));
                stack.push(Frame::Str(" "));
                stack.push(Frame::Atom(&attr.key));
            }
        },

        Kind::Option(option) => match option {
            SmtOption::Attr(attr) => stack.push(Frame::Node(Kind::Attribute(attr))),
            flat => stack.push(Frame::Atom(flat))
        },

        Kind::Command(command) => expand_command(command, stack),

        Kind::Script(script) => {
            for command in script.0.iter().rev() {
                stack.push(Frame::Str("\n"));
                stack.push(Frame::Node(Kind::Command(command)));
            }
        }

        Kind::DataType(decl) => {
            stack.push(Frame::Str(")"));
            for c in decl.constructors.tail.iter().rev() {
                stack.push(Frame::Node(Kind::Constructor(c)));
                stack.push(Frame::Str(" "));
            }
            stack.push(Frame::Node(Kind::Constructor(&decl.constructors.head)));
            stack.push(Frame::Str(" "));
            stack.push(Frame::Atom(&decl.id));
            stack.push(Frame::Str("("));
        }

        Kind::Constructor(decl) => {
            stack.push(Frame::Str(")"));
            for s in decl.selectors.iter().rev() {
                stack.push(Frame::Node(Kind::Selector(s)));
                stack.push(Frame::Str(" "));
            }
            stack.push(Frame::Atom(&decl.id));
            stack.push(Frame::Str("("));
        }

        Kind::Selector(decl) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Node(Kind::Sort(&decl.sort)));
            stack.push(Frame::Str(" "));
            stack.push(Frame::Atom(&decl.id));
            stack.push(Frame::Str("("));
        }

        Kind::Assertions(assertions) => {
            stack.push(Frame::Str(")"));
            for (i, t) in assertions.0.iter().enumerate().rev() {
                stack.push(Frame::Node(Kind::Term(t)));
                if i > 0 {
                    stack.push(Frame::Str(" "));
                }
            }
            stack.push(Frame::Str("("));
        }

        Kind::Valuation(valuation) => {
            stack.push(Frame::Str(")"));
            for (t, v) in valuation.0.tail.iter().rev() {
                expand_valuation_pair(t, v, stack);
                stack.push(Frame::Str(" "));
            }
            let (t, v) = &valuation.0.head;
            expand_valuation_pair(t, v, stack);
            stack.push(Frame::Str("("));
        }

        Kind::Info(info) => {
            stack.push(Frame::Str(")"));
            for i in info.0.tail.iter().rev() {
                stack.push(Frame::Node(Kind::InfoResponse(i)));
                stack.push(Frame::Str(" "));
            }
            stack.push(Frame::Node(Kind::InfoResponse(&info.0.head)));
            stack.push(Frame::Str("("));
        }

        Kind::InfoResponse(info) => match info {
            response::InfoResponse::Attr(attr) => {
                stack.push(Frame::Node(Kind::Attribute(attr)))
            }
            flat => stack.push(Frame::Atom(flat))
        },

        Kind::Model(model) => {
            stack.push(Frame::Str("\n)"));
            for definition in model.0.iter().rev() {
                stack.push(Frame::Node(Kind::SExpr(definition)));
                stack.push(Frame::Str("\n"));
            }
            stack.push(Frame::Str("(model"));
        }

        Kind::Response(r) => {
            use response::Response::*;
            match r {
                Assertions(a) => stack.push(Frame::Node(Kind::Assertions(a))),
                Valuation(v) => stack.push(Frame::Node(Kind::Valuation(v))),
                Proof(p) => stack.push(Frame::Node(Kind::SExpr(&p.0))),
                OptionValue(o) => stack.push(Frame::Node(Kind::SExpr(&o.0))),
                Info(i) => stack.push(Frame::Node(Kind::Info(i))),
                Model(m) => stack.push(Frame::Node(Kind::Model(m))),
                flat => stack.push(Frame::Atom(flat))
            }
        }
    }
}

fn expand_command<'a>(command: &'a Command, stack: &mut Vec<Frame<'a>>) {
    use Command::*;
    match command {
        SetLogic(l) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Atom(l));
            stack.push(Frame::Str("(set-logic "));
        }
        SetOption(o) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Node(Kind::Option(o)));
            stack.push(Frame::Str("(set-option "));
        }
        SetInfo(a) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Node(Kind::Attribute(a)));
            stack.push(Frame::Str("(set-info "));
        }
        DeclareSort(id, arity) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Atom(arity));
            stack.push(Frame::Str(" "));
            stack.push(Frame::Atom(id));
            stack.push(Frame::Str("(declare-sort "));
        }
        DefineSort(id, params, sort) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Node(Kind::Sort(sort)));
            stack.push(Frame::Str(") "));
            for (i, p) in params.iter().enumerate().rev() {
                stack.push(Frame::Atom(p));
                if i > 0 {
                    stack.push(Frame::Str(" "));
                }
            }
            stack.push(Frame::Str(" ("));
            stack.push(Frame::Atom(id));
            stack.push(Frame::Str("(define-sort "));
        }
        DeclareFun(id, args, result) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Node(Kind::Sort(result)));
            stack.push(Frame::Str(") "));
            for (i, s) in args.iter().enumerate().rev() {
                stack.push(Frame::Node(Kind::Sort(s)));
                if i > 0 {
                    stack.push(Frame::Str(" "));
                }
            }
            stack.push(Frame::Str(" ("));
            stack.push(Frame::Atom(id));
            stack.push(Frame::Str("(declare-fun "));
        }
        DefineFun(id, vars, result, body) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Node(Kind::Term(body)));
            stack.push(Frame::Str(" "));
            stack.push(Frame::Node(Kind::Sort(result)));
            stack.push(Frame::Str(") "));
            for (i, v) in vars.iter().enumerate().rev() {
                stack.push(Frame::Node(Kind::SortedVar(v)));
                if i > 0 {
                    stack.push(Frame::Str(" "));
                }
            }
            stack.push(Frame::Str(" ("));
            stack.push(Frame::Atom(id));
            stack.push(Frame::Str("(define-fun "));
        }
        Push(n) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Atom(n));
            stack.push(Frame::Str("(push "));
        }
        Pop(n) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Atom(n));
            stack.push(Frame::Str("(pop "));
        }
        Assert(t) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Node(Kind::Term(t)));
            stack.push(Frame::Str("(assert "));
        }
        CheckSat => stack.push(Frame::Str("(check-sat)")),
        GetAssertions => stack.push(Frame::Str("(get-assertions)")),
        GetProof => stack.push(Frame::Str("(get-proof)")),
        GetUnsatCore => stack.push(Frame::Str("(get-unsat-core)")),
        GetValue(terms) => {
            stack.push(Frame::Str("))"));
            for t in terms.tail.iter().rev() {
                stack.push(Frame::Node(Kind::Term(t)));
                stack.push(Frame::Str(" "));
            }
            stack.push(Frame::Node(Kind::Term(&terms.head)));
            stack.push(Frame::Str("(get-value ("));
        }
        GetAssignment => stack.push(Frame::Str("(get-assignment)")),
        GetOption(k) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Atom(k));
            stack.push(Frame::Str("(get-option "));
        }
        GetInfo(flag) => {
            stack.push(Frame::Str(")"));
            stack.push(Frame::Atom(flag));
            stack.push(Frame::Str("(get-info "));
        }
        Exit => stack.push(Frame::Str("(exit)")),
        GetModel => stack.push(Frame::Str("(get-model)")),
        DeclareDatatypes(decls) => {
            stack.push(Frame::Str("))"));
            for d in decls.tail.iter().rev() {
                stack.push(Frame::Node(Kind::DataType(d)));
                stack.push(Frame::Str(" "));
            }
            stack.push(Frame::Node(Kind::DataType(&decls.head)));
            stack.push(Frame::Str("(declare-datatypes () ("));
        }
        NonStandard(e) => stack.push(Frame::Node(Kind::SExpr(e)))
    }
}

fn expand_quantifier<'a>(
    head: &'static str,
    vars: &'a NonEmpty<Located<SortedVar>>,
    body: &'a Located<Term>,
    stack: &mut Vec<Frame<'a>>
) {
    stack.push(Frame::Str(")"));
    stack.push(Frame::Node(Kind::Term(body)));
    stack.push(Frame::Str(") "));
    for v in vars.tail.iter().rev() {
        stack.push(Frame::Node(Kind::SortedVar(v)));
        stack.push(Frame::Str(" "));
    }
    stack.push(Frame::Node(Kind::SortedVar(&vars.head)));
    stack.push(Frame::Str(head));
}

fn expand_valuation_pair<'a>(
    term: &'a Located<Term>,
    value: &'a Located<Term>,
    stack: &mut Vec<Frame<'a>>
) {
    stack.push(Frame::Str(")"));
    stack.push(Frame::Node(Kind::Term(value)));
    stack.push(Frame::Str(" "));
    stack.push(Frame::Node(Kind::Term(term)));
    stack.push(Frame::Str("("));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(input: &str) -> Located<Term> {
        crate::parse_term_from_str(input).unwrap()
    }

    #[test]
    fn agrees_with_the_recursive_printer() {
        for input in [
            "x",
            "42",
            "(f x y)",
            "(let ((x 1) (y 2)) (+ x y))",
            "(forall ((x Int) (y (Array Int Bool))) (exists ((z Int)) (f x y z)))",
            "(! (and p q) :named conj :weight 2)",
            "((as const (Array Int Int)) 0)",
            "((_ extract 7 0) bv)"
        ] {
            let t = term(input);
            assert_eq!(t.to_string(), DeepPrint(&t).to_string());
            assert_eq!(t.to_string(), input);
        }
    }

    #[test]
    fn empty_sexpr_list() {
        let e = crate::parse_get_option_response_from_str("()").unwrap();
        assert_eq!(DeepPrint(&*e).to_string(), "()");
    }
}
