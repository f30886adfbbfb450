use proptest::prelude::*;

use smt2_wire::ast::*;
use smt2_wire::syntax::Reserved;
use smt2_wire::{
    parse_command_from_str, parse_sort_from_str, parse_term_from_str, DeepPrint, Located,
};

fn numeral() -> impl Strategy<Value = Numeral> {
    any::<u128>().prop_map(Numeral::from)
}

/// Simple and quoted spellings, minus the reserved words: those print bare
/// and lex back as reserved tokens, not identifiers.
fn symbol() -> impl Strategy<Value = Symbol> {
    prop_oneof![
        "[a-zA-Z+*=<>.?$%&^~][a-zA-Z0-9+*=<>.?$%&^~_-]{0,8}".prop_map(Symbol::new),
        "[ -~]{1,8}".prop_map(Symbol::new),
    ]
    .prop_filter("reserved words are not identifiers", |s| {
        Reserved::of_symbol(&s.id).is_none() && s.id != "get-model"
    })
}

fn keyword() -> impl Strategy<Value = Keyword> {
    "[a-zA-Z][a-zA-Z0-9-]{0,8}".prop_map(Keyword::new)
}

fn constant() -> impl Strategy<Value = Constant> {
    prop_oneof![
        numeral().prop_map(Constant::Numeral),
        (any::<u64>(), "[0-9]{1,6}").prop_map(|(n, fraction)| {
            Constant::Decimal(Decimal {
                integer: Numeral::from(n),
                fraction: fraction,
            })
        }),
        prop::collection::vec(0u8..16, 1..8).prop_map(|digits| {
            Constant::Hexadecimal(Hexadecimal(digits))
        }),
        prop::collection::vec(any::<bool>(), 1..12).prop_map(|bits| {
            Constant::Binary(Binary(bits))
        }),
        "[ -~]{0,12}".prop_map(Constant::String),
    ]
}

fn ident() -> impl Strategy<Value = Ident> {
    (symbol(), prop::collection::vec(numeral(), 0..3)).prop_map(|(id, indexes)| Ident {
        id: id.into(),
        indexes: indexes.into_iter().map(Into::into).collect(),
    })
}

fn sort() -> impl Strategy<Value = Sort> {
    let leaf = ident().prop_map(Sort::from);
    leaf.prop_recursive(3, 12, 3, |inner| {
        (ident(), prop::collection::vec(inner, 1..3)).prop_map(|(id, parameters)| Sort {
            id: id.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        })
    })
}

fn qual_ident() -> impl Strategy<Value = QualIdent> {
    (ident(), prop::option::of(sort())).prop_map(|(id, sort)| QualIdent {
        id: id.into(),
        sort: sort.map(Into::into),
    })
}

fn attribute() -> impl Strategy<Value = Attribute> {
    let value = prop_oneof![
        constant().prop_map(SExpr::Const),
        symbol().prop_map(SExpr::Sym),
    ];
    (keyword(), prop::option::of(value)).prop_map(|(key, value)| Attribute {
        key: key.into(),
        value: value.map(Into::into),
    })
}

fn non_empty<T: std::fmt::Debug>(
    element: impl Strategy<Value = T>,
    max: usize,
) -> impl Strategy<Value = NonEmpty<Located<T>>> {
    prop::collection::vec(element, 1..max).prop_map(|list| {
        NonEmpty::from_vec(list.into_iter().map(Into::into).collect()).unwrap()
    })
}

fn term() -> impl Strategy<Value = Term> {
    let leaf = prop_oneof![
        constant().prop_map(Term::Const),
        qual_ident().prop_map(Term::Ident),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        let binding = (symbol(), inner.clone()).prop_map(|(id, value)| Binding {
            id: id.into(),
            value: Box::new(value.into()),
        });
        prop_oneof![
            (qual_ident(), non_empty(inner.clone(), 4)).prop_map(|(fun, args)| Term::Apply {
                fun: fun.into(),
                args: Box::new(args),
            }),
            (non_empty(binding, 3), inner.clone()).prop_map(|(bindings, body)| Term::Let {
                bindings: bindings,
                body: Box::new(body.into()),
            }),
            (non_empty(sorted_var(), 3), inner.clone()).prop_map(|(vars, body)| {
                Term::Forall {
                    vars: vars,
                    body: Box::new(body.into()),
                }
            }),
            (non_empty(sorted_var(), 3), inner.clone()).prop_map(|(vars, body)| Term::Exists {
                vars: vars,
                body: Box::new(body.into()),
            }),
            (inner, non_empty(attribute(), 3)).prop_map(|(term, attributes)| Term::Annotated {
                term: Box::new(term.into()),
                attributes: attributes,
            }),
        ]
    })
}

/// Flags with a first-class variant; a generated `:name` must come back as
/// `InfoFlag::Name`, not as the catch-all keyword.
const KNOWN_INFO_FLAGS: &[&str] = &[
    "error-behavior",
    "name",
    "authors",
    "version",
    "status",
    "reason-unknown",
    "all-statistics",
];

fn info_flag() -> impl Strategy<Value = InfoFlag> {
    prop_oneof![
        Just(InfoFlag::ErrorBehavior),
        Just(InfoFlag::Name),
        Just(InfoFlag::Authors),
        Just(InfoFlag::Version),
        Just(InfoFlag::Status),
        Just(InfoFlag::ReasonUnknown),
        Just(InfoFlag::AllStatistics),
        "[a-zA-Z][a-zA-Z0-9-]{0,8}"
            .prop_filter("flags with a dedicated variant", |name| {
                !KNOWN_INFO_FLAGS.contains(&name.as_str())
            })
            .prop_map(InfoFlag::Keyword),
    ]
}

/// Same story for options: these keys come back as typed variants.
const STANDARD_OPTIONS: &[&str] = &[
    "print-success",
    "expand-definitions",
    "interactive-mode",
    "produce-proofs",
    "produce-unsat-cores",
    "produce-models",
    "produce-assignments",
    "regular-output-channel",
    "diagnostic-output-channel",
    "random-seed",
    "verbosity",
];

fn smt_option() -> impl Strategy<Value = SmtOption> {
    prop_oneof![
        any::<bool>().prop_map(SmtOption::PrintSuccess),
        any::<bool>().prop_map(SmtOption::ProduceModels),
        any::<bool>().prop_map(SmtOption::InteractiveMode),
        "[ -~]{0,10}".prop_map(SmtOption::RegularOutputChannel),
        numeral().prop_map(SmtOption::RandomSeed),
        numeral().prop_map(SmtOption::Verbosity),
        attribute()
            .prop_filter("standard option keys parse as typed options", |a| {
                !STANDARD_OPTIONS.contains(&a.key.id.as_str())
            })
            .prop_map(SmtOption::Attr),
    ]
}

fn sorted_var() -> impl Strategy<Value = SortedVar> {
    (symbol(), sort()).prop_map(|(id, sort)| SortedVar {
        id: id.into(),
        sort: sort.into(),
    })
}

fn datatype() -> impl Strategy<Value = DataTypeDeclaration> {
    let selector = (symbol(), sort()).prop_map(|(id, sort)| SelectorDeclaration {
        id: id.into(),
        sort: sort.into(),
    });
    let constructor =
        (symbol(), prop::collection::vec(selector, 0..3)).prop_map(|(id, selectors)| {
            ConstructorDeclaration {
                id: id.into(),
                selectors: selectors.into_iter().map(Into::into).collect(),
            }
        });
    (symbol(), non_empty(constructor, 3)).prop_map(|(id, constructors)| DataTypeDeclaration {
        id: id.into(),
        constructors: constructors,
    })
}

fn command() -> impl Strategy<Value = Command> {
    let plain = prop::sample::select(vec![
        Command::CheckSat,
        Command::GetAssertions,
        Command::GetProof,
        Command::GetUnsatCore,
        Command::GetAssignment,
        Command::Exit,
        Command::GetModel,
    ]);

    let declarations = prop_oneof![
        (symbol(), numeral()).prop_map(|(id, n)| Command::DeclareSort(id.into(), n.into())),
        (symbol(), prop::collection::vec(symbol(), 0..3), sort()).prop_map(
            |(id, params, sort)| {
                Command::DefineSort(
                    id.into(),
                    params.into_iter().map(Into::into).collect(),
                    sort.into(),
                )
            }
        ),
        (symbol(), prop::collection::vec(sort(), 0..3), sort()).prop_map(|(id, args, result)| {
            Command::DeclareFun(
                id.into(),
                args.into_iter().map(Into::into).collect(),
                result.into(),
            )
        }),
        (
            symbol(),
            prop::collection::vec(sorted_var(), 0..3),
            sort(),
            term()
        )
            .prop_map(|(id, vars, result, body)| {
                Command::DefineFun(
                    id.into(),
                    vars.into_iter().map(Into::into).collect(),
                    result.into(),
                    body.into(),
                )
            }),
        non_empty(datatype(), 3).prop_map(Command::DeclareDatatypes),
    ];

    let queries = prop_oneof![
        non_empty(term(), 3).prop_map(Command::GetValue),
        keyword().prop_map(|k| Command::GetOption(k.into())),
        info_flag().prop_map(|f| Command::GetInfo(f.into())),
    ];

    prop_oneof![
        plain,
        symbol().prop_map(|l| Command::SetLogic(l.into())),
        smt_option().prop_map(|o| Command::SetOption(o.into())),
        attribute().prop_map(|a| Command::SetInfo(a.into())),
        declarations,
        numeral().prop_map(|n| Command::Push(n.into())),
        numeral().prop_map(|n| Command::Pop(n.into())),
        term().prop_map(|t| Command::Assert(t.into())),
        queries,
    ]
}

proptest! {
    #[test]
    fn terms_round_trip(t in term()) {
        let text = t.to_string();
        let parsed = parse_term_from_str(&text).unwrap();
        prop_assert_eq!(&*parsed, &t);
        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn term_printers_agree(t in term()) {
        prop_assert_eq!(DeepPrint(&t).to_string(), t.to_string());
    }

    #[test]
    fn terms_embed_as_sexprs(t in term()) {
        prop_assert_eq!(SExpr::from(&t).to_string(), t.to_string());
    }

    #[test]
    fn sorts_round_trip(s in sort()) {
        let text = s.to_string();
        let parsed = parse_sort_from_str(&text).unwrap();
        prop_assert_eq!(&*parsed, &s);
        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn commands_round_trip(c in command()) {
        let text = c.to_string();
        let parsed = parse_command_from_str(&text).unwrap();
        prop_assert_eq!(&*parsed, &c);
        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn command_printers_agree(c in command()) {
        prop_assert_eq!(DeepPrint(&c).to_string(), c.to_string());
    }

    #[test]
    fn commands_embed_as_sexprs(c in command()) {
        prop_assert_eq!(SExpr::from(&c).to_string(), c.to_string());
    }

    #[test]
    fn constants_round_trip(c in constant()) {
        let t = Term::Const(c);
        let parsed = parse_term_from_str(&t.to_string()).unwrap();
        prop_assert_eq!(&*parsed, &t);
    }
}
