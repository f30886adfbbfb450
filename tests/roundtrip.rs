use smt2_wire::ast::*;
use smt2_wire::response;
use smt2_wire::{
    parse_command_from_str, parse_get_assertions_response_from_str,
    parse_get_assignment_response_from_str, parse_get_info_response_from_str,
    parse_get_model_response_from_str, parse_get_proof_response_from_str,
    parse_get_unsat_core_response_from_str, parse_get_value_response_from_str,
    parse_script_from_str, parse_term_from_str, tokenize, DeepPrint, Located,
};

fn sym(id: &str) -> Located<Symbol> {
    Symbol::new(id).into()
}

fn sort(id: &str) -> Located<Sort> {
    Sort::from(id).into()
}

fn term(id: &str) -> Located<Term> {
    Term::from(id).into()
}

fn num(n: u32) -> Located<Term> {
    Term::Const(Constant::Numeral(Numeral::from(n))).into()
}

fn selector(id: &str, s: &str) -> Located<SelectorDeclaration> {
    SelectorDeclaration {
        id: sym(id),
        sort: sort(s)
    }
    .into()
}

fn constructor(id: &str, selectors: Vec<Located<SelectorDeclaration>>) -> Located<ConstructorDeclaration> {
    ConstructorDeclaration {
        id: sym(id),
        selectors: selectors
    }
    .into()
}

#[test]
fn assert_true() {
    let parsed = parse_command_from_str("(assert true)").unwrap();
    assert_eq!(*parsed, Command::Assert(term("true")));
    assert_eq!(parsed.to_string(), "(assert true)");
}

#[test]
fn declare_fun() {
    let parsed = parse_command_from_str("(declare-fun f (A B) C)").unwrap();
    assert_eq!(
        *parsed,
        Command::DeclareFun(sym("f"), vec![sort("A"), sort("B")], sort("C"))
    );
    assert_eq!(parsed.to_string(), "(declare-fun f (A B) C)");
}

#[test]
fn set_option_print_success() {
    let parsed = parse_command_from_str("(set-option :print-success true)").unwrap();
    assert_eq!(
        *parsed,
        Command::SetOption(SmtOption::PrintSuccess(true).into())
    );
    assert_eq!(parsed.to_string(), "(set-option :print-success true)");
}

#[test]
fn declare_datatypes() {
    let text = "(declare-datatypes () ( (A (A1 (a1a A) (a1b A)) (A2 (a2a A) (a2b A))) ))";
    let parsed = parse_command_from_str(text).unwrap();

    let expected = Command::DeclareDatatypes(NonEmpty::new(
        DataTypeDeclaration {
            id: sym("A"),
            constructors: NonEmpty {
                head: constructor("A1", vec![selector("a1a", "A"), selector("a1b", "A")]),
                tail: vec![constructor("A2", vec![selector("a2a", "A"), selector("a2b", "A")])]
            }
        }
        .into()
    ));
    assert_eq!(*parsed, expected);

    // Canonical output is compact; it must parse back to the same command.
    let printed = parsed.to_string();
    assert_eq!(
        printed,
        "(declare-datatypes () ((A (A1 (a1a A) (a1b A)) (A2 (a2a A) (a2b A)))))"
    );
    assert_eq!(*parse_command_from_str(&printed).unwrap(), expected);
}

#[test]
fn get_value_command() {
    let parsed = parse_command_from_str("(get-value (a b))").unwrap();
    assert_eq!(
        *parsed,
        Command::GetValue(NonEmpty {
            head: term("a"),
            tail: vec![term("b")]
        })
    );
    assert_eq!(parsed.to_string(), "(get-value (a b))");
}

#[test]
fn get_value_response() {
    let parsed = parse_get_value_response_from_str("((a 42) (b 12))").unwrap();
    assert_eq!(
        *parsed,
        response::Valuation(NonEmpty {
            head: (term("a"), num(42)),
            tail: vec![(term("b"), num(12))]
        })
    );
    assert_eq!(parsed.to_string(), "((a 42) (b 12))");
}

#[test]
fn zero_field_constructor_prints_as_bare_name() {
    let cmd = Command::DeclareDatatypes(NonEmpty::new(
        DataTypeDeclaration {
            id: sym("Color"),
            constructors: NonEmpty {
                head: constructor("red", Vec::new()),
                tail: vec![constructor("green", Vec::new())]
            }
        }
        .into()
    ));
    assert_eq!(
        cmd.to_string(),
        "(declare-datatypes () ((Color (red) (green))))"
    );
    assert_eq!(*parse_command_from_str(&cmd.to_string()).unwrap(), cmd);
}

const SCRIPT: &str = r#"
(set-logic QF_UFLIA)
(set-option :produce-models true)
(set-option :random-seed 91)
(set-option :regular-output-channel "out.log")
(set-info :source |two
lines|)
(set-info :smt-lib-version 2.0)
(declare-sort Pair 2)
(define-sort IntPair () (Pair Int Int))
(declare-fun f (Int Int) Bool)
(declare-fun a () Int)
(define-fun g ((x Int) (y Int)) Int (+ x y))
(declare-datatypes () ((A (A1 (a1a A)) (A2))))
(push 1)
(assert (forall ((x Int)) (exists ((y Int)) (! (f x y) :named fa :weight 2))))
(assert (let ((u 1) (v 2.50)) (f u v)))
(assert (f #b0101 #xBEEF))
(assert ((_ extract 7 0) ((as const (Array Int Int)) 0)))
(check-sat)
(get-assertions)
(get-value ((f 1 2) a))
(get-assignment)
(get-proof)
(get-unsat-core)
(get-option :produce-models)
(get-info :all-statistics)
(get-info :status)
(pop 1)
(echo "done")
(get-model)
(exit)
"#;

#[test]
fn script_round_trip() {
    let script = parse_script_from_str(SCRIPT).unwrap();
    assert_eq!(script.0.len(), 30);

    let printed = script.to_string();
    let reparsed = parse_script_from_str(&printed).unwrap();
    assert_eq!(*reparsed, *script);

    // Textual fixed point: printing the reparse changes nothing.
    assert_eq!(reparsed.to_string(), printed);
}

#[test]
fn printers_agree_on_the_script_corpus() {
    let script = parse_script_from_str(SCRIPT).unwrap();
    assert_eq!(script.to_string(), DeepPrint(&script).to_string());
    for command in &script.0 {
        assert_eq!(command.to_string(), DeepPrint(command).to_string());
    }
}

#[test]
fn lexer_is_total_on_printed_output() {
    let printed = parse_script_from_str(SCRIPT).unwrap().to_string();
    let mut count = 0;
    for token in tokenize(printed.as_bytes()) {
        token.expect("printed output must lex cleanly");
        count += 1;
    }
    assert!(count > 100);
}

#[test]
fn commands_embed_as_sexprs_verbatim() {
    let script = parse_script_from_str(SCRIPT).unwrap();
    for command in &script.0 {
        let expr = SExpr::from(&**command);
        assert_eq!(expr.to_string(), command.to_string());
    }
}

#[test]
fn terms_embed_as_sexprs_verbatim() {
    let t = parse_term_from_str("(! (let ((x 1)) (f x (g #xA0 |odd name|))) :named n)").unwrap();
    assert_eq!(SExpr::from(&*t).to_string(), t.to_string());
}

#[test]
fn non_standard_command_round_trip() {
    let parsed = parse_command_from_str("(echo \"hi there\")").unwrap();
    match &*parsed {
        Command::NonStandard(e) => {
            assert_eq!(e.to_string(), "(echo \"hi there\")");
        }
        other => panic!("expected a non-standard command, got {:?}", other)
    }
    assert_eq!(parsed.to_string(), "(echo \"hi there\")");
    assert_eq!(*parse_command_from_str(&parsed.to_string()).unwrap(), *parsed);
}

#[test]
fn symbol_quoting() {
    for (raw, printed) in [
        ("hi there", "|hi there|"),
        ("0start", "|0start|"),
        ("a|b", r"|a\|b|"),
        (r"back\slash", r"|back\\slash|"),
        ("plain-symbol", "plain-symbol")
    ] {
        let s = Symbol::new(raw);
        assert_eq!(s.to_string(), printed);

        let parsed = parse_term_from_str(printed).unwrap();
        assert_eq!(*parsed, Term::Ident(QualIdent::from(raw)));
    }
}

#[test]
fn canonical_hexadecimal() {
    let parsed = parse_term_from_str("#xdeadBEEF").unwrap();
    assert_eq!(parsed.to_string(), "#xDEADBEEF");

    let reparsed = parse_term_from_str(&parsed.to_string()).unwrap();
    assert_eq!(*reparsed, *parsed);
}

#[test]
fn binary_is_length_significant() {
    let short = parse_term_from_str("#b1").unwrap();
    let long = parse_term_from_str("#b01").unwrap();
    assert_ne!(*short, *long);
    assert_eq!(long.to_string(), "#b01");
}

#[test]
fn decimal_digits_survive() {
    let parsed = parse_term_from_str("1.50").unwrap();
    assert_eq!(parsed.to_string(), "1.50");
    assert_ne!(*parsed, *parse_term_from_str("1.5").unwrap());
}

#[test]
fn string_escapes_round_trip() {
    let t = Term::Const(Constant::String(r#"say "hi" \ bye"#.to_string()));
    assert_eq!(t.to_string(), r#""say \"hi\" \\ bye""#);
    assert_eq!(*parse_term_from_str(&t.to_string()).unwrap(), t);
}

#[test]
fn positions_do_not_affect_equality() {
    let spaced = parse_command_from_str("(assert\n    (f  x))").unwrap();
    let compact = parse_command_from_str("(assert (f x))").unwrap();
    assert_eq!(spaced, compact);
}

#[test]
fn deep_let_chain_prints_without_recursing() {
    let mut term: Located<Term> = Term::from("x").into();
    for _ in 0..10_000 {
        term = Term::Let {
            bindings: NonEmpty::new(
                Binding {
                    id: sym("x"),
                    value: Box::new(num(1))
                }
                .into()
            ),
            body: Box::new(term)
        }
        .into();
    }

    let text = DeepPrint(&term).to_string();
    assert!(text.starts_with("(let ((x 1)) (let ((x 1)) "));
    assert!(text.ends_with(&")".repeat(10_000)));
    // 10_000 levels of "(let ((x 1)) " ... ")" around a one-char body.
    assert_eq!(text.len(), 10_000 * 14 + 1);

    // Tear the chain down level by level; dropping it whole would recurse
    // as deep as the printer refused to.
    let mut term = term;
    loop {
        term = match term.into_inner() {
            Term::Let { body, .. } => *body,
            _ => break
        };
    }
}

#[test]
fn assignment_response_round_trip() {
    let parsed = parse_get_assignment_response_from_str("((p true) (q false))").unwrap();
    assert_eq!(parsed.to_string(), "((p true) (q false))");
    assert_eq!(
        *parse_get_assignment_response_from_str(&parsed.to_string()).unwrap(),
        *parsed
    );
}

#[test]
fn assertions_response_round_trip() {
    let parsed =
        parse_get_assertions_response_from_str("((f x) (forall ((y Int)) (f y)))").unwrap();
    assert_eq!(parsed.0.len(), 2);
    assert_eq!(parsed.to_string(), "((f x) (forall ((y Int)) (f y)))");
    assert_eq!(
        *parse_get_assertions_response_from_str(&parsed.to_string()).unwrap(),
        *parsed
    );
}

#[test]
fn proof_response_is_a_raw_sexpr() {
    let parsed = parse_get_proof_response_from_str("(proof (asserted (f x)))").unwrap();
    assert_eq!(parsed.to_string(), "(proof (asserted (f x)))");

    let err = parse_get_proof_response_from_str("(error \"no proof\")")
        .err()
        .expect("error answers must not read as proofs");
    assert_eq!(err.to_string(), "server error: no proof");
}

#[test]
fn unsat_core_response_round_trip() {
    let parsed = parse_get_unsat_core_response_from_str("(c1 c2 c3)").unwrap();
    assert_eq!(
        *parsed,
        response::UnsatCore(vec![sym("c1"), sym("c2"), sym("c3")])
    );
    assert_eq!(parsed.to_string(), "(c1 c2 c3)");
}

#[test]
fn info_response_round_trip() {
    let text = "(:name \"cvc5\" :version \"1.0\" :custom (a 1))";
    let parsed = parse_get_info_response_from_str(text).unwrap();
    assert_eq!(parsed.to_string(), text);
    assert_eq!(
        *parse_get_info_response_from_str(&parsed.to_string()).unwrap(),
        *parsed
    );
}

#[test]
fn model_response_round_trip() {
    let parsed = parse_get_model_response_from_str(
        "(model (define-fun x () Int 7) (define-fun y () Int (- 7)))"
    )
    .unwrap();
    assert_eq!(parsed.0.len(), 2);

    let printed = parsed.to_string();
    assert_eq!(
        printed,
        "(model\n(define-fun x () Int 7)\n(define-fun y () Int (- 7))\n)"
    );
    assert_eq!(*parse_get_model_response_from_str(&printed).unwrap(), *parsed);
    assert_eq!(DeepPrint(&*parsed).to_string(), printed);
}

#[test]
fn model_entries_built_from_commands_print_identically() {
    let definition = parse_command_from_str("(define-fun x () Int 7)").unwrap();
    let model = response::Model(vec![SExpr::from(&*definition).into()]);
    assert_eq!(model.to_string(), "(model\n(define-fun x () Int 7)\n)");
}
