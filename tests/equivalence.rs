use pretty_assertions::assert_eq;
use test_log::test;

use robdd_equiv::error::{Error, SyntaxErrorKind};
use robdd_equiv::node::Node;
use robdd_equiv::parser::{parse, ParseOptions};
use robdd_equiv::robdd::Robdd;
use robdd_equiv::truth_table::TruthTable;

#[test]
fn test_and_reduces_low_branch() {
    let bdd = Robdd::default();
    let f = bdd.build(&parse("A&B").unwrap(), &["A", "B"]).unwrap();

    let a = bdd.lookup_var("A").unwrap();
    let b = bdd.lookup_var("B").unwrap();
    let b_node = bdd.mk_node(b, bdd.zero, bdd.one).unwrap();
    assert_eq!(
        bdd.node(f),
        Node::Decision {
            variable: a,
            low: bdd.zero,
            high: b_node,
        }
    );
    assert_eq!(bdd.size(f), 4);
}

#[test]
fn test_commuted_and() {
    let bdd = Robdd::default();
    let f = bdd.build_str("A&B").unwrap();
    let g = bdd.build_str("B&A").unwrap();
    assert!(bdd.equivalent(f, g));
    assert_eq!(f, g);
}

#[test]
fn test_xor_identity() {
    let bdd = Robdd::default();
    let xor = bdd.build_str("A^B").unwrap();

    // `&~` after an operand is NAND, so this reads as NAND(A, B) | (~A & B).
    let sugared = bdd.build_str("(A&~B)|(~A&B)").unwrap();
    assert!(!bdd.equivalent(xor, sugared));
    assert_eq!(sugared, bdd.build_str("!(A & B)").unwrap());

    let plain = ParseOptions::default().with_nand_nor_sugar(false);
    let expanded = bdd.build_str_with("(A&~B)|(~A&B)", plain).unwrap();
    assert!(bdd.equivalent(xor, expanded));

    let bang = bdd.build_str("(A&!B)|(!A&B)").unwrap();
    assert!(bdd.equivalent(xor, bang));
}

#[test]
fn test_and_vs_or() {
    let bdd = Robdd::default();
    let f = bdd.build_str("A&B").unwrap();
    let g = bdd.build_str("A|B").unwrap();
    assert!(!bdd.equivalent(f, g));
}

#[test]
fn test_xor_truth_table() {
    let table = TruthTable::generate("A^B").unwrap();
    let rows: Vec<(Vec<(&str, bool)>, bool)> = (0..table.len())
        .map(|i| (table.assignment(i), table.rows()[i].result))
        .collect();
    assert_eq!(
        rows,
        vec![
            (vec![("A", false), ("B", false)], false),
            (vec![("A", false), ("B", true)], true),
            (vec![("A", true), ("B", false)], true),
            (vec![("A", true), ("B", true)], false),
        ]
    );
}

#[test]
fn test_missing_operand() {
    assert_eq!(
        parse("A&"),
        Err(Error::Syntax {
            position: 2,
            kind: SyntaxErrorKind::UnexpectedEnd {
                expected: "a variable, `(`, `~` or `!`",
            },
        })
    );
}

#[test]
fn test_renamed_with_nand_nor() {
    let bdd = Robdd::default();
    let f = bdd.build_str("(A &~ B) |~ (C ^ D)").unwrap();
    let g = bdd.build_str("(P &~ Q) |~ (R ^ S)").unwrap();
    assert!(bdd.equivalent(f, g));
}

#[test]
fn test_separate_managers_agree() {
    let left = Robdd::default();
    let right = Robdd::default();
    let text = "(A | B) & (C ^ !A)";
    let f = left.build_str(text).unwrap();
    let g = right.build_str(text).unwrap();
    assert!(left.equivalent_between(f, &right, g));
    assert_eq!(left.export_graph(f), right.export_graph(g));
}

#[test]
fn test_deep_inputs_are_errors() {
    let bdd = Robdd::default();

    let chain = vec!["A"; 20_000].join("&");
    let err = bdd.build_str(&chain).unwrap_err();
    assert!(
        matches!(err, Error::Syntax { kind: SyntaxErrorKind::TooDeep { .. }, .. }),
        "{:?}",
        err
    );

    let nested = "(".repeat(5000) + "A" + &")".repeat(5000);
    let err = bdd.build_str(&nested).unwrap_err();
    assert!(
        matches!(err, Error::Syntax { position, kind: SyntaxErrorKind::TooDeep { .. } } if position < 5000),
        "{:?}",
        err
    );

    // Long but within the limits.
    let chain = vec!["A"; 500].join("&");
    assert_eq!(bdd.build_str(&chain).unwrap(), bdd.mk_var("A").unwrap());
}

mod properties {
    use num_bigint::BigUint;
    use proptest::prelude::*;

    use robdd_equiv::ast::{Expr, ExprF};
    use robdd_equiv::parser::parse;
    use robdd_equiv::robdd::Robdd;
    use robdd_equiv::truth_table::TruthTable;

    const POOL: [&str; 4] = ["A", "B", "C", "D"];

    fn expr() -> impl Strategy<Value = Expr> {
        let leaf = prop::sample::select(POOL.to_vec()).prop_map(Expr::var);
        leaf.prop_recursive(5, 32, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(Expr::not),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::and(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::or(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::xor(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::nand(a, b)),
                (inner.clone(), inner).prop_map(|(a, b)| Expr::nor(a, b)),
            ]
        })
    }

    /// Rename A..D to W..Z, which keeps the sorted order of the variables.
    fn rename(e: &Expr) -> Expr {
        e.fold(&mut |layer| match layer {
            ExprF::Const(b) => Expr::constant(b),
            ExprF::Var(v) => {
                let i = POOL.iter().position(|&p| p == v).unwrap();
                Expr::var(["W", "X", "Y", "Z"][i])
            }
            ExprF::Not(a) => Expr::not(a),
            ExprF::Binary(op, a, b) => Expr::binary(op, a, b),
        })
    }

    proptest! {
        #[test]
        fn display_round_trips(e in expr()) {
            prop_assert_eq!(parse(&e.to_string()).unwrap(), e);
        }

        #[test]
        fn self_equivalent(e in expr()) {
            let bdd = Robdd::default();
            let text = e.to_string();
            let f = bdd.build_str(&text).unwrap();
            let g = bdd.build_str(&text).unwrap();
            prop_assert_eq!(f, g);
            prop_assert!(bdd.equivalent(f, g));
        }

        #[test]
        fn canonical_across_managers(e in expr()) {
            let text = e.to_string();
            let left = Robdd::default();
            let right = Robdd::default();
            let f = left.build_str(&text).unwrap();
            let g = right.build_str(&text).unwrap();
            prop_assert!(left.equivalent_between(f, &right, g));
            prop_assert_eq!(left.export_graph(f), right.export_graph(g));
        }

        #[test]
        fn renaming_invariant(e in expr()) {
            let bdd = Robdd::default();
            let f = bdd.build_expr(&e).unwrap();
            let g = bdd.build_expr(&rename(&e)).unwrap();
            prop_assert!(bdd.equivalent(f, g));
            prop_assert!(bdd.equivalent(g, f));
        }

        #[test]
        fn built_diagrams_are_reduced(e in expr()) {
            let bdd = Robdd::default();
            let f = bdd.build(&e, &POOL).unwrap();
            let violations = bdd.check_invariants(f, &POOL);
            prop_assert!(violations.is_empty(), "{:?}", violations);
            let failures = bdd.verify_against(f, &e, &POOL).unwrap();
            prop_assert!(failures.is_empty(), "{:?}", failures);
        }

        #[test]
        fn truth_tables_agree(e1 in expr(), e2 in expr()) {
            let vars: Vec<String> = POOL.iter().map(|v| v.to_string()).collect();
            let bdd = Robdd::default();
            let f = bdd.build(&e1, &POOL).unwrap();
            let g = bdd.build(&e2, &POOL).unwrap();
            let t1 = TruthTable::from_expr(&e1, vars.clone()).unwrap();
            let t2 = TruthTable::from_expr(&e2, vars).unwrap();

            // One manager, one order: equal functions are the same node.
            prop_assert_eq!(t1.compare(&t2), f == g);
            if t1.compare(&t2) {
                prop_assert!(bdd.equivalent(f, g));
            }
            prop_assert_eq!(bdd.sat_count(f, POOL.len()), BigUint::from(t1.true_count()));
        }
    }
}
