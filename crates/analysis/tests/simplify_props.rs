//! Property tests for the simplifier and substitution laws.

use proptest::prelude::*;

use imp_analysis::ast::{BinOp, CmpOp, Expr, Predicate};
use imp_analysis::simplify;
use imp_analysis::subst::{Subst, subst_predicate};

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        any::<i16>().prop_map(|n| Expr::num(i64::from(n))),
        "[a-z]{1,3}".prop_map(|name| Expr::var(name)),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Expr::bin(BinOp::Add, a, b)),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Expr::bin(BinOp::Mul, a, b)),
            inner.prop_map(Expr::neg),
        ]
    })
}

/// Quantifier- and paren-free predicates: the fragment on which
/// substitution with an empty environment must be the identity.
fn arb_pred() -> impl Strategy<Value = Predicate> {
    let leaf = prop_oneof![
        Just(Predicate::True),
        Just(Predicate::False),
        (arb_expr(), arb_expr()).prop_map(|(l, r)| Predicate::cmp(CmpOp::Eq, l, r)),
        (arb_expr(), arb_expr()).prop_map(|(l, r)| Predicate::cmp(CmpOp::Le, l, r)),
    ];
    leaf.prop_recursive(3, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Predicate::And(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Predicate::Or(Box::new(a), Box::new(b))),
            inner.prop_map(|a| Predicate::Not(Box::new(a))),
        ]
    })
}

proptest! {
    #[test]
    fn and_with_true_is_identity(p in arb_pred()) {
        prop_assert_eq!(simplify::and(Predicate::True, p.clone()), p.clone());
        prop_assert_eq!(simplify::and(p.clone(), Predicate::True), p);
    }

    #[test]
    fn and_with_false_is_false(p in arb_pred()) {
        prop_assert_eq!(simplify::and(Predicate::False, p.clone()), Predicate::False);
        prop_assert_eq!(simplify::and(p, Predicate::False), Predicate::False);
    }

    #[test]
    fn or_with_false_is_identity(p in arb_pred()) {
        prop_assert_eq!(simplify::or(Predicate::False, p.clone()), p.clone());
        prop_assert_eq!(simplify::or(p.clone(), Predicate::False), p);
    }

    #[test]
    fn or_with_true_is_true(p in arb_pred()) {
        prop_assert_eq!(simplify::or(Predicate::True, p.clone()), Predicate::True);
        prop_assert_eq!(simplify::or(p, Predicate::True), Predicate::True);
    }

    #[test]
    fn implies_unfolds_to_or_not(p in arb_pred(), q in arb_pred()) {
        prop_assert_eq!(
            simplify::implies(p.clone(), q.clone()),
            simplify::or(simplify::not(p), q)
        );
    }

    #[test]
    fn empty_substitution_is_identity(p in arb_pred()) {
        prop_assert_eq!(subst_predicate(&p, &Subst::new()), p);
    }

    #[test]
    fn substitution_of_absent_name_is_identity(p in arb_pred()) {
        // "A0" can never be generated by the [a-z]{1,3} variable strategy.
        let mut subs = Subst::new();
        subs.insert("A0".to_string(), Expr::num(1));
        prop_assert_eq!(subst_predicate(&p, &subs), p);
    }
}
