//! Term substitution over expressions and predicates.
//!
//! `subst_expr` and `subst_predicate` perform simultaneous substitution of
//! free variable occurrences by expressions: each name bound in the
//! substitution is replaced by its image as given, and the image is *not*
//! substituted into again. This is the mechanism realizing the assignment
//! rule of the weakest-precondition transform.
//!
//! `Paren` predicate nodes are transparent: substitution recurses through
//! them and drops the wrapper. Quantifier and formula-reference nodes are
//! returned unchanged; bound and opaque names are never assignment targets,
//! and a substituted name that coincides with a quantifier's bound name is
//! shadowed inside the body anyway.

use std::collections::HashMap;

use crate::ast::{Expr, Predicate};

/// A simultaneous substitution: variable name -> replacement expression.
pub type Subst = HashMap<String, Expr>;

/// Substitute free variable occurrences in an expression.
pub fn subst_expr(expr: &Expr, subs: &Subst) -> Expr {
    match expr {
        Expr::Num(_) => expr.clone(),
        Expr::Var(name) => match subs.get(name) {
            Some(replacement) => replacement.clone(),
            None => expr.clone(),
        },
        Expr::Neg(arg) => Expr::Neg(Box::new(subst_expr(arg, subs))),
        Expr::Bin { op, left, right } => Expr::Bin {
            op: *op,
            left: Box::new(subst_expr(left, subs)),
            right: Box::new(subst_expr(right, subs)),
        },
        Expr::Call { name, args } => Expr::Call {
            name: name.clone(),
            args: args.iter().map(|a| subst_expr(a, subs)).collect(),
        },
        // The array name itself is not an Expr position; only the index is
        // substituted into.
        Expr::ArrayAccess { name, index } => Expr::ArrayAccess {
            name: name.clone(),
            index: Box::new(subst_expr(index, subs)),
        },
    }
}

/// Substitute free variable occurrences in a predicate.
pub fn subst_predicate(pred: &Predicate, subs: &Subst) -> Predicate {
    match pred {
        Predicate::True | Predicate::False => pred.clone(),
        Predicate::Comparison { op, left, right } => Predicate::Comparison {
            op: *op,
            left: subst_expr(left, subs),
            right: subst_expr(right, subs),
        },
        Predicate::Not(inner) => Predicate::Not(Box::new(subst_predicate(inner, subs))),
        Predicate::And(left, right) => Predicate::And(
            Box::new(subst_predicate(left, subs)),
            Box::new(subst_predicate(right, subs)),
        ),
        Predicate::Or(left, right) => Predicate::Or(
            Box::new(subst_predicate(left, subs)),
            Box::new(subst_predicate(right, subs)),
        ),
        Predicate::Implies(left, right) => Predicate::Implies(
            Box::new(subst_predicate(left, subs)),
            Box::new(subst_predicate(right, subs)),
        ),
        // Transparent: recurse through and drop the wrapper.
        Predicate::Paren(inner) => subst_predicate(inner, subs),
        Predicate::Quantifier { .. } | Predicate::FormulaRef { .. } => pred.clone(),
    }
}
