//! Call inlining against the definitional-spec table.
//!
//! Rewrites every `Call` subterm of a verification condition bottom-up:
//! arguments first, then -- if the callee has a registered definitional spec
//! -- the call itself is replaced by the defining expression with parameters
//! substituted by the already-inlined arguments. The substituted body is
//! inlined again, so a chain of definitional helpers flattens completely
//! and no `Call` node to any of them survives. An active-call stack leaves
//! directly or mutually recursive definitional calls uninterpreted instead
//! of diverging.
//!
//! Calls without a definitional spec stay opaque and are later encoded as
//! uninterpreted function symbols. This is purely a rewriting step before
//! encoding; it never changes the VC structure around the calls.

use crate::ast::{Expr, Predicate};
use crate::defspec::SpecTable;
use crate::subst::{Subst, subst_expr};

/// Inline definitional calls inside an expression.
pub fn inline_expr(expr: &Expr, specs: &SpecTable) -> Expr {
    inline_expr_rec(expr, specs, &mut Vec::new())
}

fn inline_expr_rec(expr: &Expr, specs: &SpecTable, active: &mut Vec<String>) -> Expr {
    match expr {
        Expr::Num(_) | Expr::Var(_) => expr.clone(),
        Expr::Neg(arg) => Expr::Neg(Box::new(inline_expr_rec(arg, specs, active))),
        Expr::Bin { op, left, right } => Expr::Bin {
            op: *op,
            left: Box::new(inline_expr_rec(left, specs, active)),
            right: Box::new(inline_expr_rec(right, specs, active)),
        },
        Expr::ArrayAccess { name, index } => Expr::ArrayAccess {
            name: name.clone(),
            index: Box::new(inline_expr_rec(index, specs, active)),
        },
        Expr::Call { name, args } => {
            let inlined_args: Vec<Expr> = args
                .iter()
                .map(|a| inline_expr_rec(a, specs, active))
                .collect();

            let spec = match specs.get(name) {
                Some(spec) if !active.iter().any(|n| n == name) => spec,
                _ => {
                    return Expr::Call {
                        name: name.clone(),
                        args: inlined_args,
                    };
                }
            };

            let mut subs = Subst::new();
            for (param, arg) in spec.params.iter().zip(inlined_args) {
                subs.insert(param.clone(), arg);
            }
            let body = subst_expr(&spec.result, &subs);

            // The definition may itself call other definitional helpers.
            active.push(name.clone());
            let inlined = inline_expr_rec(&body, specs, active);
            active.pop();
            inlined
        }
    }
}

/// Inline definitional calls inside a predicate. `Paren` wrappers are
/// dropped; quantifier bodies and formula references are left untouched.
pub fn inline_predicate(pred: &Predicate, specs: &SpecTable) -> Predicate {
    match pred {
        Predicate::True | Predicate::False => pred.clone(),
        Predicate::Comparison { op, left, right } => Predicate::Comparison {
            op: *op,
            left: inline_expr(left, specs),
            right: inline_expr(right, specs),
        },
        Predicate::Not(inner) => Predicate::Not(Box::new(inline_predicate(inner, specs))),
        Predicate::And(left, right) => Predicate::And(
            Box::new(inline_predicate(left, specs)),
            Box::new(inline_predicate(right, specs)),
        ),
        Predicate::Or(left, right) => Predicate::Or(
            Box::new(inline_predicate(left, specs)),
            Box::new(inline_predicate(right, specs)),
        ),
        Predicate::Implies(left, right) => Predicate::Implies(
            Box::new(inline_predicate(left, specs)),
            Box::new(inline_predicate(right, specs)),
        ),
        Predicate::Paren(inner) => inline_predicate(inner, specs),
        Predicate::Quantifier { .. } | Predicate::FormulaRef { .. } => pred.clone(),
    }
}
