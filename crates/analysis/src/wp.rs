//! The weakest-precondition transform.
//!
//! `wp` walks a statement backward from a postcondition and produces the
//! weakest predicate that must hold before the statement so the
//! postcondition holds after it, plus the side-condition VCs contributed by
//! loops along the way. Statements are interpreted symbolically by
//! substitution; nothing is executed.
//!
//! Known soundness gap: the assignment rule substitutes scalar targets
//! only. An array-element write (`a[i] = v`) contributes nothing to the
//! substitution environment, so a postcondition reading that cell through
//! `select` is verified against the *pre*-state array. The fix would be
//! store-term substitution (`a` ↦ `store(a, i, v)`); until then such writes
//! are unsupported.

use crate::ast::{Condition, FunctionDef, LValue, Predicate, Statement};
use crate::simplify;
use crate::subst::{Subst, subst_predicate};

/// Result of transforming one statement: the precondition obligation plus
/// the loop side conditions generated beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WpOutcome {
    pub pre: Predicate,
    pub vcs: Vec<Predicate>,
}

impl WpOutcome {
    fn plain(pre: Predicate) -> Self {
        Self {
            pre,
            vcs: Vec::new(),
        }
    }
}

/// Compute the weakest precondition of `stmt` with respect to `post`.
pub fn wp(stmt: &Statement, post: Predicate) -> WpOutcome {
    match stmt {
        // Expressions are pure; an expression statement is a no-op
        // transformer.
        Statement::Expr(_) => WpOutcome::plain(post),

        Statement::Assign { targets, values } => {
            let mut subs = Subst::new();
            for (target, value) in targets.iter().zip(values.iter()) {
                if let LValue::Var(name) = target {
                    subs.insert(name.clone(), value.clone());
                }
                // ArrayElem targets are excluded (see module docs).
            }
            WpOutcome::plain(subst_predicate(&post, &subs))
        }

        Statement::Block(stmts) => {
            let mut pre = post;
            let mut vcs = Vec::new();
            for stmt in stmts.iter().rev() {
                let outcome = wp(stmt, pre);
                pre = outcome.pre;
                vcs.extend(outcome.vcs);
            }
            WpOutcome { pre, vcs }
        }

        Statement::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let cond = lift_condition(condition);
            let then_outcome = wp(then_branch, post.clone());
            let else_outcome = match else_branch {
                Some(els) => wp(els, post),
                None => WpOutcome::plain(post),
            };

            let pre = simplify::and(
                simplify::implies(cond.clone(), then_outcome.pre),
                simplify::implies(simplify::not(cond), else_outcome.pre),
            );

            let mut vcs = then_outcome.vcs;
            vcs.extend(else_outcome.vcs);
            WpOutcome { pre, vcs }
        }

        Statement::While {
            condition,
            invariant,
            body,
        } => {
            // A missing invariant defaults to the vacuous `True`; the loop
            // then usually fails its VCs rather than crashing the verifier.
            let inv = invariant.clone().unwrap_or(Predicate::True);
            let cond = lift_condition(condition);

            let body_outcome = wp(body, inv.clone());

            let preservation = simplify::implies(
                simplify::and(inv.clone(), cond.clone()),
                body_outcome.pre,
            );
            let exit = simplify::implies(
                simplify::and(inv.clone(), simplify::not(cond)),
                post,
            );

            let mut vcs = vec![preservation, exit];
            vcs.extend(body_outcome.vcs);

            // The caller's only obligation is that the invariant holds on
            // entry.
            WpOutcome { pre: inv, vcs }
        }
    }
}

/// Lift a guard condition to a predicate. Conditions are structurally a
/// subset of predicates, so this is a 1:1 mapping; compound nodes go
/// through the simplifier's smart constructors.
pub fn lift_condition(cond: &Condition) -> Predicate {
    match cond {
        Condition::True => Predicate::True,
        Condition::False => Predicate::False,
        Condition::Comparison { op, left, right } => Predicate::Comparison {
            op: *op,
            left: left.clone(),
            right: right.clone(),
        },
        Condition::Not(inner) => simplify::not(lift_condition(inner)),
        Condition::And(left, right) => {
            simplify::and(lift_condition(left), lift_condition(right))
        }
        Condition::Or(left, right) => {
            simplify::or(lift_condition(left), lift_condition(right))
        }
        Condition::Implies(left, right) => {
            simplify::implies(lift_condition(left), lift_condition(right))
        }
        Condition::Paren(inner) => Predicate::Paren(Box::new(lift_condition(inner))),
    }
}

/// Verification conditions for one annotated function: the main obligation
/// `pre => wp(body, post)` followed by every loop side condition, in
/// generation order. The function verifies iff all of them are valid.
pub fn function_vcs(func: &FunctionDef) -> Vec<Predicate> {
    let post = func.post.clone().unwrap_or(Predicate::True);
    let pre = func.pre.clone().unwrap_or(Predicate::True);

    let outcome = wp(&func.body, post);

    let mut vcs = Vec::with_capacity(1 + outcome.vcs.len());
    vcs.push(simplify::implies(pre, outcome.pre));
    vcs.extend(outcome.vcs);
    vcs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinOp, CmpOp, Expr, ParamDef};

    fn x_eq_x() -> Predicate {
        Predicate::cmp(CmpOp::Eq, Expr::var("x"), Expr::var("x"))
    }

    #[test]
    fn expr_statement_is_identity() {
        let stmt = Statement::Expr(Expr::call("log", vec![Expr::var("x")]));
        let outcome = wp(&stmt, x_eq_x());
        assert_eq!(outcome.pre, x_eq_x());
        assert!(outcome.vcs.is_empty());
    }

    #[test]
    fn assignment_substitutes_exactly_the_target() {
        // wp(x := e, x == x) is e == e.
        let e = Expr::bin(BinOp::Add, Expr::var("y"), Expr::num(1));
        let stmt = Statement::assign("x", e.clone());
        let outcome = wp(&stmt, x_eq_x());
        assert_eq!(outcome.pre, Predicate::cmp(CmpOp::Eq, e.clone(), e));
        assert!(outcome.vcs.is_empty());
    }

    #[test]
    fn parallel_assignment_reads_the_pre_state() {
        // wp((x, y) := (y, x), x == y) is y == x.
        let stmt = Statement::Assign {
            targets: vec![LValue::Var("x".to_string()), LValue::Var("y".to_string())],
            values: vec![Expr::var("y"), Expr::var("x")],
        };
        let post = Predicate::cmp(CmpOp::Eq, Expr::var("x"), Expr::var("y"));
        let outcome = wp(&stmt, post);
        assert_eq!(
            outcome.pre,
            Predicate::cmp(CmpOp::Eq, Expr::var("y"), Expr::var("x"))
        );
    }

    #[test]
    fn array_element_target_does_not_substitute() {
        let stmt = Statement::Assign {
            targets: vec![LValue::ArrayElem {
                name: "a".to_string(),
                index: Expr::num(0),
            }],
            values: vec![Expr::num(7)],
        };
        let post = Predicate::cmp(CmpOp::Eq, Expr::array("a", Expr::num(0)), Expr::num(7));
        // The write is not modeled; the postcondition passes through as-is.
        assert_eq!(wp(&stmt, post.clone()).pre, post);
    }

    #[test]
    fn block_folds_right_to_left() {
        // x := x + 1; x := x * 2  with post  x == 6
        // wp: ((x + 1) * 2) == 6
        let stmt = Statement::Block(vec![
            Statement::assign("x", Expr::bin(BinOp::Add, Expr::var("x"), Expr::num(1))),
            Statement::assign("x", Expr::bin(BinOp::Mul, Expr::var("x"), Expr::num(2))),
        ]);
        let post = Predicate::cmp(CmpOp::Eq, Expr::var("x"), Expr::num(6));
        let expected = Predicate::cmp(
            CmpOp::Eq,
            Expr::bin(
                BinOp::Mul,
                Expr::bin(BinOp::Add, Expr::var("x"), Expr::num(1)),
                Expr::num(2),
            ),
            Expr::num(6),
        );
        assert_eq!(wp(&stmt, post).pre, expected);
    }

    #[test]
    fn if_rule_guards_both_branches() {
        let stmt = Statement::If {
            condition: Condition::cmp(CmpOp::Lt, Expr::var("x"), Expr::num(0)),
            then_branch: Box::new(Statement::assign("r", Expr::neg(Expr::var("x")))),
            else_branch: Some(Box::new(Statement::assign("r", Expr::var("x")))),
        };
        let post = Predicate::cmp(CmpOp::Ge, Expr::var("r"), Expr::num(0));
        let outcome = wp(&stmt, post);
        assert!(outcome.vcs.is_empty());

        let guard = Predicate::cmp(CmpOp::Lt, Expr::var("x"), Expr::num(0));
        let then_pre = Predicate::cmp(CmpOp::Ge, Expr::neg(Expr::var("x")), Expr::num(0));
        let else_pre = Predicate::cmp(CmpOp::Ge, Expr::var("x"), Expr::num(0));
        let expected = simplify::and(
            simplify::implies(guard.clone(), then_pre),
            simplify::implies(simplify::not(guard), else_pre),
        );
        assert_eq!(outcome.pre, expected);
    }

    #[test]
    fn if_true_collapses_to_then_branch() {
        // With a constant-true guard, the else implication folds to True
        // and vanishes under the conjunction: the precondition is exactly
        // the then-branch's.
        let then_branch = Statement::assign("r", Expr::num(1));
        let stmt = Statement::If {
            condition: Condition::True,
            then_branch: Box::new(then_branch.clone()),
            else_branch: Some(Box::new(Statement::assign("r", Expr::num(2)))),
        };
        let post = Predicate::cmp(CmpOp::Eq, Expr::var("r"), Expr::num(1));
        let outcome = wp(&stmt, post.clone());
        assert_eq!(outcome.pre, wp(&then_branch, post).pre);
    }

    #[test]
    fn missing_else_defaults_to_skip() {
        let stmt = Statement::If {
            condition: Condition::cmp(CmpOp::Lt, Expr::var("x"), Expr::num(0)),
            then_branch: Box::new(Statement::assign("x", Expr::num(0))),
            else_branch: None,
        };
        let post = Predicate::cmp(CmpOp::Ge, Expr::var("x"), Expr::num(0));
        let outcome = wp(&stmt, post.clone());

        let guard = Predicate::cmp(CmpOp::Lt, Expr::var("x"), Expr::num(0));
        let expected = simplify::and(
            simplify::implies(
                guard.clone(),
                Predicate::cmp(CmpOp::Ge, Expr::num(0), Expr::num(0)),
            ),
            simplify::implies(simplify::not(guard), post),
        );
        assert_eq!(outcome.pre, expected);
    }

    fn counting_loop(invariant: Option<Predicate>) -> Statement {
        Statement::While {
            condition: Condition::cmp(CmpOp::Lt, Expr::var("i"), Expr::var("n")),
            invariant,
            body: Box::new(Statement::assign(
                "i",
                Expr::bin(BinOp::Add, Expr::var("i"), Expr::num(1)),
            )),
        }
    }

    #[test]
    fn while_emits_preservation_and_exit() {
        let inv = Predicate::cmp(CmpOp::Le, Expr::var("i"), Expr::var("n"));
        let stmt = counting_loop(Some(inv.clone()));
        let post = Predicate::cmp(CmpOp::Eq, Expr::var("i"), Expr::var("n"));
        let outcome = wp(&stmt, post.clone());

        // Straight-line assignment body: exactly the two loop VCs.
        assert_eq!(outcome.vcs.len(), 2);
        assert_eq!(outcome.pre, inv);

        let guard = Predicate::cmp(CmpOp::Lt, Expr::var("i"), Expr::var("n"));
        let body_pre = Predicate::cmp(
            CmpOp::Le,
            Expr::bin(BinOp::Add, Expr::var("i"), Expr::num(1)),
            Expr::var("n"),
        );
        assert_eq!(
            outcome.vcs[0],
            simplify::implies(simplify::and(inv.clone(), guard.clone()), body_pre)
        );
        assert_eq!(
            outcome.vcs[1],
            simplify::implies(simplify::and(inv, simplify::not(guard)), post)
        );
    }

    #[test]
    fn while_without_invariant_defaults_to_true() {
        let stmt = counting_loop(None);
        let post = Predicate::cmp(CmpOp::Eq, Expr::var("i"), Expr::var("n"));
        let outcome = wp(&stmt, post.clone());

        assert_eq!(outcome.pre, Predicate::True);
        assert_eq!(outcome.vcs.len(), 2);
        // Preservation folds away: and(True, c) => wp(body, True) is
        // implies(c, True) which is True.
        assert_eq!(outcome.vcs[0], Predicate::True);
        // The exit VC carries the whole burden and will generally fail.
        let guard = Predicate::cmp(CmpOp::Lt, Expr::var("i"), Expr::var("n"));
        assert_eq!(outcome.vcs[1], simplify::implies(simplify::not(guard), post));
    }

    #[test]
    fn nested_loop_vcs_accumulate() {
        let inner = counting_loop(Some(Predicate::cmp(
            CmpOp::Le,
            Expr::var("i"),
            Expr::var("n"),
        )));
        let outer = Statement::While {
            condition: Condition::cmp(CmpOp::Lt, Expr::var("j"), Expr::var("m")),
            invariant: Some(Predicate::cmp(CmpOp::Le, Expr::var("j"), Expr::var("m"))),
            body: Box::new(Statement::Block(vec![
                Statement::assign("i", Expr::num(0)),
                inner,
                Statement::assign("j", Expr::bin(BinOp::Add, Expr::var("j"), Expr::num(1))),
            ])),
        };
        let post = Predicate::True;
        let outcome = wp(&outer, post);
        // Two from the outer loop, two from the inner.
        assert_eq!(outcome.vcs.len(), 4);
    }

    #[test]
    fn lift_preserves_paren_and_maps_connectives() {
        let cond = Condition::Paren(Box::new(Condition::and(
            Condition::cmp(CmpOp::Gt, Expr::var("x"), Expr::num(0)),
            Condition::not(Condition::cmp(CmpOp::Eq, Expr::var("x"), Expr::num(3))),
        )));
        let lifted = lift_condition(&cond);
        let expected = Predicate::Paren(Box::new(simplify::and(
            Predicate::cmp(CmpOp::Gt, Expr::var("x"), Expr::num(0)),
            simplify::not(Predicate::cmp(CmpOp::Eq, Expr::var("x"), Expr::num(3))),
        )));
        assert_eq!(lifted, expected);
    }

    #[test]
    fn lift_folds_constants_through_smart_constructors() {
        let cond = Condition::and(
            Condition::True,
            Condition::cmp(CmpOp::Gt, Expr::var("x"), Expr::num(0)),
        );
        assert_eq!(
            lift_condition(&cond),
            Predicate::cmp(CmpOp::Gt, Expr::var("x"), Expr::num(0))
        );
    }

    #[test]
    fn function_vcs_lead_with_the_main_obligation() {
        let func = FunctionDef::new(
            "inc",
            vec![ParamDef::int("x")],
            vec![ParamDef::int("r")],
            vec![],
            Statement::assign("r", Expr::bin(BinOp::Add, Expr::var("x"), Expr::num(1))),
        )
        .with_pre(Predicate::cmp(CmpOp::Ge, Expr::var("x"), Expr::num(0)))
        .with_post(Predicate::cmp(CmpOp::Gt, Expr::var("r"), Expr::num(0)));

        let vcs = function_vcs(&func);
        assert_eq!(vcs.len(), 1);
        let expected = simplify::implies(
            Predicate::cmp(CmpOp::Ge, Expr::var("x"), Expr::num(0)),
            Predicate::cmp(
                CmpOp::Gt,
                Expr::bin(BinOp::Add, Expr::var("x"), Expr::num(1)),
                Expr::num(0),
            ),
        );
        assert_eq!(vcs[0], expected);
    }

    #[test]
    fn absent_contracts_default_to_true() {
        let func = FunctionDef::new(
            "noop",
            vec![],
            vec![],
            vec![],
            Statement::Block(vec![]),
        );
        let vcs = function_vcs(&func);
        // implies(True, True) folds to True: trivially provable.
        assert_eq!(vcs, vec![Predicate::True]);
    }
}
