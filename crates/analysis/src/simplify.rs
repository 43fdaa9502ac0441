//! Predicate smart-constructors.
//!
//! Builds conjunctions, disjunctions, negations, and implications while
//! eagerly folding `True`/`False` using the absorbing/identity laws. This
//! keeps generated verification conditions small before they reach the
//! solver; it is purely an optimization and never changes provability.
//!
//! No other rewriting happens here: no distributivity, no double-negation
//! law, no quantifier manipulation.

use crate::ast::Predicate;

/// `and(True, b) = b`, `and(a, True) = a`, `and` with `False` is `False`.
pub fn and(a: Predicate, b: Predicate) -> Predicate {
    match (&a, &b) {
        (Predicate::True, _) => b,
        (_, Predicate::True) => a,
        (Predicate::False, _) | (_, Predicate::False) => Predicate::False,
        _ => Predicate::And(Box::new(a), Box::new(b)),
    }
}

/// `or(False, b) = b`, `or(a, False) = a`, `or` with `True` is `True`.
pub fn or(a: Predicate, b: Predicate) -> Predicate {
    match (&a, &b) {
        (Predicate::False, _) => b,
        (_, Predicate::False) => a,
        (Predicate::True, _) | (_, Predicate::True) => Predicate::True,
        _ => Predicate::Or(Box::new(a), Box::new(b)),
    }
}

/// `not(True) = False`, `not(False) = True`; everything else is wrapped.
pub fn not(a: Predicate) -> Predicate {
    match a {
        Predicate::True => Predicate::False,
        Predicate::False => Predicate::True,
        _ => Predicate::Not(Box::new(a)),
    }
}

/// `implies(a, b) = or(not(a), b)`.
pub fn implies(a: Predicate, b: Predicate) -> Predicate {
    or(not(a), b)
}
