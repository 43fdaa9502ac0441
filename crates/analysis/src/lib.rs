//! # imp-analysis
//!
//! The reasoning core of the Imp verifier: the program algebra the verifier
//! operates over, the predicate simplifier, capture-skipping substitution,
//! definitional-spec extraction, the backward weakest-precondition
//! transform, call inlining, and the encoding of verification conditions
//! onto the SMT-LIB term language of `imp-smtlib`.
//!
//! Everything in this crate is pure: statements are interpreted
//! symbolically by substitution, never executed, and no function here talks
//! to a solver. The `imp-driver` crate wires these pieces to `imp-solver`.

pub mod ast;
pub mod defspec;
pub mod encode;
pub mod inline;
pub mod simplify;
pub mod subst;
pub mod wp;
