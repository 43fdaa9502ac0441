//! # imp-smtlib
//!
//! SMT-LIB2 AST types for the Imp verifier: sorts, terms, commands, and
//! scripts, plus `Display` implementations producing text a solver such as
//! Z3 can consume.
//!
//! The verifier only ever emits boolean/integer logic with integer-indexed
//! integer arrays, quantifiers, and uninterpreted functions, so the term
//! language is restricted to exactly that fragment.

pub mod command;
pub mod formatter;
pub mod script;
pub mod sort;
pub mod term;
