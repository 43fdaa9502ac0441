//! # imp-driver
//!
//! The verification driver: takes a parsed, checked [`imp_analysis::ast::Module`]
//! and an [`imp_solver::SmtSolver`], builds the module's definitional-spec
//! table, and discharges every function's verification conditions in order --
//! WP transform, call inlining, SMT encoding, negate-and-check.
//!
//! Failures surface as [`error::VerifyError`] values carrying the function
//! name and, for counterexamples, a rendered witness. `output` and
//! `json_output` format per-function reports for humans and machines;
//! `parallel` fans function verification out over a rayon pool.

pub mod cex;
pub mod error;
pub mod json_output;
pub mod output;
pub mod parallel;
pub mod verify;

pub use error::VerifyError;
pub use output::{FunctionReport, VerificationStatus};
pub use verify::{ModuleVerifier, verify_module};
