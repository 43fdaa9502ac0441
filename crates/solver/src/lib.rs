//! # imp-solver
//!
//! SMT solver interface for the Imp verifier.
//!
//! This crate provides a clean interface to an external SMT solver (Z3 by
//! default, CVC5 and Yices supported) by spawning it as a subprocess and
//! communicating via SMT-LIB2 text. Every `check_sat` call runs in a fresh
//! solver process, so each verification condition gets an independent
//! session with no state carried between queries.
//!
//! ## Usage
//!
//! ```no_run
//! use imp_solver::{SmtSolver, SolverResult};
//!
//! let solver = SmtSolver::with_default_config().unwrap();
//! let result = solver.check_sat_raw("
//!     (declare-const x Int)
//!     (assert (> x 0))
//!     (assert (< x 10))
//!     (check-sat)
//!     (get-model)
//! ").unwrap();
//!
//! match result {
//!     SolverResult::Sat(model) => println!("SAT: {model:?}"),
//!     SolverResult::Unsat => println!("UNSAT (proved)"),
//!     SolverResult::Unknown(reason) => println!("Unknown: {reason}"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod model;
mod parser;
pub mod result;
pub mod solver;

// Re-export primary types for ergonomic use
pub use config::{SolverConfig, SolverKind};
pub use error::SolverError;
pub use model::Model;
pub use result::SolverResult;
pub use solver::SmtSolver;
