//! Parallel verification using Rayon.
//!
//! Per-function parallelism: multiple functions are verified
//! simultaneously while each function's VCs stay sequential and
//! short-circuiting. Every VC check spawns its own solver subprocess, so
//! workers share no solver state; the only shared data is the read-only
//! definitional-spec table. Reports come back in module order regardless
//! of completion order.

use rayon::prelude::*;

use imp_analysis::ast::Module;
use imp_solver::SmtSolver;

use crate::output::FunctionReport;
use crate::verify::ModuleVerifier;

/// Verify all functions of a module in parallel.
///
/// `jobs` is the number of worker threads; `0` uses rayon's default
/// (number of logical CPUs).
pub fn verify_module_parallel(
    module: &Module,
    solver: &SmtSolver,
    jobs: usize,
) -> Vec<FunctionReport> {
    let verifier = ModuleVerifier::new(module, solver);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .unwrap();

    tracing::info!(
        functions = module.functions.len(),
        jobs = pool.current_num_threads(),
        "parallel verification"
    );

    pool.install(|| {
        module
            .functions
            .par_iter()
            .map(|func| verifier.report_function(func))
            .collect()
    })
}
