//! Per-module verification orchestration.
//!
//! The [`ModuleVerifier`] owns nothing heavier than the module's
//! definitional-spec table; the solver is borrowed, explicitly, for the
//! duration of the module (it is configuration data only -- each VC check
//! spawns an independent solver process).
//!
//! Functions are verified strictly in module order and a function's VCs in
//! generation order, short-circuiting on the first failure within a
//! function. The spec table is built once, before any VC is discharged,
//! and is read-only afterwards.

use std::time::Instant;

use imp_analysis::ast::{FunctionDef, Module, Predicate};
use imp_analysis::defspec::SpecTable;
use imp_analysis::encode::Encoder;
use imp_analysis::inline::inline_predicate;
use imp_analysis::wp::function_vcs;
use imp_solver::{SmtSolver, SolverResult};

use crate::cex::render_witness;
use crate::error::VerifyError;
use crate::output::{FunctionReport, VerificationStatus};

/// Verifies the functions of one module against their annotations.
pub struct ModuleVerifier<'m> {
    module: &'m Module,
    solver: &'m SmtSolver,
    specs: SpecTable,
}

impl<'m> ModuleVerifier<'m> {
    /// Build the verifier, scanning the module once for definitional specs.
    pub fn new(module: &'m Module, solver: &'m SmtSolver) -> Self {
        let specs = SpecTable::from_module(module);
        tracing::debug!(definitional_specs = specs.len(), "spec table built");
        Self {
            module,
            solver,
            specs,
        }
    }

    /// The module-wide definitional-spec table.
    pub fn specs(&self) -> &SpecTable {
        &self.specs
    }

    /// Verify every function in module order, stopping at the first failure.
    pub fn verify(&self) -> Result<(), VerifyError> {
        for func in &self.module.functions {
            self.verify_function(func)?;
        }
        Ok(())
    }

    /// Verify one function; returns the number of VCs proved.
    pub fn verify_function(&self, func: &FunctionDef) -> Result<usize, VerifyError> {
        let vcs = function_vcs(func);
        for (index, vc) in vcs.iter().enumerate() {
            tracing::debug!(
                function = %func.name,
                vc = index + 1,
                total = vcs.len(),
                "discharging VC"
            );
            self.discharge(func, vc)?;
        }
        tracing::info!(function = %func.name, vcs = vcs.len(), "verified");
        Ok(vcs.len())
    }

    /// Verify every function and collect a report per function, in module
    /// order. Unlike [`verify`](Self::verify) this does not stop at the
    /// first failing function.
    pub fn verify_all(&self) -> Vec<FunctionReport> {
        self.module
            .functions
            .iter()
            .map(|func| self.report_function(func))
            .collect()
    }

    /// Verify one function and fold the outcome into a report.
    pub fn report_function(&self, func: &FunctionDef) -> FunctionReport {
        let start = Instant::now();
        let vcs = function_vcs(func);

        let mut verified = 0;
        let mut status = VerificationStatus::Ok;
        let mut message = None;

        for vc in &vcs {
            match self.discharge(func, vc) {
                Ok(()) => verified += 1,
                Err(err) => {
                    status = match &err {
                        VerifyError::Counterexample { .. } => VerificationStatus::Fail,
                        VerifyError::Inconclusive { .. } | VerifyError::Backend { .. } => {
                            VerificationStatus::Inconclusive
                        }
                    };
                    message = Some(err.to_string());
                    break;
                }
            }
        }

        FunctionReport {
            name: func.name.clone(),
            status,
            message,
            vc_count: vcs.len(),
            verified_count: verified,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Inline, encode, and check a single VC: assert its negation and ask
    /// the solver. `unsat` proves the VC; a model is a counterexample.
    fn discharge(&self, func: &FunctionDef, vc: &Predicate) -> Result<(), VerifyError> {
        let inlined = inline_predicate(vc, &self.specs);
        let script = Encoder::new(func).encode_vc(&inlined);

        let result = self
            .solver
            .check_sat(&script)
            .map_err(|source| VerifyError::Backend {
                function: func.name.clone(),
                source,
            })?;

        match result {
            SolverResult::Unsat => Ok(()),
            SolverResult::Sat(model) => {
                let witness = render_witness(func, &model.unwrap_or_default());
                Err(VerifyError::Counterexample {
                    function: func.name.clone(),
                    witness,
                })
            }
            SolverResult::Unknown(reason) => Err(VerifyError::Inconclusive {
                function: func.name.clone(),
                reason,
            }),
        }
    }
}

/// Verify a whole module with the given solver. Convenience wrapper around
/// [`ModuleVerifier`].
pub fn verify_module(module: &Module, solver: &SmtSolver) -> Result<(), VerifyError> {
    ModuleVerifier::new(module, solver).verify()
}
