use std::io::Write;
use std::process::{Command, Stdio};

use imp_smtlib::command::Command as SmtCmd;
use imp_smtlib::script::Script;

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::parser::parse_solver_output;
use crate::result::SolverResult;

/// External SMT solver interface.
///
/// Communicates with the configured solver (Z3 by default) by spawning it as
/// a subprocess and piping SMT-LIB2 text. The value itself holds only
/// configuration, so it is cheap to share by reference across threads; every
/// `check_sat` call runs in its own process and therefore its own solver
/// context.
#[derive(Debug, Clone)]
pub struct SmtSolver {
    config: SolverConfig,
}

impl SmtSolver {
    /// Create a new `SmtSolver` with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create an `SmtSolver` with auto-detected Z3 location and default settings.
    pub fn with_default_config() -> Result<Self, SolverError> {
        let config = SolverConfig::auto_detect()?;
        Ok(Self { config })
    }

    /// Get a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Check satisfiability of a Script.
    ///
    /// Formats the script to SMT-LIB2 text using `Display`, appends
    /// `(check-sat)` and `(get-model)` if not already present, and runs the
    /// solver.
    pub fn check_sat(&self, script: &Script) -> Result<SolverResult, SolverError> {
        let mut smtlib = script.to_string();
        ensure_check_sat_and_get_model(&mut smtlib, script);
        self.check_sat_raw(&smtlib)
    }

    /// Check satisfiability from a raw SMT-LIB2 string.
    pub fn check_sat_raw(&self, smtlib: &str) -> Result<SolverResult, SolverError> {
        self.config.validate()?;

        let args = self.config.build_args();

        tracing::debug!(
            solver = %self.config.kind,
            bytes = smtlib.len(),
            "dispatching SMT query"
        );

        let mut child = Command::new(&self.config.solver_path)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                SolverError::ProcessError(format!(
                    "Failed to start {}: {e}",
                    self.config.kind
                ))
            })?;

        // Write SMT-LIB to stdin
        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                SolverError::ProcessError("Failed to open solver stdin".to_string())
            })?;
            stdin.write_all(smtlib.as_bytes()).map_err(|e| {
                SolverError::ProcessError(format!("Failed to write to solver stdin: {e}"))
            })?;
        }

        // Wait for the solver to finish and collect output
        let output = child
            .wait_with_output()
            .map_err(|e| SolverError::ProcessError(format!("Failed to wait for solver: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Check for timeout in stderr
        if stderr.contains("timeout") || stdout.trim() == "timeout" {
            return Ok(SolverResult::Unknown("timeout".to_string()));
        }

        parse_solver_output(&stdout, &stderr)
    }
}

/// Ensure the SMT-LIB text includes `(check-sat)` and `(get-model)`.
fn ensure_check_sat_and_get_model(smtlib: &mut String, script: &Script) {
    let has_check_sat = script
        .commands()
        .iter()
        .any(|c| matches!(c, SmtCmd::CheckSat));
    let has_get_model = script
        .commands()
        .iter()
        .any(|c| matches!(c, SmtCmd::GetModel));

    if !has_check_sat {
        smtlib.push_str("(check-sat)\n");
    }
    if !has_get_model {
        smtlib.push_str("(get-model)\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imp_smtlib::sort::Sort;
    use imp_smtlib::term::Term;

    #[test]
    fn ensure_appends_check_sat() {
        let script = Script::new();
        let mut smtlib = String::new();
        ensure_check_sat_and_get_model(&mut smtlib, &script);
        assert!(smtlib.contains("(check-sat)"));
        assert!(smtlib.contains("(get-model)"));
    }

    #[test]
    fn ensure_does_not_duplicate_check_sat() {
        let mut script = Script::new();
        script.push(SmtCmd::CheckSat);
        script.push(SmtCmd::GetModel);
        let mut smtlib = String::new();
        ensure_check_sat_and_get_model(&mut smtlib, &script);
        assert!(!smtlib.contains("(check-sat)"));
        assert!(!smtlib.contains("(get-model)"));
    }

    #[test]
    fn script_formats_through_display() {
        let mut script = Script::new();
        script.push(SmtCmd::SetLogic("ALL".to_string()));
        script.push(SmtCmd::DeclareConst("x".to_string(), Sort::Int));
        script.push(SmtCmd::Assert(Term::IntGt(
            Box::new(Term::const_("x")),
            Box::new(Term::IntLit(0)),
        )));

        let text = script.to_string();
        assert!(text.contains("(set-logic ALL)"));
        assert!(text.contains("(declare-const x Int)"));
        assert!(text.contains("(assert (> x 0))"));
    }
}
