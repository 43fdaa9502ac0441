use std::fmt;

use imp_solver::SolverError;

/// A verification failure, always tagged with the offending function.
///
/// A counterexample is the expected, common outcome for incorrect code; the
/// other two variants are infrastructure limitations rather than proof of a
/// specification violation.
#[derive(Debug)]
pub enum VerifyError {
    /// The solver found a model of a VC's negation: a concrete assignment
    /// violating the specification.
    Counterexample {
        function: String,
        /// Rendered witness, e.g. `abs(x=(- 1)) => [r=(- 1)]`.
        witness: String,
    },
    /// The solver returned `unknown`: the VC could not be decided either way.
    Inconclusive { function: String, reason: String },
    /// The solver backend itself failed (spawn failure, garbled output, ...).
    Backend {
        function: String,
        source: SolverError,
    },
}

impl VerifyError {
    /// Name of the function whose verification failed.
    pub fn function(&self) -> &str {
        match self {
            VerifyError::Counterexample { function, .. }
            | VerifyError::Inconclusive { function, .. }
            | VerifyError::Backend { function, .. } => function,
        }
    }
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::Counterexample { function, witness } => {
                write!(f, "Verification failed for function \"{function}\".\n{witness}")
            }
            VerifyError::Inconclusive { function, reason } => {
                write!(
                    f,
                    "Solver returned \"unknown\" while verifying function \"{function}\": {reason}"
                )
            }
            VerifyError::Backend { function, source } => {
                write!(f, "Solver error while verifying function \"{function}\": {source}")
            }
        }
    }
}

impl std::error::Error for VerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VerifyError::Backend { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counterexample_display_includes_witness() {
        let err = VerifyError::Counterexample {
            function: "abs".to_string(),
            witness: "abs(x=(- 1)) => [r=(- 1)]".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Verification failed for function \"abs\""));
        assert!(text.contains("abs(x=(- 1)) => [r=(- 1)]"));
    }

    #[test]
    fn inconclusive_display() {
        let err = VerifyError::Inconclusive {
            function: "sum".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Solver returned \"unknown\" while verifying function \"sum\": timeout"
        );
    }

    #[test]
    fn function_accessor() {
        let err = VerifyError::Inconclusive {
            function: "f".to_string(),
            reason: "x".to_string(),
        };
        assert_eq!(err.function(), "f");
    }

    #[test]
    fn backend_error_exposes_source() {
        use std::error::Error;
        let err = VerifyError::Backend {
            function: "f".to_string(),
            source: SolverError::Timeout,
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("Solver error while verifying function \"f\""));
    }
}
