//! Colored verification output formatter.
//!
//! Produces per-function verification results with color-coded status:
//!   [OK]      function_name (green)
//!   [FAIL]    function_name - counterexample detail (red)
//!   [UNKNOWN] function_name - reason (yellow)

use colored::Colorize;

/// Status of a function's verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// All VCs verified (UNSAT)
    Ok,
    /// At least one VC is violated (counterexample found)
    Fail,
    /// The solver could not decide, or the backend failed
    Inconclusive,
}

/// Result of verifying a single function.
#[derive(Debug, Clone)]
pub struct FunctionReport {
    pub name: String,
    pub status: VerificationStatus,
    /// Detail message for FAIL/UNKNOWN (witness text or reason)
    pub message: Option<String>,
    /// Number of VCs generated for the function
    pub vc_count: usize,
    /// Number of VCs that verified before the first failure
    pub verified_count: usize,
    /// Verification duration in milliseconds
    pub duration_ms: u64,
}

/// Print verification reports with colored output.
///
/// Output format:
/// ```text
///   [OK]      abs (1 VCs)
///   [FAIL]    sum (Verification failed for function "sum". ...)
///   [UNKNOWN] spin (timeout)
///
/// Summary: 1 OK, 1 FAIL, 1 UNKNOWN (total: 156ms)
/// ```
///
/// With `verbose`, per-function timing is appended to OK lines.
pub fn print_verification_results(reports: &[FunctionReport], verbose: bool) {
    if reports.is_empty() {
        eprintln!("{}", "No functions to verify.".dimmed());
        return;
    }

    eprintln!();
    for report in reports {
        match report.status {
            VerificationStatus::Ok => {
                let mut line = format!(
                    "  {}  {} ({} VCs)",
                    "[OK]".green().bold(),
                    report.name,
                    report.vc_count,
                );
                if verbose {
                    line.push_str(&format!(", {}ms", report.duration_ms));
                }
                eprintln!("{line}");
            }
            VerificationStatus::Fail => {
                let detail = report.message.as_deref().unwrap_or("specification violated");
                eprintln!("  {}  {} ({detail})", "[FAIL]".red().bold(), report.name);
            }
            VerificationStatus::Inconclusive => {
                let detail = report.message.as_deref().unwrap_or("solver inconclusive");
                eprintln!(
                    "  {}  {} ({detail})",
                    "[UNKNOWN]".yellow().bold(),
                    report.name,
                );
            }
        }
    }

    let ok_count = count(reports, VerificationStatus::Ok);
    let fail_count = count(reports, VerificationStatus::Fail);
    let unknown_count = count(reports, VerificationStatus::Inconclusive);
    let total_ms: u64 = reports.iter().map(|r| r.duration_ms).sum();

    let mut parts = Vec::new();
    if ok_count > 0 {
        parts.push(format!("{} {}", ok_count, "OK".green()));
    }
    if fail_count > 0 {
        parts.push(format!("{} {}", fail_count, "FAIL".red()));
    }
    if unknown_count > 0 {
        parts.push(format!("{} {}", unknown_count, "UNKNOWN".yellow()));
    }

    eprintln!();
    eprintln!("Summary: {} (total: {total_ms}ms)", parts.join(", "));
    eprintln!();
}

fn count(reports: &[FunctionReport], status: VerificationStatus) -> usize {
    reports.iter().filter(|r| r.status == status).count()
}
