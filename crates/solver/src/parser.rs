use crate::error::SolverError;
use crate::model::Model;
use crate::result::SolverResult;

/// Parse the solver's stdout output into a `SolverResult`.
///
/// Expected output format:
/// - First line: `sat`, `unsat`, or `unknown`
/// - If `sat`: subsequent lines contain the model from `(get-model)`
pub fn parse_solver_output(stdout: &str, stderr: &str) -> Result<SolverResult, SolverError> {
    let stdout = stdout.trim();

    if stdout.is_empty() {
        // Check stderr for clues
        if stderr.contains("timeout") {
            return Ok(SolverResult::Unknown("timeout".to_string()));
        }
        return Err(SolverError::ParseError(format!(
            "Empty solver output. stderr: {stderr}"
        )));
    }

    // Find the first meaningful line (sat/unsat/unknown)
    let first_line = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    match first_line {
        "unsat" => Ok(SolverResult::Unsat),
        "sat" => {
            let model = parse_model(stdout)?;
            Ok(SolverResult::Sat(model))
        }
        "unknown" => {
            let reason = extract_unknown_reason(stdout, stderr);
            Ok(SolverResult::Unknown(reason))
        }
        "timeout" => Ok(SolverResult::Unknown("timeout".to_string())),
        _ => Err(SolverError::ParseError(format!(
            "Unexpected solver output: {first_line}"
        ))),
    }
}

/// Extract the reason string for an "unknown" result.
fn extract_unknown_reason(stdout: &str, stderr: &str) -> String {
    // Z3 sometimes prints the reason after "unknown"
    let after_unknown = stdout
        .lines()
        .skip_while(|line| line.trim() != "unknown")
        .skip(1)
        .map(str::trim)
        .find(|line| !line.is_empty());

    if let Some(reason) = after_unknown {
        reason
            .trim_start_matches('(')
            .trim_end_matches(')')
            .to_string()
    } else if !stderr.is_empty() {
        stderr.trim().to_string()
    } else {
        "unknown".to_string()
    }
}

/// Parse a model from solver output.
///
/// Z3 outputs models in two known formats:
///
/// **Format 1** (Z3 4.15+):
/// ```text
/// (
///   (define-fun x () Int
///     5)
/// )
/// ```
///
/// **Format 2** (older Z3):
/// ```text
/// (model
///   (define-fun x () Int 5)
/// )
/// ```
///
/// Only nullary `define-fun`s (constants) are collected; the scoped program
/// variables the encoder declares are all nullary, including array-sorted
/// ones, whose values surface as raw s-expression text.
fn parse_model(output: &str) -> Result<Option<Model>, SolverError> {
    if !output.contains("(define-fun ") {
        return Ok(None);
    }

    let model_text = find_model_block(output);

    let mut assignments = Vec::new();
    let mut pos = 0;

    while pos < model_text.len() {
        if let Some(def_pos) = model_text[pos..].find("(define-fun ") {
            let abs_pos = pos + def_pos;
            let after_define = abs_pos + "(define-fun ".len();

            // Find the closing paren of this define-fun by matching parens
            if let Some(end) = find_sexp_end(model_text, abs_pos) {
                // end points AFTER the closing ')'; body excludes both the
                // opening `(define-fun ` and the final `)`
                let define_fun_body = &model_text[after_define..end - 1];
                if let Some((name, value)) = parse_define_fun(define_fun_body) {
                    assignments.push((name, value));
                }
                pos = end;
            } else {
                pos = after_define;
            }
        } else {
            break;
        }
    }

    if assignments.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Model::with_assignments(assignments)))
    }
}

/// Find the model block in the output text.
fn find_model_block(output: &str) -> &str {
    // Try "(model" first (older format)
    if let Some(start) = output.find("(model") {
        return &output[start..];
    }

    // For newer Z3: the model is the parenthesized block after "sat"
    let after_sat = output.find("sat").map(|i| &output[i + 3..]).unwrap_or("");
    let trimmed = after_sat.trim();
    if trimmed.starts_with('(') {
        trimmed
    } else {
        output
    }
}

/// Find the end of an S-expression starting at `start`.
/// Returns the index AFTER the closing paren.
fn find_sexp_end(input: &str, start: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if start >= bytes.len() || bytes[start] != b'(' {
        return None;
    }

    let mut depth = 1;
    let mut i = start + 1;
    while i < bytes.len() && depth > 0 {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        i += 1;
    }

    if depth == 0 { Some(i) } else { None }
}

/// Parse a single `define-fun` entry.
///
/// Input is the body of the define-fun (after `(define-fun `), up to but not
/// including the closing paren, possibly spread across multiple lines.
///
/// Returns `(name, value_string)` if it's a nullary function (constant).
fn parse_define_fun(input: &str) -> Option<(String, String)> {
    // Normalize whitespace: collapse all whitespace to single spaces
    let normalized: String = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let input = normalized.trim();

    if input.is_empty() {
        return None;
    }

    // Extract name: first token
    let name_end = input.find(|c: char| c.is_whitespace())?;
    let name = input[..name_end].to_string();
    let rest = input[name_end..].trim_start();

    // Expect `()` for nullary function (constant); skip interpreted
    // functions with parameters (e.g. uninterpreted call symbols)
    if !rest.starts_with("()") {
        return None;
    }
    let rest = rest[2..].trim_start();

    // Skip the sort, then take the remainder as the value.
    // The sort may be simple (`Int`, `Bool`) or compound (`(Array Int Int)`).
    let mut pos = skip_sexp(rest, 0)?;
    let bytes = rest.as_bytes();
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    if pos >= bytes.len() {
        return None;
    }

    let value = rest[pos..].trim().to_string();
    if value.is_empty() {
        return None;
    }
    Some((name, value))
}

/// Skip one S-expression starting at `pos`.
/// Returns the position after the S-expression.
fn skip_sexp(input: &str, pos: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if pos >= bytes.len() {
        return None;
    }

    if bytes[pos] == b'(' {
        // Compound: skip to matching close paren
        let mut depth = 1;
        let mut i = pos + 1;
        while i < bytes.len() && depth > 0 {
            match bytes[i] {
                b'(' => depth += 1,
                b')' => depth -= 1,
                _ => {}
            }
            i += 1;
        }
        Some(i)
    } else {
        // Atom: skip to next whitespace or paren
        let mut i = pos;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'('
            && bytes[i] != b')'
        {
            i += 1;
        }
        Some(i)
    }
}
