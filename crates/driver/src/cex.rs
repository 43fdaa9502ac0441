//! Counterexample witness rendering.
//!
//! Formats a solver model as a call that violates the specification:
//!
//! ```text
//! max(a=0, b=3) => [r=0]
//!   best=0
//! ```
//!
//! one line for the call with parameter and return values, then one
//! indented line per local variable. Values are looked up under the
//! function-scoped SMT names; anything the model does not mention renders
//! as `?`. Array-typed variables show the solver's own value text
//! (typically a `const`/`store` s-expression), which is as concrete as a
//! symbolically-indexed array gets.

use imp_analysis::ast::{FunctionDef, ParamDef};
use imp_analysis::encode::scoped_name;
use imp_solver::Model;

/// Render a human-readable witness for a violated VC of `func`.
pub fn render_witness(func: &FunctionDef, model: &Model) -> String {
    let value = |param: &ParamDef| -> String {
        model
            .get(&scoped_name(func, &param.name))
            .unwrap_or("?")
            .to_string()
    };

    let args = func
        .params
        .iter()
        .map(|p| format!("{}={}", p.name, value(p)))
        .collect::<Vec<_>>()
        .join(", ");
    let results = func
        .returns
        .iter()
        .map(|r| format!("{}={}", r.name, value(r)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut text = format!("{}({args}) => [{results}]", func.name);
    for local in &func.locals {
        text.push_str(&format!("\n  {}={}", local.name, value(local)));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use imp_analysis::ast::{Expr, Statement};

    fn max_fn() -> FunctionDef {
        FunctionDef::new(
            "max",
            vec![ParamDef::int("a"), ParamDef::int("b")],
            vec![ParamDef::int("r")],
            vec![ParamDef::int("best")],
            Statement::assign("r", Expr::var("a")),
        )
    }

    #[test]
    fn renders_call_returns_and_locals() {
        let model = Model::with_assignments(vec![
            ("max_a".to_string(), "0".to_string()),
            ("max_b".to_string(), "3".to_string()),
            ("max_r".to_string(), "0".to_string()),
            ("max_best".to_string(), "0".to_string()),
        ]);
        assert_eq!(
            render_witness(&max_fn(), &model),
            "max(a=0, b=3) => [r=0]\n  best=0"
        );
    }

    #[test]
    fn missing_values_render_as_question_mark() {
        let model = Model::with_assignments(vec![("max_a".to_string(), "1".to_string())]);
        assert_eq!(
            render_witness(&max_fn(), &model),
            "max(a=1, b=?) => [r=?]\n  best=?"
        );
    }

    #[test]
    fn negative_values_keep_solver_syntax() {
        let func = FunctionDef::new(
            "abs",
            vec![ParamDef::int("x")],
            vec![ParamDef::int("r")],
            vec![],
            Statement::assign("r", Expr::var("x")),
        );
        let model = Model::with_assignments(vec![
            ("abs_x".to_string(), "(- 1)".to_string()),
            ("abs_r".to_string(), "(- 1)".to_string()),
        ]);
        assert_eq!(render_witness(&func, &model), "abs(x=(- 1)) => [r=(- 1)]");
    }

    #[test]
    fn array_values_render_raw() {
        let func = FunctionDef::new(
            "scan",
            vec![ParamDef::int_array("a")],
            vec![ParamDef::int("r")],
            vec![],
            Statement::assign("r", Expr::num(0)),
        );
        let model = Model::with_assignments(vec![
            (
                "scan_a".to_string(),
                "((as const (Array Int Int)) 0)".to_string(),
            ),
            ("scan_r".to_string(), "0".to_string()),
        ]);
        assert_eq!(
            render_witness(&func, &model),
            "scan(a=((as const (Array Int Int)) 0)) => [r=0]"
        );
    }
}
