//! Definitional-spec extraction.
//!
//! A function with exactly one return variable whose postcondition has the
//! shape `result == <expr over parameters>` (either orientation, ignoring
//! outer parentheses) defines its result as an equation. Such equations are
//! recorded in a module-wide table and later inlined into verification
//! conditions, which strengthens provability: the solver sees the callee's
//! definition instead of an uninterpreted symbol.
//!
//! Functions with multiple returns, no postcondition, or a postcondition of
//! any other shape get no entry and stay uninterpreted in the encoding.
//! Only the single top-level equality is recognized; there are no
//! disjunction-of-cases definitions.

use std::collections::HashMap;

use crate::ast::{CmpOp, Expr, FunctionDef, Module, Predicate};

/// An inlinable definition: `name(params...) == result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionalSpec {
    /// Parameter names, in declaration order.
    pub params: Vec<String>,
    /// The defining expression over those parameters.
    pub result: Expr,
}

/// The module-wide table of definitional specs, built once before any VC is
/// discharged and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SpecTable {
    specs: HashMap<String, DefinitionalSpec>,
}

impl SpecTable {
    /// Scan a module and record every extractable definition.
    pub fn from_module(module: &Module) -> Self {
        let mut specs = HashMap::new();
        for func in &module.functions {
            if let Some(spec) = extract(func) {
                specs.insert(func.name.clone(), spec);
            }
        }
        Self { specs }
    }

    pub fn get(&self, name: &str) -> Option<&DefinitionalSpec> {
        self.specs.get(name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Strip any number of outer `Paren` wrappers.
pub fn strip_parens(pred: &Predicate) -> &Predicate {
    let mut cur = pred;
    while let Predicate::Paren(inner) = cur {
        cur = inner;
    }
    cur
}

fn extract(func: &FunctionDef) -> Option<DefinitionalSpec> {
    if func.returns.len() != 1 {
        return None;
    }
    let post = func.post.as_ref()?;
    let ret = &func.returns[0].name;

    let Predicate::Comparison {
        op: CmpOp::Eq,
        left,
        right,
    } = strip_parens(post)
    else {
        return None;
    };

    let params = || func.params.iter().map(|p| p.name.clone()).collect();

    if matches!(left, Expr::Var(name) if name == ret) {
        return Some(DefinitionalSpec {
            params: params(),
            result: right.clone(),
        });
    }
    if matches!(right, Expr::Var(name) if name == ret) {
        return Some(DefinitionalSpec {
            params: params(),
            result: left.clone(),
        });
    }
    None
}
