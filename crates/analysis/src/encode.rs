//! Encoding of verification conditions onto the SMT-LIB term language.
//!
//! One [`Encoder`] encodes one (already inlined) VC of one function into a
//! self-contained [`Script`]: every program variable becomes a constant
//! named by the collision-free `{function}_{variable}` scheme, arrays
//! become `(Array Int Int)` constants read through `select`, calls without
//! a definitional spec become uninterpreted functions declared per distinct
//! name, formula references become Bool-valued uninterpreted functions, and
//! quantifiers bind fresh variables that shadow same-named symbols for the
//! extent of their body.
//!
//! The script asserts the **negation** of the VC: `unsat` means the VC
//! holds, a model of the negation is a counterexample to the specification.
//! Division maps to SMT integer `div`; no nonzero side condition is
//! generated for divisors.

use std::collections::{BTreeMap, HashMap};

use imp_smtlib::command::Command;
use imp_smtlib::script::Script;
use imp_smtlib::sort::Sort;
use imp_smtlib::term::Term;

use crate::ast::{BinOp, CmpOp, Expr, FunctionDef, Predicate, QuantKind, VarType};

/// SMT constant name of a program variable, scoped per function so modules
/// with many functions never collide.
pub fn scoped_name(func: &FunctionDef, var: &str) -> String {
    format!("{}_{}", func.name, var)
}

fn sort_of(ty: VarType) -> Sort {
    match ty {
        VarType::Int => Sort::Int,
        VarType::IntArray => Sort::int_array(),
    }
}

/// Bound-variable scope: source name -> SMT name, innermost binding wins.
type Scope = HashMap<String, String>;

/// Encoder for the verification conditions of one function.
pub struct Encoder<'f> {
    func: &'f FunctionDef,
    /// Constants to declare, keyed by SMT name (sorted for stable output).
    consts: BTreeMap<String, Sort>,
    /// Uninterpreted functions to declare: name -> (parameter sorts, return sort).
    funs: BTreeMap<String, (Vec<Sort>, Sort)>,
}

impl<'f> Encoder<'f> {
    /// Create an encoder with every declared variable of the function
    /// (parameters, returns, locals) pre-registered, so counterexample
    /// models can be evaluated for all of them even when a VC mentions
    /// only a few.
    pub fn new(func: &'f FunctionDef) -> Self {
        let mut consts = BTreeMap::new();
        for param in func.declared_vars() {
            consts.insert(scoped_name(func, &param.name), sort_of(param.ty));
        }
        Self {
            func,
            consts,
            funs: BTreeMap::new(),
        }
    }

    /// Encode one VC into a self-contained script asserting its negation.
    pub fn encode_vc(mut self, vc: &Predicate) -> Script {
        let term = self.encode_predicate(vc, &Scope::new());

        let mut script = Script::new();
        script.push(Command::SetLogic("ALL".to_string()));
        for (name, (params, ret)) in &self.funs {
            script.push(Command::DeclareFun(
                name.clone(),
                params.clone(),
                ret.clone(),
            ));
        }
        for (name, sort) in &self.consts {
            script.push(Command::DeclareConst(name.clone(), sort.clone()));
        }
        script.push(Command::Assert(Term::not(term)));
        script
    }

    fn encode_predicate(&mut self, pred: &Predicate, scope: &Scope) -> Term {
        match pred {
            Predicate::True => Term::BoolLit(true),
            Predicate::False => Term::BoolLit(false),

            Predicate::Comparison { op, left, right } => {
                let l = self.encode_expr(left, scope);
                let r = self.encode_expr(right, scope);
                match op {
                    CmpOp::Eq => Term::eq(l, r),
                    CmpOp::Ne => Term::not(Term::eq(l, r)),
                    CmpOp::Gt => Term::IntGt(Box::new(l), Box::new(r)),
                    CmpOp::Lt => Term::IntLt(Box::new(l), Box::new(r)),
                    CmpOp::Ge => Term::IntGe(Box::new(l), Box::new(r)),
                    CmpOp::Le => Term::IntLe(Box::new(l), Box::new(r)),
                }
            }

            Predicate::Not(inner) => Term::not(self.encode_predicate(inner, scope)),
            Predicate::And(left, right) => Term::And(vec![
                self.encode_predicate(left, scope),
                self.encode_predicate(right, scope),
            ]),
            Predicate::Or(left, right) => Term::Or(vec![
                self.encode_predicate(left, scope),
                self.encode_predicate(right, scope),
            ]),
            Predicate::Implies(left, right) => Term::Implies(
                Box::new(self.encode_predicate(left, scope)),
                Box::new(self.encode_predicate(right, scope)),
            ),
            Predicate::Paren(inner) => self.encode_predicate(inner, scope),

            Predicate::Quantifier {
                kind,
                var,
                ty,
                body,
            } => {
                // The bound variable shadows any same-named binding for the
                // remainder of this body only.
                let mut inner_scope = scope.clone();
                inner_scope.insert(var.clone(), var.clone());
                let body_term = self.encode_predicate(body, &inner_scope);

                let bindings = vec![(var.clone(), sort_of(*ty))];
                match kind {
                    QuantKind::Forall => Term::Forall(bindings, Box::new(body_term)),
                    QuantKind::Exists => Term::Exists(bindings, Box::new(body_term)),
                }
            }

            Predicate::FormulaRef { name, params } => {
                let sorts: Vec<Sort> = params.iter().map(|p| sort_of(p.ty)).collect();
                self.funs
                    .entry(name.clone())
                    .or_insert((sorts, Sort::Bool));

                let args: Vec<Term> = params
                    .iter()
                    .map(|p| self.resolve_var(&p.name, Some(p.ty), scope))
                    .collect();
                Term::App(name.clone(), args)
            }
        }
    }

    fn encode_expr(&mut self, expr: &Expr, scope: &Scope) -> Term {
        match expr {
            Expr::Num(value) => Term::IntLit(*value),
            Expr::Var(name) => self.resolve_var(name, None, scope),
            Expr::Neg(arg) => Term::IntNeg(Box::new(self.encode_expr(arg, scope))),

            Expr::Bin { op, left, right } => {
                let l = Box::new(self.encode_expr(left, scope));
                let r = Box::new(self.encode_expr(right, scope));
                match op {
                    BinOp::Add => Term::IntAdd(l, r),
                    BinOp::Sub => Term::IntSub(l, r),
                    BinOp::Mul => Term::IntMul(l, r),
                    BinOp::Div => Term::IntDiv(l, r),
                }
            }

            Expr::Call { name, args } => {
                // Calls that survive inlining are uninterpreted: one symbol
                // per distinct name, all-integer signature of matching arity.
                self.funs
                    .entry(name.clone())
                    .or_insert((vec![Sort::Int; args.len()], Sort::Int));
                let encoded: Vec<Term> =
                    args.iter().map(|a| self.encode_expr(a, scope)).collect();
                Term::App(name.clone(), encoded)
            }

            Expr::ArrayAccess { name, index } => {
                let base = if let Some(bound) = scope.get(name) {
                    Term::const_(bound.clone())
                } else {
                    let smt_name = scoped_name(self.func, name);
                    self.consts
                        .entry(smt_name.clone())
                        .or_insert_with(Sort::int_array);
                    Term::const_(smt_name)
                };
                let idx = self.encode_expr(index, scope);
                Term::Select(Box::new(base), Box::new(idx))
            }
        }
    }

    /// Resolve a variable reference: a bound quantifier variable if one is
    /// in scope, otherwise the function-scoped constant (declared on first
    /// use when it is not part of the function's signature).
    fn resolve_var(&mut self, name: &str, ty_hint: Option<VarType>, scope: &Scope) -> Term {
        if let Some(bound) = scope.get(name) {
            return Term::const_(bound.clone());
        }
        let smt_name = scoped_name(self.func, name);
        let sort = self
            .func
            .var_type(name)
            .or(ty_hint)
            .map(sort_of)
            .unwrap_or(Sort::Int);
        self.consts.entry(smt_name.clone()).or_insert(sort);
        Term::const_(smt_name)
    }
}
