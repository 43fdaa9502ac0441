//! The program algebra of the Imp language.
//!
//! These are the node shapes the verifier reasons over: pure expressions,
//! boolean guard conditions, specification predicates, and statements. The
//! parser and static checker live upstream; a [`Module`] arriving here is
//! assumed well-formed (identifiers resolve, assignment arities match,
//! array/scalar usage is consistent).
//!
//! All trees are immutable values with structural equality, finite and
//! non-cyclic. Conditions are structurally a subset of predicates: every
//! condition can be lifted to a predicate (see `wp::lift_condition`), while
//! predicates additionally carry quantifiers and named formula references
//! that never occur in executable code.

/// Arithmetic operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Comparison operators of conditions and predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

/// A pure, value-producing expression. No side effects are possible inside
/// an `Expr`; calls are mathematical applications of (possibly
/// uninterpreted) functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal
    Num(i64),
    /// Scalar variable reference
    Var(String),
    /// Unary minus
    Neg(Box<Expr>),
    /// Binary arithmetic
    Bin {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Function call
    Call { name: String, args: Vec<Expr> },
    /// Array element read: `name[index]`
    ArrayAccess { name: String, index: Box<Expr> },
}

impl Expr {
    pub fn num(value: i64) -> Expr {
        Expr::Num(value)
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    pub fn neg(arg: Expr) -> Expr {
        Expr::Neg(Box::new(arg))
    }

    pub fn bin(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Bin {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    pub fn array(name: impl Into<String>, index: Expr) -> Expr {
        Expr::ArrayAccess {
            name: name.into(),
            index: Box::new(index),
        }
    }
}

/// A boolean-valued guard condition (`if`/`while`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    True,
    False,
    Comparison {
        op: CmpOp,
        left: Expr,
        right: Expr,
    },
    Not(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Implies(Box<Condition>, Box<Condition>),
    Paren(Box<Condition>),
}

impl Condition {
    pub fn cmp(op: CmpOp, left: Expr, right: Expr) -> Condition {
        Condition::Comparison { op, left, right }
    }

    pub fn not(inner: Condition) -> Condition {
        Condition::Not(Box::new(inner))
    }

    pub fn and(left: Condition, right: Condition) -> Condition {
        Condition::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Condition, right: Condition) -> Condition {
        Condition::Or(Box::new(left), Box::new(right))
    }
}

/// Quantifier kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantKind {
    Forall,
    Exists,
}

/// Declared type of a program or specification variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    /// `int`
    Int,
    /// `int[]` -- a flat integer array indexed by a single integer key
    IntArray,
}

/// A specification predicate, as written in `requires`/`ensures`/loop
/// invariant annotations. Never occurs inside executable statement bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    True,
    False,
    Comparison {
        op: CmpOp,
        left: Expr,
        right: Expr,
    },
    Not(Box<Predicate>),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Implies(Box<Predicate>, Box<Predicate>),
    Paren(Box<Predicate>),
    /// Bounded quantification over a fresh variable that shadows any outer
    /// binding of the same name within `body`.
    Quantifier {
        kind: QuantKind,
        var: String,
        ty: VarType,
        body: Box<Predicate>,
    },
    /// An opaque named proposition over the listed parameters; the verifier
    /// never unfolds it.
    FormulaRef { name: String, params: Vec<ParamDef> },
}

impl Predicate {
    pub fn cmp(op: CmpOp, left: Expr, right: Expr) -> Predicate {
        Predicate::Comparison { op, left, right }
    }

    pub fn paren(inner: Predicate) -> Predicate {
        Predicate::Paren(Box::new(inner))
    }

    pub fn forall(var: impl Into<String>, ty: VarType, body: Predicate) -> Predicate {
        Predicate::Quantifier {
            kind: QuantKind::Forall,
            var: var.into(),
            ty,
            body: Box::new(body),
        }
    }

    pub fn exists(var: impl Into<String>, ty: VarType, body: Predicate) -> Predicate {
        Predicate::Quantifier {
            kind: QuantKind::Exists,
            var: var.into(),
            ty,
            body: Box::new(body),
        }
    }
}

/// An assignment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LValue {
    /// Scalar variable
    Var(String),
    /// Array element: `name[index] = ...`
    ArrayElem { name: String, index: Expr },
}

/// A statement of the imperative language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `{ s1; s2; ... }`
    Block(Vec<Statement>),
    /// Parallel (tuple) assignment: all right-hand sides are evaluated
    /// against the pre-state, then assigned simultaneously. The checker
    /// guarantees `targets.len() == values.len()`.
    Assign {
        targets: Vec<LValue>,
        values: Vec<Expr>,
    },
    If {
        condition: Condition,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    While {
        condition: Condition,
        invariant: Option<Predicate>,
        body: Box<Statement>,
    },
    /// An expression evaluated for its call; expressions are pure, so this
    /// has no observable state effect.
    Expr(Expr),
}

impl Statement {
    /// Single-target assignment helper.
    pub fn assign(target: impl Into<String>, value: Expr) -> Statement {
        Statement::Assign {
            targets: vec![LValue::Var(target.into())],
            values: vec![value],
        }
    }
}

/// A declared parameter, return variable, or local variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDef {
    pub name: String,
    pub ty: VarType,
}

impl ParamDef {
    pub fn int(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: VarType::Int,
        }
    }

    pub fn int_array(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: VarType::IntArray,
        }
    }
}

/// An annotated function definition. Within one function, parameter,
/// return, and local names are pairwise distinct (enforced upstream).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<ParamDef>,
    pub returns: Vec<ParamDef>,
    pub locals: Vec<ParamDef>,
    pub body: Statement,
    /// `requires` clause
    pub pre: Option<Predicate>,
    /// `ensures` clause
    pub post: Option<Predicate>,
}

impl FunctionDef {
    pub fn new(
        name: impl Into<String>,
        params: Vec<ParamDef>,
        returns: Vec<ParamDef>,
        locals: Vec<ParamDef>,
        body: Statement,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
            locals,
            body,
            pre: None,
            post: None,
        }
    }

    pub fn with_pre(mut self, pre: Predicate) -> Self {
        self.pre = Some(pre);
        self
    }

    pub fn with_post(mut self, post: Predicate) -> Self {
        self.post = Some(post);
        self
    }

    /// All declared variables of the function, in declaration order:
    /// parameters, then returns, then locals.
    pub fn declared_vars(&self) -> impl Iterator<Item = &ParamDef> {
        self.params
            .iter()
            .chain(self.returns.iter())
            .chain(self.locals.iter())
    }

    /// Declared type of a variable, if any part of the signature declares it.
    pub fn var_type(&self, name: &str) -> Option<VarType> {
        self.declared_vars()
            .find(|p| p.name == name)
            .map(|p| p.ty)
    }
}

/// An ordered collection of function definitions, immutable once produced
/// by the upstream parser/checker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub functions: Vec<FunctionDef>,
}

impl Module {
    pub fn new(functions: Vec<FunctionDef>) -> Self {
        Self { functions }
    }

    /// Look up a function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }
}
