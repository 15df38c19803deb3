//! AST module for MiniModelica expressions
//!
//! This module provides the closed set of expression node types produced by
//! the parser. Every node exclusively owns its children; trees are built once
//! and never mutated after being handed to a parent.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod printer;
pub mod visitor;

pub use visitor::{visit, Visitor};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// The core AST node for MiniModelica expressions.
///
/// The variant set is closed: traversals dispatch over exactly these seven
/// kinds (see [`visitor::Visitor`]).
///
/// # Examples
///
/// ```rust
/// use minimodelica::ast::{BinaryOp, Expression};
/// let expr = Expression::binary(BinaryOp::Sub, Expression::integer(3), Expression::integer(1));
/// assert_eq!(expr.to_debug_string(), "BinaryOp(-, Literal(3), Literal(1))");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Conditional {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    BinaryOp {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    FunctionCall {
        function: ComponentReference,
        arguments: Vec<Expression>,
    },
    Literal(Literal),
    ArrayRange {
        start: Box<Expression>,
        /// `None` means no step was written; it is not a stored default of one.
        step: Option<Box<Expression>>,
        stop: Box<Expression>,
    },
    Component(ComponentReference),
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
    ElemWisePlus,
    ElemWiseMinus,
}

/// Infix operators, grouped by precedence level from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Or,
    And,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
    Add,
    Sub,
    ElemAdd,
    ElemSub,
    Mul,
    Div,
    ElemMul,
    ElemDiv,
    Pow,
    ElemPow,
}

/// Literal values. `End` is the array-end index marker and carries no payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Real(f64),
    Integer(i64),
    Boolean(bool),
    String(String),
    End,
}

/// One dotted segment of a component reference: `b[1, :]` in `a.b[1, :].c`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePart {
    pub ident: String,
    pub subscripts: Vec<ArraySubscript>,
}

/// A dotted, optionally subscripted name such as `.a.b[1, :].c`.
///
/// `parts` is never empty once built by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentReference {
    pub parts: Vec<ReferencePart>,
    /// Set when the reference starts with a leading `.` scope qualifier.
    pub global: bool,
}

/// A single array subscript; `None` is the `:` wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySubscript(pub Option<Box<Expression>>);

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Expression {
    pub fn conditional(condition: Expression, then_branch: Expression, else_branch: Expression) -> Self {
        Expression::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(function: ComponentReference, arguments: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            function,
            arguments,
        }
    }

    pub fn range(start: Expression, step: Option<Expression>, stop: Expression) -> Self {
        Expression::ArrayRange {
            start: Box::new(start),
            step: step.map(Box::new),
            stop: Box::new(stop),
        }
    }

    pub fn component(reference: ComponentReference) -> Self {
        Expression::Component(reference)
    }

    pub fn real(value: f64) -> Self {
        Expression::Literal(Literal::Real(value))
    }

    pub fn integer(value: i64) -> Self {
        Expression::Literal(Literal::Integer(value))
    }

    pub fn boolean(value: bool) -> Self {
        Expression::Literal(Literal::Boolean(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    pub fn end() -> Self {
        Expression::Literal(Literal::End)
    }

    /// Returns the variant name used by the debug rendering.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Conditional { .. } => "If",
            Expression::UnaryOp { .. } => "UnaryOp",
            Expression::BinaryOp { .. } => "BinaryOp",
            Expression::FunctionCall { .. } => "FunctionCall",
            Expression::Literal(_) => "Literal",
            Expression::ArrayRange { .. } => "ArrayRange",
            Expression::Component(_) => "Component",
        }
    }

    /// Renders the tree as nested variant names, e.g.
    /// `BinaryOp(>, Literal(true), Literal(1e-12))`.
    pub fn to_debug_string(&self) -> String {
        printer::render(self)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_debug_string())
    }
}

impl UnaryOp {
    /// Source token for this operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::ElemWisePlus => ".+",
            UnaryOp::ElemWiseMinus => ".-",
        }
    }
}

impl BinaryOp {
    /// Source token for this operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "<>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::ElemAdd => ".+",
            BinaryOp::ElemSub => ".-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::ElemMul => ".*",
            BinaryOp::ElemDiv => "./",
            BinaryOp::Pow => "^",
            BinaryOp::ElemPow => ".^",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl ReferencePart {
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            subscripts: Vec::new(),
        }
    }

    pub fn with_subscripts(ident: impl Into<String>, subscripts: Vec<ArraySubscript>) -> Self {
        Self {
            ident: ident.into(),
            subscripts,
        }
    }
}

impl ComponentReference {
    /// A local reference with a single unsubscripted part, e.g. `der`.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            parts: vec![ReferencePart::new(name)],
            global: false,
        }
    }

    /// Dotted identifier path without subscripts.
    pub fn path(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.ident.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl ArraySubscript {
    pub fn wildcard() -> Self {
        ArraySubscript(None)
    }

    pub fn index(expr: Expression) -> Self {
        ArraySubscript(Some(Box::new(expr)))
    }

    pub fn is_wildcard(&self) -> bool {
        self.0.is_none()
    }

    pub fn expression(&self) -> Option<&Expression> {
        self.0.as_deref()
    }
}

impl fmt::Display for ComponentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&printer::render_reference(self))
    }
}
