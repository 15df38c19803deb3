//! Parse-event-driven AST builders.
//!
//! Each builder-role production gets a fresh builder value. The event driver
//! feeds it the production's terminals and finished child results in source
//! order, then calls [`Builder::finish`] and hands the output to the parent
//! as a single [`Event::Child`]. A builder that is dropped without finishing
//! has no effect on any other builder.
//!
//! Precedence and associativity are not decided here. They follow from the
//! grammar: every precedence level is its own production, so a tighter
//! level always reaches a looser one as one finished child.

use std::fmt;

use thiserror::Error;

use crate::ast::{ComponentReference, Expression, Literal};

pub mod arguments;
pub mod component;
pub mod conditional;
pub mod expression;

pub use arguments::ArgumentListBuilder;
pub use component::ComponentReferenceBuilder;
pub use conditional::IfExpressionBuilder;
pub use expression::ExpressionBuilder;

// ============================================================================
// EVENTS
// ============================================================================

/// A finished result of a nested production.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Expression(Expression),
    Reference(ComponentReference),
    Arguments(Vec<Expression>),
}

/// Operator, keyword and punctuation tokens that shape the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    /// `:` as a range separator or a wildcard subscript.
    Colon,
    /// Leading `.` of a globally scoped reference.
    ScopeDot,
    Or,
    And,
    Not,
    Equal,
    NotEqual,
    LessEqual,
    Less,
    GreaterEqual,
    Greater,
    Plus,
    Minus,
    DotPlus,
    DotMinus,
    Star,
    Slash,
    DotStar,
    DotSlash,
    Pow,
    DotPow,
    End,
    Der,
    Initial,
    Pure,
}

/// One event delivered to the innermost live builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Child(Node),
    Terminal(Terminal),
    Literal(Literal),
    Identifier(String),
}

impl Terminal {
    pub const fn symbol(self) -> &'static str {
        match self {
            Terminal::Colon => ":",
            Terminal::ScopeDot => ".",
            Terminal::Or => "or",
            Terminal::And => "and",
            Terminal::Not => "not",
            Terminal::Equal => "==",
            Terminal::NotEqual => "<>",
            Terminal::LessEqual => "<=",
            Terminal::Less => "<",
            Terminal::GreaterEqual => ">=",
            Terminal::Greater => ">",
            Terminal::Plus => "+",
            Terminal::Minus => "-",
            Terminal::DotPlus => ".+",
            Terminal::DotMinus => ".-",
            Terminal::Star => "*",
            Terminal::Slash => "/",
            Terminal::DotStar => ".*",
            Terminal::DotSlash => "./",
            Terminal::Pow => "^",
            Terminal::DotPow => ".^",
            Terminal::End => "end",
            Terminal::Der => "der",
            Terminal::Initial => "initial",
            Terminal::Pure => "pure",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Child(Node::Expression(_)) => f.write_str("child expression"),
            Event::Child(Node::Reference(r)) => write!(f, "component reference '{}'", r),
            Event::Child(Node::Arguments(args)) => write!(f, "argument list ({} args)", args.len()),
            Event::Terminal(t) => write!(f, "terminal '{}'", t.symbol()),
            Event::Literal(_) => f.write_str("literal"),
            Event::Identifier(name) => write!(f, "identifier '{}'", name),
        }
    }
}

// ============================================================================
// BUILDER CONTRACT
// ============================================================================

/// Accumulates one production's events into a single output node.
pub trait Builder: Default {
    type Output;

    fn on_event(&mut self, event: Event) -> Result<(), BuildError>;

    fn finish(self) -> Result<Self::Output, BuildError>;
}

/// A builder-contract violation: an event or completion with no valid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("unexpected {event} in state {state}")]
    UnexpectedEvent { event: String, state: &'static str },
    #[error("production already has an expression; expected an operator")]
    AlreadyHasExpression,
    #[error("no unary '{symbol}'")]
    InvalidUnary { symbol: &'static str },
    #[error("no binary '{symbol}'")]
    InvalidBinary { symbol: &'static str },
    #[error("colon with no left operand")]
    ColonWithoutLeftOperand,
    #[error("two colons require an intermediate expression")]
    ColonWithoutStep,
    #[error("subscript without target")]
    SubscriptWithoutTarget,
    #[error("scope qualifier after identifier")]
    ScopeAfterIdentifier,
    #[error("empty reference")]
    EmptyReference,
    #[error("incomplete conditional")]
    IncompleteConditional,
    #[error("incomplete expression (state {state})")]
    IncompleteExpression { state: &'static str },
    #[error("empty expression")]
    EmptyExpression,
}

impl BuildError {
    pub(crate) fn unexpected(event: &Event, state: &'static str) -> Self {
        BuildError::UnexpectedEvent {
            event: event.to_string(),
            state,
        }
    }
}

/// Converts a finished builder output into the event its parent receives.
pub trait IntoNode {
    fn into_node(self) -> Node;
}

impl IntoNode for Expression {
    fn into_node(self) -> Node {
        Node::Expression(self)
    }
}

impl IntoNode for ComponentReference {
    fn into_node(self) -> Node {
        Node::Reference(self)
    }
}

impl IntoNode for Vec<Expression> {
    fn into_node(self) -> Node {
        Node::Arguments(self)
    }
}
