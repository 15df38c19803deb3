//! Expression builder state machine.
//!
//! One instance assembles one expression-level production. It distinguishes
//! unary from binary use of the same token by whether an expression has
//! already been accumulated, and it folds left-associative operator lists
//! pair by pair: every completed binary node becomes the accumulated left
//! operand of the next operator.

use std::mem;

use super::{BuildError, Builder, Event, Node, Terminal};
use crate::ast::{BinaryOp, ComponentReference, Expression, UnaryOp};

#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    state: State,
}

#[derive(Debug)]
enum State {
    Base(Option<Expression>),
    UnaryPending(UnaryOp),
    BinaryPending {
        left: Expression,
        op: BinaryOp,
    },
    /// `middle` is the step candidate, or the stop of a two-operand range.
    RangePending {
        start: Expression,
        middle: Option<Expression>,
        second_colon: bool,
    },
    ReferenceOrCallPending(ComponentReference),
    CallPending(ComponentReference),
}

impl Default for State {
    fn default() -> Self {
        State::Base(None)
    }
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Base(_) => "Base",
            State::UnaryPending(_) => "UnaryPending",
            State::BinaryPending { .. } => "BinaryPending",
            State::RangePending { .. } => "RangePending",
            State::ReferenceOrCallPending(_) => "ReferenceOrCallPending",
            State::CallPending(_) => "CallPending",
        }
    }
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Builder for ExpressionBuilder {
    type Output = Expression;

    fn on_event(&mut self, event: Event) -> Result<(), BuildError> {
        let state = mem::take(&mut self.state);
        self.state = transition(state, event)?;
        Ok(())
    }

    fn finish(self) -> Result<Expression, BuildError> {
        match self.state {
            State::Base(Some(expr)) => Ok(expr),
            State::Base(None) => Err(BuildError::EmptyExpression),
            State::RangePending {
                start,
                middle: Some(stop),
                second_colon: false,
            } => Ok(Expression::range(start, None, stop)),
            State::ReferenceOrCallPending(reference) => Ok(Expression::component(reference)),
            other => Err(BuildError::IncompleteExpression { state: other.name() }),
        }
    }
}

fn transition(state: State, event: Event) -> Result<State, BuildError> {
    match (state, event) {
        // Bare operands
        (State::Base(None), Event::Literal(literal)) => Ok(State::Base(Some(Expression::Literal(literal)))),
        (State::Base(None), Event::Child(Node::Expression(expr))) => Ok(State::Base(Some(expr))),
        (State::Base(Some(_)), Event::Literal(_) | Event::Child(Node::Expression(_))) => {
            Err(BuildError::AlreadyHasExpression)
        }
        (State::Base(None), Event::Terminal(Terminal::End)) => Ok(State::Base(Some(Expression::end()))),

        // References and calls
        (State::Base(None), Event::Child(Node::Reference(reference))) => {
            Ok(State::ReferenceOrCallPending(reference))
        }
        (State::Base(None), Event::Terminal(t @ (Terminal::Der | Terminal::Initial | Terminal::Pure))) => {
            Ok(State::CallPending(ComponentReference::simple(t.symbol())))
        }
        (
            State::ReferenceOrCallPending(function) | State::CallPending(function),
            Event::Child(Node::Arguments(arguments)),
        ) => Ok(State::Base(Some(Expression::call(function, arguments)))),

        // Ranges
        (State::Base(acc), Event::Terminal(Terminal::Colon)) => match acc {
            Some(start) => Ok(State::RangePending {
                start,
                middle: None,
                second_colon: false,
            }),
            None => Err(BuildError::ColonWithoutLeftOperand),
        },
        (
            State::RangePending {
                start,
                middle: None,
                second_colon,
            },
            Event::Child(Node::Expression(expr)),
        ) => Ok(State::RangePending {
            start,
            middle: Some(expr),
            second_colon,
        }),
        (
            State::RangePending {
                start,
                middle: Some(step),
                second_colon: true,
            },
            Event::Child(Node::Expression(stop)),
        ) => Ok(State::Base(Some(Expression::range(start, Some(step), stop)))),
        (State::RangePending { middle: None, .. }, Event::Terminal(Terminal::Colon)) => {
            Err(BuildError::ColonWithoutStep)
        }
        (
            State::RangePending {
                start,
                middle: Some(step),
                second_colon: false,
            },
            Event::Terminal(Terminal::Colon),
        ) => Ok(State::RangePending {
            start,
            middle: Some(step),
            second_colon: true,
        }),

        // Operators
        (State::Base(acc), Event::Terminal(terminal)) => operator(acc, terminal),
        (State::UnaryPending(op), Event::Child(Node::Expression(operand))) => {
            Ok(State::Base(Some(Expression::unary(op, operand))))
        }
        (State::BinaryPending { left, op }, Event::Child(Node::Expression(right))) => {
            Ok(State::Base(Some(Expression::binary(op, left, right))))
        }

        (state, event) => Err(BuildError::unexpected(&event, state.name())),
    }
}

/// Resolves an operator token seen in `Base`: binary when an expression is
/// accumulated, unary otherwise.
fn operator(acc: Option<Expression>, terminal: Terminal) -> Result<State, BuildError> {
    match acc {
        Some(left) => match binary_op(terminal) {
            Some(op) => Ok(State::BinaryPending { left, op }),
            None if unary_op(terminal).is_some() => Err(BuildError::InvalidBinary {
                symbol: terminal.symbol(),
            }),
            None => Err(BuildError::unexpected(&Event::Terminal(terminal), "Base")),
        },
        None => match unary_op(terminal) {
            Some(op) => Ok(State::UnaryPending(op)),
            None if binary_op(terminal).is_some() => Err(BuildError::InvalidUnary {
                symbol: terminal.symbol(),
            }),
            None => Err(BuildError::unexpected(&Event::Terminal(terminal), "Base")),
        },
    }
}

fn binary_op(terminal: Terminal) -> Option<BinaryOp> {
    let op = match terminal {
        Terminal::Or => BinaryOp::Or,
        Terminal::And => BinaryOp::And,
        Terminal::Equal => BinaryOp::Eq,
        Terminal::NotEqual => BinaryOp::NotEq,
        Terminal::LessEqual => BinaryOp::LessEq,
        Terminal::Less => BinaryOp::Less,
        Terminal::GreaterEqual => BinaryOp::GreaterEq,
        Terminal::Greater => BinaryOp::Greater,
        Terminal::Plus => BinaryOp::Add,
        Terminal::Minus => BinaryOp::Sub,
        Terminal::DotPlus => BinaryOp::ElemAdd,
        Terminal::DotMinus => BinaryOp::ElemSub,
        Terminal::Star => BinaryOp::Mul,
        Terminal::Slash => BinaryOp::Div,
        Terminal::DotStar => BinaryOp::ElemMul,
        Terminal::DotSlash => BinaryOp::ElemDiv,
        Terminal::Pow => BinaryOp::Pow,
        Terminal::DotPow => BinaryOp::ElemPow,
        _ => return None,
    };
    Some(op)
}

fn unary_op(terminal: Terminal) -> Option<UnaryOp> {
    let op = match terminal {
        Terminal::Not => UnaryOp::Not,
        Terminal::Plus => UnaryOp::Plus,
        Terminal::Minus => UnaryOp::Minus,
        Terminal::DotPlus => UnaryOp::ElemWisePlus,
        Terminal::DotMinus => UnaryOp::ElemWiseMinus,
        _ => return None,
    };
    Some(op)
}
