//! Generic double dispatch over the closed [`Expression`] variant set.
//!
//! A traversal is a type implementing [`Visitor<S>`] for some state type `S`.
//! Every handler has a default body that recurses into the node's owned
//! sub-expressions in source order, so a new visitor only overrides the
//! variants it cares about. [`visit`] is the single dispatch point.
//!
//! # Examples
//!
//! ```rust
//! use minimodelica::ast::{visit, Literal, Visitor};
//! use minimodelica::parse;
//!
//! struct IntegerSum;
//!
//! impl Visitor<i64> for IntegerSum {
//!     fn visit_literal(&self, literal: &Literal, sum: &mut i64) {
//!         if let Literal::Integer(i) = literal {
//!             *sum += i;
//!         }
//!     }
//! }
//!
//! let expr = parse("1 + 2 * f(3, 4)").unwrap();
//! let mut sum = 0;
//! visit(&IntegerSum, &expr, &mut sum);
//! assert_eq!(sum, 10);
//! ```

use super::{ComponentReference, Expression, Literal, UnaryOp, BinaryOp};

/// Per-variant handlers for a traversal carrying state `S`.
pub trait Visitor<S> {
    fn visit_conditional(
        &self,
        condition: &Expression,
        then_branch: &Expression,
        else_branch: &Expression,
        state: &mut S,
    ) {
        walk_conditional(self, condition, then_branch, else_branch, state);
    }

    fn visit_unary(&self, op: UnaryOp, operand: &Expression, state: &mut S) {
        walk_unary(self, op, operand, state);
    }

    fn visit_binary(&self, op: BinaryOp, left: &Expression, right: &Expression, state: &mut S) {
        walk_binary(self, op, left, right, state);
    }

    fn visit_function_call(
        &self,
        function: &ComponentReference,
        arguments: &[Expression],
        state: &mut S,
    ) {
        walk_function_call(self, function, arguments, state);
    }

    fn visit_literal(&self, _literal: &Literal, _state: &mut S) {}

    fn visit_array_range(
        &self,
        start: &Expression,
        step: Option<&Expression>,
        stop: &Expression,
        state: &mut S,
    ) {
        walk_array_range(self, start, step, stop, state);
    }

    fn visit_component(&self, _reference: &ComponentReference, _state: &mut S) {}
}

/// Dispatches `expr` to the matching handler of `visitor`.
pub fn visit<S, V: Visitor<S> + ?Sized>(visitor: &V, expr: &Expression, state: &mut S) {
    match expr {
        Expression::Conditional {
            condition,
            then_branch,
            else_branch,
        } => visitor.visit_conditional(condition, then_branch, else_branch, state),
        Expression::UnaryOp { op, operand } => visitor.visit_unary(*op, operand, state),
        Expression::BinaryOp { op, left, right } => visitor.visit_binary(*op, left, right, state),
        Expression::FunctionCall {
            function,
            arguments,
        } => visitor.visit_function_call(function, arguments, state),
        Expression::Literal(literal) => visitor.visit_literal(literal, state),
        Expression::ArrayRange { start, step, stop } => {
            visitor.visit_array_range(start, step.as_deref(), stop, state)
        }
        Expression::Component(reference) => visitor.visit_component(reference, state),
    }
}

// ============================================================================
// DEFAULT RECURSION
// ============================================================================

pub fn walk_conditional<S, V: Visitor<S> + ?Sized>(
    visitor: &V,
    condition: &Expression,
    then_branch: &Expression,
    else_branch: &Expression,
    state: &mut S,
) {
    visit(visitor, condition, state);
    visit(visitor, then_branch, state);
    visit(visitor, else_branch, state);
}

pub fn walk_unary<S, V: Visitor<S> + ?Sized>(
    visitor: &V,
    _op: UnaryOp,
    operand: &Expression,
    state: &mut S,
) {
    visit(visitor, operand, state);
}

pub fn walk_binary<S, V: Visitor<S> + ?Sized>(
    visitor: &V,
    _op: BinaryOp,
    left: &Expression,
    right: &Expression,
    state: &mut S,
) {
    visit(visitor, left, state);
    visit(visitor, right, state);
}

/// Visits the arguments only; the callee is not traversed.
pub fn walk_function_call<S, V: Visitor<S> + ?Sized>(
    visitor: &V,
    _function: &ComponentReference,
    arguments: &[Expression],
    state: &mut S,
) {
    for argument in arguments {
        visit(visitor, argument, state);
    }
}

pub fn walk_array_range<S, V: Visitor<S> + ?Sized>(
    visitor: &V,
    start: &Expression,
    step: Option<&Expression>,
    stop: &Expression,
    state: &mut S,
) {
    visit(visitor, start, state);
    if let Some(step) = step {
        visit(visitor, step, state);
    }
    visit(visitor, stop, state);
}

/// Visits the index expressions of every subscript in `reference`.
///
/// Not called by the default handlers; visitors that care about subscripts
/// call it from their own `visit_component` / `visit_function_call`.
pub fn walk_reference<S, V: Visitor<S> + ?Sized>(
    visitor: &V,
    reference: &ComponentReference,
    state: &mut S,
) {
    for part in &reference.parts {
        for subscript in &part.subscripts {
            if let Some(index) = subscript.expression() {
                visit(visitor, index, state);
            }
        }
    }
}
