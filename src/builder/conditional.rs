//! If-expression builder.
//!
//! Receives `cond, then, (elseif_cond, elseif_then)*, else` as a flat list of
//! child expressions and folds it into right-nested conditionals, so
//! `if a then b elseif c then d else e` becomes `If(a, b, If(c, d, e))`.

use super::{BuildError, Builder, Event, Node};
use crate::ast::Expression;

#[derive(Debug, Default)]
pub struct IfExpressionBuilder {
    head: Option<(Expression, Expression)>,
    elseif_branches: Vec<(Expression, Expression)>,
    /// A condition waiting for its branch, or the else branch at close.
    pending: Option<Expression>,
}

impl IfExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Builder for IfExpressionBuilder {
    type Output = Expression;

    fn on_event(&mut self, event: Event) -> Result<(), BuildError> {
        let expr = match event {
            Event::Child(Node::Expression(expr)) => expr,
            other => return Err(BuildError::unexpected(&other, "IfExpression")),
        };
        match self.pending.take() {
            None => self.pending = Some(expr),
            Some(condition) if self.head.is_none() => self.head = Some((condition, expr)),
            Some(condition) => self.elseif_branches.push((condition, expr)),
        }
        Ok(())
    }

    fn finish(self) -> Result<Expression, BuildError> {
        let (Some((condition, then_branch)), Some(else_branch)) = (self.head, self.pending) else {
            return Err(BuildError::IncompleteConditional);
        };
        // The last elseif sits directly above the else; earlier ones wrap it.
        let else_branch = self
            .elseif_branches
            .into_iter()
            .rev()
            .fold(else_branch, |acc, (cond, then)| Expression::conditional(cond, then, acc));
        Ok(Expression::conditional(condition, then_branch, else_branch))
    }
}
