//! Argument-list builder for `f(a, b, c)`: positional arguments in order.

use super::{BuildError, Builder, Event, Node};
use crate::ast::Expression;

#[derive(Debug, Default)]
pub struct ArgumentListBuilder {
    arguments: Vec<Expression>,
}

impl Builder for ArgumentListBuilder {
    type Output = Vec<Expression>;

    fn on_event(&mut self, event: Event) -> Result<(), BuildError> {
        match event {
            Event::Child(Node::Expression(argument)) => {
                self.arguments.push(argument);
                Ok(())
            }
            other => Err(BuildError::unexpected(&other, "ArgumentList")),
        }
    }

    fn finish(self) -> Result<Vec<Expression>, BuildError> {
        Ok(self.arguments)
    }
}
