//! Component-reference builder: accumulates `.a.b[1, :].c`-style names.

use super::{BuildError, Builder, Event, Node, Terminal};
use crate::ast::{ArraySubscript, ComponentReference, ReferencePart};

#[derive(Debug, Default)]
pub struct ComponentReferenceBuilder {
    global: bool,
    parts: Vec<ReferencePart>,
}

impl ComponentReferenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_subscript(&mut self, subscript: ArraySubscript) -> Result<(), BuildError> {
        let part = self.parts.last_mut().ok_or(BuildError::SubscriptWithoutTarget)?;
        part.subscripts.push(subscript);
        Ok(())
    }
}

impl Builder for ComponentReferenceBuilder {
    type Output = ComponentReference;

    fn on_event(&mut self, event: Event) -> Result<(), BuildError> {
        match event {
            Event::Identifier(ident) => {
                self.parts.push(ReferencePart::new(ident));
                Ok(())
            }
            Event::Terminal(Terminal::ScopeDot) => {
                if !self.parts.is_empty() {
                    return Err(BuildError::ScopeAfterIdentifier);
                }
                self.global = true;
                Ok(())
            }
            Event::Terminal(Terminal::Colon) => self.push_subscript(ArraySubscript::wildcard()),
            Event::Child(Node::Expression(index)) => self.push_subscript(ArraySubscript::index(index)),
            other => Err(BuildError::unexpected(&other, "ComponentReference")),
        }
    }

    fn finish(self) -> Result<ComponentReference, BuildError> {
        if self.parts.is_empty() {
            return Err(BuildError::EmptyReference);
        }
        Ok(ComponentReference {
            parts: self.parts,
            global: self.global,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;

    fn ident(name: &str) -> Event {
        Event::Identifier(name.to_string())
    }

    #[test]
    fn test_parts_and_subscripts_accumulate_in_order() {
        let mut builder = ComponentReferenceBuilder::new();
        builder.on_event(ident("a")).unwrap();
        builder.on_event(ident("b")).unwrap();
        builder
            .on_event(Event::Child(Node::Expression(Expression::integer(1))))
            .unwrap();
        builder.on_event(Event::Terminal(Terminal::Colon)).unwrap();
        builder.on_event(ident("c")).unwrap();
        let reference = builder.finish().unwrap();

        assert!(!reference.global);
        assert_eq!(reference.parts.len(), 3);
        assert!(reference.parts[0].subscripts.is_empty());
        assert_eq!(
            reference.parts[1].subscripts,
            vec![ArraySubscript::index(Expression::integer(1)), ArraySubscript::wildcard()]
        );
        assert!(reference.parts[2].subscripts.is_empty());
    }

    #[test]
    fn test_leading_dot_sets_global() {
        let mut builder = ComponentReferenceBuilder::new();
        builder.on_event(Event::Terminal(Terminal::ScopeDot)).unwrap();
        builder.on_event(ident("a")).unwrap();
        let reference = builder.finish().unwrap();
        assert!(reference.global);
        assert_eq!(reference.path(), "a");
    }

    #[test]
    fn test_subscript_without_target() {
        let mut builder = ComponentReferenceBuilder::new();
        assert_eq!(
            builder.on_event(Event::Terminal(Terminal::Colon)),
            Err(BuildError::SubscriptWithoutTarget)
        );
        assert_eq!(
            builder.on_event(Event::Child(Node::Expression(Expression::integer(0)))),
            Err(BuildError::SubscriptWithoutTarget)
        );
    }

    #[test]
    fn test_scope_dot_after_identifier() {
        let mut builder = ComponentReferenceBuilder::new();
        builder.on_event(ident("a")).unwrap();
        assert_eq!(
            builder.on_event(Event::Terminal(Terminal::ScopeDot)),
            Err(BuildError::ScopeAfterIdentifier)
        );
    }

    #[test]
    fn test_empty_reference() {
        assert_eq!(ComponentReferenceBuilder::new().finish(), Err(BuildError::EmptyReference));

        let mut global_only = ComponentReferenceBuilder::new();
        global_only.on_event(Event::Terminal(Terminal::ScopeDot)).unwrap();
        assert_eq!(global_only.finish(), Err(BuildError::EmptyReference));
    }

    #[test]
    fn test_operator_is_rejected() {
        let mut builder = ComponentReferenceBuilder::new();
        builder.on_event(ident("a")).unwrap();
        assert!(matches!(
            builder.on_event(Event::Terminal(Terminal::Plus)),
            Err(BuildError::UnexpectedEvent { state: "ComponentReference", .. })
        ));
    }
}
