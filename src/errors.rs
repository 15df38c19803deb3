//! MiniModelica error handling
//!
//! All parse failures are reported as a single [`ParseError`]: a `thiserror`
//! enum that also implements `miette::Diagnostic`, carrying the named source
//! and primary span so the CLI can render a labelled report.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::builder::BuildError;

pub type SourceArc = Arc<NamedSource<String>>;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Byte range into the parsed source text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Source name and content used for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> SourceArc {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

/// Where an error happened and how to help.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn new(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Type-safe error classification, used by tests instead of message matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input does not match the grammar, or has trailing input.
    Syntax,
    /// Builder-contract violation.
    Builder,
    /// Numeric text that cannot be converted.
    Literal,
    /// Nesting deeper than `ParseOptions::max_depth`.
    DepthLimit,
}

impl ErrorKind {
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "minimodelica::parse::syntax",
            ErrorKind::Builder => "minimodelica::parse::builder",
            ErrorKind::Literal => "minimodelica::parse::literal",
            ErrorKind::DepthLimit => "minimodelica::parse::depth",
        }
    }
}

/// The first error encountered while parsing; no partial tree accompanies it.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no parse: {message}")]
    Syntax { message: String, ctx: ErrorContext },
    #[error("malformed expression: {source}")]
    Builder {
        #[source]
        source: BuildError,
        ctx: ErrorContext,
    },
    #[error("invalid literal: {message}")]
    Literal { message: String, ctx: ErrorContext },
    #[error("expression nesting exceeds the limit of {limit}")]
    DepthLimit { limit: usize, ctx: ErrorContext },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, ctx: ErrorContext) -> Self {
        ParseError::Syntax {
            message: message.into(),
            ctx,
        }
    }

    pub fn builder(source: BuildError, ctx: ErrorContext) -> Self {
        ParseError::Builder { source, ctx }
    }

    pub fn literal(message: impl Into<String>, ctx: ErrorContext) -> Self {
        ParseError::Literal {
            message: message.into(),
            ctx,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::Builder { .. } => ErrorKind::Builder,
            ParseError::Literal { .. } => ErrorKind::Literal,
            ParseError::DepthLimit { .. } => ErrorKind::DepthLimit,
        }
    }

    /// Primary span of the error, when known.
    pub fn span(&self) -> Option<Span> {
        self.ctx().span
    }

    /// The underlying builder-contract violation, for `Builder` errors.
    pub fn build_error(&self) -> Option<&BuildError> {
        match self {
            ParseError::Builder { source, .. } => Some(source),
            _ => None,
        }
    }

    fn ctx(&self) -> &ErrorContext {
        match self {
            ParseError::Syntax { ctx, .. }
            | ParseError::Builder { ctx, .. }
            | ParseError::Literal { ctx, .. }
            | ParseError::DepthLimit { ctx, .. } => ctx,
        }
    }

    fn label(&self) -> String {
        match self {
            ParseError::Syntax { message, .. } | ParseError::Literal { message, .. } => message.clone(),
            ParseError::Builder { source, .. } => source.to_string(),
            ParseError::DepthLimit { .. } => "nested too deeply".to_string(),
        }
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(self.kind().code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.ctx().span?;
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            1
        };
        let label = LabeledSpan::new(Some(self.label()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}
