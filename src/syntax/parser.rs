//! MiniModelica parser and event driver
//!
//! pest resolves every ordered choice and backtrack before the driver runs,
//! so the pair tree holds only the alternatives that matched. The driver
//! walks it depth-first: each builder-role pair gets a fresh builder scoped
//! to that one production, its children become events in source order, and
//! the finished output reaches the parent builder as a single child event.

use pest::error::{Error, InputLocation, LineColLocation};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use tracing::{debug, trace};

use super::literal::{self, LiteralError};
use crate::ast::{Expression, Literal};
use crate::builder::{
    ArgumentListBuilder, BuildError, Builder, ComponentReferenceBuilder, Event, ExpressionBuilder,
    IfExpressionBuilder, IntoNode, Terminal,
};
use crate::config::ParseOptions;
use crate::errors::{ErrorContext, ParseError, SourceArc, SourceContext, Span};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
pub struct ExpressionParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse a complete MiniModelica expression with default options.
pub fn parse(source: &str) -> Result<Expression, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// Parse a complete MiniModelica expression.
///
/// Leading and trailing whitespace and comments are allowed; any other
/// trailing input is a syntax error.
#[tracing::instrument(level = "debug", skip_all, fields(source_name = %options.source_name, len = source.len()))]
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Expression, ParseError> {
    let driver = Driver {
        source: SourceContext::from_file(options.source_name.clone(), source).to_named_source(),
        max_depth: options.max_depth,
    };
    let result = driver.run(source);
    match &result {
        Ok(expr) => debug!(kind = expr.kind_name(), "parsed expression"),
        Err(error) => debug!(code = error.kind().code(), %error, "parse failed"),
    }
    result
}

// ============================================================================
// EVENT DRIVER
// ============================================================================

/// Builder-role productions allowed per nesting level before the raw
/// recursion guard trips. One parenthesis level spans ten productions.
const PRODUCTIONS_PER_LEVEL: usize = 16;

struct Driver {
    source: SourceArc,
    max_depth: usize,
}

/// Position of a production in the recursion.
#[derive(Debug, Clone, Copy, Default)]
struct Depth {
    /// Enclosing `expression` productions: parentheses, subscripts,
    /// arguments and conditional branches.
    nesting: usize,
    /// Every enclosing builder-role production, including unary chains.
    productions: usize,
}

impl Depth {
    fn enter(self, rule: Rule) -> Self {
        Depth {
            nesting: self.nesting + usize::from(rule == Rule::expression),
            productions: self.productions + 1,
        }
    }
}

impl Driver {
    fn run(&self, source: &str) -> Result<Expression, ParseError> {
        let mut pairs = ExpressionParser::parse(Rule::parse_root, source).map_err(|e| self.syntax_error(e))?;
        let expression = pairs
            .next()
            .and_then(|root| root.into_inner().find(|p| p.as_rule() == Rule::expression))
            .ok_or_else(|| ParseError::syntax("no expression recognized", self.context(Span::default())))?;
        self.production::<ExpressionBuilder>(expression, Depth::default())
    }

    /// Runs one builder-role production with its own builder.
    fn production<B: Builder>(&self, pair: Pair<'_, Rule>, depth: Depth) -> Result<B::Output, ParseError> {
        let span = span_of(&pair);
        let production_limit = self.max_depth.saturating_mul(PRODUCTIONS_PER_LEVEL);
        if depth.nesting > self.max_depth || depth.productions > production_limit {
            return Err(ParseError::DepthLimit {
                limit: self.max_depth,
                ctx: self
                    .context(span)
                    .with_help("raise --max-depth or simplify the expression"),
            });
        }
        trace!(rule = ?pair.as_rule(), nesting = depth.nesting, productions = depth.productions, "production");

        let mut builder = B::default();
        for child in pair.into_inner() {
            let child_span = span_of(&child);
            if let Some(event) = self.event(child, depth)? {
                builder
                    .on_event(event)
                    .map_err(|e| self.build_error(e, child_span))?;
            }
        }
        builder.finish().map_err(|e| self.build_error(e, span))
    }

    fn child<B>(&self, pair: Pair<'_, Rule>, depth: Depth) -> Result<Event, ParseError>
    where
        B: Builder,
        B::Output: IntoNode,
    {
        let depth = depth.enter(pair.as_rule());
        let output = self.production::<B>(pair, depth)?;
        Ok(Event::Child(output.into_node()))
    }

    /// The event a pair contributes to its parent builder, if any.
    fn event(&self, pair: Pair<'_, Rule>, depth: Depth) -> Result<Option<Event>, ParseError> {
        let span = span_of(&pair);
        let event = match pair.as_rule() {
            Rule::expression
            | Rule::logical_expression
            | Rule::logical_term
            | Rule::logical_factor
            | Rule::relation
            | Rule::arithmetic_expression
            | Rule::signed_term
            | Rule::term
            | Rule::factor
            | Rule::primary => self.child::<ExpressionBuilder>(pair, depth)?,
            Rule::if_expression => self.child::<IfExpressionBuilder>(pair, depth)?,
            Rule::component_reference => self.child::<ComponentReferenceBuilder>(pair, depth)?,
            Rule::function_call_args => self.child::<ArgumentListBuilder>(pair, depth)?,

            Rule::ident => Event::Identifier(pair.as_str().to_string()),
            Rule::unsigned_integer => {
                let value = literal::parse_integer(pair.as_str()).map_err(|e| self.literal_error(e, span))?;
                Event::Literal(Literal::Integer(value))
            }
            Rule::unsigned_real => {
                let value = literal::parse_real(pair.as_str()).map_err(|e| self.literal_error(e, span))?;
                Event::Literal(Literal::Real(value))
            }
            Rule::string => {
                let value = literal::unescape_string(pair.as_str()).map_err(|e| self.literal_error(e, span))?;
                Event::Literal(Literal::String(value))
            }
            Rule::kw_true => Event::Literal(Literal::Boolean(true)),
            Rule::kw_false => Event::Literal(Literal::Boolean(false)),

            // Structure only; the builder counts children instead.
            Rule::kw_if | Rule::kw_then | Rule::kw_elseif | Rule::kw_else | Rule::EOI => return Ok(None),

            rule => match terminal(rule) {
                Some(terminal) => Event::Terminal(terminal),
                None => {
                    return Err(ParseError::syntax(
                        format!("unhandled grammar rule {:?}", rule),
                        self.context(span),
                    ))
                }
            },
        };
        Ok(Some(event))
    }

    // ------------------------------------------------------------------------
    // Error conversion
    // ------------------------------------------------------------------------

    fn context(&self, span: Span) -> ErrorContext {
        ErrorContext::new(self.source.clone(), span)
    }

    fn build_error(&self, error: BuildError, span: Span) -> ParseError {
        ParseError::builder(error, self.context(span))
    }

    fn literal_error(&self, error: LiteralError, span: Span) -> ParseError {
        let ctx = self.context(span);
        let ctx = match error {
            LiteralError::IntegerOutOfRange(_) => ctx.with_help("integers are 64-bit signed; write a real instead"),
            LiteralError::RealOutOfRange(_) => ctx.with_help("reals must be finite 64-bit floats"),
            _ => ctx,
        };
        ParseError::literal(error.to_string(), ctx)
    }

    fn syntax_error(&self, error: Error<Rule>) -> ParseError {
        let error = error.renamed_rules(|rule| describe(*rule));
        let span = match error.location {
            InputLocation::Pos(pos) => Span { start: pos, end: pos },
            InputLocation::Span((start, end)) => Span { start, end },
        };
        let (line, column) = match error.line_col {
            LineColLocation::Pos(pos) | LineColLocation::Span(pos, _) => pos,
        };
        ParseError::syntax(
            error.variant.message(),
            self.context(span)
                .with_help(format!("parsing stopped at line {}, column {}", line, column)),
        )
    }
}

fn span_of(pair: &Pair<'_, Rule>) -> Span {
    Span {
        start: pair.as_span().start(),
        end: pair.as_span().end(),
    }
}

/// Operator and keyword tokens that reach builders as terminals.
fn terminal(rule: Rule) -> Option<Terminal> {
    let terminal = match rule {
        Rule::colon => Terminal::Colon,
        Rule::scope_dot => Terminal::ScopeDot,
        Rule::kw_or => Terminal::Or,
        Rule::kw_and => Terminal::And,
        Rule::kw_not => Terminal::Not,
        Rule::op_equal => Terminal::Equal,
        Rule::op_not_equal => Terminal::NotEqual,
        Rule::op_less_equal => Terminal::LessEqual,
        Rule::op_less => Terminal::Less,
        Rule::op_greater_equal => Terminal::GreaterEqual,
        Rule::op_greater => Terminal::Greater,
        Rule::op_plus => Terminal::Plus,
        Rule::op_minus => Terminal::Minus,
        Rule::op_dot_plus => Terminal::DotPlus,
        Rule::op_dot_minus => Terminal::DotMinus,
        Rule::op_star => Terminal::Star,
        Rule::op_slash => Terminal::Slash,
        Rule::op_dot_star => Terminal::DotStar,
        Rule::op_dot_slash => Terminal::DotSlash,
        Rule::op_pow => Terminal::Pow,
        Rule::op_dot_pow => Terminal::DotPow,
        Rule::kw_end => Terminal::End,
        Rule::kw_der => Terminal::Der,
        Rule::kw_initial => Terminal::Initial,
        Rule::kw_pure => Terminal::Pure,
        _ => return None,
    };
    Some(terminal)
}

/// Human-readable rule names for "expected ..." messages.
fn describe(rule: Rule) -> String {
    if let Some(terminal) = terminal(rule) {
        return format!("'{}'", terminal.symbol());
    }
    let name = match rule {
        Rule::EOI => "end of input",
        Rule::ident => "identifier",
        Rule::unsigned_integer | Rule::unsigned_real => "number",
        Rule::string => "string",
        Rule::kw_if => "'if'",
        Rule::kw_then => "'then'",
        Rule::kw_elseif => "'elseif'",
        Rule::kw_else => "'else'",
        Rule::kw_true => "'true'",
        Rule::kw_false => "'false'",
        Rule::component_reference => "component reference",
        Rule::function_call_args => "argument list",
        _ => "expression",
    };
    name.to_string()
}
