//! Grammar, lexical conversions and the event driver.

pub mod literal;
pub mod parser;

pub use parser::{parse, parse_with, ExpressionParser, Rule};
