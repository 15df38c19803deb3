//! MiniModelica expression parser.
//!
//! Parses a single MiniModelica (Modelica-subset) expression into an owned
//! [`Expression`] tree. A pest grammar recognizes the input; an event driver
//! then walks the parse tree and feeds small per-production builders,
//! which assemble the tree bottom-up. [`Visitor`] dispatches over the
//! finished tree.
//!
//! ```rust
//! use minimodelica::{parse, BinaryOp, Expression};
//!
//! let expr = parse("3 - 1").unwrap();
//! assert_eq!(expr, Expression::binary(BinaryOp::Sub, Expression::integer(3), Expression::integer(1)));
//! assert_eq!(expr.to_string(), "BinaryOp(-, Literal(3), Literal(1))");
//! ```

pub mod ast;
pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod syntax;

pub use ast::{
    visit, ArraySubscript, BinaryOp, ComponentReference, Expression, Literal, ReferencePart, UnaryOp, Visitor,
};
pub use config::ParseOptions;
pub use errors::{ErrorKind, ParseError, Span};
pub use syntax::{parse, parse_with};
