//! Handles all user-facing output for the CLI.
//!
//! Results go to stdout; diagnostics and logs go to stderr.

use miette::{IntoDiagnostic, Report};

use crate::ast::Expression;

pub fn print_ast(expr: &Expression, json: bool) -> miette::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(expr).into_diagnostic()?;
        println!("{}", text);
    } else {
        println!("{}", expr);
    }
    Ok(())
}

pub fn print_ok() {
    println!("ok");
}

/// Renders an error as a miette report on stderr.
pub fn print_error(report: &Report) {
    eprintln!("{:?}", report);
}
