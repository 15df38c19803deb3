//! The MiniModelica command-line interface.
//!
//! This module is the entry point for all CLI commands and dispatches to the
//! library's parse functions.

use std::io::{self, Read};
use std::{fs, process};

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use tracing_subscriber::EnvFilter;

use crate::ast::Expression;
use crate::cli::args::{Command, InputArgs, MiniModelicaArgs};
use crate::syntax::parse_with;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = MiniModelicaArgs::parse();
    init_logging(args.verbose);

    let result = match &args.command {
        Command::Ast { input, json } => parse_input(&args, input).and_then(|expr| output::print_ast(&expr, *json)),
        Command::Check { input } => parse_input(&args, input).map(|_| output::print_ok()),
    };

    if let Err(report) = result {
        output::print_error(&report);
        process::exit(1);
    }
}

/// Installs the stderr subscriber. Without `-v`, `RUST_LOG` applies and
/// falls back to `warn`.
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("minimodelica=debug"),
        _ => EnvFilter::new("minimodelica=trace"),
    };
    // A subscriber may already be set when run is embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_input(args: &MiniModelicaArgs, input: &InputArgs) -> miette::Result<Expression> {
    let (name, source) = read_input(input)?;
    let options = args.parse_options(&name);
    Ok(parse_with(&source, &options)?)
}

/// Returns the source name and text of the requested input.
fn read_input(input: &InputArgs) -> miette::Result<(String, String)> {
    if let Some(expr) = &input.expr {
        return Ok(("<expr>".to_string(), expr.clone()));
    }
    match &input.file {
        Some(path) if path.as_os_str() != "-" => {
            let source = fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .into_diagnostic()
                .wrap_err("failed to read stdin")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}
