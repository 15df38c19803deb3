//! Defines the command-line arguments and subcommands for the MiniModelica CLI.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ParseOptions, DEFAULT_MAX_DEPTH};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "minimodelica",
    version,
    about = "Parse MiniModelica expressions into an abstract syntax tree."
)]
pub struct MiniModelicaArgs {
    /// Increase log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Maximum nesting of parenthesized, subscript, argument and branch expressions.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the expression text comes from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// File holding one expression; `-` or nothing reads stdin.
    #[arg(conflicts_with = "expr")]
    pub file: Option<PathBuf>,

    /// Expression given on the command line.
    #[arg(short = 'e', long = "expr")]
    pub expr: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the AST of an expression.
    Ast {
        #[command(flatten)]
        input: InputArgs,
        /// Print JSON instead of the debug rendering.
        #[arg(long)]
        json: bool,
    },
    /// Parse an expression and print `ok`.
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl MiniModelicaArgs {
    pub fn parse_options(&self, source_name: &str) -> ParseOptions {
        ParseOptions::default()
            .with_source_name(source_name)
            .with_max_depth(self.max_depth)
    }
}
