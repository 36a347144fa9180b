//! Command-line interface implementation for promptgen.
//! Provides argument parsing and help text formatting using clap.

use crate::error::{PromptgenError, PromptgenResult};
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for promptgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "promptgen: fill ${variables} in prompt templates", long_about = None)]
pub struct Args {
    /// Path to the template file, or "-" to read it from stdin
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Set a variable, e.g. --set name=Alice,Bob (repeatable)
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// JSON or YAML file with variable values
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Expand comma-separated values into one prompt per combination
    #[arg(short, long)]
    pub multi: bool,

    /// Only list the template's variables
    #[arg(short, long)]
    pub list: bool,

    /// Ask for each variable's value on the terminal
    #[arg(short, long)]
    pub interactive: bool,

    /// Start from the values of the previous session draft
    #[arg(long)]
    pub resume: bool,

    /// Save the template and its values to the prompt store under this title
    #[arg(long, value_name = "TITLE")]
    pub save: Option<String>,

    /// Title recorded in the session draft
    #[arg(long, value_name = "TITLE", default_value = "")]
    pub title: String,

    /// Configuration file (defaults to promptgen.json/.yml/.yaml in the working directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Splits a `NAME=VALUE` assignment at the first `=`.
///
/// # Errors
/// * `PromptgenError::AssignmentError` if there is no `=` or the name is empty
pub fn parse_assignment(assignment: &str) -> PromptgenResult<(String, String)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(PromptgenError::AssignmentError {
            assignment: assignment.to_string(),
        }),
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
