//! Error handling for promptgen.
//! The variable engine itself is total; these errors come from the layers around it:
//! configuration, value files, storage, terminal prompting and the command line.

use std::io;
use thiserror::Error;

/// Custom error types for promptgen operations.
#[derive(Error, Debug)]
pub enum PromptgenError {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents malformed JSON in stores, drafts or value files
    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents failures of the prompt store
    #[error("Storage error: {0}.")]
    StorageError(String),

    /// Represents failures while asking the user for a value
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// A `--set` argument that is not of the form NAME=VALUE
    #[error("Invalid variable assignment '{assignment}': expected NAME=VALUE.")]
    AssignmentError { assignment: String },

    #[error("Prompt with id {id} not found.")]
    PromptNotFound { id: i64 },

    /// Multi-value expansion would exceed the configured limit
    #[error("Expansion would produce {count} prompts, more than the configured limit of {limit}.")]
    TooManyCombinations { count: usize, limit: usize },
}

/// Convenience type alias for Results with PromptgenError as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type PromptgenResult<T> = Result<T, PromptgenError>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The PromptgenError to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: PromptgenError) {
    eprintln!("{err}");
    std::process::exit(1);
}
