//! promptgen fills `${variable}` placeholders in prompt templates.
//! It discovers the placeholders of a template, keeps a value map in step with
//! the template as it is edited, and renders either a single prompt or one prompt
//! per combination of comma-separated alternatives.

/// Debounced auto-save of the edited template into a prompt store
pub mod autosave;

/// Command-line interface module for the promptgen application
pub mod cli;

/// Configuration and value files
/// Supports JSON and YAML formats (promptgen.json, promptgen.yml, promptgen.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Debounce timer state
pub mod debounce;

/// Error types and handling for the promptgen application
pub mod error;

/// Multi-value (cartesian) expansion
pub mod expand;

/// Logger setup for the binary
pub mod logger;

/// Placeholder scanning and the value map types
pub mod placeholder;

/// User input and interaction handling
pub mod prompt;

/// Value map reconciliation against a template's placeholders
pub mod reconcile;

/// Single-value rendering
pub mod render;

/// Session draft recovery
pub mod session;

/// Saved prompt storage
pub mod store;
