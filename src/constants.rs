//! Common constants used throughout promptgen.

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["promptgen.json", "promptgen.yml", "promptgen.yaml"];

/// Separator between alternative values of one variable
pub const SEPARATOR: char = ',';

/// Title prefix that marks a stored prompt as an auto-save
pub const AUTOSAVE_PREFIX: &str = "[Auto-save]";

/// Default location of the prompt store
pub const DEFAULT_STORE_FILE: &str = "prompts.json";

/// Default location of the session draft
pub const DEFAULT_DRAFT_FILE: &str = ".promptgen-session.json";
