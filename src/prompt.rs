//! Interactive entry of variable values.

use crate::error::{PromptgenError, PromptgenResult};
use crate::placeholder::{PlaceholderSet, ValueMap};
use dialoguer::Input;

pub trait Prompter {
    /// Asks for the value of `name`, offering `current` as the default.
    fn value(&self, name: &str, current: &str) -> PromptgenResult<String>;
}

/// Terminal prompter built on dialoguer.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn value(&self, name: &str, current: &str) -> PromptgenResult<String> {
        Input::<String>::new()
            .with_prompt(format!("{name} (comma-separated for several)"))
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PromptgenError::PromptError(e.to_string()))
    }
}

/// Asks for every placeholder in order and returns the updated value map.
///
/// # Arguments
/// * `prompter` - Source of answers
/// * `names` - Placeholders to ask for
/// * `values` - Current values, offered as defaults
pub fn prompt_values(
    prompter: &dyn Prompter,
    names: &PlaceholderSet,
    values: &ValueMap,
) -> PromptgenResult<ValueMap> {
    let mut answers = ValueMap::new();
    for name in names {
        let current = values.get(name).map(String::as_str).unwrap_or_default();
        let answer = prompter.value(name, current)?;
        answers.insert(name.clone(), answer);
    }
    Ok(answers)
}
