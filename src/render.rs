//! Single-value rendering of prompt templates.

use crate::placeholder::{ValueMap, PLACEHOLDER};
use regex::Captures;

/// Substitutes every placeholder of `template` with its value.
///
/// Placeholders whose value is empty, or which have no entry in `values`,
/// stay in the output as the literal `${name}`. Substitution happens in one
/// pass over the template, so a value that itself looks like `${other}` is
/// never substituted again.
///
/// # Arguments
/// * `template` - Template text
/// * `values` - Value map, normally the output of `reconcile`
///
/// # Returns
/// * `String` - The rendered prompt; empty when `template` is empty
pub fn render(template: &str, values: &ValueMap) -> String {
    if template.is_empty() {
        return String::new();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}
