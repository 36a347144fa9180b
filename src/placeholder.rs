//! Placeholder discovery for prompt templates.
//! A placeholder is `${name}` where `name` is one or more ASCII letters,
//! digits or underscores. Anything else between `${` and `}` is plain text.

use indexmap::{IndexMap, IndexSet};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Ordered set of unique placeholder names, in first-occurrence order.
pub type PlaceholderSet = IndexSet<String>;

/// Mapping from placeholder name to its raw (possibly comma-separated) value.
pub type ValueMap = IndexMap<String, String>;

/// Matches one placeholder and captures its name.
/// The token grammar is deliberately ASCII-only; `\w` would admit Unicode letters.
pub(crate) static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"));

/// Returns the literal placeholder form of `name`, i.e. `${name}`.
pub fn placeholder_token(name: &str) -> String {
    format!("${{{name}}}")
}

/// Extracts the unique placeholder names of `template`.
///
/// # Arguments
/// * `template` - Template text, possibly empty or multi-line
///
/// # Returns
/// * `PlaceholderSet` - Names in first-occurrence order, duplicates collapsed
///
/// # Example
/// ```
/// use promptgen::placeholder::scan;
///
/// let names = scan("${a} ${b} ${a}");
/// assert_eq!(names.into_iter().collect::<Vec<_>>(), ["a", "b"]);
/// ```
pub fn scan(template: &str) -> PlaceholderSet {
    let names: PlaceholderSet = PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect();

    debug!("Found {} placeholder(s): {:?}", names.len(), names);
    names
}
