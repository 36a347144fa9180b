//! Multi-value expansion of prompt templates.
//!
//! A value containing the separator (`,`) is a list of alternatives. Expanding a
//! template renders one prompt for every combination of alternatives, i.e. the
//! cartesian product of all option lists. The number of prompts is the product
//! of the option list lengths, so it grows exponentially with the number of
//! multi-valued variables. Nothing here caps it; use [`combination_count`] to
//! check the size before calling [`expand`].

use crate::constants::SEPARATOR;
use crate::placeholder::{placeholder_token, ValueMap, PLACEHOLDER};
use crate::render::render;
use indexmap::IndexMap;
use log::debug;
use regex::Captures;

/// Splits a raw value into its alternatives.
///
/// Pieces are trimmed and empty pieces discarded. An empty raw value yields the
/// literal placeholder `${name}`. A raw value with no non-empty piece
/// (e.g. `" , ,"`) yields a single empty string.
///
/// # Example
/// ```
/// use promptgen::expand::option_list;
///
/// assert_eq!(option_list("name", "Alice, Bob ,Charlie"), ["Alice", "Bob", "Charlie"]);
/// assert_eq!(option_list("name", ""), ["${name}"]);
/// assert_eq!(option_list("name", ",,"), [""]);
/// ```
pub fn option_list(name: &str, raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return vec![placeholder_token(name)];
    }

    let options: Vec<String> = raw
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect();

    if options.is_empty() {
        vec![String::new()]
    } else {
        options
    }
}

/// Number of prompts [`expand`] produces for `values` (ignoring the empty-template case).
/// Saturates at `usize::MAX`.
pub fn combination_count(values: &ValueMap) -> usize {
    values
        .iter()
        .map(|(name, raw)| option_list(name, raw).len())
        .fold(1, usize::saturating_mul)
}

/// Lazy iterator over every combination of options, rendered against a template.
///
/// Combinations are enumerated like an odometer: the first variable of the
/// value map changes slowest, the last one fastest.
pub struct Expansion<'a> {
    template: &'a str,
    options: IndexMap<&'a str, Vec<String>>,
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Expansion<'a> {
    /// Creates the iterator. Unlike [`expand`], this always walks the full
    /// product and substitutes option values, even when every option list has
    /// a single element.
    pub fn new(template: &'a str, values: &'a ValueMap) -> Self {
        let options: IndexMap<&'a str, Vec<String>> = values
            .iter()
            .map(|(name, raw)| (name.as_str(), option_list(name, raw)))
            .collect();
        let indices = vec![0; options.len()];

        Self {
            template,
            options,
            indices,
            done: template.is_empty(),
        }
    }

    fn render_current(&self) -> String {
        PLACEHOLDER
            .replace_all(self.template, |caps: &Captures| {
                match self.options.get_full(&caps[1]) {
                    Some((position, _, options)) => options[self.indices[position]].clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Combinations not yet yielded, or `None` if the count overflows `usize`.
    fn remaining(&self) -> Option<usize> {
        if self.done {
            return Some(0);
        }
        let mut remaining: usize = 1;
        let mut stride = Some(1usize);
        for (position, options) in self.options.values().enumerate().rev() {
            let left = options.len() - 1 - self.indices[position];
            if left > 0 {
                remaining = remaining.checked_add(left.checked_mul(stride?)?)?;
            }
            stride = stride.and_then(|stride| stride.checked_mul(options.len()));
        }
        Some(remaining)
    }

    fn advance(&mut self) {
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.options[position].len() {
                return;
            }
            self.indices[position] = 0;
        }
        self.done = true;
    }
}

impl Iterator for Expansion<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let rendered = self.render_current();
        self.advance();
        Some(rendered)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

/// Renders one prompt per combination of the values' alternatives.
///
/// # Arguments
/// * `template` - Template text
/// * `values` - Value map, normally the output of `reconcile`
///
/// # Returns
/// * `Vec<String>` - Empty for an empty template. When no value has more than one
///   alternative, exactly one prompt equal to `render(template, values)`.
///   Otherwise the full cartesian product in odometer order.
pub fn expand(template: &str, values: &ValueMap) -> Vec<String> {
    if template.is_empty() {
        return Vec::new();
    }

    let has_multiple_values = values
        .iter()
        .any(|(name, raw)| option_list(name, raw).len() > 1);
    if !has_multiple_values {
        return vec![render(template, values)];
    }

    let prompts: Vec<String> = Expansion::new(template, values).collect();
    debug!("Expanded template into {} prompt(s)", prompts.len());
    prompts
}
