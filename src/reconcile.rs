//! Keeps a value map in step with the placeholders of an edited template.

use crate::placeholder::{PlaceholderSet, ValueMap};
use log::debug;

/// Produces the value map for the current placeholder set.
///
/// Values of names that are still present are carried over untouched, new names
/// are seeded with an empty value and names that disappeared are dropped.
/// The returned map has exactly the keys of `current_names`, in the same order.
///
/// # Arguments
/// * `current_names` - Placeholders of the template as it is now
/// * `previous_values` - Value map from the previous evaluation
pub fn reconcile(current_names: &PlaceholderSet, previous_values: &ValueMap) -> ValueMap {
    let values: ValueMap = current_names
        .iter()
        .map(|name| {
            let value = previous_values.get(name).cloned().unwrap_or_default();
            (name.clone(), value)
        })
        .collect();

    let dropped = previous_values
        .keys()
        .filter(|name| !current_names.contains(*name))
        .count();
    if dropped > 0 {
        debug!("Dropped {dropped} value(s) for removed placeholders");
    }

    values
}
