//! Deep merge of configuration documents.
//!
//! Responsibilities:
//! - Merge a source document into a target document, source winning on conflicts.
//!
//! Invariants:
//! - Keys whose values are objects on both sides are merged recursively.
//! - Any other conflict (scalars, arrays, null, object vs. non-object) is won by the source.
//! - Keys present on one side only are carried through unchanged.
//! - Nesting depth is bounded by memory, not by the call stack.

use std::collections::HashMap;

use serde_json::Value;

use crate::Configuration;

/// Merge `source` into `target` in place.
///
/// ```
/// use cfgmerge_client::merge::merge;
/// use serde_json::json;
///
/// let mut target = json!({"a": {"x": 1, "y": 2}}).as_object().cloned().unwrap();
/// let source = json!({"a": {"y": 3, "z": 4}}).as_object().cloned().unwrap();
/// merge(&mut target, source);
/// assert_eq!(serde_json::Value::Object(target), json!({"a": {"x": 1, "y": 3, "z": 4}}));
/// ```
pub fn merge(target: &mut Configuration, source: Configuration) {
    let mut pending: Vec<(&mut Configuration, Configuration)> = vec![(target, source)];

    while let Some((target, source)) = pending.pop() {
        let mut nested: HashMap<String, Configuration> = HashMap::new();

        for (key, value) in source {
            match value {
                Value::Object(child) if target.get(&key).is_some_and(Value::is_object) => {
                    nested.insert(key, child);
                }
                value => {
                    target.insert(key, value);
                }
            }
        }

        if nested.is_empty() {
            continue;
        }

        for (key, value) in target.iter_mut() {
            if let Value::Object(child_target) = value
                && let Some(child_source) = nested.remove(key)
            {
                pending.push((child_target, child_source));
            }
        }
    }
}

/// Return `base` with `overlay` merged on top of it.
pub fn merged(mut base: Configuration, overlay: Configuration) -> Configuration {
    merge(&mut base, overlay);
    base
}
