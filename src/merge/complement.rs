//! Asymmetric deep merge: fill what the target lacks from a default tree

use serde_json::Value;
use std::sync::Arc;

/// Custom merge hook, called as `merger(target_value, default_value)` for every
/// key of the default tree. The target side is `None` when the key is absent.
///
/// Returning `Some` replaces the target node and skips the built-in rule for
/// that key; returning `None` falls through to it.
pub type MergeFunction = Arc<dyn Fn(Option<&Value>, &Value) -> Option<Value> + Send + Sync>;

/// Wrap a closure as a [`MergeFunction`].
pub fn merge_function<F>(merge: F) -> MergeFunction
where
    F: Fn(Option<&Value>, &Value) -> Option<Value> + Send + Sync + 'static,
{
    Arc::new(merge)
}

/// Fill `target` in place with everything from `source` it does not already have.
///
/// Objects merge key by key and arrays index by index, recursing when both
/// sides hold the same container kind. Scalars and mismatched containers on
/// the target are left alone. Absent keys receive a deep copy, so the target
/// never shares structure with `source`.
///
/// If `target` and `source` are not both objects or both arrays nothing happens.
pub fn complement(target: &mut Value, source: &Value, merger: Option<&MergeFunction>) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, default) in source {
                if let Some(merged) = merger.and_then(|merge| merge(target.get(key), default)) {
                    target.insert(key.clone(), merged);
                    continue;
                }
                match target.get_mut(key) {
                    Some(existing) => complement(existing, default, merger),
                    None => {
                        target.insert(key.clone(), default.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for (index, default) in source.iter().enumerate() {
                if let Some(merged) = merger.and_then(|merge| merge(target.get(index), default)) {
                    // Indices are visited in order, so `index <= target.len()` holds here.
                    if index < target.len() {
                        target[index] = merged;
                    } else {
                        target.push(merged);
                    }
                    continue;
                }
                match target.get_mut(index) {
                    Some(existing) => complement(existing, default, merger),
                    None => target.push(default.clone()),
                }
            }
        }
        _ => {}
    }
}

/// Owned variant of [`complement`].
pub fn complemented(mut target: Value, source: &Value, merger: Option<&MergeFunction>) -> Value {
    complement(&mut target, source, merger);
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_keys_are_filled() {
        let mut target = json!({"a": 1});
        complement(&mut target, &json!({"a": 2, "b": 3}), None);
        assert_eq!(target, json!({"a": 1, "b": 3}));
    }

    #[test]
    fn nested_objects_recurse() {
        let mut target = json!({"a": {"x": 1}});
        complement(&mut target, &json!({"a": {"x": 2, "y": 3}}), None);
        assert_eq!(target, json!({"a": {"x": 1, "y": 3}}));
    }

    #[test]
    fn disjoint_keys_produce_the_union() {
        let mut target = json!({"a": 1, "b": [1, 2]});
        let source = json!({"c": "three", "d": {"e": null}});
        complement(&mut target, &source, None);
        assert_eq!(target, json!({"a": 1, "b": [1, 2], "c": "three", "d": {"e": null}}));
    }

    #[test]
    fn scalars_on_the_target_always_win() {
        let mut target = json!({"port": 3000, "debug": false, "name": null});
        complement(&mut target, &json!({"port": {"nested": true}, "debug": true, "name": "x"}), None);
        assert_eq!(target, json!({"port": 3000, "debug": false, "name": null}));
    }

    #[test]
    fn mismatched_containers_are_left_alone() {
        let mut target = json!({"hosts": {"primary": "a"}, "ports": [1]});
        complement(&mut target, &json!({"hosts": ["b"], "ports": {"http": 80}}), None);
        assert_eq!(target, json!({"hosts": {"primary": "a"}, "ports": [1]}));
    }

    #[test]
    fn arrays_merge_element_wise() {
        let mut target = json!({"list": [{"a": 1}, 5]});
        complement(&mut target, &json!({"list": [{"a": 9, "b": 2}, 6, 7, 8]}), None);
        assert_eq!(target, json!({"list": [{"a": 1, "b": 2}, 5, 7, 8]}));
    }

    #[test]
    fn top_level_kind_mismatch_is_a_no_op() {
        let mut target = json!([1, 2]);
        complement(&mut target, &json!({"a": 1}), None);
        assert_eq!(target, json!([1, 2]));

        let mut scalar = json!("value");
        complement(&mut scalar, &json!("other"), None);
        assert_eq!(scalar, json!("value"));
    }

    #[test]
    fn complement_is_idempotent() {
        let source = json!({"a": {"b": {"c": 1, "d": [1, {"e": 2}]}}, "f": "g"});
        let once = complemented(json!({"a": {"b": {"c": 5}}, "h": 1}), &source, None);
        let twice = complemented(once.clone(), &source, None);
        assert_eq!(once, twice);
    }

    #[test]
    fn source_is_never_shared_with_target() {
        let source = json!({"db": {"hosts": ["a"]}});
        let mut first = json!({});
        let mut second = json!({});
        complement(&mut first, &source, None);
        complement(&mut second, &source, None);

        first["db"]["hosts"].as_array_mut().expect("array").push(json!("b"));

        assert_eq!(source, json!({"db": {"hosts": ["a"]}}));
        assert_eq!(second, json!({"db": {"hosts": ["a"]}}));
    }

    #[test]
    fn merger_returning_a_value_overrides_every_key() {
        let merger = merge_function(|_, default| Some(default.clone()));
        let mut target = json!({"a": 1, "nested": {"x": 1, "keep": true}});
        complement(&mut target, &json!({"a": 2, "nested": {"x": 2}}), Some(&merger));
        assert_eq!(target, json!({"a": 2, "nested": {"x": 2}}));
    }

    #[test]
    fn merger_returning_none_falls_back_to_complement() {
        let merger = merge_function(|_, _| None);
        let mut target = json!({"a": {"x": 1}});
        complement(&mut target, &json!({"a": {"x": 2, "y": 3}}), Some(&merger));
        assert_eq!(target, json!({"a": {"x": 1, "y": 3}}));
    }

    #[test]
    fn merger_sees_target_and_default_values() {
        // Concatenate arrays instead of merging them index by index.
        let merger = merge_function(|target, default| match (target, default) {
            (Some(Value::Array(custom)), Value::Array(defaults)) => {
                let mut joined = custom.clone();
                joined.extend(defaults.iter().cloned());
                Some(Value::Array(joined))
            }
            _ => None,
        });
        let mut target = json!({"plugins": ["custom"], "port": 1});
        complement(&mut target, &json!({"plugins": ["base"], "port": 2, "host": "h"}), Some(&merger));
        assert_eq!(target, json!({"plugins": ["custom", "base"], "port": 1, "host": "h"}));
    }

    #[test]
    fn merger_applies_inside_arrays() {
        let merger = merge_function(|target, default| match target {
            None => Some(json!({"from_default": default.clone()})),
            Some(_) => None,
        });
        let mut target = json!([1]);
        complement(&mut target, &json!([9, 2]), Some(&merger));
        assert_eq!(target, json!([1, {"from_default": 2}]));
    }
}
