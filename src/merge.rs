//! Recursive deep-merge of nested JSON configuration trees.
//!
//! Layout construction layers override trees onto default templates; where
//! both sides hold an object at the same key the merge recurses, otherwise
//! the override leaf wins.

use serde_json::{Map, Value};

/// Merge `overlay` onto a copy of `base` and return the result.
///
/// Neither input is modified. For keys where both sides hold objects the
/// merge recurses; any other collision takes the overlay's value.
#[must_use]
pub fn merged(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut out = base.clone();
    merge_into(&mut out, overlay);
    out
}

/// Merge `overlay` into `base` in place, with the same recursion rule as
/// [`merged`].
pub fn merge_into(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        match (base.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_merged_nested_objects() {
        let a = obj(json!({"a": {"x": 1, "y": 2}}));
        let b = obj(json!({"a": {"y": 9, "z": 3}}));

        let result = merged(&a, &b);
        assert_eq!(Value::Object(result), json!({"a": {"x": 1, "y": 9, "z": 3}}));
    }

    #[test]
    fn test_merged_leaves_inputs_unmodified() {
        let a = obj(json!({"a": {"x": 1}}));
        let b = obj(json!({"a": {"x": 2}, "b": 3}));
        let a_before = a.clone();
        let b_before = b.clone();

        let _ = merged(&a, &b);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_merged_non_object_collision_takes_overlay() {
        let a = obj(json!({"k": {"nested": true}}));
        let b = obj(json!({"k": 7}));

        let result = merged(&a, &b);
        assert_eq!(result["k"], json!(7));
    }

    #[test]
    fn test_merged_object_replaces_scalar() {
        let a = obj(json!({"k": 7}));
        let b = obj(json!({"k": {"nested": true}}));

        let result = merged(&a, &b);
        assert_eq!(result["k"], json!({"nested": true}));
    }

    #[test]
    fn test_merge_into_adds_new_keys() {
        let mut base = obj(json!({"a": 1}));
        merge_into(&mut base, &obj(json!({"b": {"c": 2}})));
        assert_eq!(Value::Object(base), json!({"a": 1, "b": {"c": 2}}));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_tree(depth: u32) -> BoxedStrategy<Value> {
            let leaf = prop_oneof![
                any::<i64>().prop_map(|n| json!(n)),
                "[a-z]{0,4}".prop_map(|s| json!(s)),
                Just(Value::Null),
            ];
            leaf.prop_recursive(depth, 16, 4, |inner| {
                prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect()))
            })
            .boxed()
        }

        fn arb_map() -> impl Strategy<Value = Map<String, Value>> {
            prop::collection::btree_map("[a-z]{1,3}", arb_tree(3), 0..4)
                .prop_map(|m| m.into_iter().collect())
        }

        proptest! {
            /// Every overlay leaf is present in the result.
            #[test]
            fn prop_overlay_keys_present(a in arb_map(), b in arb_map()) {
                let result = merged(&a, &b);
                for key in b.keys() {
                    prop_assert!(result.contains_key(key));
                }
            }

            /// Inputs are never mutated.
            #[test]
            fn prop_inputs_untouched(a in arb_map(), b in arb_map()) {
                let (a0, b0) = (a.clone(), b.clone());
                let _ = merged(&a, &b);
                prop_assert_eq!(a, a0);
                prop_assert_eq!(b, b0);
            }

            /// Merging a map onto itself is the identity.
            #[test]
            fn prop_self_merge_identity(a in arb_map()) {
                prop_assert_eq!(merged(&a, &a), a);
            }
        }
    }
}
