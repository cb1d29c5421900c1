//! Property-based tests for structural reuse.

use proptest::prelude::*;
use tola_reuse::{reuse, reuse_with, Locator, Pattern, Record, Timestamp, Value};

// =============================================================================
// Test helpers
// =============================================================================

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-5i32..5).prop_map(Value::from),
        "[a-c]{0,2}".prop_map(Value::from),
        (0i64..3).prop_map(|m| Value::from(Timestamp::from_millis(m))),
        prop::sample::select(vec!["a+", "b*"])
            .prop_map(|s| Value::from(Pattern::new(s, "g").unwrap())),
        prop::sample::select(vec!["https://a.example/", "https://b.example/"])
            .prop_map(|s| Value::from(Locator::parse(s).unwrap())),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|items| Value::list(items)),
            prop::collection::vec(("[a-d]", inner.clone()), 0..4).prop_map(|fields| {
                let mut record = Record::new();
                for (name, value) in fields {
                    record.insert(name, value);
                }
                Value::from(record)
            }),
            prop::collection::vec((0i32..4, inner), 0..4).prop_map(|entries| {
                Value::map(entries.into_iter().map(|(k, v)| (Value::from(k), v)))
            }),
        ]
    })
}

/// Structurally equal copy with no shared allocations.
fn rebuild(value: &Value) -> Value {
    match value {
        Value::List(items) => Value::list(items.iter().map(rebuild)),
        Value::Map(map) => Value::map(map.iter().map(|(k, v)| (k.clone(), rebuild(v)))),
        Value::Record(record) => {
            let mut copy = Record::with_proto(record.proto());
            for (field, v) in record.fields() {
                copy.insert(field, rebuild(v));
            }
            Value::from(copy)
        }
        Value::Date(ts) => Value::from(**ts),
        Value::Pattern(p) => Value::from(Pattern::new(p.source(), &p.flags().to_string()).unwrap()),
        Value::Locator(l) => Value::from(Locator::parse(l.href()).unwrap()),
        other => other.clone(),
    }
}

fn is_composite(value: &Value) -> bool {
    value.category().is_composite()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn full_reuse_identity(v in tree()) {
        let copy = rebuild(&v);
        if is_composite(&v) {
            prop_assert!(!copy.same(&v));
        }
        prop_assert!(reuse(&copy, &v).same(&v));
    }

    #[test]
    fn value_preservation(updated in tree(), old in tree()) {
        let result = reuse(&updated, &old);
        prop_assert_eq!(&result, &updated);
    }

    #[test]
    fn self_reuse_is_identity(v in tree()) {
        prop_assert!(reuse(&v, &v).same(&v));
    }

    #[test]
    fn result_is_old_only_when_equal(updated in tree(), old in tree()) {
        let result = reuse(&updated, &old);
        if result.same(&old) {
            prop_assert_eq!(&old, &updated);
        }
    }

    #[test]
    fn fallback_keeping_updated_changes_nothing(updated in tree(), old in tree()) {
        let keep_updated = |u: &Value, _: &Value| u.clone();
        let plain = reuse(&updated, &old);
        let with_fallback = reuse_with(&updated, &old, &keep_updated);
        prop_assert_eq!(plain.same(&old), with_fallback.same(&old));
        prop_assert_eq!(&with_fallback, &updated);
    }
}
