//! Property-based tests for the matcher
//!
//! These tests check the matching laws across randomly generated values
//! and specs.

use proptest::prelude::*;
use serde_json::Value;
use shapeguard_core::{
    validate, validate_with_config, MatchConfig, SchemaErrorKind, SchemaSpec, ValueType,
};

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e6f64..1.0e6f64)
            .prop_filter("finite non-integral", |f| f.fract() != 0.0)
            .prop_map(|f| serde_json::json!(f)),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        20, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("[a-z]{1,6}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

fn value_type_strategy() -> impl Strategy<Value = ValueType> {
    proptest::sample::select(ValueType::ALL.to_vec())
}

/// Strategy for generating specs of bounded depth
fn spec_strategy() -> impl Strategy<Value = SchemaSpec> {
    let leaf = value_type_strategy().prop_map(SchemaSpec::exact);

    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(SchemaSpec::list_of),
            proptest::collection::vec(inner.clone(), 1..4)
                .prop_map(|positions| SchemaSpec::tuple(positions).unwrap()),
            proptest::collection::vec(inner.clone(), 1..3)
                .prop_map(|branches| SchemaSpec::any_of(branches).unwrap()),
            proptest::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|entries| SchemaSpec::mapping(entries).unwrap()),
        ]
    })
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent(value in json_value_strategy(), spec in spec_strategy()) {
        let before = value.clone();
        let first = validate(&value, &spec).map(|_| ());
        let second = validate(&value, &spec).map(|_| ());
        prop_assert_eq!(first, second);
        prop_assert_eq!(value, before);
    }

    #[test]
    fn prop_single_branch_alternation_reduces(
        value in json_value_strategy(),
        spec in spec_strategy(),
    ) {
        let wrapped = SchemaSpec::any_of(vec![spec.clone()]).unwrap();
        prop_assert_eq!(validate(&value, &spec).is_ok(), validate(&value, &wrapped).is_ok());
    }

    #[test]
    fn prop_tuple_rejects_other_lengths(
        positions in proptest::collection::vec(spec_strategy(), 1..4),
        items in proptest::collection::vec(json_value_strategy(), 0..7),
    ) {
        prop_assume!(items.len() != positions.len());
        let spec = SchemaSpec::tuple(positions).unwrap();
        let error = validate(&Value::Array(items), &spec).unwrap_err();
        prop_assert_eq!(error.kind(), SchemaErrorKind::LengthMismatch);
    }

    #[test]
    fn prop_homogeneous_str_accepts_strings(items in proptest::collection::vec("[a-z]{0,8}", 0..20)) {
        let spec = SchemaSpec::list_of(ValueType::Str);
        let value = Value::Array(items.into_iter().map(Value::String).collect());
        prop_assert!(validate(&value, &spec).is_ok());
    }

    #[test]
    fn prop_any_matches_everything(value in json_value_strategy()) {
        prop_assert!(validate(&value, &ValueType::Any.into()).is_ok());
    }

    #[test]
    fn prop_collect_all_agrees_with_fail_fast(
        value in json_value_strategy(),
        spec in spec_strategy(),
    ) {
        let fail_fast = validate(&value, &spec);
        let collected = validate_with_config(&value, &spec, &MatchConfig::collect_all());
        prop_assert_eq!(fail_fast.is_ok(), collected.is_ok());
        if let (Err(first), Err(all)) = (fail_fast, collected) {
            prop_assert_eq!(Some(&first), all.first());
        }
    }
}
