//! # Combinator Laws
//!
//! Property tests over a fixed pool of leaf schemas and randomly generated
//! values: `or` commutes and `and` associates on acceptance, `not` accepts
//! the complement, and `optional` always admits the missing value.

use conform_schema::{
    and, bigint, boolean, not, null, number, object, or, string, undefined, Descriptor,
    LengthConstraints, Schema, Value,
};
use proptest::prelude::*;

fn leaf_schema() -> impl Strategy<Value = Schema> {
    prop_oneof![
        Just(string().erased()),
        Just(string().has_length_less_than(3).erased()),
        Just(number().erased()),
        Just(number().gt(0.0).erased()),
        Just(number().is_integer().erased()),
        Just(number().is_in_range(-5.0, 5.0).unwrap().erased()),
        Just(boolean().is_true().erased()),
        Just(bigint().geq(0).erased()),
        Just(null().erased()),
        Just(undefined().erased()),
        Just(conform_schema::any()),
    ]
}

fn sample_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>().prop_map(Value::from),
        (-10i32..10).prop_map(Value::from),
        any::<i64>().prop_map(|n| Value::bigint(i128::from(n))),
        "[a-z]{0,5}".prop_map(Value::from),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-c]", inner), 0..4).prop_map(|fields| Value::object(fields)),
        ]
    })
}

fn accepts<D: Descriptor>(schema: &D, value: &Value) -> bool {
    schema.safe_parse(value).success
}

fn single_field(name: &str, schema: Schema) -> Schema {
    object().field(name, schema).erased()
}

proptest! {
    #[test]
    fn or_commutes_on_acceptance(a in leaf_schema(), b in leaf_schema(), x in sample_value()) {
        prop_assert_eq!(accepts(&or(&a, &b), &x), accepts(&or(&b, &a), &x));
    }

    #[test]
    fn or_accepts_when_either_accepts(a in leaf_schema(), b in leaf_schema(), x in sample_value()) {
        prop_assert_eq!(accepts(&a.or(&b), &x), accepts(&a, &x) || accepts(&b, &x));
    }

    #[test]
    fn and_associates_on_objects(
        a in leaf_schema(),
        b in leaf_schema(),
        c in leaf_schema(),
        x in sample_value(),
    ) {
        let a = single_field("a", a);
        let b = single_field("b", b);
        let c = single_field("c", c);
        let left = and(&and(&a, &b), &c);
        let right = and(&a, &and(&b, &c));
        prop_assert_eq!(accepts(&left, &x), accepts(&right, &x));
    }

    #[test]
    fn not_is_the_complement(s in leaf_schema(), x in sample_value()) {
        prop_assert_eq!(accepts(&not(&s), &x), !accepts(&s, &x));
    }

    #[test]
    fn optional_admits_missing(s in leaf_schema(), x in sample_value()) {
        let optional = s.optional();
        prop_assert!(accepts(&optional, &Value::Undefined));
        if !x.is_undefined() {
            prop_assert_eq!(accepts(&optional, &x), accepts(&s, &x));
        }
    }

    #[test]
    fn union_errors_follow_rejected_branches(a in leaf_schema(), b in leaf_schema(), x in sample_value()) {
        let result = or(&a, &b).safe_parse(&x);
        if !result.success {
            prop_assert_eq!(result.errors.len(), 2);
        }
    }
}
