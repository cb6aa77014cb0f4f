//! # End-to-End Validation Scenarios
//!
//! Builds schemas through the public factories and checks representative
//! values, including `parse` error reporting and rehydrated trees.

use conform_schema::{
    any, array, boolean, build_from_tree, number, object, set, string, union, Descriptor,
    EmailOptions, LengthConstraints, TextMatcher, Value,
};
use serde_json::json;

fn record(fields: &[(&str, Value)]) -> Value {
    Value::object(fields.iter().cloned())
}

#[test]
fn positive_number() {
    let schema = number().gt(0.0);
    assert!(schema.safe_parse(&Value::from(5)).success);

    let result = schema.safe_parse(&Value::from(-2));
    assert!(!result.success);
    assert!(result.data.is_none());
    assert_eq!(result.errors, vec!["Expected > 0"]);
}

#[test]
fn object_with_required_fields() {
    let schema = object().field("a", number()).field("b", string());
    assert!(schema
        .safe_parse(&record(&[("a", Value::from(1)), ("b", Value::from("x"))]))
        .success);

    let result = schema.safe_parse(&record(&[("a", Value::from(1))]));
    assert!(!result.success);
    assert_eq!(result.errors, vec!["Expected type String"]);
}

#[test]
fn email_restricted_to_domain() {
    let schema = string().email_with(EmailOptions {
        domain: Some(TextMatcher::from("example.com")),
    });
    assert!(schema.safe_parse(&Value::from("foo@example.com")).success);
    assert!(!schema.safe_parse(&Value::from("foo@test.com")).success);
}

#[test]
fn set_of_fixed_size() {
    let schema = set(&number()).has_length(2);
    let two = Value::set([Value::from(1), Value::from(2)]);
    let three = Value::set([Value::from(1), Value::from(2), Value::from(3)]);
    assert!(schema.safe_parse(&two).success);
    assert_eq!(schema.safe_parse(&three).errors, vec!["Expected length 2"]);
}

#[test]
fn union_of_scalars_rejects_objects() {
    let schema = union([
        string().erased(),
        number().erased(),
        boolean().erased(),
    ]);
    let result = schema.safe_parse(&Value::object(Vec::<(String, Value)>::new()));
    assert!(!result.success);
    assert_eq!(
        result.errors,
        vec![
            "Expected type String",
            "Expected type Number",
            "Expected type Boolean"
        ]
    );
}

#[test]
fn rehydrated_array_of_numbers() {
    let tree = Value::from(json!({"$isType": "Array", "$every": {"$isType": "Number"}}));
    let schema = build_from_tree(&tree).unwrap();
    assert_eq!(schema.kind(), "Array");

    let numbers = Value::array([Value::from(1), Value::from(2), Value::from(3)]);
    assert!(schema.safe_parse(&numbers).success);
    assert!(!schema
        .safe_parse(&Value::array([Value::from(1), Value::from("x")]))
        .success);
}

#[test]
fn parse_joins_messages() {
    let schema = string().or(&number().gt(10.0));
    assert_eq!(schema.parse(&Value::from(11)).unwrap(), Value::from(11));

    let err = schema.parse(&Value::from(3)).unwrap_err();
    assert_eq!(err.to_string(), "Expected type String; Expected > 10");
}

#[test]
fn json_input_through_the_whole_pipeline() {
    let schema = object()
        .field("id", string().uuid())
        .field("tags", array(&string().to_lower_case()).has_length_less_than(4))
        .field("score", number().is_in_closed_range(0.0, 1.0).unwrap().optional())
        .strict();

    let ok = Value::from(json!({
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "tags": ["alpha", "beta"]
    }));
    assert!(schema.safe_parse(&ok).success);

    let extra = Value::from(json!({
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "tags": [],
        "owner": "root"
    }));
    assert_eq!(schema.safe_parse(&extra).errors, vec!["Unexpected property owner"]);

    let loud = Value::from(json!({
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "tags": ["Alpha"]
    }));
    assert_eq!(schema.safe_parse(&loud).errors, vec!["Expected lower case string"]);
}

#[test]
fn equals_requires_the_same_key_set() {
    let schema = any().equals(Value::object([("x", Value::Undefined)]));
    assert!(schema.safe_parse(&Value::object([("x", Value::Undefined)])).success);
    assert!(!schema.safe_parse(&Value::object([("y", Value::Undefined)])).success);
}
