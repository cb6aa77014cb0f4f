//! # Fluent Builders
//!
//! One descriptor type per schema kind, each starting from its kind's base
//! tree (usually `{ $isType: "<Kind>" }`) and adding rules through
//! consuming modifiers. The factory functions here are the entry points.
//!
//! Modifiers that take an interval validate it: `min > max` is a
//! [`ConstructionError`], raised at build time rather than turning into a
//! schema that rejects everything.

mod any;
mod binary;
mod callable;
mod collection;
mod number;
mod object;
mod scalar;
mod string;

pub use any::AnySchema;
pub use binary::{ArrayBufferSchema, TypedArraySchema};
pub use callable::{AsyncFunctionSchema, FunctionSchema, PromiseSchema};
pub use collection::{ArraySchema, MapSchema, SetSchema};
pub use number::NumberSchema;
pub use object::ObjectSchema;
pub use scalar::{BigIntSchema, BooleanSchema, EnumSchema, NullSchema, SymbolSchema, UndefinedSchema};
pub use string::StringSchema;

use conform_core::{TypedArrayKind, Value};

use crate::descriptor::{Descriptor, Schema};
use crate::error::ConstructionError;
use crate::node::{Node, Rule};

/// Fail unless `min <= max`. NaN bounds never satisfy the check.
pub(crate) fn check_interval(min: f64, max: f64) -> Result<(), ConstructionError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConstructionError::InvalidRange { min, max })
    }
}

/// The base tree of a kind: `{ $isType: name }`.
pub(crate) fn typed(name: &str) -> Schema {
    Schema::new(Node::new().with(Rule::IsType(name.to_string())))
}

/// Length and size modifiers shared by strings, arrays, sets, maps and typed
/// arrays.
pub trait LengthConstraints: Descriptor {
    fn has_length(self, n: usize) -> Self {
        self.update(Rule::HasLength(n))
    }

    fn has_length_less_than(self, n: usize) -> Self {
        self.update(Rule::HasLengthLessThan(n))
    }

    fn has_length_greater_than(self, n: usize) -> Self {
        self.update(Rule::HasLengthGreaterThan(n))
    }

    /// Length in `[m, n)`.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidRange` when `m > n`.
    fn has_length_in_range(self, m: usize, n: usize) -> Result<Self, ConstructionError> {
        check_interval(m as f64, n as f64)?;
        Ok(self.update(Rule::HasLengthInRange(m, n)))
    }

    /// Length in `[m, n]`.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidRange` when `m > n`.
    fn has_length_in_closed_range(self, m: usize, n: usize) -> Result<Self, ConstructionError> {
        check_interval(m as f64, n as f64)?;
        Ok(self.update(Rule::HasLengthInClosedRange(m, n)))
    }
}

pub fn string() -> StringSchema {
    StringSchema::new()
}

pub fn number() -> NumberSchema {
    NumberSchema::new()
}

pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

pub fn bigint() -> BigIntSchema {
    BigIntSchema::new()
}

pub fn symbol() -> SymbolSchema {
    SymbolSchema::new()
}

pub fn null() -> NullSchema {
    NullSchema::new()
}

pub fn undefined() -> UndefinedSchema {
    UndefinedSchema::new()
}

/// An array whose every element satisfies `member`.
pub fn array<D: Descriptor>(member: &D) -> ArraySchema {
    ArraySchema::new(member)
}

/// An array of numbers.
pub fn numeric_array() -> ArraySchema {
    ArraySchema::new(&number())
}

/// An object with no declared fields. Add them with [`ObjectSchema::field`].
pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}

pub fn set<D: Descriptor>(member: &D) -> SetSchema {
    SetSchema::new(member)
}

pub fn map<K: Descriptor, V: Descriptor>(key: &K, value: &V) -> MapSchema {
    MapSchema::new(key, value)
}

/// Membership in a fixed list, compared with SameValueZero.
pub fn enum_of<I, V>(values: I) -> EnumSchema
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    EnumSchema::new(values)
}

/// Any typed array, whatever its element kind.
pub fn typed_array() -> TypedArraySchema {
    TypedArraySchema::new(None)
}

pub fn int8_array() -> TypedArraySchema {
    TypedArraySchema::new(Some(TypedArrayKind::Int8))
}

pub fn uint8_array() -> TypedArraySchema {
    TypedArraySchema::new(Some(TypedArrayKind::Uint8))
}

pub fn uint8_clamped_array() -> TypedArraySchema {
    TypedArraySchema::new(Some(TypedArrayKind::Uint8Clamped))
}

pub fn int16_array() -> TypedArraySchema {
    TypedArraySchema::new(Some(TypedArrayKind::Int16))
}

pub fn uint16_array() -> TypedArraySchema {
    TypedArraySchema::new(Some(TypedArrayKind::Uint16))
}

pub fn int32_array() -> TypedArraySchema {
    TypedArraySchema::new(Some(TypedArrayKind::Int32))
}

pub fn uint32_array() -> TypedArraySchema {
    TypedArraySchema::new(Some(TypedArrayKind::Uint32))
}

pub fn float32_array() -> TypedArraySchema {
    TypedArraySchema::new(Some(TypedArrayKind::Float32))
}

pub fn float64_array() -> TypedArraySchema {
    TypedArraySchema::new(Some(TypedArrayKind::Float64))
}

pub fn array_buffer() -> ArrayBufferSchema {
    ArrayBufferSchema::new()
}

pub fn function() -> FunctionSchema {
    FunctionSchema::new()
}

pub fn async_function() -> AsyncFunctionSchema {
    AsyncFunctionSchema::new()
}

pub fn promise() -> PromiseSchema {
    PromiseSchema::new()
}

/// The empty tree: accepts every value.
pub fn any() -> Schema {
    Schema::default()
}

/// `{ $not: {} }`: rejects every value.
pub fn never() -> Schema {
    crate::combinator::not(&any())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_check() {
        assert!(check_interval(1.0, 1.0).is_ok());
        assert!(check_interval(f64::NEG_INFINITY, f64::INFINITY).is_ok());
        assert_eq!(
            check_interval(3.0, 1.0),
            Err(ConstructionError::InvalidRange { min: 3.0, max: 1.0 })
        );
        assert!(check_interval(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn any_and_never() {
        for value in [Value::Undefined, Value::Null, Value::from("x"), Value::from(0)] {
            assert!(any().safe_parse(&value).success);
            assert!(!never().safe_parse(&value).success);
        }
    }

    #[test]
    fn length_range_rejects_inverted_bounds() {
        let err = string().has_length_in_range(4, 2).unwrap_err();
        assert_eq!(err, ConstructionError::InvalidRange { min: 4.0, max: 2.0 });
        assert!(string().has_length_in_closed_range(2, 2).is_ok());
    }

    #[test]
    fn length_modifiers_apply_to_every_sized_kind() {
        let schema = array(&any()).has_length_greater_than(1);
        assert!(schema.safe_parse(&Value::array([Value::Null, Value::Null])).success);
        assert!(!schema.safe_parse(&Value::array([Value::Null])).success);

        let schema = set(&any()).has_length(1);
        assert!(schema.safe_parse(&Value::set([Value::from(1)])).success);
    }
}
