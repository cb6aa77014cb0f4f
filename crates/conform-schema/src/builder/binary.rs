//! Typed-array and array-buffer schemas.

use conform_core::{TypedArrayKind, Value};

use super::{check_interval, typed, LengthConstraints};
use crate::descriptor::{impl_descriptor, Descriptor, Schema};
use crate::error::ConstructionError;
use crate::node::Rule;

/// `{ $isType: "<Kind>Array" }`, or `"TypedArray"` for any element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedArraySchema {
    schema: Schema,
    kind: Option<TypedArrayKind>,
}

/// `{ $isType: "ArrayBuffer" }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayBufferSchema {
    schema: Schema,
}

impl_descriptor!(TypedArraySchema => TypedArray, ArrayBufferSchema => ArrayBuffer);

impl LengthConstraints for TypedArraySchema {}

impl TypedArraySchema {
    pub fn new(kind: Option<TypedArrayKind>) -> Self {
        let name = kind.map_or("TypedArray", TypedArrayKind::tag);
        Self {
            schema: typed(name),
            kind,
        }
    }

    /// The element kind, or `None` when any typed array is accepted.
    pub fn kind(&self) -> Option<TypedArrayKind> {
        self.kind
    }

    /// `$range: [x, y)` against the array as a value.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidRange` when `x > y`.
    pub fn range(self, x: f64, y: f64) -> Result<Self, ConstructionError> {
        check_interval(x, y)?;
        Ok(self.update(Rule::Range(Value::Number(x), Value::Number(y))))
    }

    /// `$closedRange: [x, y]`.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidRange` when `x > y`.
    pub fn closed_range(self, x: f64, y: f64) -> Result<Self, ConstructionError> {
        check_interval(x, y)?;
        Ok(self.update(Rule::ClosedRange(Value::Number(x), Value::Number(y))))
    }
}

impl Default for TypedArraySchema {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ArrayBufferSchema {
    pub fn new() -> Self {
        Self {
            schema: typed("ArrayBuffer"),
        }
    }
}

impl Default for ArrayBufferSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::TypedArray;

    fn bytes(values: &[u8]) -> Value {
        Value::TypedArray(TypedArray::Uint8(values.to_vec()))
    }

    #[test]
    fn exact_kind_is_required() {
        let schema = TypedArraySchema::new(Some(TypedArrayKind::Uint8));
        assert!(schema.safe_parse(&bytes(&[1, 2])).success);
        let floats = Value::TypedArray(TypedArray::Float32(vec![1.0]));
        assert_eq!(schema.safe_parse(&floats).errors, vec!["Expected type Uint8Array"]);
    }

    #[test]
    fn generic_typed_array_accepts_every_kind_but_not_data_views() {
        let schema = TypedArraySchema::default();
        assert_eq!(schema.kind(), None);
        assert!(schema.safe_parse(&bytes(&[])).success);
        assert!(schema.safe_parse(&Value::TypedArray(TypedArray::Float64(vec![]))).success);
        assert!(!schema.safe_parse(&Value::DataView(vec![0])).success);
        assert!(!schema.safe_parse(&Value::ArrayBuffer(vec![0])).success);
    }

    #[test]
    fn length_and_range() {
        let schema = TypedArraySchema::new(Some(TypedArrayKind::Uint8)).has_length(1);
        assert!(schema.safe_parse(&bytes(&[9])).success);
        assert!(!schema.safe_parse(&bytes(&[9, 9])).success);

        let ranged = TypedArraySchema::default().closed_range(0.0, 10.0).unwrap();
        assert!(ranged.safe_parse(&bytes(&[7])).success);
        assert!(!ranged.safe_parse(&bytes(&[70])).success);
        assert!(TypedArraySchema::default().range(3.0, 1.0).is_err());
    }

    #[test]
    fn array_buffer() {
        let schema = ArrayBufferSchema::new();
        assert!(schema.safe_parse(&Value::ArrayBuffer(vec![1, 2, 3])).success);
        assert!(!schema.safe_parse(&bytes(&[1])).success);
    }
}
