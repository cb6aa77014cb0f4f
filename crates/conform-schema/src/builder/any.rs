//! `AnySchema`: a descriptor of any kind, for heterogeneous collections such
//! as object shapes and for the result of `build_from_tree`.

use super::{
    ArrayBufferSchema, ArraySchema, AsyncFunctionSchema, BigIntSchema, BooleanSchema, EnumSchema,
    FunctionSchema, MapSchema, NullSchema, NumberSchema, ObjectSchema, PromiseSchema, SetSchema,
    StringSchema, SymbolSchema, TypedArraySchema, UndefinedSchema,
};
use crate::descriptor::{Descriptor, Schema};

#[derive(Debug, Clone, PartialEq)]
pub enum AnySchema {
    /// No recognised kind: combinators, `any()`, unknown `$isType`.
    Generic(Schema),
    String(StringSchema),
    Number(NumberSchema),
    Boolean(BooleanSchema),
    BigInt(BigIntSchema),
    Symbol(SymbolSchema),
    Null(NullSchema),
    Undefined(UndefinedSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    Set(SetSchema),
    Map(MapSchema),
    Enum(EnumSchema),
    TypedArray(TypedArraySchema),
    ArrayBuffer(ArrayBufferSchema),
    Function(FunctionSchema),
    AsyncFunction(AsyncFunctionSchema),
    Promise(PromiseSchema),
}

macro_rules! each_kind {
    ($self:expr, $bound:ident => $body:expr) => {
        match $self {
            AnySchema::Generic($bound) => $body,
            AnySchema::String($bound) => $body,
            AnySchema::Number($bound) => $body,
            AnySchema::Boolean($bound) => $body,
            AnySchema::BigInt($bound) => $body,
            AnySchema::Symbol($bound) => $body,
            AnySchema::Null($bound) => $body,
            AnySchema::Undefined($bound) => $body,
            AnySchema::Array($bound) => $body,
            AnySchema::Object($bound) => $body,
            AnySchema::Set($bound) => $body,
            AnySchema::Map($bound) => $body,
            AnySchema::Enum($bound) => $body,
            AnySchema::TypedArray($bound) => $body,
            AnySchema::ArrayBuffer($bound) => $body,
            AnySchema::Function($bound) => $body,
            AnySchema::AsyncFunction($bound) => $body,
            AnySchema::Promise($bound) => $body,
        }
    };
}

impl AnySchema {
    /// Name of the descriptor kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Generic(_) => "Schema",
            Self::String(_) => "String",
            Self::Number(_) => "Number",
            Self::Boolean(_) => "Boolean",
            Self::BigInt(_) => "BigInt",
            Self::Symbol(_) => "Symbol",
            Self::Null(_) => "Null",
            Self::Undefined(_) => "Undefined",
            Self::Array(_) => "Array",
            Self::Object(_) => "Object",
            Self::Set(_) => "Set",
            Self::Map(_) => "Map",
            Self::Enum(_) => "Enum",
            Self::TypedArray(_) => "TypedArray",
            Self::ArrayBuffer(_) => "ArrayBuffer",
            Self::Function(_) => "Function",
            Self::AsyncFunction(_) => "AsyncFunction",
            Self::Promise(_) => "Promise",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl Default for AnySchema {
    fn default() -> Self {
        Self::Generic(Schema::default())
    }
}

impl Descriptor for AnySchema {
    fn schema(&self) -> &Schema {
        each_kind!(self, s => s.schema())
    }

    fn schema_mut(&mut self) -> &mut Schema {
        each_kind!(self, s => s.schema_mut())
    }
}

impl From<Schema> for AnySchema {
    fn from(schema: Schema) -> Self {
        Self::Generic(schema)
    }
}

impl From<AnySchema> for Schema {
    fn from(any: AnySchema) -> Self {
        any.erased()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{number, object, string};
    use conform_core::Value;

    #[test]
    fn kind_survives_modifiers() {
        let any = AnySchema::from(number().gt(1.0));
        let optional = any.optional();
        assert_eq!(optional.kind(), "Number");
        assert!(optional.safe_parse(&Value::Undefined).success);
        assert!(!optional.safe_parse(&Value::from(0)).success);
    }

    #[test]
    fn delegates_description() {
        let any = AnySchema::from(string()).describe("label");
        assert_eq!(any.description(), Some("label"));
    }

    #[test]
    fn erasing_and_objects() {
        let schema: Schema = AnySchema::from(string()).into();
        assert_eq!(schema.tree().type_name(), Some("String"));
        let any = AnySchema::from(object().field("n", number()));
        assert_eq!(any.as_object().map(|o| o.shape().len()), Some(1));
        assert_eq!(AnySchema::default().kind(), "Schema");
    }
}
