//! Boolean, null, undefined, bigint, symbol and enum schemas.

use conform_core::Value;

use super::typed;
use crate::descriptor::{impl_descriptor, Descriptor, Schema};
use crate::node::{Node, Rule, TextMatcher};

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanSchema {
    schema: Schema,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullSchema {
    schema: Schema,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UndefinedSchema {
    schema: Schema,
}

/// Bounds are integers compared exactly against bigint values.
#[derive(Debug, Clone, PartialEq)]
pub struct BigIntSchema {
    schema: Schema,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSchema {
    schema: Schema,
}

/// `{ $enum: [...] }`. Carries no `$isType`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    schema: Schema,
}

impl_descriptor!(
    BooleanSchema => Boolean,
    NullSchema => Null,
    UndefinedSchema => Undefined,
    BigIntSchema => BigInt,
    SymbolSchema => Symbol,
    EnumSchema => Enum,
);

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            schema: typed("Boolean"),
        }
    }

    pub fn is_true(self) -> Self {
        self.equals(true)
    }

    pub fn is_false(self) -> Self {
        self.equals(false)
    }
}

impl NullSchema {
    pub fn new() -> Self {
        Self {
            schema: typed("Null"),
        }
    }
}

impl UndefinedSchema {
    pub fn new() -> Self {
        Self {
            schema: typed("Undefined"),
        }
    }
}

impl BigIntSchema {
    pub fn new() -> Self {
        Self {
            schema: typed("BigInt"),
        }
    }

    pub fn gt(self, n: i128) -> Self {
        self.update(Rule::Gt(Value::BigInt(n)))
    }

    pub fn lt(self, n: i128) -> Self {
        self.update(Rule::Lt(Value::BigInt(n)))
    }

    pub fn geq(self, n: i128) -> Self {
        self.update(Rule::Geq(Value::BigInt(n)))
    }

    pub fn leq(self, n: i128) -> Self {
        self.update(Rule::Leq(Value::BigInt(n)))
    }
}

impl SymbolSchema {
    pub fn new() -> Self {
        Self {
            schema: typed("Symbol"),
        }
    }

    /// Description equal to a string, or matching a pattern.
    pub fn has_description(self, description: impl Into<TextMatcher>) -> Self {
        self.update(Rule::HasDescription(description.into()))
    }

    /// Created through the global registry (`Symbol.for`).
    pub fn in_global_registry(self) -> Self {
        self.update(Rule::Global(true))
    }

    pub fn not_in_global_registry(self) -> Self {
        self.update(Rule::Global(false))
    }

    /// Registered under exactly `key`.
    pub fn key_is(self, key: impl Into<String>) -> Self {
        self.update(Rule::GlobalKey(key.into()))
    }

    pub fn is_well_known(self) -> Self {
        self.update(Rule::WellKnown(true))
    }
}

impl EnumSchema {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self {
            schema: Schema::new(Node::new().with(Rule::Enum(values))),
        }
    }

    /// The allowed values, in declaration order.
    pub fn values(&self) -> &[Value] {
        match self.tree().get(crate::key::Key::Enum) {
            Some(Rule::Enum(values)) => values,
            _ => &[],
        }
    }
}

macro_rules! default_via_new {
    ($($kind:ident),+) => {$(
        impl Default for $kind {
            fn default() -> Self {
                Self::new()
            }
        }
    )+};
}

default_via_new!(BooleanSchema, NullSchema, UndefinedSchema, BigIntSchema, SymbolSchema);

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::{Pattern, Symbol};

    #[test]
    fn boolean_literals() {
        let t = BooleanSchema::new().is_true();
        assert!(t.safe_parse(&Value::Bool(true)).success);
        assert_eq!(t.safe_parse(&Value::Bool(false)).errors, vec!["Expected true"]);
        assert!(BooleanSchema::new().is_false().safe_parse(&Value::Bool(false)).success);
        assert!(!BooleanSchema::new().safe_parse(&Value::from(0)).success);
    }

    #[test]
    fn null_and_undefined_are_distinct() {
        assert!(NullSchema::new().safe_parse(&Value::Null).success);
        assert!(!NullSchema::new().safe_parse(&Value::Undefined).success);
        assert!(UndefinedSchema::new().safe_parse(&Value::Undefined).success);
        assert!(!UndefinedSchema::new().safe_parse(&Value::Null).success);
    }

    #[test]
    fn bigint_bounds_are_exact() {
        let big = 1_i128 << 80;
        let schema = BigIntSchema::new().gt(big);
        assert!(schema.safe_parse(&Value::BigInt(big + 1)).success);
        assert!(!schema.safe_parse(&Value::BigInt(big)).success);
        assert_eq!(
            BigIntSchema::new().safe_parse(&Value::from(1)).errors,
            vec!["Expected type BigInt"]
        );
        let window = BigIntSchema::new().geq(-5).leq(5);
        assert!(window.safe_parse(&Value::BigInt(5)).success);
        assert!(!window.safe_parse(&Value::BigInt(6)).success);
    }

    #[test]
    fn symbol_registry_rules() {
        let global = SymbolSchema::new().in_global_registry().key_is("app.id");
        assert!(global.safe_parse(&Value::from(Symbol::for_key("app.id"))).success);
        assert!(!global.safe_parse(&Value::from(Symbol::for_key("other"))).success);
        assert!(!global.safe_parse(&Value::from(Symbol::new(Some("app.id")))).success);

        let local = SymbolSchema::new().not_in_global_registry();
        assert!(local.safe_parse(&Value::from(Symbol::new(None))).success);

        let well_known = SymbolSchema::new().is_well_known();
        assert!(well_known.safe_parse(&Value::from(Symbol::well_known("iterator"))).success);
        assert!(!well_known.safe_parse(&Value::from(Symbol::new(Some("iterator")))).success);
    }

    #[test]
    fn symbol_description() {
        let exact = SymbolSchema::new().has_description("token");
        assert!(exact.safe_parse(&Value::from(Symbol::new(Some("token")))).success);
        let pattern = SymbolSchema::new().has_description(Pattern::new("^tok").unwrap());
        assert!(pattern.safe_parse(&Value::from(Symbol::new(Some("tokens")))).success);
        assert!(!pattern.safe_parse(&Value::from(Symbol::new(Some("atok")))).success);
    }

    #[test]
    fn enum_membership() {
        let schema = EnumSchema::new(["red", "green"]);
        assert_eq!(schema.values().len(), 2);
        assert!(schema.tree().type_name().is_none());
        assert!(schema.safe_parse(&Value::from("red")).success);
        assert_eq!(
            schema.safe_parse(&Value::from("blue")).errors,
            vec!["Expected one of red, green"]
        );

        let numbers = EnumSchema::new([f64::NAN, 0.0]);
        assert!(numbers.safe_parse(&Value::Number(f64::NAN)).success);
        assert!(numbers.safe_parse(&Value::Number(-0.0)).success);
    }
}
