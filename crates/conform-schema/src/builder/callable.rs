//! Function, async-function and promise schemas.
//!
//! `$returns` records the expected result schema for documentation and
//! rehydration. Calling a function or awaiting a promise is out of reach of
//! a snapshot value, so it is never checked.

use super::typed;
use crate::descriptor::{impl_descriptor, Descriptor, Schema};
use crate::node::Rule;

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSchema {
    schema: Schema,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsyncFunctionSchema {
    schema: Schema,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromiseSchema {
    schema: Schema,
}

impl_descriptor!(
    FunctionSchema => Function,
    AsyncFunctionSchema => AsyncFunction,
    PromiseSchema => Promise,
);

macro_rules! callable_kind {
    ($($kind:ident => $name:literal),+ $(,)?) => {$(
        impl $kind {
            pub fn new() -> Self {
                Self {
                    schema: typed($name),
                }
            }

            /// Record the schema of the produced value under `$returns`.
            pub fn returns<D: Descriptor>(self, output: &D) -> Self {
                self.update(Rule::Returns(output.shared_tree()))
            }
        }

        impl Default for $kind {
            fn default() -> Self {
                Self::new()
            }
        }
    )+};
}

callable_kind!(
    FunctionSchema => "Function",
    AsyncFunctionSchema => "AsyncFunction",
    PromiseSchema => "Promise",
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::number;
    use crate::key::Key;
    use conform_core::{Function, FunctionKind, Promise, Value};

    #[test]
    fn function_kinds_are_distinct() {
        let sync = Value::from(Function::new("() => 1"));
        let async_fn = Value::from(Function::with_kind("async () => 1", FunctionKind::Async));
        assert!(FunctionSchema::new().safe_parse(&sync).success);
        assert!(!FunctionSchema::new().safe_parse(&async_fn).success);
        assert!(AsyncFunctionSchema::new().safe_parse(&async_fn).success);
        assert_eq!(
            AsyncFunctionSchema::new().safe_parse(&sync).errors,
            vec!["Expected type AsyncFunction"]
        );
    }

    #[test]
    fn returns_is_recorded_but_not_checked() {
        let schema = FunctionSchema::new().returns(&number());
        assert!(schema.tree().contains(Key::Returns));
        let returns_string = Value::from(Function::new("() => 'x'"));
        assert!(schema.safe_parse(&returns_string).success);
    }

    #[test]
    fn promise() {
        let schema = PromiseSchema::new().returns(&number());
        assert!(schema.safe_parse(&Value::from(Promise::new())).success);
        assert!(!schema.safe_parse(&Value::from(1)).success);
    }
}
