//! # Schema Descriptors
//!
//! A descriptor is an immutable wrapper around a shared constraint tree plus
//! an optional description. Every schema kind in [`crate::builder`] is a
//! descriptor; [`Schema`] is the kind-erased one produced by combinators and
//! by rehydrating unrecognised trees.
//!
//! Modifiers consume `self` and return the modified descriptor. Trees are
//! copied on write, so a descriptor that was cloned before a modifier ran
//! keeps its original tree.

use std::sync::Arc;

use conform_core::Value;

use crate::combinator;
use crate::config::EngineConfig;
use crate::error::ParseError;
use crate::interpret::{self, SafeParse};
use crate::node::{Node, Rule};
use crate::{serialize, tree};

/// A constraint tree with an optional description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    tree: Arc<Node>,
    description: Option<String>,
}

impl Schema {
    pub fn new(tree: Node) -> Self {
        Self::from_shared(Arc::new(tree))
    }

    /// Wrap a tree that other schemas may already reference.
    pub fn from_shared(tree: Arc<Node>) -> Self {
        Self {
            tree,
            description: None,
        }
    }
}

/// Operations shared by every schema kind.
pub trait Descriptor: Clone {
    fn schema(&self) -> &Schema;

    fn schema_mut(&mut self) -> &mut Schema;

    fn tree(&self) -> &Node {
        &self.schema().tree
    }

    /// The tree behind an `Arc`, for embedding in another tree.
    fn shared_tree(&self) -> Arc<Node> {
        Arc::clone(&self.schema().tree)
    }

    /// Replace the whole tree.
    fn with_tree(self, tree: Node) -> Self {
        self.with_shared_tree(Arc::new(tree))
    }

    fn with_shared_tree(mut self, tree: Arc<Node>) -> Self {
        self.schema_mut().tree = tree;
        self
    }

    /// Set one rule, replacing a rule with the same key where it stands.
    fn update(mut self, rule: Rule) -> Self {
        Arc::make_mut(&mut self.schema_mut().tree).set(rule);
        self
    }

    /// Attach a description. It lives beside the tree, not in it.
    fn describe(mut self, text: impl Into<String>) -> Self {
        self.schema_mut().description = Some(text.into());
        self
    }

    fn description(&self) -> Option<&str> {
        self.schema().description.as_deref()
    }

    /// A copy that also accepts an undefined value. The receiver is unchanged.
    fn optional(&self) -> Self {
        self.clone().update(Rule::Optional(true))
    }

    /// `self.or(null())`.
    fn nullable(&self) -> Schema {
        combinator::or(self, &crate::builder::null())
    }

    fn or<D: Descriptor>(&self, other: &D) -> Schema {
        combinator::or(self, other)
    }

    fn and<D: Descriptor>(&self, other: &D) -> Schema {
        combinator::and(self, other)
    }

    /// Negates `other`, not the receiver.
    fn not<D: Descriptor>(&self, other: &D) -> Schema {
        combinator::not(other)
    }

    /// Require deep equality with `value`.
    fn equals(self, value: impl Into<Value>) -> Self {
        self.update(Rule::Same(value.into()))
    }

    /// This descriptor without its kind.
    fn erased(&self) -> Schema {
        self.schema().clone()
    }

    fn safe_parse(&self, value: &Value) -> SafeParse {
        self.safe_parse_with(value, &EngineConfig::default())
    }

    fn safe_parse_with(&self, value: &Value, config: &EngineConfig) -> SafeParse {
        interpret::safe_parse(self.tree(), value, config)
    }

    /// Validate `value`, returning it unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` carrying every recorded message when validation
    /// fails.
    fn parse(&self, value: &Value) -> Result<Value, ParseError> {
        self.safe_parse(value).into_result()
    }

    /// The tree as JSON text, with non-finite numbers and functions spelled
    /// as strings and the description under `$description`.
    fn serialized_schema(&self) -> String {
        serialize::serialized_schema(self.tree(), self.description())
    }

    /// The tree as a host value, suitable for `build_from_tree`.
    fn to_tree(&self) -> Value {
        tree::encode_tree(self.tree())
    }
}

impl Descriptor for Schema {
    fn schema(&self) -> &Schema {
        self
    }

    fn schema_mut(&mut self) -> &mut Schema {
        self
    }
}

/// Implement [`Descriptor`] for a kind struct holding a `schema: Schema`
/// field, plus the conversions into [`Schema`] and `AnySchema`.
macro_rules! impl_descriptor {
    ($($kind:ident => $variant:ident),+ $(,)?) => {$(
        impl $crate::descriptor::Descriptor for $kind {
            fn schema(&self) -> &$crate::descriptor::Schema {
                &self.schema
            }

            fn schema_mut(&mut self) -> &mut $crate::descriptor::Schema {
                &mut self.schema
            }
        }

        impl From<$kind> for $crate::descriptor::Schema {
            fn from(kind: $kind) -> Self {
                kind.schema
            }
        }

        impl From<$kind> for $crate::builder::AnySchema {
            fn from(kind: $kind) -> Self {
                $crate::builder::AnySchema::$variant(kind)
            }
        }
    )+};
}

pub(crate) use impl_descriptor;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;

    fn string_schema() -> Schema {
        Schema::new(Node::new().with(Rule::IsType("String".into())))
    }

    #[test]
    fn optional_leaves_receiver_untouched() {
        let base = string_schema();
        let optional = base.optional();
        assert!(!base.tree().is_optional());
        assert!(optional.tree().is_optional());
        assert!(optional.safe_parse(&Value::Undefined).success);
        assert!(!base.safe_parse(&Value::Undefined).success);
    }

    #[test]
    fn update_copies_shared_tree() {
        let base = string_schema();
        let edited = base.clone().update(Rule::Trim);
        assert_eq!(base.tree().len(), 1);
        assert_eq!(edited.tree().len(), 2);
    }

    #[test]
    fn nullable_accepts_null() {
        let schema = string_schema().nullable();
        assert!(schema.safe_parse(&Value::Null).success);
        assert!(schema.safe_parse(&Value::from("x")).success);
        assert!(!schema.safe_parse(&Value::from(1)).success);
    }

    #[test]
    fn not_negates_argument() {
        let schema = string_schema().not(&Schema::new(Node::new().with(Rule::IsType("Number".into()))));
        assert_eq!(schema.tree().rules().len(), 1);
        assert!(schema.tree().contains(Key::Not));
        assert!(schema.safe_parse(&Value::from(true)).success);
        assert!(!schema.safe_parse(&Value::from(3)).success);
    }

    #[test]
    fn description_is_kept_out_of_tree() {
        let schema = string_schema().describe("a name");
        assert_eq!(schema.description(), Some("a name"));
        assert!(!schema.tree().contains(Key::Description));
    }

    #[test]
    fn equals_sets_same() {
        let schema = Schema::default().equals(4);
        assert!(schema.parse(&Value::from(4)).is_ok());
        let err = schema.parse(&Value::from(5)).unwrap_err();
        assert_eq!(err.errors, vec!["Expected 4".to_string()]);
    }
}
