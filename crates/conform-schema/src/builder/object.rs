//! # Object Schemas
//!
//! An object schema keeps two views of its fields: the descriptors it was
//! built from (the *shape*) and their trees under `$props`. Shape-level
//! operations (`extend`, `merge`, `pick`, `partial`) work on descriptors and
//! rebuild `$props` from them.
//!
//! Undeclared fields pass through unless the schema is [`strict`].
//!
//! [`strict`]: ObjectSchema::strict

use std::sync::Arc;

use super::AnySchema;
use crate::descriptor::{impl_descriptor, Descriptor, Schema};
use crate::key::Key;
use crate::node::{Node, Rule};

/// `{ $isType: "Object", $props: { ... } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    schema: Schema,
    shape: Vec<(String, AnySchema)>,
}

impl_descriptor!(ObjectSchema => Object);

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectSchema {
    /// No declared fields.
    pub fn new() -> Self {
        Self::from_shape(Vec::<(String, AnySchema)>::new())
    }

    /// Declare fields in iteration order. A repeated name replaces the
    /// earlier field in its position.
    pub fn from_shape<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, AnySchema)>,
        K: Into<String>,
    {
        let mut shape: Vec<(String, AnySchema)> = Vec::new();
        for (name, schema) in fields {
            put(&mut shape, name.into(), schema);
        }
        let tree = Node::new()
            .with(Rule::IsType("Object".into()))
            .with(props_of(&shape));
        Self {
            schema: Schema::new(tree),
            shape,
        }
    }

    pub(crate) fn from_parts(schema: Schema, shape: Vec<(String, AnySchema)>) -> Self {
        Self { schema, shape }
    }

    /// Declare or replace one field, keeping the rest of the tree.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<AnySchema>) -> Self {
        put(&mut self.shape, name.into(), schema.into());
        let props = props_of(&self.shape);
        self.update(props)
    }

    /// The declared fields, in declaration order.
    pub fn shape(&self) -> &[(String, AnySchema)] {
        &self.shape
    }

    pub fn get(&self, name: &str) -> Option<&AnySchema> {
        self.shape.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// A new object schema with this shape plus `fields`. Only the shape
    /// carries over; `$strict` and other object-level rules do not.
    pub fn extend<I, K>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, AnySchema)>,
        K: Into<String>,
    {
        let extra = fields.into_iter().map(|(k, s)| (k.into(), s));
        Self::from_shape(self.shape.iter().cloned().chain(extra))
    }

    /// Union of two object schemas. Rules of `other` override same-key rules
    /// of `self`; the two `$props` are combined field by field, with
    /// `other`'s fields winning.
    pub fn merge(&self, other: &ObjectSchema) -> Self {
        let mut shape = self.shape.clone();
        for (name, schema) in &other.shape {
            put(&mut shape, name.clone(), schema.clone());
        }

        let mut fields = tree_props(self.tree());
        for (name, tree) in tree_props(other.tree()) {
            match fields.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = tree,
                None => fields.push((name, tree)),
            }
        }

        let mut tree = self.tree().clone();
        tree.merge(other.tree());
        tree.set(Rule::Props(fields));
        Self::from_parts(Schema::new(tree), shape)
    }

    /// A new object schema with only the named fields, in the order given.
    /// Names that are not declared are skipped.
    pub fn pick(&self, names: &[&str]) -> Self {
        Self::from_shape(
            names
                .iter()
                .filter_map(|name| self.get(name).map(|s| (*name, s.clone()))),
        )
    }

    /// A new object schema with every field optional.
    pub fn partial(&self) -> Self {
        Self::from_shape(self.shape.iter().map(|(n, s)| (n.as_str(), s.optional())))
    }

    /// Reject undeclared fields.
    pub fn strict(self) -> Self {
        self.update(Rule::Strict(true))
    }

    /// Ignore undeclared fields. This is the default.
    pub fn passthrough(self) -> Self {
        self.update(Rule::Strict(false))
    }
}

fn put(shape: &mut Vec<(String, AnySchema)>, name: String, schema: AnySchema) {
    match shape.iter_mut().find(|(n, _)| *n == name) {
        Some(slot) => slot.1 = schema,
        None => shape.push((name, schema)),
    }
}

fn props_of(shape: &[(String, AnySchema)]) -> Rule {
    Rule::Props(
        shape
            .iter()
            .map(|(name, schema)| (name.clone(), schema.shared_tree()))
            .collect(),
    )
}

fn tree_props(node: &Node) -> Vec<(String, Arc<Node>)> {
    match node.get(Key::Props) {
        Some(Rule::Props(fields)) => fields.clone(),
        _ => Vec::new(),
    }
}
