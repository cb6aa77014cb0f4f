//! Array, set and map schemas.
//!
//! Each container embeds its member descriptors' trees, shared, under
//! `$every`, `$setOf` or `$entries`. Later changes to a member descriptor do
//! not reach a container built from it.

use super::LengthConstraints;
use crate::descriptor::{impl_descriptor, Descriptor, Schema};
use crate::node::{Node, Rule};

/// `{ $isType: "Array", $every: member }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    schema: Schema,
}

/// `{ $isType: "Set", $setOf: member }`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetSchema {
    schema: Schema,
}

/// `{ $isType: "Map", $entries: [key, value] }`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSchema {
    schema: Schema,
}

impl_descriptor!(ArraySchema => Array, SetSchema => Set, MapSchema => Map);

impl LengthConstraints for ArraySchema {}
impl LengthConstraints for SetSchema {}
impl LengthConstraints for MapSchema {}

impl ArraySchema {
    pub fn new<D: Descriptor>(member: &D) -> Self {
        let tree = Node::new()
            .with(Rule::IsType("Array".into()))
            .with(Rule::Every(member.shared_tree()));
        Self {
            schema: Schema::new(tree),
        }
    }

    /// A fresh array schema over `member`. Modifiers on `self` are not kept.
    pub fn of<D: Descriptor>(&self, member: &D) -> Self {
        Self::new(member)
    }
}

impl SetSchema {
    pub fn new<D: Descriptor>(member: &D) -> Self {
        let tree = Node::new()
            .with(Rule::IsType("Set".into()))
            .with(Rule::SetOf(member.shared_tree()));
        Self {
            schema: Schema::new(tree),
        }
    }

    pub fn of<D: Descriptor>(&self, member: &D) -> Self {
        Self::new(member)
    }
}

impl MapSchema {
    pub fn new<K: Descriptor, V: Descriptor>(key: &K, value: &V) -> Self {
        let tree = Node::new()
            .with(Rule::IsType("Map".into()))
            .with(Rule::Entries(key.shared_tree(), value.shared_tree()));
        Self {
            schema: Schema::new(tree),
        }
    }

    pub fn of<K: Descriptor, V: Descriptor>(&self, key: &K, value: &V) -> Self {
        Self::new(key, value)
    }
}

impl Default for ArraySchema {
    fn default() -> Self {
        Self::new(&Schema::default())
    }
}

impl Default for SetSchema {
    fn default() -> Self {
        Self::new(&Schema::default())
    }
}

impl Default for MapSchema {
    fn default() -> Self {
        Self::new(&Schema::default(), &Schema::default())
    }
}
