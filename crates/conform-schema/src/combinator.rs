//! # Combinator Algebra
//!
//! `or`, `and` and `not` build new kind-erased schemas whose trees hold
//! their operands' trees by reference. Operands are never modified.
//!
//! Evaluation is short-circuit and ordered: `$or` stops at the first
//! accepting branch and `$and` at the first rejecting one. Both are
//! commutative in acceptance, though not in the errors they record.

use crate::descriptor::{Descriptor, Schema};
use crate::node::{Node, Rule};

/// `{ $or: [a, b] }`.
pub fn or<A: Descriptor, B: Descriptor>(a: &A, b: &B) -> Schema {
    Schema::new(Node::new().with(Rule::Or(vec![a.shared_tree(), b.shared_tree()])))
}

/// `{ $and: [a, b] }`.
pub fn and<A: Descriptor, B: Descriptor>(a: &A, b: &B) -> Schema {
    Schema::new(Node::new().with(Rule::And(vec![a.shared_tree(), b.shared_tree()])))
}

/// `{ $not: s }`.
pub fn not<S: Descriptor>(s: &S) -> Schema {
    Schema::new(Node::new().with(Rule::Not(s.shared_tree())))
}

/// `{ $or: [...] }` over any number of branches. No branches rejects everything.
pub fn union<I, S>(branches: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Descriptor,
{
    let nodes = branches.into_iter().map(|s| s.shared_tree()).collect();
    Schema::new(Node::new().with(Rule::Or(nodes)))
}

/// `{ $and: [...] }` over any number of parts. No parts accepts everything.
pub fn intersection<I, S>(parts: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Descriptor,
{
    let nodes = parts.into_iter().map(|s| s.shared_tree()).collect();
    Schema::new(Node::new().with(Rule::And(nodes)))
}
