//! # Schema Node Model
//!
//! A [`Node`] is an ordered list of [`Rule`]s, at most one per [`Key`].
//! Order is significant: the interpreter visits rules in insertion order and
//! the first combinator ends the node (see [`crate::interpret`]).
//!
//! Child nodes are held behind `Arc`, so combinators and containers share
//! their operand trees instead of copying them. Nodes are immutable once
//! shared; builders go through `Arc::make_mut`, which copies a node only
//! when another tree still references it.

use std::sync::Arc;

use conform_core::{Pattern, Value};

use crate::key::Key;

/// Exact text or a regex, for `$email.domain` and `$hasDescription`.
#[derive(Debug, Clone, PartialEq)]
pub enum TextMatcher {
    Exact(String),
    Pattern(Pattern),
}

impl From<&str> for TextMatcher {
    fn from(s: &str) -> Self {
        Self::Exact(s.to_string())
    }
}

impl From<String> for TextMatcher {
    fn from(s: String) -> Self {
        Self::Exact(s)
    }
}

impl From<Pattern> for TextMatcher {
    fn from(p: Pattern) -> Self {
        Self::Pattern(p)
    }
}

/// Options of `$email`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailOptions {
    pub domain: Option<TextMatcher>,
}

/// Options of `$url`. Protocols compare without their trailing colon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOptions {
    pub hostname: Option<String>,
    pub protocol: Option<String>,
}

/// UUID version, spelled `v1` to `v5` in trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UuidVersion {
    V1,
    V2,
    V3,
    V4,
    V5,
}

impl UuidVersion {
    pub const ALL: [UuidVersion; 5] = [Self::V1, Self::V2, Self::V3, Self::V4, Self::V5];

    /// The version digit in position 13 of the UUID.
    pub fn digit(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
            Self::V4 => 4,
            Self::V5 => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V3 => "v3",
            Self::V4 => "v4",
            Self::V5 => "v5",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// Options of `$uuid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidOptions {
    pub version: Option<UuidVersion>,
}

/// One constraint: a [`Key`] with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Optional(bool),
    Strict(bool),
    Description(String),
    IsType(String),
    Same(Value),
    Enum(Vec<Value>),
    Lt(Value),
    Gt(Value),
    Leq(Value),
    Geq(Value),
    Neq(Value),
    /// Half-open `[min, max)`.
    Range(Value, Value),
    /// Inclusive `[min, max]`.
    ClosedRange(Value, Value),
    HasLength(usize),
    HasLengthLessThan(usize),
    HasLengthGreaterThan(usize),
    HasLengthInRange(usize, usize),
    HasLengthInClosedRange(usize, usize),
    Match(Pattern),
    Email(EmailOptions),
    Url(UrlOptions),
    Uuid(UuidOptions),
    Emoji,
    Base64,
    Base64Url,
    Nanoid,
    Cuid,
    Cuid2,
    Ulid,
    Ipv4,
    Ipv6,
    Cidrv4,
    Cidrv6,
    IsoDate,
    IsoTime,
    IsoDateTime,
    IsoDuration,
    Trim,
    ToLowerCase,
    ToUpperCase,
    HasDescription(TextMatcher),
    Global(bool),
    GlobalKey(String),
    WellKnown(bool),
    And(Vec<Arc<Node>>),
    Or(Vec<Arc<Node>>),
    Not(Arc<Node>),
    /// Declared fields in declaration order.
    Props(Vec<(String, Arc<Node>)>),
    Every(Arc<Node>),
    SetOf(Arc<Node>),
    /// Key node, value node.
    Entries(Arc<Node>, Arc<Node>),
    Returns(Arc<Node>),
    Any(Arc<Node>),
}

impl Rule {
    pub fn key(&self) -> Key {
        match self {
            Self::Optional(_) => Key::Optional,
            Self::Strict(_) => Key::Strict,
            Self::Description(_) => Key::Description,
            Self::IsType(_) => Key::IsType,
            Self::Same(_) => Key::Same,
            Self::Enum(_) => Key::Enum,
            Self::Lt(_) => Key::Lt,
            Self::Gt(_) => Key::Gt,
            Self::Leq(_) => Key::Leq,
            Self::Geq(_) => Key::Geq,
            Self::Neq(_) => Key::Neq,
            Self::Range(..) => Key::Range,
            Self::ClosedRange(..) => Key::ClosedRange,
            Self::HasLength(_) => Key::HasLength,
            Self::HasLengthLessThan(_) => Key::HasLengthLessThan,
            Self::HasLengthGreaterThan(_) => Key::HasLengthGreaterThan,
            Self::HasLengthInRange(..) => Key::HasLengthInRange,
            Self::HasLengthInClosedRange(..) => Key::HasLengthInClosedRange,
            Self::Match(_) => Key::Match,
            Self::Email(_) => Key::Email,
            Self::Url(_) => Key::Url,
            Self::Uuid(_) => Key::Uuid,
            Self::Emoji => Key::Emoji,
            Self::Base64 => Key::Base64,
            Self::Base64Url => Key::Base64Url,
            Self::Nanoid => Key::Nanoid,
            Self::Cuid => Key::Cuid,
            Self::Cuid2 => Key::Cuid2,
            Self::Ulid => Key::Ulid,
            Self::Ipv4 => Key::Ipv4,
            Self::Ipv6 => Key::Ipv6,
            Self::Cidrv4 => Key::Cidrv4,
            Self::Cidrv6 => Key::Cidrv6,
            Self::IsoDate => Key::IsoDate,
            Self::IsoTime => Key::IsoTime,
            Self::IsoDateTime => Key::IsoDateTime,
            Self::IsoDuration => Key::IsoDuration,
            Self::Trim => Key::Trim,
            Self::ToLowerCase => Key::ToLowerCase,
            Self::ToUpperCase => Key::ToUpperCase,
            Self::HasDescription(_) => Key::HasDescription,
            Self::Global(_) => Key::Global,
            Self::GlobalKey(_) => Key::GlobalKey,
            Self::WellKnown(_) => Key::WellKnown,
            Self::And(_) => Key::And,
            Self::Or(_) => Key::Or,
            Self::Not(_) => Key::Not,
            Self::Props(_) => Key::Props,
            Self::Every(_) => Key::Every,
            Self::SetOf(_) => Key::SetOf,
            Self::Entries(..) => Key::Entries,
            Self::Returns(_) => Key::Returns,
            Self::Any(_) => Key::Any,
        }
    }
}

/// A schema node: ordered rules, unique by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    rules: Vec<Rule>,
}

impl Node {
    /// The empty node, which accepts every value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Node::set`].
    pub fn with(mut self, rule: Rule) -> Self {
        self.set(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, key: Key) -> Option<&Rule> {
        self.rules.iter().find(|r| r.key() == key)
    }

    pub fn contains(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Replace the rule with the same key where it stands, or append.
    pub fn set(&mut self, rule: Rule) {
        let key = rule.key();
        match self.rules.iter_mut().find(|r| r.key() == key) {
            Some(slot) => *slot = rule,
            None => self.rules.push(rule),
        }
    }

    /// [`Node::set`] every rule of `other`, in its order.
    pub fn merge(&mut self, other: &Node) {
        for rule in &other.rules {
            self.set(rule.clone());
        }
    }

    pub fn remove(&mut self, key: Key) -> Option<Rule> {
        let index = self.rules.iter().position(|r| r.key() == key)?;
        Some(self.rules.remove(index))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.get(Key::Optional), Some(Rule::Optional(true)))
    }

    pub fn is_strict(&self) -> bool {
        matches!(self.get(Key::Strict), Some(Rule::Strict(true)))
    }

    /// The `$isType` name, if any.
    pub fn type_name(&self) -> Option<&str> {
        match self.get(Key::IsType) {
            Some(Rule::IsType(name)) => Some(name),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for Node {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut node = Node::new();
        for rule in iter {
            node.set(rule);
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(node: &Node) -> Vec<Key> {
        node.rules().iter().map(Rule::key).collect()
    }

    #[test]
    fn set_replaces_in_place() {
        let mut node = Node::new()
            .with(Rule::IsType("Number".into()))
            .with(Rule::Gt(Value::from(0)));
        node.set(Rule::IsType("Integer".into()));
        assert_eq!(keys(&node), vec![Key::IsType, Key::Gt]);
        assert_eq!(node.type_name(), Some("Integer"));
    }

    #[test]
    fn set_appends_new_keys() {
        let node: Node = [Rule::Optional(true), Rule::Trim].into_iter().collect();
        assert_eq!(keys(&node), vec![Key::Optional, Key::Trim]);
        assert!(node.is_optional());
    }

    #[test]
    fn merge_overrides_and_extends() {
        let mut a = Node::new().with(Rule::Strict(false)).with(Rule::HasLength(2));
        let b = Node::new().with(Rule::HasLength(3)).with(Rule::Strict(true));
        a.merge(&b);
        assert_eq!(keys(&a), vec![Key::Strict, Key::HasLength]);
        assert!(a.is_strict());
        assert_eq!(a.get(Key::HasLength), Some(&Rule::HasLength(3)));
    }

    #[test]
    fn remove_drops_rule() {
        let mut node = Node::new().with(Rule::Optional(true));
        assert_eq!(node.remove(Key::Optional), Some(Rule::Optional(true)));
        assert!(node.is_empty());
        assert_eq!(node.remove(Key::Optional), None);
    }

    #[test]
    fn optional_false_is_not_optional() {
        assert!(!Node::new().with(Rule::Optional(false)).is_optional());
    }

    #[test]
    fn uuid_versions_round_trip() {
        for v in UuidVersion::ALL {
            assert_eq!(UuidVersion::parse(v.as_str()), Some(v));
        }
        assert_eq!(UuidVersion::V4.digit(), 4);
        assert_eq!(UuidVersion::parse("v7"), None);
    }

    #[test]
    fn shared_children_copy_on_write() {
        let child = Arc::new(Node::new().with(Rule::IsType("String".into())));
        let parent = Node::new().with(Rule::Every(Arc::clone(&child)));
        let mut edited = Arc::clone(&child);
        Arc::make_mut(&mut edited).set(Rule::Trim);
        assert_eq!(child.len(), 1);
        assert_eq!(edited.len(), 2);
        assert_eq!(parent.get(Key::Every), Some(&Rule::Every(child)));
    }
}
