//! # Decoded Trees
//!
//! The interchange form of a schema is a plain nested [`Value::Object`]
//! whose keys are drawn from the closed vocabulary in [`crate::key`]. This
//! module converts between that form and [`Node`]:
//!
//! - [`decode_tree`] checks the vocabulary, the structural shape of every
//!   combinator and container key, each leaf payload, and the nesting depth.
//! - [`encode_tree`] is its inverse. Decoding an encoded tree yields the
//!   same node.
//! - [`build_from_tree`] decodes and then rehydrates a typed descriptor.
//!
//! Trees arriving as JSON cannot carry non-finite numbers, so the ordering
//! bounds (`$lt`, `$gt`, `$leq`, `$geq`, `$range`, `$closedRange`) accept
//! the strings `"Infinity"`, `"-Infinity"` and `"NaN"` in their place, as
//! written by `serialized_schema`.

use std::sync::Arc;

use conform_core::{Object, Pattern, TypedArrayKind, Value};

use crate::builder::{
    AnySchema, ArrayBufferSchema, ArraySchema, AsyncFunctionSchema, BigIntSchema, BooleanSchema,
    EnumSchema, FunctionSchema, MapSchema, NullSchema, NumberSchema, ObjectSchema, PromiseSchema,
    SetSchema, StringSchema, SymbolSchema, TypedArraySchema, UndefinedSchema,
};
use crate::config::EngineConfig;
use crate::descriptor::{Descriptor, Schema};
use crate::error::ShapeError;
use crate::key::{Key, KeyShape};
use crate::node::{EmailOptions, Node, Rule, TextMatcher, UrlOptions, UuidOptions, UuidVersion};

/// Check a decoded tree without keeping the result.
///
/// # Errors
///
/// Returns the first `ShapeError` found, in key order.
pub fn validate_tree(tree: &Value) -> Result<(), ShapeError> {
    validate_tree_with(tree, &EngineConfig::default())
}

pub fn validate_tree_with(tree: &Value, config: &EngineConfig) -> Result<(), ShapeError> {
    decode_tree_with(tree, config).map(drop)
}

/// Decode a tree into a [`Node`].
///
/// # Errors
///
/// Returns `ShapeError` on an unknown key, a malformed structural value, an
/// invalid leaf payload, or nesting deeper than the default limit.
pub fn decode_tree(tree: &Value) -> Result<Node, ShapeError> {
    decode_tree_with(tree, &EngineConfig::default())
}

pub fn decode_tree_with(tree: &Value, config: &EngineConfig) -> Result<Node, ShapeError> {
    let decoder = Decoder {
        max_depth: config.max_depth,
    };
    decoder.node(tree, 0).map_err(|e| {
        tracing::debug!(error = %e, "rejected schema tree");
        e
    })
}

/// Rebuild a typed descriptor from a decoded tree.
///
/// The descriptor kind follows the root's `$isType`: the number family
/// (`Number`, `Float`, `Integer`, `NumberLike`, `NaN`) gives a
/// [`NumberSchema`], typed-array names a [`TypedArraySchema`], and so on.
/// A root carrying `$enum` and no `$isType` gives an [`EnumSchema`];
/// anything else a generic [`Schema`]. The result's tree is the decoded
/// input unchanged, and a string `$description` at the root becomes the
/// descriptor's description.
///
/// # Errors
///
/// Returns `ShapeError` when the tree fails [`decode_tree`].
pub fn build_from_tree(tree: &Value) -> Result<AnySchema, ShapeError> {
    build_from_tree_with(tree, &EngineConfig::default())
}

pub fn build_from_tree_with(tree: &Value, config: &EngineConfig) -> Result<AnySchema, ShapeError> {
    let node = Arc::new(decode_tree_with(tree, config)?);
    let schema = rebuild(&node);
    tracing::debug!(kind = schema.kind(), rules = node.len(), "rehydrated schema tree");
    Ok(schema)
}

/// Encode a node as a decoded tree.
///
/// The output is normalised rather than verbatim: flag keys always encode
/// as `true`, option keys with default options encode as `true`, and
/// sentinel strings in ordering bounds come back as numbers. Decoding the
/// output yields the same node.
pub fn encode_tree(node: &Node) -> Value {
    Value::Object(node.rules().iter().map(|rule| (rule.key().as_str(), encode_rule(rule))).collect())
}

struct Decoder {
    max_depth: usize,
}

impl Decoder {
    fn node(&self, tree: &Value, depth: usize) -> Result<Node, ShapeError> {
        if depth > self.max_depth {
            return Err(ShapeError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        let Value::Object(fields) = tree else {
            return Err(ShapeError::NotANode);
        };

        let next = depth + 1;
        let mut node = Node::new();
        for (name, payload) in fields.iter() {
            let key: Key = name.parse()?;
            let rule = match key.shape() {
                KeyShape::Leaf => decode_leaf(key, payload)?,
                KeyShape::Node => {
                    let child = Arc::new(self.node(payload, next)?);
                    match key {
                        Key::Not => Rule::Not(child),
                        Key::Every => Rule::Every(child),
                        Key::SetOf => Rule::SetOf(child),
                        Key::Returns => Rule::Returns(child),
                        _ => Rule::Any(child),
                    }
                }
                KeyShape::NodeList => {
                    let Value::Array(items) = payload else {
                        return Err(ShapeError::ExpectedSequence {
                            key: name.to_string(),
                        });
                    };
                    let nodes = items
                        .iter()
                        .map(|item| self.node(item, next).map(Arc::new))
                        .collect::<Result<Vec<_>, _>>()?;
                    if key == Key::And {
                        Rule::And(nodes)
                    } else {
                        Rule::Or(nodes)
                    }
                }
                KeyShape::NodeMap => {
                    let Value::Object(props) = payload else {
                        return Err(ShapeError::ExpectedMapping {
                            key: name.to_string(),
                        });
                    };
                    let children = props
                        .iter()
                        .map(|(field, child)| {
                            self.node(child, next).map(|n| (field.to_string(), Arc::new(n)))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Rule::Props(children)
                }
                KeyShape::NodePair => match payload {
                    Value::Array(pair) if pair.len() == 2 => Rule::Entries(
                        Arc::new(self.node(&pair[0], next)?),
                        Arc::new(self.node(&pair[1], next)?),
                    ),
                    _ => return Err(ShapeError::EntriesNotTuple),
                },
            };
            node.set(rule);
        }
        Ok(node)
    }
}

fn invalid(key: Key, reason: impl Into<String>) -> ShapeError {
    ShapeError::InvalidPayload {
        key: key.as_str().to_string(),
        reason: reason.into(),
    }
}

fn flag(key: Key, payload: &Value) -> Result<bool, ShapeError> {
    match payload {
        Value::Bool(b) => Ok(*b),
        _ => Err(invalid(key, "expected boolean")),
    }
}

fn text(key: Key, payload: &Value) -> Result<String, ShapeError> {
    match payload {
        Value::String(s) => Ok(s.clone()),
        _ => Err(invalid(key, "expected string")),
    }
}

fn count(key: Key, payload: &Value) -> Result<usize, ShapeError> {
    match payload {
        Value::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64 => {
            Ok(*n as usize)
        }
        _ => Err(invalid(key, "expected a non-negative integer")),
    }
}

fn pair(key: Key, payload: &Value) -> Result<(&Value, &Value), ShapeError> {
    match payload {
        Value::Array(items) if items.len() == 2 => Ok((&items[0], &items[1])),
        _ => Err(invalid(key, "expected [min, max]")),
    }
}

fn count_pair(key: Key, payload: &Value) -> Result<(usize, usize), ShapeError> {
    let (m, n) = pair(key, payload)?;
    Ok((count(key, m)?, count(key, n)?))
}

/// Ordering bounds: sentinel strings stand for non-finite numbers.
fn bound(payload: &Value) -> Value {
    match payload.as_str() {
        Some("Infinity") => Value::Number(f64::INFINITY),
        Some("-Infinity") => Value::Number(f64::NEG_INFINITY),
        Some("NaN") => Value::Number(f64::NAN),
        _ => payload.clone(),
    }
}

fn matcher(key: Key, payload: &Value) -> Result<TextMatcher, ShapeError> {
    match payload {
        Value::String(s) => Ok(TextMatcher::Exact(s.clone())),
        Value::RegExp(p) => Ok(TextMatcher::Pattern(p.clone())),
        _ => Err(invalid(key, "expected string or regular expression")),
    }
}

fn options(key: Key, payload: &Value) -> Result<Option<&Object>, ShapeError> {
    match payload {
        Value::Bool(_) => Ok(None),
        Value::Object(o) => Ok(Some(o)),
        _ => Err(invalid(key, "expected boolean or options object")),
    }
}

fn optional_text(key: Key, options: &Object, field: &str) -> Result<Option<String>, ShapeError> {
    match options.get(field) {
        None | Some(Value::Undefined) => Ok(None),
        Some(v) => text(key, v).map(Some),
    }
}

fn decode_leaf(key: Key, payload: &Value) -> Result<Rule, ShapeError> {
    let rule = match key {
        Key::Optional => Rule::Optional(flag(key, payload)?),
        Key::Strict => Rule::Strict(flag(key, payload)?),
        Key::Global => Rule::Global(flag(key, payload)?),
        Key::WellKnown => Rule::WellKnown(flag(key, payload)?),
        Key::Description => Rule::Description(text(key, payload)?),
        Key::IsType => Rule::IsType(text(key, payload)?),
        Key::GlobalKey => Rule::GlobalKey(text(key, payload)?),
        Key::Same => Rule::Same(payload.clone()),
        Key::Enum => match payload {
            Value::Array(values) => Rule::Enum(values.clone()),
            _ => return Err(invalid(key, "expected array")),
        },
        Key::Lt => Rule::Lt(bound(payload)),
        Key::Gt => Rule::Gt(bound(payload)),
        Key::Leq => Rule::Leq(bound(payload)),
        Key::Geq => Rule::Geq(bound(payload)),
        Key::Neq => Rule::Neq(payload.clone()),
        Key::Range => {
            let (lo, hi) = pair(key, payload)?;
            Rule::Range(bound(lo), bound(hi))
        }
        Key::ClosedRange => {
            let (lo, hi) = pair(key, payload)?;
            Rule::ClosedRange(bound(lo), bound(hi))
        }
        Key::HasLength => Rule::HasLength(count(key, payload)?),
        Key::HasLengthLessThan => Rule::HasLengthLessThan(count(key, payload)?),
        Key::HasLengthGreaterThan => Rule::HasLengthGreaterThan(count(key, payload)?),
        Key::HasLengthInRange => {
            let (m, n) = count_pair(key, payload)?;
            Rule::HasLengthInRange(m, n)
        }
        Key::HasLengthInClosedRange => {
            let (m, n) = count_pair(key, payload)?;
            Rule::HasLengthInClosedRange(m, n)
        }
        Key::Match => match payload {
            Value::RegExp(p) => Rule::Match(p.clone()),
            Value::String(s) => {
                Rule::Match(Pattern::new(s).map_err(|e| invalid(key, e.to_string()))?)
            }
            _ => return Err(invalid(key, "expected regular expression")),
        },
        Key::Email => {
            let domain = match options(key, payload)? {
                Some(o) => o.get("domain").map(|d| matcher(key, d)).transpose()?,
                None => None,
            };
            Rule::Email(EmailOptions { domain })
        }
        Key::Url => Rule::Url(match options(key, payload)? {
            Some(o) => UrlOptions {
                hostname: optional_text(key, o, "hostname")?,
                protocol: optional_text(key, o, "protocol")?,
            },
            None => UrlOptions::default(),
        }),
        Key::Uuid => {
            let version = match options(key, payload)? {
                Some(o) => match optional_text(key, o, "version")? {
                    Some(v) => Some(
                        UuidVersion::parse(&v)
                            .ok_or_else(|| invalid(key, format!("unknown version {v}")))?,
                    ),
                    None => None,
                },
                None => None,
            };
            Rule::Uuid(UuidOptions { version })
        }
        Key::HasDescription => Rule::HasDescription(matcher(key, payload)?),
        Key::Emoji
        | Key::Base64
        | Key::Base64Url
        | Key::Nanoid
        | Key::Cuid
        | Key::Cuid2
        | Key::Ulid
        | Key::Ipv4
        | Key::Ipv6
        | Key::Cidrv4
        | Key::Cidrv6
        | Key::IsoDate
        | Key::IsoTime
        | Key::IsoDateTime
        | Key::IsoDuration
        | Key::Trim
        | Key::ToLowerCase
        | Key::ToUpperCase => {
            flag(key, payload)?;
            format_rule(key)
        }
        Key::And
        | Key::Or
        | Key::Not
        | Key::Props
        | Key::Every
        | Key::SetOf
        | Key::Entries
        | Key::Returns
        | Key::Any => return Err(invalid(key, "structural key decoded as leaf")),
    };
    Ok(rule)
}

fn format_rule(key: Key) -> Rule {
    match key {
        Key::Emoji => Rule::Emoji,
        Key::Base64 => Rule::Base64,
        Key::Base64Url => Rule::Base64Url,
        Key::Nanoid => Rule::Nanoid,
        Key::Cuid => Rule::Cuid,
        Key::Cuid2 => Rule::Cuid2,
        Key::Ulid => Rule::Ulid,
        Key::Ipv4 => Rule::Ipv4,
        Key::Ipv6 => Rule::Ipv6,
        Key::Cidrv4 => Rule::Cidrv4,
        Key::Cidrv6 => Rule::Cidrv6,
        Key::IsoDate => Rule::IsoDate,
        Key::IsoTime => Rule::IsoTime,
        Key::IsoDateTime => Rule::IsoDateTime,
        Key::IsoDuration => Rule::IsoDuration,
        Key::Trim => Rule::Trim,
        Key::ToLowerCase => Rule::ToLowerCase,
        _ => Rule::ToUpperCase,
    }
}

fn encode_matcher(matcher: &TextMatcher) -> Value {
    match matcher {
        TextMatcher::Exact(s) => Value::from(s.as_str()),
        TextMatcher::Pattern(p) => Value::RegExp(p.clone()),
    }
}

fn encode_rule(rule: &Rule) -> Value {
    let count = |n: &usize| Value::Number(*n as f64);
    match rule {
        Rule::Optional(b) | Rule::Strict(b) | Rule::Global(b) | Rule::WellKnown(b) => Value::Bool(*b),
        Rule::Description(s) | Rule::IsType(s) | Rule::GlobalKey(s) => Value::from(s.as_str()),
        Rule::Same(v) | Rule::Lt(v) | Rule::Gt(v) | Rule::Leq(v) | Rule::Geq(v) | Rule::Neq(v) => {
            v.clone()
        }
        Rule::Enum(values) => Value::Array(values.clone()),
        Rule::Range(lo, hi) | Rule::ClosedRange(lo, hi) => Value::array([lo.clone(), hi.clone()]),
        Rule::HasLength(n) | Rule::HasLengthLessThan(n) | Rule::HasLengthGreaterThan(n) => count(n),
        Rule::HasLengthInRange(m, n) | Rule::HasLengthInClosedRange(m, n) => {
            Value::array([count(m), count(n)])
        }
        Rule::Match(p) => Value::RegExp(p.clone()),
        Rule::Email(EmailOptions { domain: None }) => Value::Bool(true),
        Rule::Email(EmailOptions { domain: Some(d) }) => {
            Value::object([("domain", encode_matcher(d))])
        }
        Rule::Url(options) if *options == UrlOptions::default() => Value::Bool(true),
        Rule::Url(options) => {
            let mut fields = Object::new();
            if let Some(hostname) = &options.hostname {
                fields.insert("hostname", Value::from(hostname.as_str()));
            }
            if let Some(protocol) = &options.protocol {
                fields.insert("protocol", Value::from(protocol.as_str()));
            }
            Value::Object(fields)
        }
        Rule::Uuid(UuidOptions { version: None }) => Value::Bool(true),
        Rule::Uuid(UuidOptions { version: Some(v) }) => {
            Value::object([("version", Value::from(v.as_str()))])
        }
        Rule::HasDescription(m) => encode_matcher(m),
        Rule::Emoji
        | Rule::Base64
        | Rule::Base64Url
        | Rule::Nanoid
        | Rule::Cuid
        | Rule::Cuid2
        | Rule::Ulid
        | Rule::Ipv4
        | Rule::Ipv6
        | Rule::Cidrv4
        | Rule::Cidrv6
        | Rule::IsoDate
        | Rule::IsoTime
        | Rule::IsoDateTime
        | Rule::IsoDuration
        | Rule::Trim
        | Rule::ToLowerCase
        | Rule::ToUpperCase => Value::Bool(true),
        Rule::And(nodes) | Rule::Or(nodes) => Value::Array(nodes.iter().map(|n| encode_tree(n)).collect()),
        Rule::Not(n) | Rule::Every(n) | Rule::SetOf(n) | Rule::Returns(n) | Rule::Any(n) => {
            encode_tree(n)
        }
        Rule::Props(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, child)| (name.as_str(), encode_tree(child)))
                .collect(),
        ),
        Rule::Entries(k, v) => Value::array([encode_tree(k), encode_tree(v)]),
    }
}

fn child(node: &Node, key: Key) -> AnySchema {
    let tree = match node.get(key) {
        Some(Rule::Every(n)) | Some(Rule::SetOf(n)) => Some(n),
        _ => None,
    };
    tree.map_or_else(AnySchema::default, rebuild)
}

fn rebuild(node: &Arc<Node>) -> AnySchema {
    let kind: AnySchema = match node.type_name() {
        Some("String") => StringSchema::new().into(),
        Some("Number" | "Float" | "Integer" | "NumberLike" | "NaN") => NumberSchema::new().into(),
        Some("Boolean") => BooleanSchema::new().into(),
        Some("BigInt") => BigIntSchema::new().into(),
        Some("Symbol") => SymbolSchema::new().into(),
        Some("Null") => NullSchema::new().into(),
        Some("Undefined") => UndefinedSchema::new().into(),
        Some("Array") => ArraySchema::new(&child(node, Key::Every)).into(),
        Some("Set") => SetSchema::new(&child(node, Key::SetOf)).into(),
        Some("Map") => match node.get(Key::Entries) {
            Some(Rule::Entries(k, v)) => MapSchema::new(&rebuild(k), &rebuild(v)).into(),
            _ => MapSchema::default().into(),
        },
        Some("Object") => {
            let shape = match node.get(Key::Props) {
                Some(Rule::Props(fields)) => fields
                    .iter()
                    .map(|(name, tree)| (name.clone(), rebuild(tree)))
                    .collect(),
                _ => Vec::new(),
            };
            ObjectSchema::from_parts(Schema::default(), shape).into()
        }
        Some("Function") => FunctionSchema::new().into(),
        Some("AsyncFunction") => AsyncFunctionSchema::new().into(),
        Some("Promise") => PromiseSchema::new().into(),
        Some("ArrayBuffer") => ArrayBufferSchema::new().into(),
        Some("TypedArray") => TypedArraySchema::new(None).into(),
        Some(name) => match TypedArrayKind::from_tag(name) {
            Some(kind) => TypedArraySchema::new(Some(kind)).into(),
            None => AnySchema::default(),
        },
        None if node.contains(Key::Enum) => EnumSchema::new(Vec::<Value>::new()).into(),
        None => AnySchema::default(),
    };

    let rebuilt = kind.with_shared_tree(Arc::clone(node));
    match node.get(Key::Description) {
        Some(Rule::Description(text)) => rebuilt.describe(text.as_str()),
        _ => rebuilt,
    }
}
