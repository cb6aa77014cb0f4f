//! # Validation Interpreter
//!
//! Walks a [`Node`] and a [`Value`] together, recording one message per
//! failing leaf rule.
//!
//! ## Evaluation Contract
//!
//! 1. `$optional: true` with an undefined value succeeds at once, skipping
//!    every other rule on the node.
//! 2. Rules are visited in insertion order. The first `$and`, `$or` or
//!    `$not` ends the node with the combinator's result; rules after it on
//!    the same node are never evaluated.
//! 3. The first failing rule records its message and fails the node.
//! 4. Messages from failed branches stay in the error list even when the
//!    enclosing combinator succeeds, so a successful result can carry
//!    errors.
//!
//! Recursion is bounded by [`EngineConfig::max_depth`]; exceeding it fails
//! with a single depth message instead of overflowing the stack.

use std::cmp::Ordering;

use conform_core::format;
use conform_core::{check_type, deep_equal, loose_compare, same_value_zero, strict_equal, Value};

use crate::config::EngineConfig;
use crate::error::ParseError;
use crate::node::{Node, Rule, TextMatcher};

static UNDEFINED: Value = Value::Undefined;

/// Outcome of `safe_parse`.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeParse {
    pub success: bool,
    /// The validated value, present only on success.
    pub data: Option<Value>,
    /// Messages recorded during validation, in order.
    pub errors: Vec<String>,
}

impl SafeParse {
    /// Convert into the `parse` result: the value, or every message joined.
    pub fn into_result(self) -> Result<Value, ParseError> {
        match (self.success, self.data) {
            (true, Some(value)) => Ok(value),
            _ => Err(ParseError {
                errors: self.errors,
            }),
        }
    }
}

/// Validate `value` against `node`.
pub fn safe_parse(node: &Node, value: &Value, config: &EngineConfig) -> SafeParse {
    let mut interpreter = Interpreter::new(config);
    let success = interpreter.visit(value, node, 0);
    tracing::trace!(success, errors = interpreter.errors.len(), "safe_parse complete");
    SafeParse {
        success,
        data: success.then(|| value.clone()),
        errors: interpreter.errors,
    }
}

struct Interpreter {
    max_depth: usize,
    errors: Vec<String>,
    depth_reported: bool,
}

impl Interpreter {
    fn new(config: &EngineConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            errors: Vec::new(),
            depth_reported: false,
        }
    }

    fn fail(&mut self, message: String) -> bool {
        self.errors.push(message);
        false
    }

    fn visit(&mut self, value: &Value, node: &Node, depth: usize) -> bool {
        if depth > self.max_depth {
            if !self.depth_reported {
                self.depth_reported = true;
                tracing::warn!(max_depth = self.max_depth, "validation depth limit reached");
                self.errors
                    .push(format!("Maximum validation depth {} exceeded", self.max_depth));
            }
            return false;
        }
        if node.is_optional() && value.is_undefined() {
            return true;
        }

        let next = depth + 1;
        for rule in node.rules() {
            match rule {
                Rule::And(nodes) => return nodes.iter().all(|n| self.visit(value, n, next)),
                Rule::Or(nodes) => return nodes.iter().any(|n| self.visit(value, n, next)),
                Rule::Not(inner) => {
                    if self.visit(value, inner, next) {
                        return self.fail(
                            "Expected value not to match the negated schema".to_string(),
                        );
                    }
                    return true;
                }
                Rule::Props(fields) => {
                    let Value::Object(object) = value else {
                        return self.fail("Expected object".to_string());
                    };
                    for (name, child) in fields {
                        let field = object.get(name).unwrap_or(&UNDEFINED);
                        if !self.visit(field, child, next) {
                            return false;
                        }
                    }
                    if node.is_strict() {
                        if let Some(extra) =
                            object.keys().find(|k| !fields.iter().any(|(name, _)| name == k))
                        {
                            return self.fail(format!("Unexpected property {extra}"));
                        }
                    }
                }
                Rule::Every(child) => {
                    let Value::Array(items) = value else {
                        return self.fail("Expected array".to_string());
                    };
                    if !items.iter().all(|item| self.visit(item, child, next)) {
                        return false;
                    }
                }
                Rule::SetOf(child) => {
                    let Value::Set(members) = value else {
                        return self.fail("Expected set".to_string());
                    };
                    if !members.iter().all(|member| self.visit(member, child, next)) {
                        return false;
                    }
                }
                Rule::Entries(key_node, value_node) => {
                    let Value::Map(entries) = value else {
                        return self.fail("Expected map".to_string());
                    };
                    for (k, v) in entries {
                        if !self.visit(k, key_node, next) || !self.visit(v, value_node, next) {
                            return false;
                        }
                    }
                }
                Rule::Optional(_)
                | Rule::Strict(_)
                | Rule::Description(_)
                | Rule::Returns(_)
                | Rule::Any(_) => {}
                leaf => {
                    if let Err(message) = check_leaf(leaf, value) {
                        return self.fail(message);
                    }
                }
            }
        }
        true
    }
}

fn compare(value: &Value, bound: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    loose_compare(value, bound).is_some_and(accept)
}

fn string_of(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| "Expected string".to_string())
}

macro_rules! ensure {
    ($holds:expr, $($message:tt)+) => {
        if $holds {
            Ok(())
        } else {
            Err(format!($($message)+))
        }
    };
}

/// A format flag: the value must be a string satisfying `predicate`.
fn format_flag(value: &Value, predicate: fn(&str) -> bool, message: &str) -> Result<(), String> {
    ensure!(value.as_str().is_some_and(predicate), "{message}")
}

fn join_enum(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| match v {
            Value::Undefined | Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn length_between(value: &Value, min: usize, max: usize, closed: bool) -> bool {
    value
        .length_or_size()
        .is_some_and(|len| len >= min && if closed { len <= max } else { len < max })
}

/// Check a single leaf rule. Structural rules never reach here.
fn check_leaf(rule: &Rule, value: &Value) -> Result<(), String> {
    match rule {
        Rule::Enum(allowed) => ensure!(
            allowed.iter().any(|a| same_value_zero(value, a)),
            "Expected one of {}", join_enum(allowed),
        ),
        Rule::IsType(name) => {
            ensure!(check_type(value, name), "Expected type {name}")
        }
        Rule::Same(expected) => {
            ensure!(deep_equal(value, expected), "Expected {}", expected.repr())
        }
        Rule::Lt(b) => ensure!(compare(value, b, Ordering::is_lt), "Expected < {b}"),
        Rule::Gt(b) => ensure!(compare(value, b, Ordering::is_gt), "Expected > {b}"),
        Rule::Leq(b) => ensure!(compare(value, b, Ordering::is_le), "Expected <= {b}"),
        Rule::Geq(b) => ensure!(compare(value, b, Ordering::is_ge), "Expected >= {b}"),
        Rule::Neq(b) => ensure!(!strict_equal(value, b), "Expected != {b}"),
        Rule::Range(lo, hi) => ensure!(
            compare(value, lo, Ordering::is_ge) && compare(value, hi, Ordering::is_lt),
            "Expected in range [{lo}, {hi})",
        ),
        Rule::ClosedRange(lo, hi) => ensure!(
            compare(value, lo, Ordering::is_ge) && compare(value, hi, Ordering::is_le),
            "Expected in range [{lo}, {hi}]",
        ),
        Rule::HasLength(n) => ensure!(
            value.length_or_size() == Some(*n),
            "Expected length {n}",
        ),
        Rule::HasLengthLessThan(n) => ensure!(
            value.length_or_size().is_some_and(|len| len < *n),
            "Expected length < {n}",
        ),
        Rule::HasLengthGreaterThan(n) => ensure!(
            value.length_or_size().is_some_and(|len| len > *n),
            "Expected length > {n}",
        ),
        Rule::HasLengthInRange(m, n) => ensure!(
            length_between(value, *m, *n, false),
            "Expected length in range [{m}, {n})",
        ),
        Rule::HasLengthInClosedRange(m, n) => ensure!(
            length_between(value, *m, *n, true),
            "Expected length in range [{m}, {n}]",
        ),
        Rule::Match(pattern) => ensure!(
            value.as_str().is_some_and(|s| pattern.is_match(s)),
            "Expected value to match {pattern}",
        ),
        Rule::Email(options) => {
            let text = string_of(value)?;
            ensure!(format::is_email(text), "Expected valid email")?;
            let domain = format::email_domain(text);
            match &options.domain {
                Some(TextMatcher::Pattern(p)) => ensure!(
                    p.is_match(domain),
                    "Expected email domain to match {p}",
                ),
                Some(TextMatcher::Exact(d)) if !d.is_empty() => {
                    ensure!(domain == d.as_str(), "Expected email domain {d}")
                }
                _ => Ok(()),
            }
        }
        Rule::Url(options) => {
            let text = string_of(value)?;
            let parsed = format::parse_url(text).ok_or_else(|| "Expected valid url".to_string())?;
            if let Some(host) = options.hostname.as_deref().filter(|h| !h.is_empty()) {
                ensure!(
                    parsed.host_str().unwrap_or("") == host,
                    "Expected hostname {host}",
                )?;
            }
            if let Some(protocol) = options.protocol.as_deref().filter(|p| !p.is_empty()) {
                ensure!(
                    parsed.scheme() == protocol.replacen(':', "", 1),
                    "Expected protocol {protocol}",
                )?;
            }
            Ok(())
        }
        Rule::Uuid(options) => {
            let text = string_of(value)?;
            ensure!(
                format::is_uuid(text, options.version.map(|v| v.digit())),
                "Expected valid uuid"
            )
        }
        Rule::Emoji => format_flag(value, format::is_emoji, "Expected emoji"),
        Rule::Base64 => format_flag(value, format::is_base64, "Expected base64 string"),
        Rule::Base64Url => format_flag(value, format::is_base64url, "Expected base64url string"),
        Rule::Nanoid => format_flag(value, format::is_nanoid, "Expected nanoid"),
        Rule::Cuid => format_flag(value, format::is_cuid, "Expected cuid"),
        Rule::Cuid2 => format_flag(value, format::is_cuid2, "Expected cuid2"),
        Rule::Ulid => format_flag(value, format::is_ulid, "Expected ulid"),
        Rule::Ipv4 => format_flag(value, format::is_ipv4, "Expected ipv4"),
        Rule::Ipv6 => format_flag(value, format::is_ipv6, "Expected ipv6"),
        Rule::Cidrv4 => {
            let text = string_of(value)?;
            ensure!(format::is_cidrv4(text), "Expected cidr ipv4")
        }
        Rule::Cidrv6 => {
            let text = string_of(value)?;
            ensure!(format::is_cidrv6(text), "Expected cidr ipv6")
        }
        Rule::IsoDate => format_flag(value, format::is_iso_date, "Expected ISO date"),
        Rule::IsoTime => format_flag(value, format::is_iso_time, "Expected ISO time"),
        Rule::IsoDateTime => format_flag(value, format::is_iso_datetime, "Expected ISO datetime"),
        Rule::IsoDuration => format_flag(value, format::is_iso_duration, "Expected ISO duration"),
        Rule::Trim => format_flag(value, format::is_trimmed, "Expected trimmed string"),
        Rule::ToLowerCase => format_flag(value, format::is_lower_case, "Expected lower case string"),
        Rule::ToUpperCase => format_flag(value, format::is_upper_case, "Expected upper case string"),
        Rule::HasDescription(matcher) => {
            let symbol = symbol_of(value)?;
            match matcher {
                TextMatcher::Exact(d) => ensure!(
                    symbol.description() == Some(d.as_str()),
                    "Expected symbol description {d}",
                ),
                TextMatcher::Pattern(p) => ensure!(
                    symbol.description().is_some_and(|d| p.is_match(d)),
                    "Expected symbol description to match {p}",
                ),
            }
        }
        Rule::Global(flag) => {
            let symbol = symbol_of(value)?;
            let message = if *flag {
                "Expected global symbol"
            } else {
                "Expected non-global symbol"
            };
            ensure!(symbol.is_global() == *flag, "{message}")
        }
        Rule::GlobalKey(key) => {
            let symbol = symbol_of(value)?;
            ensure!(
                symbol.registry_key() == Some(key.as_str()),
                "Expected global symbol key {key}",
            )
        }
        Rule::WellKnown(flag) => {
            let symbol = symbol_of(value)?;
            let message = if *flag {
                "Expected well-known symbol"
            } else {
                "Expected symbol not to be well-known"
            };
            ensure!(symbol.is_well_known() == *flag, "{message}")
        }
        Rule::Optional(_)
        | Rule::Strict(_)
        | Rule::Description(_)
        | Rule::And(_)
        | Rule::Or(_)
        | Rule::Not(_)
        | Rule::Props(_)
        | Rule::Every(_)
        | Rule::SetOf(_)
        | Rule::Entries(..)
        | Rule::Returns(_)
        | Rule::Any(_) => Ok(()),
    }
}

fn symbol_of(value: &Value) -> Result<&conform_core::Symbol, String> {
    match value {
        Value::Symbol(s) => Ok(s),
        _ => Err("Expected symbol".to_string()),
    }
}
