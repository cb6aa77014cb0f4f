//! # Runtime Values
//!
//! The dynamically typed [`Value`] every schema is matched against. One
//! variant per runtime kind that `$isType` can name, including the kinds
//! plain JSON cannot carry (sets, maps, typed arrays, raw buffers, symbols,
//! callables, promises) and the `Undefined` sentinel that marks an absent
//! field.
//!
//! `PartialEq` on [`Value`] is plain Rust structural equality and exists for
//! tests and change detection. Host equality semantics live in
//! [`crate::predicate`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

fn next_identity() -> u64 {
    NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Render a number the way host string conversion does.
///
/// Non-finite values print as `NaN`, `Infinity` and `-Infinity`; integral
/// values print without a fraction; very large and very small magnitudes
/// switch to exponent notation with an explicit sign.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        if n.fract() == 0.0 {
            format!("{n:.0}")
        } else {
            format!("{n}")
        }
    } else {
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    }
}

/// Parse a string the way host numeric coercion does.
fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64);
        }
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Opaque host kinds
// ---------------------------------------------------------------------------

/// A symbol: a unique token with an optional description.
///
/// Plain symbols compare by identity. Registry symbols created with
/// [`Symbol::for_key`] compare by key, and well-known symbols by name.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    description: Option<String>,
    registry_key: Option<String>,
    well_known: bool,
}

impl Symbol {
    /// A fresh symbol, distinct from every other symbol.
    pub fn new(description: Option<&str>) -> Self {
        Self {
            id: next_identity(),
            description: description.map(str::to_string),
            registry_key: None,
            well_known: false,
        }
    }

    /// The global-registry symbol for `key`.
    pub fn for_key(key: &str) -> Self {
        Self {
            id: next_identity(),
            description: Some(key.to_string()),
            registry_key: Some(key.to_string()),
            well_known: false,
        }
    }

    /// A well-known symbol such as `iterator`, described as `Symbol.iterator`.
    pub fn well_known(name: &str) -> Self {
        Self {
            id: next_identity(),
            description: Some(format!("Symbol.{name}")),
            registry_key: None,
            well_known: true,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn registry_key(&self) -> Option<&str> {
        self.registry_key.as_deref()
    }

    /// True for symbols living in the global registry.
    pub fn is_global(&self) -> bool {
        self.registry_key.is_some()
    }

    pub fn is_well_known(&self) -> bool {
        self.well_known
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        match (&self.registry_key, &other.registry_key) {
            (Some(a), Some(b)) => a == b,
            (None, None) if self.well_known && other.well_known => {
                self.description == other.description
            }
            (None, None) => self.id == other.id,
            _ => false,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

/// Calling convention of a callable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    Sync,
    Async,
    Generator,
    AsyncGenerator,
}

impl FunctionKind {
    /// Runtime tag of a callable of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Sync => "Function",
            Self::Async => "AsyncFunction",
            Self::Generator => "GeneratorFunction",
            Self::AsyncGenerator => "AsyncGeneratorFunction",
        }
    }
}

/// A callable value, known by its source text. Compares by identity.
#[derive(Debug, Clone)]
pub struct Function {
    id: u64,
    source: String,
    kind: FunctionKind,
}

impl Function {
    /// A synchronous function.
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_kind(source, FunctionKind::Sync)
    }

    pub fn with_kind(source: impl Into<String>, kind: FunctionKind) -> Self {
        Self {
            id: next_identity(),
            source: source.into(),
            kind,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// An opaque pending-result handle. Compares by identity.
#[derive(Debug, Clone)]
pub struct Promise {
    id: u64,
}

impl Promise {
    pub fn new() -> Self {
        Self { id: next_identity() }
    }
}

impl Default for Promise {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Promise {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

// ---------------------------------------------------------------------------
// Typed arrays
// ---------------------------------------------------------------------------

/// Element kind of a typed numeric view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl TypedArrayKind {
    /// Every element kind, in declaration order.
    pub const ALL: [TypedArrayKind; 9] = [
        Self::Int8,
        Self::Uint8,
        Self::Uint8Clamped,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Float32,
        Self::Float64,
    ];

    /// Runtime tag, e.g. `"Uint8ClampedArray"`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Int8 => "Int8Array",
            Self::Uint8 => "Uint8Array",
            Self::Uint8Clamped => "Uint8ClampedArray",
            Self::Int16 => "Int16Array",
            Self::Uint16 => "Uint16Array",
            Self::Int32 => "Int32Array",
            Self::Uint32 => "Uint32Array",
            Self::Float32 => "Float32Array",
            Self::Float64 => "Float64Array",
        }
    }

    /// Inverse of [`TypedArrayKind::tag`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

/// A typed numeric view with its elements.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl TypedArray {
    pub fn kind(&self) -> TypedArrayKind {
        match self {
            Self::Int8(_) => TypedArrayKind::Int8,
            Self::Uint8(_) => TypedArrayKind::Uint8,
            Self::Uint8Clamped(_) => TypedArrayKind::Uint8Clamped,
            Self::Int16(_) => TypedArrayKind::Int16,
            Self::Uint16(_) => TypedArrayKind::Uint16,
            Self::Int32(_) => TypedArrayKind::Int32,
            Self::Uint32(_) => TypedArrayKind::Uint32,
            Self::Float32(_) => TypedArrayKind::Float32,
            Self::Float64(_) => TypedArrayKind::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int8(v) => v.len(),
            Self::Uint8(v) | Self::Uint8Clamped(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::Uint16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Uint32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements widened to `f64`.
    pub fn elements(&self) -> Vec<f64> {
        match self {
            Self::Int8(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Uint8(v) | Self::Uint8Clamped(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Int16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Uint16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Int32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Uint32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Float32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Float64(v) => v.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Keyed records
// ---------------------------------------------------------------------------

/// An insertion-ordered keyed record.
///
/// Inserting an existing key replaces its value in place, so key order is
/// the order of first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert or replace `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (k, v) in iter {
            object.insert(k, v);
        }
        object
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A dynamically typed runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The "missing" sentinel: an absent field or an explicit undefined.
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(Symbol),
    Array(Vec<Value>),
    Object(Object),
    /// Members in insertion order.
    Set(Vec<Value>),
    /// Entries in insertion order.
    Map(Vec<(Value, Value)>),
    Date(DateTime<Utc>),
    RegExp(Pattern),
    TypedArray(TypedArray),
    ArrayBuffer(Vec<u8>),
    /// An untyped byte-level view.
    DataView(Vec<u8>),
    Function(Function),
    Promise(Promise),
}

impl Value {
    pub fn bigint(n: i128) -> Self {
        Self::BigInt(n)
    }

    pub fn set(members: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(members.into_iter().collect())
    }

    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Map(entries.into_iter().collect())
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Object(fields.into_iter().collect())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Canonical runtime tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Null => "Null",
            Self::Bool(_) => "Boolean",
            Self::Number(_) => "Number",
            Self::BigInt(_) => "BigInt",
            Self::String(_) => "String",
            Self::Symbol(_) => "Symbol",
            Self::Array(_) => "Array",
            Self::Object(_) => "Object",
            Self::Set(_) => "Set",
            Self::Map(_) => "Map",
            Self::Date(_) => "Date",
            Self::RegExp(_) => "RegExp",
            Self::TypedArray(t) => t.kind().tag(),
            Self::ArrayBuffer(_) => "ArrayBuffer",
            Self::DataView(_) => "DataView",
            Self::Function(f) => f.kind().tag(),
            Self::Promise(_) => "Promise",
        }
    }

    /// True for values that are objects on the host (not primitives, not callables).
    pub fn is_object_like(&self) -> bool {
        !matches!(
            self,
            Self::Undefined
                | Self::Null
                | Self::Bool(_)
                | Self::Number(_)
                | Self::BigInt(_)
                | Self::String(_)
                | Self::Symbol(_)
                | Self::Function(_)
        )
    }

    /// The `length`, else `size`, of a value.
    ///
    /// Strings count UTF-16 code units. A plain object answers with its own
    /// non-negative integral `length` or `size` field.
    pub fn length_or_size(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.encode_utf16().count()),
            Self::Array(items) | Self::Set(items) => Some(items.len()),
            Self::Map(entries) => Some(entries.len()),
            Self::TypedArray(t) => Some(t.len()),
            Self::Object(o) => ["length", "size"].into_iter().find_map(|k| match o.get(k) {
                Some(Value::Number(n)) if *n >= 0.0 && n.fract() == 0.0 && n.is_finite() => {
                    Some(*n as usize)
                }
                _ => None,
            }),
            _ => None,
        }
    }

    /// Host numeric coercion.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::BigInt(n) => *n as f64,
            Self::String(s) => string_to_number(s),
            Self::Date(d) => d.timestamp_millis() as f64,
            Self::Array(_) => string_to_number(&self.to_string()),
            _ => f64::NAN,
        }
    }

    /// Rendering used by `Expected <value>` messages: JSON for host objects,
    /// string conversion otherwise.
    pub fn repr(&self) -> String {
        if self.is_object_like() || matches!(self, Self::Null) {
            match self.to_json(false) {
                Some(json) => json.to_string(),
                None => "undefined".to_string(),
            }
        } else {
            self.to_string()
        }
    }

    /// JSON projection.
    ///
    /// Plain mode mirrors host JSON stringification: non-finite numbers
    /// become `null`, undefined and callables are omitted, opaque objects
    /// become `{}`. Diagnostic mode keeps non-finite numbers as the strings
    /// `"Infinity"`, `"-Infinity"` and `"NaN"`, renders callables as their
    /// source text, regexes as `/source/flags` and symbols as `Symbol(desc)`.
    ///
    /// Returns `None` where the host would omit the value.
    pub fn to_json(&self, diagnostic: bool) -> Option<serde_json::Value> {
        use serde_json::Value as Json;

        let json = match self {
            Self::Undefined => return None,
            Self::Function(f) => {
                return diagnostic.then(|| Json::String(f.source().to_string()));
            }
            Self::Symbol(s) => return diagnostic.then(|| Json::String(s.to_string())),
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Number(n) => number_to_json(*n, diagnostic),
            Self::BigInt(n) => Json::String(n.to_string()),
            Self::String(s) => Json::String(s.clone()),
            Self::Array(items) => Json::Array(
                items
                    .iter()
                    .map(|v| v.to_json(diagnostic).unwrap_or(Json::Null))
                    .collect(),
            ),
            Self::Object(o) => Json::Object(
                o.iter()
                    .filter_map(|(k, v)| v.to_json(diagnostic).map(|j| (k.to_string(), j)))
                    .collect(),
            ),
            Self::Date(d) => Json::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::RegExp(p) if diagnostic => Json::String(p.to_string()),
            Self::TypedArray(t) => Json::Object(
                t.elements()
                    .into_iter()
                    .enumerate()
                    .map(|(i, n)| (i.to_string(), number_to_json(n, diagnostic)))
                    .collect(),
            ),
            Self::RegExp(_)
            | Self::Set(_)
            | Self::Map(_)
            | Self::ArrayBuffer(_)
            | Self::DataView(_)
            | Self::Promise(_) => Json::Object(serde_json::Map::new()),
        };
        Some(json)
    }
}

fn number_to_json(n: f64, diagnostic: bool) -> serde_json::Value {
    use serde_json::Value as Json;

    if !n.is_finite() {
        return if diagnostic {
            Json::String(format_number(n))
        } else {
            Json::Null
        };
    }
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Json::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::BigInt(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|v| match v {
                        Self::Undefined | Self::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect();
                f.write_str(&parts.join(","))
            }
            Self::Object(_) => f.write_str("[object Object]"),
            Self::Set(_) => f.write_str("[object Set]"),
            Self::Map(_) => f.write_str("[object Map]"),
            Self::Date(d) => write!(
                f,
                "{} GMT+0000 (Coordinated Universal Time)",
                d.format("%a %b %d %Y %H:%M:%S")
            ),
            Self::RegExp(p) => write!(f, "{p}"),
            Self::TypedArray(t) => {
                let parts: Vec<String> = t.elements().into_iter().map(format_number).collect();
                f.write_str(&parts.join(","))
            }
            Self::ArrayBuffer(_) => f.write_str("[object ArrayBuffer]"),
            Self::DataView(_) => f.write_str("[object DataView]"),
            Self::Function(func) => f.write_str(func.source()),
            Self::Promise(_) => f.write_str("[object Promise]"),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Self::Symbol(s)
    }
}

impl From<TypedArray> for Value {
    fn from(t: TypedArray) -> Self {
        Self::TypedArray(t)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Self::RegExp(p)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}

impl From<Promise> for Value {
    fn from(p: Promise) -> Self {
        Self::Promise(p)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn format_number_matches_host_rendering() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn tags_cover_every_kind() {
        assert_eq!(Value::Undefined.tag(), "Undefined");
        assert_eq!(Value::Bool(true).tag(), "Boolean");
        assert_eq!(Value::bigint(3).tag(), "BigInt");
        assert_eq!(Value::Set(vec![]).tag(), "Set");
        assert_eq!(Value::TypedArray(TypedArray::Uint8Clamped(vec![])).tag(), "Uint8ClampedArray");
        assert_eq!(Value::DataView(vec![]).tag(), "DataView");
        assert_eq!(
            Value::Function(Function::with_kind("async () => 1", FunctionKind::Async)).tag(),
            "AsyncFunction"
        );
        assert_eq!(Value::Promise(Promise::new()).tag(), "Promise");
    }

    #[test]
    fn typed_array_kind_tags_round_trip() {
        for kind in TypedArrayKind::ALL {
            assert_eq!(TypedArrayKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(TypedArrayKind::from_tag("BigInt64Array"), None);
    }

    #[test]
    fn string_length_counts_utf16_units() {
        assert_eq!(Value::from("abc").length_or_size(), Some(3));
        assert_eq!(Value::from("😀").length_or_size(), Some(2));
    }

    #[test]
    fn object_length_field_is_read() {
        let v = Value::object([("length", Value::from(4))]);
        assert_eq!(v.length_or_size(), Some(4));
        let v = Value::object([("size", Value::from(2))]);
        assert_eq!(v.length_or_size(), Some(2));
        assert_eq!(Value::object(Vec::<(String, Value)>::new()).length_or_size(), None);
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::from(" 42 ").to_number(), 42.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("0x10").to_number(), 16.0);
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::from("12px").to_number().is_nan());
        assert_eq!(Value::Array(vec![]).to_number(), 0.0);
        assert_eq!(Value::array([Value::from("7")]).to_number(), 7.0);
        assert!(Value::array([Value::from(1), Value::from(2)]).to_number().is_nan());
        assert!(Value::Undefined.to_number().is_nan());
    }

    #[test]
    fn display_matches_host_string_conversion() {
        let v = Value::array([Value::from(1), Value::Null, Value::from("x")]);
        assert_eq!(v.to_string(), "1,,x");
        assert_eq!(Value::object([("a", Value::from(1))]).to_string(), "[object Object]");
        assert_eq!(Value::Symbol(Symbol::new(Some("tag"))).to_string(), "Symbol(tag)");
    }

    #[test]
    fn repr_uses_json_for_objects() {
        let v = Value::object([("a", Value::from(1))]);
        assert_eq!(v.repr(), r#"{"a":1}"#);
        assert_eq!(Value::from("x").repr(), "x");
        assert_eq!(Value::from(2.5).repr(), "2.5");
    }

    #[test]
    fn plain_json_drops_unrepresentable_values() {
        let v = Value::object([
            ("a", Value::Undefined),
            ("b", Value::from(f64::INFINITY)),
            ("c", Value::Function(Function::new("x => x"))),
        ]);
        assert_eq!(v.to_json(false), Some(json!({"b": null})));
    }

    #[test]
    fn diagnostic_json_substitutes_sentinels() {
        let v = Value::object([
            ("a", Value::from(f64::NEG_INFINITY)),
            ("b", Value::from(f64::NAN)),
            ("c", Value::Function(Function::new("x => x"))),
            ("d", Value::RegExp(Pattern::new("^a$").unwrap())),
        ]);
        assert_eq!(
            v.to_json(true),
            Some(json!({"a": "-Infinity", "b": "NaN", "c": "x => x", "d": "/^a$/"}))
        );
    }

    #[test]
    fn date_json_is_iso_millis() {
        let d = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            Value::Date(d).to_json(false),
            Some(json!("2024-01-02T03:04:05.000Z"))
        );
    }

    #[test]
    fn symbols_compare_by_identity_or_key() {
        let a = Symbol::new(Some("x"));
        let b = Symbol::new(Some("x"));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(Symbol::for_key("app"), Symbol::for_key("app"));
        assert_eq!(Symbol::well_known("iterator"), Symbol::well_known("iterator"));
        assert_ne!(Symbol::for_key("iterator"), Symbol::well_known("iterator"));
    }

    #[test]
    fn object_insert_replaces_in_place() {
        let mut o = Object::new();
        o.insert("a", Value::from(1));
        o.insert("b", Value::from(2));
        assert_eq!(o.insert("a", Value::from(3)), Some(Value::from(1)));
        assert_eq!(o.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(o.get("a"), Some(&Value::from(3)));
    }

    #[test]
    fn json_conversion_preserves_key_order() {
        let v = Value::from(json!({"z": 1, "a": [true, null]}));
        let o = v.as_object().unwrap();
        assert_eq!(o.keys().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(o.get("a"), Some(&Value::array([Value::Bool(true), Value::Null])));
    }
}
