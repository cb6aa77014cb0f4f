//! # Constraint Key Vocabulary
//!
//! The closed set of keys a schema node may carry. Decoding rejects any
//! other key, and every `match` on [`Key`] is exhaustive, so a new key
//! forces every consumer to handle it.

use std::fmt;
use std::str::FromStr;

use crate::error::ShapeError;

/// Payload shape a key expects in a decoded tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyShape {
    /// A scalar or literal payload checked against the subject value.
    Leaf,
    /// A sequence of nodes (`$and`, `$or`).
    NodeList,
    /// A single node (`$not`, `$every`, `$setOf`, `$returns`, `$any`).
    Node,
    /// A name-to-node mapping (`$props`).
    NodeMap,
    /// Exactly two nodes (`$entries`).
    NodePair,
}

/// A constraint key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Optional,
    Strict,
    Description,
    IsType,
    Same,
    Enum,
    Lt,
    Gt,
    Leq,
    Geq,
    Neq,
    Range,
    ClosedRange,
    HasLength,
    HasLengthLessThan,
    HasLengthGreaterThan,
    HasLengthInRange,
    HasLengthInClosedRange,
    Match,
    Email,
    Url,
    Uuid,
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
    HasDescription,
    Global,
    GlobalKey,
    WellKnown,
    And,
    Or,
    Not,
    Props,
    Every,
    SetOf,
    Entries,
    Returns,
    Any,
}

impl Key {
    /// Every key, in vocabulary order.
    pub const ALL: [Key; 53] = [
        Self::Optional,
        Self::Strict,
        Self::Description,
        Self::IsType,
        Self::Same,
        Self::Enum,
        Self::Lt,
        Self::Gt,
        Self::Leq,
        Self::Geq,
        Self::Neq,
        Self::Range,
        Self::ClosedRange,
        Self::HasLength,
        Self::HasLengthLessThan,
        Self::HasLengthGreaterThan,
        Self::HasLengthInRange,
        Self::HasLengthInClosedRange,
        Self::Match,
        Self::Email,
        Self::Url,
        Self::Uuid,
        Self::Emoji,
        Self::Base64,
        Self::Base64Url,
        Self::Nanoid,
        Self::Cuid,
        Self::Cuid2,
        Self::Ulid,
        Self::Ipv4,
        Self::Ipv6,
        Self::Cidrv4,
        Self::Cidrv6,
        Self::IsoDate,
        Self::IsoTime,
        Self::IsoDateTime,
        Self::IsoDuration,
        Self::Trim,
        Self::ToLowerCase,
        Self::ToUpperCase,
        Self::HasDescription,
        Self::Global,
        Self::GlobalKey,
        Self::WellKnown,
        Self::And,
        Self::Or,
        Self::Not,
        Self::Props,
        Self::Every,
        Self::SetOf,
        Self::Entries,
        Self::Returns,
        Self::Any,
    ];

    /// The key as it appears in a tree, including the `$` sigil.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optional => "$optional",
            Self::Strict => "$strict",
            Self::Description => "$description",
            Self::IsType => "$isType",
            Self::Same => "$same",
            Self::Enum => "$enum",
            Self::Lt => "$lt",
            Self::Gt => "$gt",
            Self::Leq => "$leq",
            Self::Geq => "$geq",
            Self::Neq => "$neq",
            Self::Range => "$range",
            Self::ClosedRange => "$closedRange",
            Self::HasLength => "$hasLength",
            Self::HasLengthLessThan => "$hasLengthLessThan",
            Self::HasLengthGreaterThan => "$hasLengthGreaterThan",
            Self::HasLengthInRange => "$hasLengthInRange",
            Self::HasLengthInClosedRange => "$hasLengthInClosedRange",
            Self::Match => "$match",
            Self::Email => "$email",
            Self::Url => "$url",
            Self::Uuid => "$uuid",
            Self::Emoji => "$emoji",
            Self::Base64 => "$base64",
            Self::Base64Url => "$base64url",
            Self::Nanoid => "$nanoid",
            Self::Cuid => "$cuid",
            Self::Cuid2 => "$cuid2",
            Self::Ulid => "$ulid",
            Self::Ipv4 => "$ipv4",
            Self::Ipv6 => "$ipv6",
            Self::Cidrv4 => "$cidrv4",
            Self::Cidrv6 => "$cidrv6",
            Self::IsoDate => "$isodate",
            Self::IsoTime => "$isotime",
            Self::IsoDateTime => "$isodatetime",
            Self::IsoDuration => "$isoduration",
            Self::Trim => "$trim",
            Self::ToLowerCase => "$toLowerCase",
            Self::ToUpperCase => "$toUpperCase",
            Self::HasDescription => "$hasDescription",
            Self::Global => "$global",
            Self::GlobalKey => "$globalKey",
            Self::WellKnown => "$wellKnown",
            Self::And => "$and",
            Self::Or => "$or",
            Self::Not => "$not",
            Self::Props => "$props",
            Self::Every => "$every",
            Self::SetOf => "$setOf",
            Self::Entries => "$entries",
            Self::Returns => "$returns",
            Self::Any => "$any",
        }
    }

    /// Look a key up by its tree spelling.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// `$and`, `$or` and `$not` end evaluation of the node carrying them.
    pub fn is_combinator(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }

    pub fn shape(self) -> KeyShape {
        match self {
            Self::And | Self::Or => KeyShape::NodeList,
            Self::Not | Self::Every | Self::SetOf | Self::Returns | Self::Any => KeyShape::Node,
            Self::Props => KeyShape::NodeMap,
            Self::Entries => KeyShape::NodePair,
            _ => KeyShape::Leaf,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Key {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ShapeError::UnknownKey { key: s.to_string() })
    }
}
