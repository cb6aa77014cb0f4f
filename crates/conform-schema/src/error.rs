//! # Schema Errors
//!
//! One error enum per failure family:
//!
//! - [`ConstructionError`]: a builder modifier received invalid arguments.
//! - [`ShapeError`]: an externally supplied tree is malformed.
//! - [`ParseError`]: [`parse`](crate::Descriptor::parse) rejected a value.
//! - [`ConfigError`]: engine configuration could not be loaded.
//!
//! [`SchemaError`] unifies all of them for callers that handle every
//! failure through one `?` chain. Validation failures reported by
//! `safe_parse` are data, not errors.

use conform_core::{format_number, CoreError};
use thiserror::Error;

/// A builder modifier was called with arguments that can never be satisfied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error(
        "Invalid range interval ({}, {}). The first integer has to be less than or equal to the second.",
        bound(.min),
        bound(.max)
    )]
    InvalidRange { min: f64, max: f64 },
}

fn bound(n: &f64) -> String {
    format_number(*n)
}

/// A decoded tree violates the closed vocabulary or a structural shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A position that must hold a node holds something else.
    #[error("Invalid schema: expected object")]
    NotANode,

    /// A key outside the closed vocabulary.
    #[error("Invalid schema key {key}")]
    UnknownKey { key: String },

    /// `$or` / `$and` must hold a sequence of nodes.
    #[error("Expected array for {key}")]
    ExpectedSequence { key: String },

    /// `$props` must hold a name-to-node mapping.
    #[error("Invalid {key} value")]
    ExpectedMapping { key: String },

    /// `$entries` must hold exactly two nodes.
    #[error("$entries must be tuple")]
    EntriesNotTuple,

    /// A leaf key holds a payload of the wrong kind.
    #[error("Invalid {key} value: {reason}")]
    InvalidPayload { key: String, reason: String },

    /// The tree nests deeper than the configured limit.
    #[error("Maximum schema depth {max_depth} exceeded")]
    DepthExceeded { max_depth: usize },
}

/// A value failed [`parse`](crate::Descriptor::parse).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .errors.join("; "))]
pub struct ParseError {
    /// Every message recorded while validating, in order.
    pub errors: Vec<String>,
}

/// Engine configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: String, reason: String },
}

/// Any failure raised by this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
