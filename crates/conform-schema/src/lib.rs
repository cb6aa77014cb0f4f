//! # conform-schema: Composable Validation Schemas
//!
//! Schemas are trees of constraint rules. Fluent builders produce them,
//! `or`/`and`/`not` compose them, and an interpreter checks a
//! [`conform_core::Value`] against them, collecting human-readable error
//! messages. Trees can be exported, validated on import, and rehydrated
//! into typed builders.
//!
//! ```ignore
//! use conform_schema::{number, object, string, Descriptor};
//!
//! let user = object().field("name", string().trim()).field("age", number().geq(0.0));
//! let result = user.safe_parse(&value);
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Closed vocabulary.** [`Key`] enumerates every constraint a tree may
//!    carry. Decoding rejects anything else, and matches over [`Rule`] are
//!    exhaustive.
//!
//! 2. **Shared, immutable trees.** Combinators and containers hold their
//!    operands' trees through `Arc`. Modifiers copy on write, so a tree
//!    that has been shared is never changed underneath another schema.
//!
//! 3. **Ordered, short-circuit evaluation.** Rules run in insertion order;
//!    the first failure or the first combinator decides the node. See
//!    [`interpret`] for the full contract.
//!
//! 4. **Validation failures are data.** `safe_parse` never fails; it
//!    returns a [`SafeParse`] outcome. Only construction, decoding and
//!    [`Descriptor::parse`] return errors.
//!
//! ## Crate Policy
//!
//! - Depends only on `conform-core` internally.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Library code emits `tracing` events and never installs a subscriber.

pub mod builder;
pub mod combinator;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod interpret;
pub mod key;
pub mod node;
pub mod serialize;
pub mod tree;

// Re-export primary types for ergonomic imports.
pub use builder::{
    any, array, array_buffer, async_function, bigint, boolean, enum_of, float32_array,
    float64_array, function, int16_array, int32_array, int8_array, map, never, null,
    numeric_array, number, object, promise, set, string, symbol, typed_array, uint16_array,
    uint32_array, uint8_array, uint8_clamped_array, undefined, AnySchema, ArrayBufferSchema,
    ArraySchema, AsyncFunctionSchema, BigIntSchema, BooleanSchema, EnumSchema, FunctionSchema,
    LengthConstraints, MapSchema, NullSchema, NumberSchema, ObjectSchema, PromiseSchema, SetSchema,
    StringSchema, SymbolSchema, TypedArraySchema, UndefinedSchema,
};
pub use combinator::{and, intersection, not, or, union};
pub use config::EngineConfig;
pub use descriptor::{Descriptor, Schema};
pub use error::{ConfigError, ConstructionError, ParseError, SchemaError, ShapeError};
pub use interpret::{safe_parse, SafeParse};
pub use key::{Key, KeyShape};
pub use node::{EmailOptions, Node, Rule, TextMatcher, UrlOptions, UuidOptions, UuidVersion};
pub use tree::{
    build_from_tree, build_from_tree_with, decode_tree, decode_tree_with, encode_tree,
    validate_tree, validate_tree_with,
};

pub use conform_core::{Pattern, Value};
