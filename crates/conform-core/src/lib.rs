//! # conform-core: Runtime Values and Leaf Predicates
//!
//! This crate is the leaf of the conform workspace. It defines the dynamic
//! [`Value`] that schemas are matched against, and the leaf predicates the
//! interpreter in `conform-schema` calls at every rule.
//!
//! ## Key Design Principles
//!
//! 1. **One tagged union for every runtime kind.** Sets, maps, typed
//!    arrays, raw buffers, symbols, callables and promises are first-class
//!    [`Value`] variants, so `$isType` can name each of them.
//!
//! 2. **Host semantics are explicit functions.** Tagging ([`check_type`]),
//!    structural equality ([`deep_equal`]), strict equality, membership
//!    equality and relational comparison each live in [`predicate`] instead
//!    of being folded into `PartialEq`.
//!
//! 3. **Format patterns compile once.** Every string-format regex in
//!    [`format`] is a process-wide lazy static.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `conform-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod format;
pub mod pattern;
pub mod predicate;
pub mod value;

pub use error::CoreError;
pub use pattern::Pattern;
pub use predicate::{check_type, deep_equal, loose_compare, same_value_zero, strict_equal};
pub use value::{
    format_number, Function, FunctionKind, Object, Promise, Symbol, TypedArray, TypedArrayKind,
    Value,
};
