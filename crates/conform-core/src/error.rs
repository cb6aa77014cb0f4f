//! # Error Types
//!
//! Errors raised while constructing core values. Validation itself never
//! errors at this level; predicates answer `bool`.

use thiserror::Error;

/// Error constructing a core value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A regular expression failed to compile.
    #[error("invalid pattern /{pattern}/: {reason}")]
    InvalidPattern {
        /// Pattern source text as supplied.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A regular expression flag outside `i`, `m`, `s`, `u`, `g`, `y`.
    #[error("unsupported pattern flag '{flag}' in /{pattern}/")]
    UnsupportedFlag {
        /// Pattern source text as supplied.
        pattern: String,
        /// The rejected flag character.
        flag: char,
    },
}
