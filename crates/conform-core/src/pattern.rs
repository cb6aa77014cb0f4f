//! # Pattern: Regex With Its Source Text
//!
//! `$match`, email domain and symbol description rules carry a compiled
//! regex. The source text and flags are kept next to it so the pattern can
//! be printed in error messages, re-encoded into a schema tree, and
//! compared without comparing compiled automata.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::CoreError;

/// A compiled regular expression that remembers how it was written.
///
/// Equality compares source and flags.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern with no flags.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPattern` if the regex does not compile.
    pub fn new(source: &str) -> Result<Self, CoreError> {
        Self::with_flags(source, "")
    }

    /// Compile a case-insensitive pattern (flag `i`).
    pub fn case_insensitive(source: &str) -> Result<Self, CoreError> {
        Self::with_flags(source, "i")
    }

    /// Compile a pattern with host-style flags.
    ///
    /// `i`, `m` and `s` map onto the regex builder. `u`, `g` and `y` are
    /// accepted and have no effect on a single match test.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnsupportedFlag` for any other flag character and
    /// `CoreError::InvalidPattern` if the regex does not compile.
    pub fn with_flags(source: &str, flags: &str) -> Result<Self, CoreError> {
        let mut builder = RegexBuilder::new(source);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'u' | 'g' | 'y' => {}
                other => {
                    return Err(CoreError::UnsupportedFlag {
                        pattern: source.to_string(),
                        flag: other,
                    })
                }
            }
        }
        let regex = builder.build().map_err(|e| CoreError::InvalidPattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            flags: flags.to_string(),
            regex,
        })
    }

    /// True if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The source text, without delimiters.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flags the pattern was compiled with.
    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({self})")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}
