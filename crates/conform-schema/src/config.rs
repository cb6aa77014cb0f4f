//! Engine configuration.
//!
//! Bounds recursion when decoding and interpreting trees. Defaults suit
//! trees built in code; lower `CONFORM_MAX_DEPTH` when accepting trees from
//! untrusted callers.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable read by [`EngineConfig::from_env`].
pub const MAX_DEPTH_VAR: &str = "CONFORM_MAX_DEPTH";

/// Default nesting limit for trees and validated values.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied by `validate_tree`, `build_from_tree` and `safe_parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum node nesting depth. The root node is depth 0.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CONFORM_MAX_DEPTH` (default: 256, must be a positive integer)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVar` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            max_depth: env_depth(MAX_DEPTH_VAR, DEFAULT_MAX_DEPTH)?,
        })
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

fn env_depth(var: &str, default: usize) -> Result<usize, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(default);
    };
    let invalid = |reason: &str| {
        tracing::warn!(var, value = %raw, "ignoring malformed engine configuration");
        ConfigError::InvalidVar {
            var: var.to_string(),
            reason: reason.to_string(),
        }
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(depth) => Ok(depth),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth() {
        assert_eq!(EngineConfig::default().max_depth, 256);
    }

    #[test]
    fn env_depth_uses_default_when_var_absent() {
        assert_eq!(env_depth("CONFORM_TEST_ABSENT_12345", 7).unwrap(), 7);
    }

    #[test]
    fn env_depth_reads_value() {
        std::env::set_var("CONFORM_TEST_DEPTH_OK", " 32 ");
        let result = env_depth("CONFORM_TEST_DEPTH_OK", 256);
        std::env::remove_var("CONFORM_TEST_DEPTH_OK");
        assert_eq!(result.unwrap(), 32);
    }

    #[test]
    fn env_depth_rejects_zero_and_garbage() {
        std::env::set_var("CONFORM_TEST_DEPTH_ZERO", "0");
        let zero = env_depth("CONFORM_TEST_DEPTH_ZERO", 256);
        std::env::remove_var("CONFORM_TEST_DEPTH_ZERO");
        assert!(matches!(zero, Err(ConfigError::InvalidVar { .. })));

        std::env::set_var("CONFORM_TEST_DEPTH_BAD", "deep");
        let bad = env_depth("CONFORM_TEST_DEPTH_BAD", 256);
        std::env::remove_var("CONFORM_TEST_DEPTH_BAD");
        assert!(bad.is_err());
    }

    #[test]
    fn config_serializes() {
        let json = serde_json::to_value(EngineConfig::with_max_depth(9)).unwrap();
        assert_eq!(json, serde_json::json!({"max_depth": 9}));
    }
}
