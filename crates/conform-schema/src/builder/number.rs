//! Number schemas.
//!
//! Bounds compare with the host's relational operators, so a bound of
//! `f64::INFINITY` or `f64::NEG_INFINITY` is accepted and prints as a word
//! in failure messages.

use conform_core::Value;

use super::{check_interval, typed};
use crate::descriptor::{impl_descriptor, Descriptor, Schema};
use crate::error::ConstructionError;
use crate::node::Rule;

/// `{ $isType: "Number" }` plus numeric rules.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberSchema {
    schema: Schema,
}

impl_descriptor!(NumberSchema => Number);

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            schema: typed("Number"),
        }
    }

    pub fn lt(self, n: f64) -> Self {
        self.update(Rule::Lt(Value::Number(n)))
    }

    pub fn is_less_than(self, n: f64) -> Self {
        self.lt(n)
    }

    pub fn gt(self, n: f64) -> Self {
        self.update(Rule::Gt(Value::Number(n)))
    }

    pub fn is_greater_than(self, n: f64) -> Self {
        self.gt(n)
    }

    pub fn leq(self, n: f64) -> Self {
        self.update(Rule::Leq(Value::Number(n)))
    }

    pub fn geq(self, n: f64) -> Self {
        self.update(Rule::Geq(Value::Number(n)))
    }

    pub fn neq(self, n: f64) -> Self {
        self.update(Rule::Neq(Value::Number(n)))
    }

    /// Half-open `[x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidRange` when `x > y`.
    pub fn is_in_range(self, x: f64, y: f64) -> Result<Self, ConstructionError> {
        check_interval(x, y)?;
        Ok(self.update(Rule::Range(Value::Number(x), Value::Number(y))))
    }

    /// Inclusive `[x, y]`.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidRange` when `x > y`.
    pub fn is_in_closed_range(self, x: f64, y: f64) -> Result<Self, ConstructionError> {
        check_interval(x, y)?;
        Ok(self.update(Rule::ClosedRange(Value::Number(x), Value::Number(y))))
    }

    /// Retype as `Float`: not NaN and not integral. Infinities count.
    pub fn is_float(self) -> Self {
        self.update(Rule::IsType("Float".into()))
    }

    pub fn is_integer(self) -> Self {
        self.update(Rule::IsType("Integer".into()))
    }

    pub fn is_nan(self) -> Self {
        self.update(Rule::IsType("NaN".into()))
    }

    /// `> 0` or exactly zero.
    pub fn is_positive(&self) -> Schema {
        self.clone().gt(0.0).or(&NumberSchema::new().equals(0.0))
    }

    pub fn is_negative(self) -> Self {
        self.lt(0.0)
    }

    pub fn is_positive_infinity(self) -> Self {
        self.equals(f64::INFINITY)
    }

    pub fn is_negative_infinity(self) -> Self {
        self.equals(f64::NEG_INFINITY)
    }
}
