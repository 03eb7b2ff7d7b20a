//! Error types for the Bondyield core types.
//!
//! Every failure here is an input-validation failure: callers should not
//! retry, they should fix the period or cash flow they passed in.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for period construction and period arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Zero or several units were supplied, or the count was not positive.
    #[error("Invalid period: {reason}")]
    InvalidPeriod {
        /// Description of the problem.
        reason: String,
    },

    /// One operand is measured in weeks and the other in months or years.
    #[error(
        "Cannot divide {numerator} by {denominator}: \
         weeks are not convertible to months or years"
    )]
    Conversion {
        /// Rendered dividend.
        numerator: String,
        /// Rendered divisor.
        denominator: String,
    },

    /// The quotient of two periods is not a whole number.
    #[error("Dividing {numerator} by {denominator} does not give a whole number of periods")]
    NonIntegerRatio {
        /// Rendered dividend.
        numerator: String,
        /// Rendered divisor.
        denominator: String,
    },

    /// A cash flow sequence does not have the expected shape.
    #[error("Invalid cash flow: {reason}")]
    InvalidCashFlow {
        /// Description of the invalid cash flow.
        reason: String,
    },
}

impl CoreError {
    /// Message used when the exactly-one-unit rule is violated.
    pub const EXACTLY_ONE_UNIT: &'static str =
        "exactly one of (weeks, months, years) must be specified";

    /// Creates the exactly-one-unit error.
    #[must_use]
    pub fn invalid_period() -> Self {
        Self::InvalidPeriod {
            reason: Self::EXACTLY_ONE_UNIT.to_string(),
        }
    }

    /// Creates an invalid period error with a custom reason.
    #[must_use]
    pub fn invalid_period_reason(reason: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            reason: reason.into(),
        }
    }

    /// Creates an invalid cash flow error.
    #[must_use]
    pub fn invalid_cash_flow(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlow {
            reason: reason.into(),
        }
    }
}
