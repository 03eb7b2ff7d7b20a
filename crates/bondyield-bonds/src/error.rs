//! Error types for bond operations.

use bondyield_core::{CoreError, Period};
use bondyield_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
///
/// None of these are transient: each one means the inputs cannot produce the
/// requested metric.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// The tenor is shorter than one coupon period.
    #[error("Tenor {tenor} is shorter than one coupon period of {coupon_period}")]
    InvalidTenor {
        /// The bond tenor.
        tenor: Period,
        /// The coupon period.
        coupon_period: Period,
    },

    /// Yield calculation failed to converge.
    ///
    /// When Newton stopped on a vanishing derivative or a non-finite value and
    /// no bracket exists, `iterations` is 0 and `residual` is NaN.
    #[error("Yield calculation failed to converge after {iterations} iterations (residual: {residual:.2e})")]
    NoConvergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual.
        residual: f64,
    },

    /// The periodic rate makes the discount factor non-positive.
    #[error("Periodic rate {rate} gives a non-positive discount factor")]
    Domain {
        /// The offending periodic rate.
        rate: f64,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] CoreError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }
}

impl From<MathError> for BondError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => Self::NoConvergence {
                iterations,
                residual,
            },
            MathError::OutOfDomain { x, .. } => Self::Domain { rate: x },
            MathError::DivisionByZero { .. }
            | MathError::InvalidBracket { .. }
            | MathError::InvalidInput { .. } => Self::NoConvergence {
                iterations: 0,
                residual: f64::NAN,
            },
        }
    }
}
