//! Discrete cash flow sequence of a bullet bond.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::{CoreError, CoreResult};

/// An ordered sequence of signed cash flow amounts, one per coupon period.
///
/// Index `t` is the amount paid at the end of period `t`:
/// - index 0 is the initial outflow (`-market_price`, or 0 when pricing)
/// - indices 1..n-1 are coupons
/// - the last index is the final coupon plus the face value
///
/// A sequence always holds at least two amounts.
///
/// # Example
///
/// ```rust
/// use bondyield_core::types::CashFlowSequence;
///
/// let cfs = CashFlowSequence::new(vec![-95.0, 5.0, 105.0]).unwrap();
/// assert_eq!(cfs.initial(), -95.0);
/// assert_eq!(cfs.coupon_count(), 2);
/// assert_eq!(cfs.tail(), &[5.0, 105.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashFlowSequence {
    amounts: Vec<f64>,
}

impl CashFlowSequence {
    /// Minimum number of amounts: the initial flow and one coupon.
    pub const MIN_LEN: usize = 2;

    /// Creates a sequence, checking its length and that all amounts are finite.
    pub fn new(amounts: Vec<f64>) -> CoreResult<Self> {
        if amounts.len() < Self::MIN_LEN {
            return Err(CoreError::invalid_cash_flow(format!(
                "need at least {} amounts, got {}",
                Self::MIN_LEN,
                amounts.len()
            )));
        }

        if let Some(t) = amounts.iter().position(|a| !a.is_finite()) {
            return Err(CoreError::invalid_cash_flow(format!(
                "amount at period {t} is not finite"
            )));
        }

        Ok(Self { amounts })
    }

    /// Returns the amounts as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.amounts
    }

    /// Returns the number of amounts, including the initial flow.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Returns the initial flow at period 0.
    #[must_use]
    pub fn initial(&self) -> f64 {
        self.amounts[0]
    }

    /// Returns the flows after period 0.
    #[must_use]
    pub fn tail(&self) -> &[f64] {
        &self.amounts[1..]
    }

    /// Returns the number of coupon-bearing periods.
    #[must_use]
    pub fn coupon_count(&self) -> usize {
        self.amounts.len() - 1
    }

    /// Returns the final flow (last coupon plus principal).
    #[must_use]
    pub fn final_amount(&self) -> f64 {
        self.amounts[self.amounts.len() - 1]
    }

    /// Returns an iterator over the amounts.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.amounts.iter()
    }

    /// Consumes the sequence and returns the amounts.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.amounts
    }
}

impl Index<usize> for CashFlowSequence {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.amounts[index]
    }
}

impl<'a> IntoIterator for &'a CashFlowSequence {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.amounts.iter()
    }
}

impl TryFrom<Vec<f64>> for CashFlowSequence {
    type Error = CoreError;

    fn try_from(amounts: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(amounts)
    }
}

impl From<CashFlowSequence> for Vec<f64> {
    fn from(cfs: CashFlowSequence) -> Self {
        cfs.amounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let cfs = CashFlowSequence::new(vec![-900.0, 50.0, 50.0, 1050.0]).unwrap();

        assert_eq!(cfs.len(), 4);
        assert!(!cfs.is_empty());
        assert_eq!(cfs.initial(), -900.0);
        assert_eq!(cfs.coupon_count(), 3);
        assert_eq!(cfs.final_amount(), 1050.0);
        assert_eq!(cfs[1], 50.0);
        assert_eq!(cfs.iter().sum::<f64>(), 250.0);
    }

    #[test]
    fn test_too_short() {
        assert!(CashFlowSequence::new(vec![]).is_err());
        assert!(matches!(
            CashFlowSequence::new(vec![-100.0]),
            Err(CoreError::InvalidCashFlow { .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = CashFlowSequence::new(vec![-100.0, f64::NAN]).unwrap_err();
        assert!(err.to_string().contains("period 1"));
    }

    #[test]
    fn test_serde_round_trip_as_array() {
        let cfs = CashFlowSequence::new(vec![-95.0, 5.0, 105.0]).unwrap();
        let json = serde_json::to_string(&cfs).unwrap();
        assert_eq!(json, "[-95.0,5.0,105.0]");
        assert!(serde_json::from_str::<CashFlowSequence>("[1.0]").is_err());
    }
}
