//! Net present value of a periodic cash flow sequence.

use crate::error::{BondError, BondResult};

/// Net present value of `amounts` at periodic rate `rate`.
///
/// `Σ amounts[t] / (1 + rate)^t` for `t = 0..n-1`.
///
/// # Errors
///
/// [`BondError::Domain`] if `1 + rate` is not positive.
///
/// ```rust
/// use bondyield_bonds::pricing::npv;
///
/// let value = npv(&[-100.0, 110.0], 0.10).unwrap();
/// assert!(value.abs() < 1e-12);
/// assert!(npv(&[-100.0, 110.0], -1.0).is_err());
/// ```
pub fn npv(amounts: &[f64], rate: f64) -> BondResult<f64> {
    check_domain(rate)?;
    Ok(npv_unchecked(amounts, rate))
}

/// Derivative of [`npv`] with respect to the rate.
///
/// `Σ -t · amounts[t] / (1 + rate)^(t+1)`.
pub fn npv_derivative(amounts: &[f64], rate: f64) -> BondResult<f64> {
    check_domain(rate)?;
    Ok(npv_derivative_unchecked(amounts, rate))
}

fn check_domain(rate: f64) -> BondResult<()> {
    let base = 1.0 + rate;
    if base.is_nan() || base <= 0.0 {
        return Err(BondError::Domain { rate });
    }
    Ok(())
}

pub(crate) fn npv_unchecked(amounts: &[f64], rate: f64) -> f64 {
    let v = 1.0 / (1.0 + rate);
    let mut factor = 1.0;
    let mut total = 0.0;
    for amount in amounts {
        total += amount * factor;
        factor *= v;
    }
    total
}

pub(crate) fn npv_derivative_unchecked(amounts: &[f64], rate: f64) -> f64 {
    let v = 1.0 / (1.0 + rate);
    let mut factor = v;
    let mut total = 0.0;
    for (t, amount) in amounts.iter().enumerate() {
        total -= t as f64 * amount * factor;
        factor *= v;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_npv_matches_direct_sum() {
        let amounts = [-95.0, 5.0, 5.0, 105.0];
        let r = 0.06;
        let expected: f64 = amounts
            .iter()
            .enumerate()
            .map(|(t, cf)| cf / (1.0_f64 + r).powi(t as i32))
            .sum();

        assert_relative_eq!(npv(&amounts, r).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let amounts = [-95.0, 5.0, 5.0, 105.0];
        let r = 0.06;
        let h = 1e-6;
        let fd = (npv(&amounts, r + h).unwrap() - npv(&amounts, r - h).unwrap()) / (2.0 * h);

        assert_relative_eq!(npv_derivative(&amounts, r).unwrap(), fd, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_rate_is_plain_sum() {
        assert_relative_eq!(npv(&[-100.0, 30.0, 80.0], 0.0).unwrap(), 10.0);
    }

    #[test]
    fn test_domain() {
        assert_eq!(
            npv(&[-100.0, 110.0], -1.0).unwrap_err(),
            BondError::Domain { rate: -1.0 }
        );
        assert!(npv_derivative(&[-100.0, 110.0], -2.0).is_err());
        assert!(npv(&[-100.0, 110.0], f64::NAN).is_err());
    }
}
