//! Cash flow generation for bullet bonds.

use std::cmp::Ordering;

use bondyield_core::types::{CashFlowSequence, Period};

use crate::error::{BondError, BondResult};

/// Largest number of coupons a schedule may hold.
pub const MAX_COUPON_COUNT: u32 = 100_000;

/// Builds the discrete cash flow sequence of a fixed coupon bullet bond.
pub struct CashFlowBuilder;

impl CashFlowBuilder {
    /// Generates the cash flow sequence for a bond.
    ///
    /// The result is `[-market_price, c, c, ..., c + face_value]` with one
    /// coupon `c` per coupon period in the tenor.
    ///
    /// # Arguments
    ///
    /// * `market_price` - Price paid today (0 when only the coupons are needed)
    /// * `face_value` - Principal repaid at maturity
    /// * `coupon_rate_pct` - Annual coupon rate in percent
    /// * `coupon_period` - Interval between coupons
    /// * `tenor` - Maturity of the bond
    ///
    /// # Errors
    ///
    /// - [`BondError::InvalidTenor`] if the tenor is shorter than one coupon period
    /// - [`BondError::CoreError`] if the periods cannot be divided
    /// - [`BondError::InvalidSpec`] if an amount is not finite
    ///
    /// # Example
    ///
    /// ```rust
    /// use bondyield_bonds::cashflows::CashFlowBuilder;
    /// use bondyield_core::types::Period;
    ///
    /// let cfs = CashFlowBuilder::build(900.0, 1000.0, 5.0, Period::Years(1), Period::Years(5))
    ///     .unwrap();
    /// assert_eq!(cfs.as_slice(), &[-900.0, 50.0, 50.0, 50.0, 50.0, 1050.0]);
    /// ```
    pub fn build(
        market_price: f64,
        face_value: f64,
        coupon_rate_pct: f64,
        coupon_period: Period,
        tenor: Period,
    ) -> BondResult<CashFlowSequence> {
        for (name, value) in [
            ("market price", market_price),
            ("face value", face_value),
            ("coupon rate", coupon_rate_pct),
        ] {
            if !value.is_finite() {
                return Err(BondError::invalid_spec(format!("{name} must be finite")));
            }
        }

        let coupon_count = Self::coupon_count(coupon_period, tenor)?;
        let coupon = Self::coupon_amount(face_value, coupon_rate_pct, coupon_period);

        let mut amounts = Vec::with_capacity(coupon_count as usize + 1);
        amounts.push(-market_price);
        amounts.extend(std::iter::repeat(coupon).take(coupon_count as usize));
        if let Some(last) = amounts.last_mut() {
            *last += face_value;
        }

        Ok(CashFlowSequence::new(amounts)?)
    }

    /// Generates the sequence used for pricing: the initial flow is zero.
    pub fn build_for_pricing(
        face_value: f64,
        coupon_rate_pct: f64,
        coupon_period: Period,
        tenor: Period,
    ) -> BondResult<CashFlowSequence> {
        Self::build(0.0, face_value, coupon_rate_pct, coupon_period, tenor)
    }

    /// Returns the amount of a single coupon payment.
    ///
    /// `face_value * coupon_rate_pct / 100 * coupon_period.fraction_of_year()`
    #[must_use]
    pub fn coupon_amount(face_value: f64, coupon_rate_pct: f64, coupon_period: Period) -> f64 {
        face_value * coupon_rate_pct / 100.0 * coupon_period.fraction_of_year()
    }

    /// Returns the number of coupons paid over the tenor.
    ///
    /// # Errors
    ///
    /// - [`BondError::InvalidTenor`] if the tenor is shorter than one coupon period
    /// - [`BondError::CoreError`] for mixed week/month periods, a fractional
    ///   ratio or a zero count
    /// - [`BondError::InvalidSpec`] for more than [`MAX_COUPON_COUNT`] coupons
    pub fn coupon_count(coupon_period: Period, tenor: Period) -> BondResult<u32> {
        coupon_period.validate()?;
        tenor.validate()?;

        if tenor.compare_span(&coupon_period)? == Ordering::Less {
            return Err(BondError::InvalidTenor {
                tenor,
                coupon_period,
            });
        }

        match tenor.divide(&coupon_period)? {
            0 => Err(BondError::InvalidTenor {
                tenor,
                coupon_period,
            }),
            count if count > MAX_COUPON_COUNT => Err(BondError::invalid_spec(format!(
                "{tenor} holds {count} coupons of {coupon_period}, cap is {MAX_COUPON_COUNT}"
            ))),
            count => Ok(count),
        }
    }
}
