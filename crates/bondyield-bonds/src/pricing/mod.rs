//! Bond pricing calculations.
//!
//! This module provides:
//! - [`YieldSolver`]: yield-to-maturity (IRR) solver
//! - [`PricingEngine`]: price from a target annual yield
//! - [`npv`] / [`npv_derivative`]: present value of a periodic sequence

mod npv;
mod yield_solver;

pub use npv::{npv, npv_derivative};
pub use yield_solver::{YieldResult, YieldSolver, DEFAULT_INITIAL_GUESS, MIN_PERIODIC_RATE};

use bondyield_core::types::{CashFlowSequence, Period};

use crate::cashflows::CashFlowBuilder;
use crate::error::{BondError, BondResult};

/// Bond pricing engine.
///
/// The inverse of [`YieldSolver`]: discounts the coupon and principal flows
/// at a known periodic rate.
pub struct PricingEngine;

impl PricingEngine {
    /// Prices a bond from an annual yield in percent.
    ///
    /// The periodic discount base is
    /// `d = 1 + annual_yield_pct * coupon_period.fraction_of_year() / 100`
    /// and the price is `Σ_{t=1}^{n} cf[t] / d^t`.
    ///
    /// # Arguments
    ///
    /// * `face_value` - Principal repaid at maturity
    /// * `coupon_rate_pct` - Annual coupon rate in percent
    /// * `annual_yield_pct` - Annual yield in percent
    /// * `coupon_period` - Interval between coupons
    /// * `tenor` - Maturity of the bond
    ///
    /// # Errors
    ///
    /// [`BondError::Domain`] if `d` is not positive, plus the cash flow
    /// errors of [`CashFlowBuilder::build`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use bondyield_bonds::pricing::PricingEngine;
    /// use bondyield_core::types::Period;
    ///
    /// // At a yield equal to the coupon, a bond prices at par.
    /// let price = PricingEngine::price(100.0, 5.0, 5.0, Period::Years(1), Period::Years(10))?;
    /// assert!((price - 100.0).abs() < 1e-10);
    /// # Ok::<(), bondyield_bonds::BondError>(())
    /// ```
    pub fn price(
        face_value: f64,
        coupon_rate_pct: f64,
        annual_yield_pct: f64,
        coupon_period: Period,
        tenor: Period,
    ) -> BondResult<f64> {
        let cash_flows =
            CashFlowBuilder::build_for_pricing(face_value, coupon_rate_pct, coupon_period, tenor)?;
        let periodic_rate = annual_yield_pct * coupon_period.fraction_of_year() / 100.0;

        Self::price_cash_flows(&cash_flows, periodic_rate)
    }

    /// Discounts every flow after period 0 at `periodic_rate`.
    ///
    /// The flow at index 0 is ignored, so a sequence built with a market
    /// price can be priced as well.
    pub fn price_cash_flows(cash_flows: &CashFlowSequence, periodic_rate: f64) -> BondResult<f64> {
        let base = 1.0 + periodic_rate;
        if base.is_nan() || base <= 0.0 {
            return Err(BondError::Domain {
                rate: periodic_rate,
            });
        }

        let v = 1.0 / base;
        let mut factor = v;
        let mut price = 0.0;
        for amount in cash_flows.tail() {
            price += amount * factor;
            factor *= v;
        }

        Ok(price)
    }
}
