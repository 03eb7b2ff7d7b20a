//! Yield and risk metrics for bullet bonds.
//!
//! - [`yield_to_maturity`]: IRR of the bond's cash flows, annualized
//! - [`realized_compounded_yield`]: closed-form horizon yield with coupons
//!   reinvested at a fixed rate
//! - [`dv01`]: price at a yield 1bp below the YTM
//! - [`BondMetrics`]: all three in one value

use log::debug;
use serde::{Deserialize, Serialize};

use bondyield_core::types::Period;

use crate::cashflows::CashFlowBuilder;
use crate::error::{BondError, BondResult};
use crate::pricing::{PricingEngine, YieldSolver};

/// One basis point, in percent.
pub const ONE_BASIS_POINT_PCT: f64 = 0.01;

/// Yield metrics of a bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondMetrics {
    /// Yield to maturity, annual percent.
    pub ytm: f64,
    /// Realized compounded yield at `reinvestment_rate_pct`, annual percent.
    pub rcy: f64,
    /// Price at `ytm - 0.01`.
    pub dv01: f64,
    /// Reinvestment rate used for `rcy`, annual percent.
    pub reinvestment_rate_pct: f64,
}

impl BondMetrics {
    /// Computes YTM, RCY and DV01 for a bond described by its parameters.
    ///
    /// The yield is solved once and reused for DV01.
    pub fn calculate(
        market_price: f64,
        face_value: f64,
        coupon_rate_pct: f64,
        coupon_period: Period,
        tenor: Period,
        reinvestment_rate_pct: f64,
        solver: &YieldSolver,
    ) -> BondResult<Self> {
        let ytm = yield_to_maturity_with(
            market_price,
            face_value,
            coupon_rate_pct,
            coupon_period,
            tenor,
            solver,
        )?;
        let rcy = realized_compounded_yield(
            market_price,
            face_value,
            coupon_rate_pct,
            coupon_period,
            tenor,
            reinvestment_rate_pct,
        )?;
        let dv01 = PricingEngine::price(
            face_value,
            coupon_rate_pct,
            ytm - ONE_BASIS_POINT_PCT,
            coupon_period,
            tenor,
        )?;

        Ok(Self {
            ytm,
            rcy,
            dv01,
            reinvestment_rate_pct,
        })
    }
}

/// Yield to maturity in annual percent, using the default [`YieldSolver`].
///
/// # Example
///
/// ```rust
/// use bondyield_bonds::analytics::yield_to_maturity;
/// use bondyield_core::types::Period;
///
/// let ytm = yield_to_maturity(100.0, 100.0, 4.0, Period::Months(6), Period::Years(3))?;
/// assert!((ytm - 4.0).abs() < 1e-8);
/// # Ok::<(), bondyield_bonds::BondError>(())
/// ```
pub fn yield_to_maturity(
    market_price: f64,
    face_value: f64,
    coupon_rate_pct: f64,
    coupon_period: Period,
    tenor: Period,
) -> BondResult<f64> {
    yield_to_maturity_with(
        market_price,
        face_value,
        coupon_rate_pct,
        coupon_period,
        tenor,
        &YieldSolver::default(),
    )
}

/// Yield to maturity in annual percent, using the given solver.
pub fn yield_to_maturity_with(
    market_price: f64,
    face_value: f64,
    coupon_rate_pct: f64,
    coupon_period: Period,
    tenor: Period,
    solver: &YieldSolver,
) -> BondResult<f64> {
    let cash_flows =
        CashFlowBuilder::build(market_price, face_value, coupon_rate_pct, coupon_period, tenor)?;
    solver.annualized_ytm(&cash_flows, coupon_period)
}

/// Realized compounded yield in annual percent.
///
/// Coupons are reinvested until maturity at `reinvestment_rate_pct`:
///
/// ```text
/// g   = 1 + reinvestment_rate_pct * frac / 100
/// FV  = Σ_{i=0}^{n-1} coupon * g^i + face_value
/// RCY = ((FV / market_price)^(1/n) - 1) * 100 / frac
/// ```
///
/// Reinvesting at the YTM gives back the YTM.
///
/// # Errors
///
/// - [`BondError::InvalidSpec`] if the market price is not positive or an
///   input is not finite
/// - [`BondError::Domain`] if the periodic reinvestment rate is -100% or lower
/// - the errors of [`CashFlowBuilder::coupon_count`]
pub fn realized_compounded_yield(
    market_price: f64,
    face_value: f64,
    coupon_rate_pct: f64,
    coupon_period: Period,
    tenor: Period,
    reinvestment_rate_pct: f64,
) -> BondResult<f64> {
    if !market_price.is_finite() || market_price <= 0.0 {
        return Err(BondError::invalid_spec("market price must be positive"));
    }
    for (name, value) in [
        ("face value", face_value),
        ("coupon rate", coupon_rate_pct),
        ("reinvestment rate", reinvestment_rate_pct),
    ] {
        if !value.is_finite() {
            return Err(BondError::invalid_spec(format!("{name} must be finite")));
        }
    }

    let n = CashFlowBuilder::coupon_count(coupon_period, tenor)?;

    let frac = coupon_period.fraction_of_year();
    let periodic_rate = reinvestment_rate_pct * frac / 100.0;
    let growth = 1.0 + periodic_rate;
    if growth <= 0.0 {
        return Err(BondError::Domain {
            rate: periodic_rate,
        });
    }

    let coupon = CashFlowBuilder::coupon_amount(face_value, coupon_rate_pct, coupon_period);

    let mut compounded = 1.0;
    let mut reinvested = 0.0;
    for _ in 0..n {
        reinvested += coupon * compounded;
        compounded *= growth;
    }
    let future_value = reinvested + face_value;

    let ratio = future_value / market_price;
    if ratio <= 0.0 {
        return Err(BondError::invalid_spec(
            "future value of the bond must be positive",
        ));
    }

    let rcy = (ratio.powf(1.0 / f64::from(n)) - 1.0) * 100.0 / frac;
    debug!("realized compounded yield {rcy:.6}% over {n} periods (future value {future_value:.6})");

    Ok(rcy)
}

/// Price of the bond at its YTM minus one basis point.
///
/// This is the re-priced value, not a price difference.
pub fn dv01(
    market_price: f64,
    face_value: f64,
    coupon_rate_pct: f64,
    coupon_period: Period,
    tenor: Period,
) -> BondResult<f64> {
    let ytm = yield_to_maturity(market_price, face_value, coupon_rate_pct, coupon_period, tenor)?;
    PricingEngine::price(
        face_value,
        coupon_rate_pct,
        ytm - ONE_BASIS_POINT_PCT,
        coupon_period,
        tenor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ytm_discount_bond() {
        let ytm =
            yield_to_maturity(900.0, 1000.0, 5.0, Period::Years(1), Period::Years(5)).unwrap();

        assert_relative_eq!(ytm, 7.469_655_116_395_14, epsilon = 1e-7);
    }

    #[test]
    fn test_rcy_at_coupon_rate_for_par_bond() {
        // A par bond reinvesting at its coupon rate earns the coupon rate.
        let rcy = realized_compounded_yield(
            100.0,
            100.0,
            6.0,
            Period::Years(1),
            Period::Years(10),
            6.0,
        )
        .unwrap();

        assert_relative_eq!(rcy, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rcy_reference() {
        let rcy = realized_compounded_yield(
            1000.0,
            1000.0,
            13.0,
            Period::Years(1),
            Period::Years(15),
            9.0,
        )
        .unwrap();

        assert!((rcy - 11.05).abs() < 0.01);
    }

    #[test]
    fn test_rcy_equals_ytm_when_reinvested_at_ytm() {
        let ytm =
            yield_to_maturity(900.0, 1000.0, 5.0, Period::Months(6), Period::Years(5)).unwrap();
        let rcy = realized_compounded_yield(
            900.0,
            1000.0,
            5.0,
            Period::Months(6),
            Period::Years(5),
            ytm,
        )
        .unwrap();

        assert_relative_eq!(rcy, ytm, epsilon = 1e-8);
    }

    #[test]
    fn test_rcy_zero_coupon() {
        let rcy =
            realized_compounded_yield(50.0, 100.0, 0.0, Period::Years(1), Period::Years(2), 5.0)
                .unwrap();

        assert_relative_eq!(rcy, (2.0_f64.sqrt() - 1.0) * 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rcy_rejects_non_positive_price() {
        let err = realized_compounded_yield(0.0, 100.0, 5.0, Period::Years(1), Period::Years(5), 3.0)
            .unwrap_err();

        assert!(matches!(err, BondError::InvalidSpec { .. }));
    }

    #[test]
    fn test_rcy_domain() {
        let err = realized_compounded_yield(
            100.0,
            100.0,
            5.0,
            Period::Years(1),
            Period::Years(5),
            -100.0,
        )
        .unwrap_err();

        assert_eq!(err, BondError::Domain { rate: -1.0 });
    }

    #[test]
    fn test_rcy_invalid_tenor() {
        let err = realized_compounded_yield(
            100.0,
            100.0,
            5.0,
            Period::Years(1),
            Period::Months(6),
            3.0,
        )
        .unwrap_err();

        assert!(matches!(err, BondError::InvalidTenor { .. }));
    }

    #[test]
    fn test_dv01_is_price_one_bp_lower() {
        let value = dv01(900.0, 1000.0, 5.0, Period::Years(1), Period::Years(5)).unwrap();
        let ytm =
            yield_to_maturity(900.0, 1000.0, 5.0, Period::Years(1), Period::Years(5)).unwrap();
        let expected =
            PricingEngine::price(1000.0, 5.0, ytm - 0.01, Period::Years(1), Period::Years(5))
                .unwrap();

        assert_relative_eq!(value, expected, epsilon = 1e-12);
        // A lower yield means a higher price.
        assert!(value > 900.0);
        assert!(value < 901.0);
    }

    #[test]
    fn test_metrics_calculate() {
        let metrics = BondMetrics::calculate(
            900.0,
            1000.0,
            5.0,
            Period::Years(1),
            Period::Years(5),
            4.0,
            &YieldSolver::default(),
        )
        .unwrap();

        assert_relative_eq!(metrics.ytm, 7.469_655_116_395_14, epsilon = 1e-7);
        assert!(metrics.rcy < metrics.ytm);
        assert!(metrics.dv01 > 900.0);
        assert_relative_eq!(metrics.reinvestment_rate_pct, 4.0);
    }
}
