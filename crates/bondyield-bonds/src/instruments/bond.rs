//! Fixed coupon bullet bond.

use serde::{Deserialize, Serialize};

use bondyield_core::types::{CashFlowSequence, Period};

use crate::analytics::{self, BondMetrics, ONE_BASIS_POINT_PCT};
use crate::cashflows::CashFlowBuilder;
use crate::error::{BondError, BondResult};
use crate::pricing::{PricingEngine, YieldSolver};

/// Default market price of [`Bond::default`].
pub const DEFAULT_MARKET_PRICE: f64 = 990.0;

/// Default face value of [`Bond::default`].
pub const DEFAULT_FACE_VALUE: f64 = 1000.0;

/// Default annual coupon rate of [`Bond::default`], in percent.
pub const DEFAULT_COUPON_RATE_PCT: f64 = 3.0;

/// Default coupon period of [`Bond::default`].
pub const DEFAULT_COUPON_PERIOD: Period = Period::Years(1);

/// Default tenor of [`Bond::default`].
pub const DEFAULT_TENOR: Period = Period::Years(5);

/// A fixed coupon bullet bond quoted at a market price.
///
/// Parameters are validated on construction, so every metric method only
/// fails for numerical reasons (no convergence, domain).
///
/// # Example
///
/// ```rust
/// use bondyield_bonds::instruments::Bond;
/// use bondyield_core::types::Period;
///
/// let bond = Bond::new(900.0, 1000.0, 5.0, Period::Years(1), Period::Years(5))?;
/// assert_eq!(bond.cash_flows()?.as_slice(), &[-900.0, 50.0, 50.0, 50.0, 50.0, 1050.0]);
/// assert!((bond.ytm()? - 7.4697).abs() < 1e-4);
/// # Ok::<(), bondyield_bonds::BondError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BondSpec", into = "BondSpec")]
pub struct Bond {
    /// Price paid today.
    market_price: f64,

    /// Principal repaid at maturity.
    face_value: f64,

    /// Annual coupon rate in percent (5.0 = 5%).
    coupon_rate_pct: f64,

    /// Interval between coupons.
    coupon_period: Period,

    /// Time to maturity.
    tenor: Period,
}

impl Bond {
    /// Creates a bond after validating its parameters.
    ///
    /// # Errors
    ///
    /// - [`BondError::InvalidSpec`] if the market price or face value is not
    ///   positive, the coupon rate is negative, or a value is not finite
    /// - [`BondError::InvalidTenor`] / [`BondError::CoreError`] if the tenor is
    ///   not a whole number of coupon periods
    pub fn new(
        market_price: f64,
        face_value: f64,
        coupon_rate_pct: f64,
        coupon_period: Period,
        tenor: Period,
    ) -> BondResult<Self> {
        if !market_price.is_finite() || market_price <= 0.0 {
            return Err(BondError::invalid_spec("market price must be positive"));
        }
        if !face_value.is_finite() || face_value <= 0.0 {
            return Err(BondError::invalid_spec("face value must be positive"));
        }
        if !coupon_rate_pct.is_finite() || coupon_rate_pct < 0.0 {
            return Err(BondError::invalid_spec("coupon rate cannot be negative"));
        }

        CashFlowBuilder::coupon_count(coupon_period, tenor)?;

        Ok(Self {
            market_price,
            face_value,
            coupon_rate_pct,
            coupon_period,
            tenor,
        })
    }

    /// Returns a builder starting from the default bond.
    #[must_use]
    pub fn builder() -> BondBuilder {
        BondBuilder::new()
    }

    /// Returns the market price.
    #[must_use]
    pub fn market_price(&self) -> f64 {
        self.market_price
    }

    /// Returns the face value.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Returns the annual coupon rate in percent.
    #[must_use]
    pub fn coupon_rate_pct(&self) -> f64 {
        self.coupon_rate_pct
    }

    /// Returns the coupon period.
    #[must_use]
    pub fn coupon_period(&self) -> Period {
        self.coupon_period
    }

    /// Returns the tenor.
    #[must_use]
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Returns the amount of one coupon payment.
    #[must_use]
    pub fn coupon_amount(&self) -> f64 {
        CashFlowBuilder::coupon_amount(self.face_value, self.coupon_rate_pct, self.coupon_period)
    }

    /// Returns the number of coupons paid until maturity.
    pub fn coupon_count(&self) -> BondResult<u32> {
        CashFlowBuilder::coupon_count(self.coupon_period, self.tenor)
    }

    /// Returns `[-market_price, coupon, ..., coupon + face_value]`.
    pub fn cash_flows(&self) -> BondResult<CashFlowSequence> {
        CashFlowBuilder::build(
            self.market_price,
            self.face_value,
            self.coupon_rate_pct,
            self.coupon_period,
            self.tenor,
        )
    }

    /// Yield to maturity in annual percent.
    pub fn ytm(&self) -> BondResult<f64> {
        self.ytm_with(&YieldSolver::default())
    }

    /// Yield to maturity in annual percent, using the given solver.
    pub fn ytm_with(&self, solver: &YieldSolver) -> BondResult<f64> {
        solver.annualized_ytm(&self.cash_flows()?, self.coupon_period)
    }

    /// Realized compounded yield in annual percent, with coupons reinvested at
    /// `reinvestment_rate_pct`.
    ///
    /// See [`analytics::realized_compounded_yield`].
    pub fn rcy(&self, reinvestment_rate_pct: f64) -> BondResult<f64> {
        analytics::realized_compounded_yield(
            self.market_price,
            self.face_value,
            self.coupon_rate_pct,
            self.coupon_period,
            self.tenor,
            reinvestment_rate_pct,
        )
    }

    /// Price at a yield one basis point below the YTM.
    ///
    /// This is the re-priced value, not a difference from the market price.
    pub fn dv01(&self) -> BondResult<f64> {
        self.price_at_yield(self.ytm()? - ONE_BASIS_POINT_PCT)
    }

    /// Price of the bond at an annual yield in percent.
    pub fn price_at_yield(&self, annual_yield_pct: f64) -> BondResult<f64> {
        PricingEngine::price(
            self.face_value,
            self.coupon_rate_pct,
            annual_yield_pct,
            self.coupon_period,
            self.tenor,
        )
    }

    /// Computes YTM, RCY and DV01 in one call.
    pub fn metrics(&self, reinvestment_rate_pct: f64) -> BondResult<BondMetrics> {
        BondMetrics::calculate(
            self.market_price,
            self.face_value,
            self.coupon_rate_pct,
            self.coupon_period,
            self.tenor,
            reinvestment_rate_pct,
            &YieldSolver::default(),
        )
    }
}

impl Default for Bond {
    /// 990 paid for 1000 face, 3% annual coupon, 5 years.
    fn default() -> Self {
        Self {
            market_price: DEFAULT_MARKET_PRICE,
            face_value: DEFAULT_FACE_VALUE,
            coupon_rate_pct: DEFAULT_COUPON_RATE_PCT,
            coupon_period: DEFAULT_COUPON_PERIOD,
            tenor: DEFAULT_TENOR,
        }
    }
}

/// Serialized form of a [`Bond`], validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BondSpec {
    market_price: f64,
    face_value: f64,
    coupon_rate_pct: f64,
    coupon_period: Period,
    tenor: Period,
}

impl TryFrom<BondSpec> for Bond {
    type Error = BondError;

    fn try_from(spec: BondSpec) -> BondResult<Self> {
        Bond::new(
            spec.market_price,
            spec.face_value,
            spec.coupon_rate_pct,
            spec.coupon_period,
            spec.tenor,
        )
    }
}

impl From<Bond> for BondSpec {
    fn from(bond: Bond) -> Self {
        Self {
            market_price: bond.market_price,
            face_value: bond.face_value,
            coupon_rate_pct: bond.coupon_rate_pct,
            coupon_period: bond.coupon_period,
            tenor: bond.tenor,
        }
    }
}

/// Builder for bonds.
///
/// Unset fields keep the values of [`Bond::default`].
#[derive(Debug, Clone)]
pub struct BondBuilder {
    market_price: f64,
    face_value: f64,
    coupon_rate_pct: f64,
    coupon_period: Period,
    tenor: Period,
}

impl Default for BondBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BondBuilder {
    /// Creates a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            market_price: DEFAULT_MARKET_PRICE,
            face_value: DEFAULT_FACE_VALUE,
            coupon_rate_pct: DEFAULT_COUPON_RATE_PCT,
            coupon_period: DEFAULT_COUPON_PERIOD,
            tenor: DEFAULT_TENOR,
        }
    }

    /// Sets the market price.
    #[must_use]
    pub fn market_price(mut self, price: f64) -> Self {
        self.market_price = price;
        self
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, value: f64) -> Self {
        self.face_value = value;
        self
    }

    /// Sets the annual coupon rate (in percent, 5.0 = 5%).
    #[must_use]
    pub fn coupon_rate_pct(mut self, rate: f64) -> Self {
        self.coupon_rate_pct = rate;
        self
    }

    /// Sets the coupon period.
    #[must_use]
    pub fn coupon_period(mut self, period: Period) -> Self {
        self.coupon_period = period;
        self
    }

    /// Sets the tenor.
    #[must_use]
    pub fn tenor(mut self, tenor: Period) -> Self {
        self.tenor = tenor;
        self
    }

    /// Builds the bond.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`Bond::new`].
    pub fn build(self) -> BondResult<Bond> {
        Bond::new(
            self.market_price,
            self.face_value,
            self.coupon_rate_pct,
            self.coupon_period,
            self.tenor,
        )
    }
}
