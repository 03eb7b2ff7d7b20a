//! Internal rate of return solver for bond cash flows.
//!
//! Finds the periodic rate `r` that zeroes `Σ cf[t] / (1 + r)^t`, where
//! `cf[0]` is the (negative) price paid and the remaining flows are coupons
//! and principal.
//!
//! Newton-Raphson runs first from `r = 0.1`. Steps that would cross
//! `r = -1` (where the discount factor stops being positive) are damped. If
//! Newton fails the solver bisects a bracket found inside `r > -1`.
//!
//! Known limitation: sequences with several sign changes can have several
//! real roots, or none. The solver returns whichever root it reaches first
//! and reports [`BondError::NoConvergence`] when neither method finds one.
//!
//! # Example
//!
//! ```rust
//! use bondyield_bonds::cashflows::CashFlowBuilder;
//! use bondyield_bonds::pricing::YieldSolver;
//! use bondyield_core::types::Period;
//!
//! let cfs = CashFlowBuilder::build(100.0, 100.0, 5.0, Period::Years(1), Period::Years(5))?;
//! let ytm = YieldSolver::new().annualized_ytm(&cfs, Period::Years(1))?;
//! assert!((ytm - 5.0).abs() < 1e-8);
//! # Ok::<(), bondyield_bonds::BondError>(())
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use bondyield_core::types::{CashFlowSequence, Period};
use bondyield_core::CoreError;
use bondyield_math::solvers::{hybrid, SolverConfig, SolverMethod};

use crate::error::{BondError, BondResult};
use crate::pricing::npv::{npv_derivative_unchecked, npv_unchecked};

/// Periodic rates must stay strictly above this value.
pub const MIN_PERIODIC_RATE: f64 = -1.0;

/// Starting point of the Newton iteration.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.1;

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldResult {
    /// The periodic rate (as a fraction, e.g. 0.02 for 2%).
    pub rate: f64,
    /// Number of iterations to converge.
    pub iterations: u32,
    /// Final NPV residual (should be near zero).
    pub residual: f64,
    /// The algorithm that produced the rate.
    pub method: SolverMethod,
}

impl YieldResult {
    /// Annualizes the periodic rate and expresses it in percent.
    ///
    /// `rate * 100 / coupon_period.fraction_of_year()`
    ///
    /// # Errors
    ///
    /// [`BondError::CoreError`] if `coupon_period` has a zero count.
    pub fn annualized_pct(&self, coupon_period: Period) -> BondResult<f64> {
        coupon_period.validate()?;
        Ok(self.rate * 100.0 / coupon_period.fraction_of_year())
    }
}

/// Yield-to-maturity (IRR) solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldSolver {
    /// Solver configuration.
    config: SolverConfig,
    /// Initial periodic rate.
    initial_guess: f64,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldSolver {
    /// Creates a new yield solver with default settings.
    ///
    /// Default tolerance: 1e-10 on the NPV
    /// Default step tolerance: 1e-9 (relative)
    /// Default max iterations: 100
    /// Default initial guess: 0.1
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default().with_lower_bound(MIN_PERIODIC_RATE),
            initial_guess: DEFAULT_INITIAL_GUESS,
        }
    }

    /// Replaces the solver configuration.
    ///
    /// The domain bound `r > -1` is always enforced on top of it.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the solver tolerance on the NPV.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Sets the initial periodic rate.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the initial periodic rate.
    #[must_use]
    pub fn initial_guess(&self) -> f64 {
        self.initial_guess
    }

    /// Solves for the periodic rate that zeroes the NPV of `cash_flows`.
    ///
    /// # Errors
    ///
    /// - [`BondError::CoreError`] if the first flow is not negative or no
    ///   later flow is positive
    /// - [`BondError::NoConvergence`] if no root is found
    /// - [`BondError::Domain`] if the initial guess is not above -1
    pub fn solve(&self, cash_flows: &CashFlowSequence) -> BondResult<YieldResult> {
        if cash_flows.initial() >= 0.0 {
            return Err(CoreError::invalid_cash_flow(
                "initial flow must be negative (the price paid)",
            )
            .into());
        }
        if !cash_flows.tail().iter().any(|cf| *cf > 0.0) {
            return Err(
                CoreError::invalid_cash_flow("at least one later flow must be positive").into(),
            );
        }

        let lower_bound = self
            .config
            .lower_bound
            .map_or(MIN_PERIODIC_RATE, |lb| lb.max(MIN_PERIODIC_RATE));
        let config = self.config.with_lower_bound(lower_bound);

        let amounts = cash_flows.as_slice();
        let result = hybrid(
            |r| npv_unchecked(amounts, r),
            |r| npv_derivative_unchecked(amounts, r),
            self.initial_guess,
            None,
            &config,
        )
        .map_err(BondError::from)?;

        if result.method == SolverMethod::Bisection {
            warn!("yield solved by bracketing after Newton failed from {}", self.initial_guess);
        }
        debug!(
            "periodic yield {:.10} solved by {} in {} iterations (residual {:.2e})",
            result.root, result.method, result.iterations, result.residual
        );

        Ok(YieldResult {
            rate: result.root,
            iterations: result.iterations,
            residual: result.residual,
            method: result.method,
        })
    }

    /// Solves for the yield and annualizes it, in percent.
    ///
    /// `solve(cash_flows) * 100 / coupon_period.fraction_of_year()`
    ///
    /// The coupon period is validated before solving.
    pub fn annualized_ytm(
        &self,
        cash_flows: &CashFlowSequence,
        coupon_period: Period,
    ) -> BondResult<f64> {
        coupon_period.validate()?;
        self.solve(cash_flows)?.annualized_pct(coupon_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashflows::CashFlowBuilder;
    use approx::assert_relative_eq;

    fn sequence(amounts: &[f64]) -> CashFlowSequence {
        CashFlowSequence::new(amounts.to_vec()).unwrap()
    }

    #[test]
    fn test_par_bond_yields_coupon() {
        let cfs = sequence(&[-100.0, 5.0, 5.0, 5.0, 5.0, 105.0]);

        let result = YieldSolver::new().solve(&cfs).unwrap();

        assert_relative_eq!(result.rate, 0.05, epsilon = 1e-10);
        assert_eq!(result.method, SolverMethod::Newton);
        assert!(result.residual.abs() < 1e-8);
    }

    #[test]
    fn test_discount_bond() {
        let cfs = sequence(&[-900.0, 50.0, 50.0, 50.0, 50.0, 1050.0]);

        let result = YieldSolver::new().solve(&cfs).unwrap();

        assert_relative_eq!(result.rate, 0.074_696_551_163_951_4, epsilon = 1e-9);
        assert!(npv_unchecked(cfs.as_slice(), result.rate).abs() < 1e-8);
    }

    #[test]
    fn test_annualized_semi_annual() {
        let cfs =
            CashFlowBuilder::build(100.0, 100.0, 6.0, Period::Months(6), Period::Years(3)).unwrap();

        let ytm = YieldSolver::new()
            .annualized_ytm(&cfs, Period::Months(6))
            .unwrap();

        assert_relative_eq!(ytm, 6.0, epsilon = 1e-8);
    }

    #[test]
    fn test_negative_yield() {
        // Paying more than all future flows gives a negative rate.
        let cfs = sequence(&[-110.0, 1.0, 101.0]);

        let result = YieldSolver::new().solve(&cfs).unwrap();

        assert!(result.rate < 0.0);
        assert!(result.rate > MIN_PERIODIC_RATE);
        assert!(npv_unchecked(cfs.as_slice(), result.rate).abs() < 1e-8);
    }

    #[test]
    fn test_deep_discount_stays_in_domain() {
        // A near-worthless price pushes the yield far above the seed.
        let cfs = sequence(&[-1.0, 0.0, 0.0, 0.0, 0.0, 100.0]);

        let result = YieldSolver::new().solve(&cfs).unwrap();

        assert_relative_eq!(result.rate, 100.0_f64.powf(0.2) - 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_rejects_non_negative_initial_flow() {
        let cfs = sequence(&[0.0, 5.0, 105.0]);

        let err = YieldSolver::new().solve(&cfs).unwrap_err();

        assert!(matches!(
            err,
            BondError::CoreError(CoreError::InvalidCashFlow { .. })
        ));
    }

    #[test]
    fn test_rejects_no_positive_flow() {
        let cfs = sequence(&[-100.0, 0.0, -5.0]);

        assert!(YieldSolver::new().solve(&cfs).is_err());
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let cfs = sequence(&[-900.0, 50.0, 50.0, 50.0, 50.0, 1050.0]);
        let solver = YieldSolver::new()
            .with_max_iterations(1)
            .with_tolerance(1e-14);

        let err = solver.solve(&cfs).unwrap_err();

        assert!(matches!(err, BondError::NoConvergence { iterations: 1, .. }));
    }

    #[test]
    fn test_initial_guess_outside_domain() {
        let cfs = sequence(&[-100.0, 5.0, 105.0]);

        let err = YieldSolver::new()
            .with_initial_guess(-1.5)
            .solve(&cfs)
            .unwrap_err();

        assert_eq!(err, BondError::Domain { rate: -1.5 });
    }

    #[test]
    fn test_zero_count_coupon_period_rejected() {
        let cfs = sequence(&[-95.0, 5.0, 105.0]);

        let err = YieldSolver::new()
            .annualized_ytm(&cfs, Period::Weeks(0))
            .unwrap_err();

        assert!(matches!(
            err,
            BondError::CoreError(CoreError::InvalidPeriod { .. })
        ));

        let result = YieldSolver::new().solve(&cfs).unwrap();
        assert!(result.annualized_pct(Period::Months(0)).is_err());
        assert_relative_eq!(
            result.annualized_pct(Period::Months(6)).unwrap(),
            result.rate * 200.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_root_near_domain_bound_round_trips() {
        // Paying 1e8 for a single flow of 1 puts the rate 1e-8 above -100%.
        let cfs = sequence(&[-1.0e8, 1.0]);

        let result = YieldSolver::new().solve(&cfs).unwrap();

        assert!(result.rate > MIN_PERIODIC_RATE);
        assert_relative_eq!(1.0 / (1.0 + result.rate), 1.0e8, max_relative = 1e-6);
    }

    #[test]
    fn test_flat_npv_without_root() {
        // NPV peaks at r = 0.1 (the seed) with value -1/11, so the derivative
        // vanishes there and no rate zeroes it.
        let cfs = sequence(&[-1.0, 2.0, -1.1]);

        let err = YieldSolver::new().solve(&cfs).unwrap_err();

        assert!(matches!(err, BondError::NoConvergence { .. }));
    }

    #[test]
    fn test_builder_settings() {
        let solver = YieldSolver::new()
            .with_tolerance(1e-12)
            .with_max_iterations(42)
            .with_initial_guess(0.05);

        assert_eq!(solver.config().max_iterations, 42);
        assert_eq!(solver.config().lower_bound, Some(MIN_PERIODIC_RATE));
        assert_relative_eq!(solver.initial_guess(), 0.05);
    }
}
