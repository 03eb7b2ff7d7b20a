//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of equations:
//!
//! - [`newton_raphson`]: Fast quadratic convergence when derivative is available
//! - [`bisection`]: Simple and reliable bracketing method
//! - [`hybrid`]: Newton-Raphson with bisection fallback for robust convergence
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Initial guess |
//!
//! *When bounds are provided or can be found by [`find_bracket`].
//!
//! # Domain bounds
//!
//! Functions such as a net present value `Σ cf[t] / (1 + r)^t` are only
//! defined above a lower bound (`r > -1`). Setting
//! [`SolverConfig::lower_bound`] makes Newton damp any step that would cross
//! the bound (halving the distance to it instead) and keeps bracket search
//! inside the domain.
//!
//! # Example: IRR of a bond
//!
//! ```rust
//! use bondyield_math::solvers::{hybrid, SolverConfig};
//!
//! // Pay 95 today, receive 5 for four years and 105 in year five.
//! let flows = [-95.0, 5.0, 5.0, 5.0, 5.0, 105.0];
//! let npv = |r: f64| {
//!     flows
//!         .iter()
//!         .enumerate()
//!         .map(|(t, cf)| cf / (1.0 + r).powi(t as i32))
//!         .sum::<f64>()
//! };
//! let d_npv = |r: f64| {
//!     flows
//!         .iter()
//!         .enumerate()
//!         .map(|(t, cf)| -(t as f64) * cf / (1.0 + r).powi(t as i32 + 1))
//!         .sum::<f64>()
//! };
//!
//! let config = SolverConfig::default().with_lower_bound(-1.0);
//! let result = hybrid(npv, d_npv, 0.1, None, &config).unwrap();
//! assert!(result.root > 0.05); // below par means yield above coupon
//! ```

mod bisection;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use hybrid::{find_bracket, hybrid};
pub use newton::newton_raphson;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default tolerance on the function value.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default relative tolerance on the step size.
pub const DEFAULT_STEP_TOLERANCE: f64 = 1e-9;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Derivatives smaller than this are treated as zero.
pub(crate) const MIN_DERIVATIVE: f64 = 1e-15;

/// Steps within this many ulps of the iterate are rounding noise.
const ROUNDING_ULPS: f64 = 4.0;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Convergence threshold on `|f(x)|`.
    pub tolerance: f64,
    /// Convergence threshold on `|step| / max(|x|, 1)`, or on the step
    /// relative to the distance to `lower_bound` near the bound.
    pub step_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Exclusive lower bound of the function domain, if any.
    pub lower_bound: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            step_tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower_bound: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the relative step tolerance.
    #[must_use]
    pub fn with_step_tolerance(mut self, step_tolerance: f64) -> Self {
        self.step_tolerance = step_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the exclusive lower bound of the domain.
    #[must_use]
    pub fn with_lower_bound(mut self, lower_bound: f64) -> Self {
        self.lower_bound = Some(lower_bound);
        self
    }

    /// Returns true if a step of `step` taken to reach `x` is small enough.
    ///
    /// The step is measured against `max(|x|, 1)`, or against the distance
    /// to [`lower_bound`](Self::lower_bound) when that is smaller. A step of a
    /// few ulps of `x` always counts: `x` cannot be resolved any further.
    pub(crate) fn step_converged(&self, step: f64, x: f64) -> bool {
        let mut scale = x.abs().max(1.0);
        if let Some(lower_bound) = self.lower_bound {
            scale = scale.min(x - lower_bound);
        }
        step.abs() <= self.step_tolerance * scale
            || step.abs() <= ROUNDING_ULPS * f64::EPSILON * x.abs()
    }
}

/// Algorithm that produced a [`SolverResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverMethod {
    /// Newton-Raphson iteration.
    Newton,
    /// Interval bisection.
    Bisection,
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverMethod::Newton => "Newton-Raphson",
            SolverMethod::Bisection => "Bisection",
        };
        write!(f, "{name}")
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// The algorithm that found the root.
    pub method: SolverMethod,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_step_tolerance(1e-7)
            .with_max_iterations(50)
            .with_lower_bound(-1.0);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert!((config.step_tolerance - 1e-7).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.lower_bound, Some(-1.0));
    }

    #[test]
    fn test_solver_config_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.max_iterations, 100);
        assert!(config.lower_bound.is_none());

        let config = SolverConfig::new(1e-6, 10);
        assert!((config.step_tolerance - DEFAULT_STEP_TOLERANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_step_converged_near_lower_bound() {
        let config = SolverConfig::default().with_lower_bound(-1.0);

        // 1e-9 is tiny next to |x| but half the distance to the bound.
        assert!(!config.step_converged(1e-9, -1.0 + 2e-9));
        assert!(config.step_converged(1e-18, -1.0 + 2e-9));
        assert!(SolverConfig::default().step_converged(1e-9, -1.0 + 2e-9));
    }

    #[test]
    fn test_solver_config_partial_deserialize() {
        let config: SolverConfig = serde_json::from_str(r#"{"max_iterations": 25}"#).unwrap();
        assert_eq!(config.max_iterations, 25);
        assert!((config.tolerance - DEFAULT_TOLERANCE).abs() < f64::EPSILON);
    }

    // ============ IRR-like Financial Tests ============

    fn npv(flows: &[f64], r: f64) -> f64 {
        flows
            .iter()
            .enumerate()
            .map(|(t, cf)| cf / (1.0 + r).powi(t as i32))
            .sum()
    }

    fn d_npv(flows: &[f64], r: f64) -> f64 {
        flows
            .iter()
            .enumerate()
            .map(|(t, cf)| -(t as f64) * cf / (1.0 + r).powi(t as i32 + 1))
            .sum()
    }

    #[test]
    fn test_irr_par_bond() {
        // Par bond: IRR equals the coupon rate
        let flows = [-100.0, 5.0, 5.0, 5.0, 5.0, 105.0];
        let config = SolverConfig::default().with_lower_bound(-1.0);

        let result = newton_raphson(
            |r| npv(&flows, r),
            |r| d_npv(&flows, r),
            0.1,
            &config,
        )
        .unwrap();

        assert_relative_eq!(result.root, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_irr_all_solvers_agree() {
        let flows = [-98.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 106.0];
        let f = |r: f64| npv(&flows, r);
        let df = |r: f64| d_npv(&flows, r);
        let config = SolverConfig::default().with_lower_bound(-1.0);

        let newton_result = newton_raphson(f, df, 0.1, &config).unwrap();
        let bisection_result = bisection(f, 0.0, 0.2, &config).unwrap();
        let hybrid_result = hybrid(f, df, 0.1, None, &config).unwrap();

        assert_relative_eq!(newton_result.root, bisection_result.root, epsilon = 1e-8);
        assert_relative_eq!(newton_result.root, hybrid_result.root, epsilon = 1e-10);
    }

    #[test]
    fn test_newton_faster_than_bisection() {
        let flows = [-95.0, 5.0, 5.0, 5.0, 5.0, 105.0];
        let f = |r: f64| npv(&flows, r);
        let df = |r: f64| d_npv(&flows, r);
        let config = SolverConfig::default();

        let newton_result = newton_raphson(f, df, 0.1, &config).unwrap();
        let bisection_result = bisection(f, 0.0, 0.2, &config).unwrap();

        assert!(newton_result.iterations <= bisection_result.iterations);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_hybrid_finds_square_roots(a in 0.01f64..1.0e4) {
                let f = |x: f64| x * x - a;
                let df = |x: f64| 2.0 * x;

                let result = hybrid(f, df, 1.0, Some((0.0, a.max(1.0))), &SolverConfig::default())
                    .unwrap();

                prop_assert!((result.root - a.sqrt()).abs() < 1e-8 * a.sqrt().max(1.0));
            }
        }
    }
}
