//! Bisection root-finding algorithm.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverMethod, SolverResult};

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints)
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - Lower bound of the bracket
/// * `b` - Upper bound of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use bondyield_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    if let Some(lower_bound) = config.lower_bound {
        if lo <= lower_bound {
            return Err(MathError::out_of_domain(lo, lower_bound));
        }
    }

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    // Check that root is bracketed
    if !f_lo.is_finite() || !f_hi.is_finite() || f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    // Handle case where endpoint is the root
    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
            method: SolverMethod::Bisection,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
            method: SolverMethod::Bisection,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = lo + (hi - lo) / 2.0;
        let f_mid = f(mid);

        // Check for convergence
        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.tolerance {
            debug!(
                "bisection converged to {mid} after {} iterations",
                iteration + 1
            );
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
                method: SolverMethod::Bisection,
            });
        }

        // Update bracket
        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = lo + (hi - lo) / 2.0;
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}
