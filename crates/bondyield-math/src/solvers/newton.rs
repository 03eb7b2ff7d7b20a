//! Newton-Raphson root-finding algorithm.

use log::{debug, trace};

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverMethod, SolverResult, MIN_DERIVATIVE};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Stops when `|f(x)| < tolerance` or when an undamped step is below
/// `step_tolerance` relative to `max(|x|, 1)` (or to the distance to the
/// lower bound, if that is smaller).
///
/// When [`SolverConfig::lower_bound`] is set, a step that would land on or
/// below the bound is damped to half the remaining distance to it, so the
/// iterate stays inside the domain.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Errors
///
/// - [`MathError::OutOfDomain`] if the initial guess is not above the lower bound
/// - [`MathError::DivisionByZero`] if the derivative vanishes
/// - [`MathError::InvalidInput`] if the iteration produces a non-finite value
/// - [`MathError::ConvergenceFailed`] if the iteration budget is exhausted
///
/// # Example
///
/// ```rust
/// use bondyield_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if let Some(lower_bound) = config.lower_bound {
        if initial_guess <= lower_bound {
            return Err(MathError::out_of_domain(initial_guess, lower_bound));
        }
    }

    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        trace!("newton iteration {iteration}: x = {x:.12}, f(x) = {fx:.3e}");

        if !fx.is_finite() {
            return Err(MathError::invalid_input(format!(
                "function value at {x} is not finite"
            )));
        }

        // Check for convergence
        if fx.abs() < config.tolerance {
            debug!("newton converged to {x} after {iteration} iterations");
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                method: SolverMethod::Newton,
            });
        }

        let dfx = df(x);

        // Check for zero derivative
        if !dfx.is_finite() || dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let mut next = x - fx / dfx;
        let mut damped = false;

        if let Some(lower_bound) = config.lower_bound {
            if next <= lower_bound {
                next = x - (x - lower_bound) / 2.0;
                damped = true;
                debug!("newton step crossed domain bound {lower_bound}, damped to {next}");
            }
        }

        if !next.is_finite() {
            return Err(MathError::invalid_input("Newton produced non-finite value"));
        }

        let step = next - x;
        x = next;

        // A damped step says nothing about the distance to the root
        if !damped && config.step_converged(step, x) {
            let final_fx = f(x);
            debug!(
                "newton step converged to {x} after {} iterations",
                iteration + 1
            );
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: final_fx,
                method: SolverMethod::Newton,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_cube_root() {
        let f = |x: f64| x * x * x - 27.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_derivative_error() {
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 0.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }

    #[test]
    fn test_convergence_fail() {
        // No real root: x^2 + 1 keeps Newton bouncing around.
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;

        let config = SolverConfig::default().with_max_iterations(20);
        let result = newton_raphson(f, df, 0.5, &config);

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 20, .. })
        ));
    }

    #[test]
    fn test_initial_guess_outside_domain() {
        let f = |x: f64| x;
        let df = |_x: f64| 1.0;
        let config = SolverConfig::default().with_lower_bound(-1.0);

        let result = newton_raphson(f, df, -1.0, &config);

        assert!(matches!(result, Err(MathError::OutOfDomain { .. })));
    }

    #[test]
    fn test_step_damped_at_lower_bound() {
        // ln(1 + x) + 0.9 has its root at x = e^-0.9 - 1 ≈ -0.593.
        // From x = 3 the first Newton step lands far below -1.
        let f = |x: f64| (1.0 + x).ln() + 0.9;
        let df = |x: f64| 1.0 / (1.0 + x);
        let config = SolverConfig::default().with_lower_bound(-1.0);

        let result = newton_raphson(f, df, 3.0, &config).unwrap();

        assert_relative_eq!(result.root, (-0.9_f64).exp() - 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_root_close_to_lower_bound() {
        // 1 / (1 + x) = 1e8 puts the root 1e-8 above the bound. Newton is
        // damped about 27 times before it can step towards it.
        let f = |x: f64| 1.0 / (1.0 + x) - 1e8;
        let df = |x: f64| -1.0 / ((1.0 + x) * (1.0 + x));
        let config = SolverConfig::default().with_lower_bound(-1.0);

        let result = newton_raphson(f, df, 0.1, &config).unwrap();

        assert_relative_eq!(1.0 / (1.0 + result.root), 1e8, max_relative = 1e-6);
    }
}
