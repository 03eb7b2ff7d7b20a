//! Hybrid root-finding algorithm.
//!
//! Combines Newton-Raphson with bisection for robust convergence.

use log::{debug, warn};

use crate::error::{MathError, MathResult};
use crate::solvers::{bisection, newton_raphson, SolverConfig, SolverResult};

/// Expansion steps tried by [`find_bracket`] before giving up.
const MAX_BRACKET_STEPS: u32 = 50;

/// Largest half-width [`find_bracket`] will search.
const MAX_BRACKET_WIDTH: f64 = 1e6;

/// Hybrid root-finding algorithm.
///
/// Starts with Newton-Raphson for fast quadratic convergence and falls back
/// to bisection when Newton fails (zero derivative, non-finite iterate, or an
/// exhausted iteration budget).
///
/// # Strategy
///
/// 1. Run Newton-Raphson from `initial_guess`
/// 2. On failure, bisect `bounds` if given
/// 3. Otherwise search for a bracket with [`find_bracket`] and bisect it
/// 4. If no bracket exists, return the Newton error
///
/// A seed outside [`SolverConfig::lower_bound`] fails immediately with
/// [`MathError::OutOfDomain`].
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for Newton iteration
/// * `bounds` - Optional bracketing interval for the bisection fallback
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use bondyield_math::solvers::{hybrid, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let newton_err = match newton_raphson(&f, &df, initial_guess, config) {
        Ok(result) => return Ok(result),
        // A seed outside the domain cannot seed a bracket search either.
        Err(err @ MathError::OutOfDomain { .. }) => return Err(err),
        Err(err) => err,
    };

    warn!("Newton-Raphson failed from {initial_guess} ({newton_err}), falling back to bisection");

    let bracket = bounds.or_else(|| find_bracket(&f, initial_guess, config.lower_bound));
    match bracket {
        Some((a, b)) => {
            debug!("bisecting bracket [{a}, {b}]");
            bisection(&f, a, b, config)
        }
        None => Err(newton_err),
    }
}

/// Attempts to find a bracketing interval for the root.
///
/// Expands outwards from the initial guess, doubling the step each time. When
/// `lower_bound` is given the left edge approaches it geometrically instead of
/// crossing it.
///
/// Returns `None` if no sign change is found.
///
/// ```rust
/// use bondyield_math::solvers::find_bracket;
///
/// let (a, b) = find_bracket(|x: f64| x - 3.0, 0.5, None).unwrap();
/// assert!(a <= 3.0 && 3.0 <= b);
/// ```
pub fn find_bracket<F>(f: F, initial_guess: f64, lower_bound: Option<f64>) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let f_init = f(initial_guess);
    if !f_init.is_finite() {
        return None;
    }
    if f_init == 0.0 {
        return Some((initial_guess, initial_guess));
    }

    let mut left = initial_guess;
    let mut right = initial_guess;
    let mut delta = 0.1;

    for _ in 0..MAX_BRACKET_STEPS {
        left = match lower_bound {
            Some(lb) => lb + (left - lb) / 2.0,
            None => left - delta,
        };
        right += delta;

        let f_left = f(left);
        let f_right = f(right);

        // Check if we've bracketed a root
        if f_left.is_finite() && f_left * f_init < 0.0 {
            return Some((left, initial_guess));
        }
        if f_right.is_finite() && f_right * f_init < 0.0 {
            return Some((initial_guess, right));
        }

        // Exponentially expand the search
        delta *= 2.0;

        // Don't search too far
        if delta > MAX_BRACKET_WIDTH {
            break;
        }
    }

    None
}
