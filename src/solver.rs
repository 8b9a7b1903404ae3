//! Bounded root-finders used by the TVM engine.
//!
//! Both solvers always stop within `max_iterations` and hand back their best
//! estimate with `converged: false` rather than failing, so a calculator
//! never hangs or errors on a pathological input. The only hard failure is a
//! flat derivative in Newton-Raphson, which callers answer by bisecting.

use log::{debug, trace};
use thiserror::Error;

/// Default maximum iterations for both solvers.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Errors that stop a solver before its iteration budget is spent.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SolverError {
    /// The numerical derivative is too close to zero for a Newton step.
    #[error("Derivative {derivative:.2e} at {x} is too flat for a Newton step")]
    FlatDerivative {
        /// Point where the derivative was taken.
        x: f64,
        /// The near-zero derivative.
        derivative: f64,
    },
}

/// Stopping rules for a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Stop once `|f(x)|` falls below this.
    pub tolerance: f64,
    /// Bisection also stops once the bracket is narrower than this.
    pub width_tolerance: f64,
    /// Hard cap on iterations.
    pub max_iterations: u32,
}

impl SolverConfig {
    /// Creates a configuration with no bracket-width stopping rule.
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            width_tolerance: 0.,
            max_iterations,
        }
    }

    /// Sets the bracket width below which bisection stops.
    pub fn with_width_tolerance(mut self, width_tolerance: f64) -> Self {
        self.width_tolerance = width_tolerance;
        self
    }
}

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// Best estimate of the root.
    pub root: f64,
    /// Iterations used.
    pub iterations: u32,
    /// `f(root)`.
    pub residual: f64,
    /// Whether a stopping rule was met before the budget ran out.
    pub converged: bool,
}

/// Bisection over `[a, b]` for a monotonic `f`.
///
/// Works whether `f` rises or falls across the interval. If the endpoints
/// do not bracket a root, the endpoint with the smaller residual is returned
/// unconverged.
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> SolverResult
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo.abs() < config.tolerance {
        return SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
            converged: true,
        };
    }
    if f_hi.abs() < config.tolerance {
        return SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
            converged: true,
        };
    }

    if f_lo * f_hi > 0. {
        debug!(
            "bisection: [{}, {}] does not bracket a root (f = {}, {})",
            lo, hi, f_lo, f_hi
        );
        let (root, residual) = if f_lo.abs() <= f_hi.abs() {
            (lo, f_lo)
        } else {
            (hi, f_hi)
        };
        return SolverResult {
            root,
            iterations: 0,
            residual,
            converged: false,
        };
    }

    for iteration in 1..=config.max_iterations {
        let mid = (lo + hi) / 2.;
        let f_mid = f(mid);
        trace!("bisection # {}, x {}, f(x) {}", iteration, mid, f_mid);

        if f_mid.abs() < config.tolerance {
            return SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
                converged: true,
            };
        }

        if f_mid * f_lo > 0. {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }

        if hi - lo < config.width_tolerance {
            let root = (lo + hi) / 2.;
            return SolverResult {
                root,
                iterations: iteration,
                residual: f(root),
                converged: true,
            };
        }
    }

    let root = (lo + hi) / 2.;
    let residual = f(root);
    debug!(
        "bisection: no convergence after {} iterations, returning {} (f = {})",
        config.max_iterations, root, residual
    );
    SolverResult {
        root,
        iterations: config.max_iterations,
        residual,
        converged: false,
    }
}

/// Newton-Raphson with a forward-difference derivative.
///
/// Each step is clamped to `bounds`. Returns
/// [`SolverError::FlatDerivative`] when `|f'(x)| < min_slope`; running out
/// of iterations returns the last estimate unconverged.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    bounds: (f64, f64),
    step: f64,
    min_slope: f64,
    config: &SolverConfig,
) -> Result<SolverResult, SolverError>
where
    F: Fn(f64) -> f64,
{
    let (lo, hi) = (bounds.0.min(bounds.1), bounds.0.max(bounds.1));
    let mut x = initial_guess.clamp(lo, hi);

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        trace!("newton # {}, x {}, f(x) {}", iteration, x, fx);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                converged: true,
            });
        }

        let derivative = (f(x + step) - fx) / step;
        if derivative.abs() < min_slope || !derivative.is_finite() {
            debug!("newton: derivative {} at {} too flat", derivative, x);
            return Err(SolverError::FlatDerivative { x, derivative });
        }

        x = (x - fx / derivative).clamp(lo, hi);
    }

    let residual = f(x);
    debug!(
        "newton: no convergence after {} iterations, returning {} (f = {})",
        config.max_iterations, x, residual
    );
    Ok(SolverResult {
        root: x,
        iterations: config.max_iterations,
        residual,
        converged: residual.abs() < config.tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_log::test;

    fn config() -> SolverConfig {
        SolverConfig::new(1e-10, DEFAULT_MAX_ITERATIONS)
    }

    #[test]
    fn test_bisection_sqrt_2() {
        let result = bisection(|x| x * x - 2., 1., 2., &config());

        assert!(result.converged);
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_bisection_decreasing_function() {
        let result = bisection(|x| 2. - x * x, 2., 1., &config());

        assert!(result.converged);
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_bisection_width_tolerance() {
        let cfg = SolverConfig::new(1e-12, DEFAULT_MAX_ITERATIONS).with_width_tolerance(0.001);
        let result = bisection(|x| x - 0.3, 0., 1000., &cfg);

        assert!(result.converged);
        assert!((result.root - 0.3).abs() < 0.001);
        assert!(result.iterations < 25);
    }

    #[test]
    fn test_bisection_endpoint_root() {
        let result = bisection(|x| x - 1., 1., 5., &config());
        assert_eq!(result.root, 1.);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_bisection_no_bracket() {
        // never crosses zero; nearest endpoint wins
        let result = bisection(|x| x * x + 1., 0.5, 3., &config());
        assert!(!result.converged);
        assert_eq!(result.root, 0.5);
    }

    #[test]
    fn test_bisection_budget_exhausted() {
        let cfg = SolverConfig::new(1e-300, 5);
        let result = bisection(|x| x - 0.123456, 0., 1., &cfg);

        assert!(!result.converged);
        assert_eq!(result.iterations, 5);
        assert!((result.root - 0.123456).abs() < 1. / 32.);
    }

    #[test]
    fn test_newton_sqrt_2() {
        let result =
            newton_raphson_numerical(|x| x * x - 2., 1.5, (0., 10.), 1e-7, 1e-9, &config())
                .unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }

    #[test]
    fn test_newton_clamps_to_bounds() {
        // the root at -3 lies outside the bounds, so the estimate pins at 0
        let result =
            newton_raphson_numerical(|x| x + 3., 1., (0., 10.), 1e-5, 1e-9, &config()).unwrap();

        assert!(!result.converged);
        assert_eq!(result.root, 0.);
    }

    #[test]
    fn test_newton_flat_derivative() {
        let err = newton_raphson_numerical(|_| 5., 1., (0., 10.), 1e-5, 1e-5, &config())
            .unwrap_err();

        assert_eq!(
            err,
            SolverError::FlatDerivative {
                x: 1.,
                derivative: 0.
            }
        );
    }

    #[test]
    fn test_zero_coupon_yield() {
        // 100 / (1 + y)^5 = 62.0921 at about 10%
        let f = |y: f64| 100. / (1. + y).powi(5) - 62.0921;
        let result = newton_raphson_numerical(f, 0.08, (-0.99, 10.), 1e-6, 1e-9, &config()).unwrap();

        assert_relative_eq!(result.root, 0.10, epsilon = 0.001);
    }
}
