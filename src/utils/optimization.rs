//! Nelder-Mead simplex minimization for parameter estimation.

use std::cmp::Ordering;

// Standard simplex move coefficients: reflect 1, expand 2, contract 1/2,
// shrink 1/2.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Configuration for the Nelder-Mead minimizer.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the relative objective spread across the
    /// simplex, so the criterion is independent of the objective's scale.
    pub tolerance: f64,
    /// Relative step used to build the initial simplex.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

/// Outcome of a minimization run.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// The best point found.
    pub point: Vec<f64>,
    /// The objective value at that point.
    pub value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the simplex met the tolerance before the iteration budget.
    pub converged: bool,
}

struct Vertex {
    point: Vec<f64>,
    value: f64,
}

/// Minimize `objective` with the Nelder-Mead simplex method.
///
/// # Arguments
/// * `objective` - The function to minimize
/// * `initial` - Starting point
/// * `bounds` - Optional per-dimension (min, max) clamps
/// * `config` - Iteration budget and tolerances
///
/// # Returns
/// `NelderMeadResult` with the best point and convergence information.
/// Callers that require convergence must check the `converged` flag.
///
/// # Example
/// ```
/// use epi_forecast::utils::optimization::{nelder_mead, NelderMeadConfig};
///
/// // Minimize (x-2)^2 + (y-3)^2
/// let result = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
///     &[0.0, 0.0],
///     None,
///     NelderMeadConfig::default(),
/// );
///
/// assert!(result.converged);
/// assert!((result.point[0] - 2.0).abs() < 0.01);
/// assert!((result.point[1] - 3.0).abs() < 0.01);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return NelderMeadResult {
            point: vec![],
            value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let clamp = |mut point: Vec<f64>| -> Vec<f64> {
        if let Some(b) = bounds {
            for (x, &(lo, hi)) in point.iter_mut().zip(b) {
                *x = x.clamp(lo, hi);
            }
        }
        point
    };
    let eval = |point: Vec<f64>| -> Vertex {
        let value = objective(&point);
        Vertex { point, value }
    };

    // Initial simplex: the start point plus one perturbed vertex per
    // dimension.
    let mut simplex: Vec<Vertex> = Vec::with_capacity(n + 1);
    simplex.push(eval(clamp(initial.to_vec())));
    for i in 0..n {
        let mut point = initial.to_vec();
        point[i] += if initial[i].abs() > 1e-10 {
            config.initial_step * initial[i].abs()
        } else {
            config.initial_step
        };
        simplex.push(eval(clamp(point)));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        sort_by_value(&mut simplex);

        if relative_spread(simplex[0].value, simplex[n].value) < config.tolerance {
            converged = true;
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for vertex in &simplex[..n] {
            for (c, x) in centroid.iter_mut().zip(&vertex.point) {
                *c += x;
            }
        }
        for c in &mut centroid {
            *c /= n as f64;
        }

        // A collapsed simplex cannot make further progress.
        let scale = 1.0 + centroid.iter().map(|c| c * c).sum::<f64>().sqrt();
        if simplex
            .iter()
            .all(|v| distance(&v.point, &centroid) < config.tolerance * scale)
        {
            converged = true;
            break;
        }

        // With a reflection coefficient of 1, every move is a point on the
        // line through the centroid away from the worst vertex.
        let worst = simplex[n].point.clone();
        let trial = |t: f64| -> Vertex {
            let point = centroid
                .iter()
                .zip(&worst)
                .map(|(c, w)| c + t * (c - w))
                .collect();
            eval(clamp(point))
        };

        let reflected = trial(REFLECT);
        if reflected.value < simplex[0].value {
            let expanded = trial(EXPAND);
            simplex[n] = if expanded.value < reflected.value {
                expanded
            } else {
                reflected
            };
            continue;
        }
        if reflected.value < simplex[n - 1].value {
            simplex[n] = reflected;
            continue;
        }

        let contracted = if reflected.value < simplex[n].value {
            trial(CONTRACT)
        } else {
            trial(-CONTRACT)
        };
        if contracted.value < simplex[n].value.min(reflected.value) {
            simplex[n] = contracted;
            continue;
        }

        // Shrink every other vertex toward the best one.
        let best = simplex[0].point.clone();
        for vertex in simplex.iter_mut().skip(1) {
            let point = best
                .iter()
                .zip(&vertex.point)
                .map(|(b, x)| b + SHRINK * (x - b))
                .collect();
            *vertex = eval(clamp(point));
        }
    }

    sort_by_value(&mut simplex);
    let best = simplex.swap_remove(0);
    NelderMeadResult {
        point: best.point,
        value: best.value,
        iterations,
        converged,
    }
}

fn sort_by_value(simplex: &mut [Vertex]) {
    simplex.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
}

// Scale-free spread between the best and worst objective values. An exact
// tie, including 0 vs 0, spreads to zero.
fn relative_spread(best: f64, worst: f64) -> f64 {
    2.0 * (worst - best).abs() / (worst.abs() + best.abs() + 1e-12)
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quadratic_2d() {
        let result = nelder_mead(
            |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
            &[0.0, 0.0],
            None,
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.point[0], 2.0, epsilon = 1e-4);
        assert_relative_eq!(result.point[1], 3.0, epsilon = 1e-4);
        assert_relative_eq!(result.value, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rosenbrock_needs_larger_budget() {
        let config = NelderMeadConfig {
            max_iter: 5000,
            tolerance: 1e-10,
            ..Default::default()
        };

        let result = nelder_mead(
            |x| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2),
            &[0.0, 0.0],
            None,
            config,
        );

        assert_relative_eq!(result.point[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(result.point[1], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn convergence_is_scale_independent() {
        // Same quadratic scaled by 1e9; an absolute spread criterion would
        // stall at the floating-point resolution of the objective.
        let result = nelder_mead(
            |x| 1e9 * ((x[0] - 2.0).powi(2) + 1.0),
            &[10.0],
            None,
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.point[0], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn bounds_clamp_to_boundary() {
        // Minimum of (x-5)^2 constrained to [0, 3] sits on the boundary.
        let result = nelder_mead(
            |x| (x[0] - 5.0).powi(2),
            &[1.0],
            Some(&[(0.0, 3.0)]),
            NelderMeadConfig::default(),
        );

        assert_relative_eq!(result.point[0], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn starting_at_the_optimum_converges() {
        let result = nelder_mead(
            |x| (x[0] - 2.0).powi(2),
            &[2.0],
            None,
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.point[0], 2.0, epsilon = 1e-4);
    }

    #[test]
    fn empty_initial_point_does_not_converge() {
        let result = nelder_mead(|_| 0.0, &[], None, NelderMeadConfig::default());

        assert!(!result.converged);
        assert!(result.value.is_nan());
    }

    #[test]
    fn recovers_ar1_coefficient_from_least_squares() {
        // x_t = 0.6 x_{t-1} with a known start; the conditional
        // least-squares objective is minimized exactly at phi = 0.6.
        let mut series = vec![10.0];
        for t in 1..40 {
            series.push(0.6 * series[t - 1]);
        }

        let css = |params: &[f64]| {
            let phi = params[0];
            series
                .windows(2)
                .map(|w| (w[1] - phi * w[0]).powi(2))
                .sum::<f64>()
        };

        let result = nelder_mead(
            css,
            &[0.1],
            Some(&[(-0.99, 0.99)]),
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.point[0], 0.6, epsilon = 1e-3);
    }
}
