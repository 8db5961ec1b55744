//! Linear trend regression over a daily metric.

use crate::utils::stats::mean;

/// Direction of a fitted trend. A slope of exactly zero counts as
/// decreasing ("not increasing").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

/// Ordinary least squares fit of metric value on zero-based day index.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRegression {
    /// Change in the metric per index step.
    pub slope: f64,
    /// Fitted value at index zero.
    pub intercept: f64,
    /// Coefficient of determination. NaN for the single-point degenerate
    /// fit; 0.0 for constant values over two or more points.
    pub r_squared: f64,
    /// Number of points in the fit.
    pub n: usize,
}

impl TrendRegression {
    /// Classify the fitted slope.
    pub fn direction(&self) -> TrendDirection {
        if self.slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    }
}

/// Fit `value = intercept + slope * index` over positional indices.
///
/// Indices are positions in the input, not calendar offsets, so gaps in the
/// underlying dates do not stretch the axis. `None` for an empty input; a
/// single point fits slope 0 with an undefined R².
pub fn trend_regression(values: &[f64]) -> Option<TrendRegression> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(TrendRegression {
            slope: 0.0,
            intercept: values[0],
            r_squared: f64::NAN,
            n,
        });
    }

    let mean_x = (n - 1) as f64 / 2.0;
    let mean_y = mean(values);

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    let mut ss_yy = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        ss_xx += dx * dx;
        ss_xy += dx * dy;
        ss_yy += dy * dy;
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    // Zero-variance input follows the r = 0 convention.
    let r_squared = if ss_yy == 0.0 {
        0.0
    } else {
        // 1 - ss_res/ss_yy with ss_res = ss_yy - slope * ss_xy
        ((slope * ss_xy) / ss_yy).clamp(0.0, 1.0)
    };

    Some(TrendRegression {
        slope,
        intercept,
        r_squared,
        n,
    })
}
