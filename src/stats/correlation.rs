//! Pearson correlation with a two-tailed significance test.

use crate::core::DailySeries;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Pearson correlation between two paired inputs, with the two-tailed
/// p-value of a t-test on n - 2 degrees of freedom.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationTest {
    /// Correlation coefficient, in [-1, 1].
    pub coefficient: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
    /// Number of paired observations.
    pub n: usize,
}

impl CorrelationTest {
    /// Whether the correlation is significant at the given threshold.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Pearson correlation over paired slices.
///
/// Undefined (`None`) for fewer than 3 pairs, mismatched lengths, or zero
/// variance in either input. A coefficient of ±1 gives a p-value of 0.
pub fn pearson_test(x: &[f64], y: &[f64]) -> Option<CorrelationTest> {
    let n = x.len();
    if n != y.len() || n < 3 {
        return None;
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }
    if ss_xx == 0.0 || ss_yy == 0.0 {
        return None;
    }

    let r = (ss_xy / (ss_xx * ss_yy).sqrt()).clamp(-1.0, 1.0);
    let df = (n - 2) as f64;
    let p_value = if 1.0 - r * r <= f64::EPSILON {
        0.0
    } else {
        let t = r.abs() * (df / (1.0 - r * r)).sqrt();
        let dist = StudentsT::new(0.0, 1.0, df).ok()?;
        2.0 * (1.0 - dist.cdf(t))
    };

    Some(CorrelationTest {
        coefficient: r,
        p_value,
        n,
    })
}

/// Correlation between the smoothed case and death series.
///
/// Absent values are substituted with zero for this statistic only, so the
/// pairing covers the full shared date range. The two series must carry
/// identical date axes; otherwise the statistic is undefined.
pub fn case_death_correlation(
    cases: &DailySeries,
    deaths: &DailySeries,
) -> Option<CorrelationTest> {
    if cases.dates() != deaths.dates() {
        return None;
    }
    let zero_filled = |values: &[f64]| -> Vec<f64> {
        values
            .iter()
            .map(|v| if v.is_finite() { *v } else { 0.0 })
            .collect()
    };
    pearson_test(&zero_filled(cases.values()), &zero_filled(deaths.values()))
}
