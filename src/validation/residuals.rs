//! Residual diagnostics for fitted models.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::utils::stats::autocorrelation;

/// Ljung-Box portmanteau test for leftover autocorrelation in residuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LjungBoxTest {
    /// The Q statistic.
    pub statistic: f64,
    /// Right-tail chi-squared probability of a Q at least this large.
    pub p_value: f64,
    /// Number of lags included.
    pub lags: usize,
    /// Chi-squared degrees of freedom.
    pub df: usize,
}

impl LjungBoxTest {
    /// True when the test fails to reject independence at `alpha`.
    pub fn is_white_noise(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Run the Ljung-Box test on model residuals.
///
/// `fitted_params` is subtracted from the lag count to get the degrees of
/// freedom, floored at one; pass `p + q` for an ARIMA fit. The lag count is
/// capped at one below the residual length. Returns `None` when there are
/// too few residuals to test or any residual is not finite.
pub fn ljung_box(residuals: &[f64], lags: usize, fitted_params: usize) -> Option<LjungBoxTest> {
    let n = residuals.len();
    let lags = lags.min(n.saturating_sub(1));
    if n < 3 || lags == 0 {
        return None;
    }

    let mut q = 0.0;
    for k in 1..=lags {
        let r = autocorrelation(residuals, k);
        if !r.is_finite() {
            return None;
        }
        q += r * r / (n - k) as f64;
    }
    q *= n as f64 * (n as f64 + 2.0);

    let df = lags.saturating_sub(fitted_params).max(1);
    let chi = ChiSquared::new(df as f64).ok()?;
    let p_value = 1.0 - chi.cdf(q);

    Some(LjungBoxTest {
        statistic: q,
        p_value,
        lags,
        df,
    })
}
