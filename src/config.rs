//! Analysis configuration.
//!
//! One plain value object replaces scattered constants: window length,
//! model orders, horizon and thresholds all travel together and default to
//! the standard surveillance setup.

use crate::models::arima::ARIMASpec;

/// Configuration for an analysis run.
///
/// `Default` gives a 365-day training window, an ARIMA(5,1,0) model, a
/// 30-day forecast, 7-day rolling averages and a 5% significance threshold
/// with no target-year restriction.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Maximum number of eligible points in the training window.
    pub window_size: usize,
    /// ARIMA orders used for the case forecast.
    pub model: ARIMASpec,
    /// Number of days to forecast.
    pub horizon: usize,
    /// Width of the rolling-average window, in index positions.
    pub rolling_window: usize,
    /// Two-tailed p-value threshold for the correlation test.
    pub significance_threshold: f64,
    /// Restrict monthly aggregation and trend regression to one calendar
    /// year. `None` uses the full series range.
    pub target_year: Option<i32>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: 365,
            model: ARIMASpec::new(5, 1, 0),
            horizon: 30,
            rolling_window: 7,
            significance_threshold: 0.05,
            target_year: None,
        }
    }
}

impl AnalysisConfig {
    /// Restricts yearly statistics to the given calendar year.
    pub fn with_target_year(mut self, year: i32) -> Self {
        self.target_year = Some(year);
        self
    }

    /// Sets the forecast horizon in days.
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the ARIMA orders.
    pub fn with_model(mut self, model: ARIMASpec) -> Self {
        self.model = model;
        self
    }
}
