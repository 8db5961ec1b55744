//! Analysis pipeline: descriptive report and case forecast for one region.

use crate::config::AnalysisConfig;
use crate::core::{DailySeries, Forecast};
use crate::error::Result;
use crate::models::ARIMA;
use crate::prepare::RegionData;
use crate::stats::{
    case_death_correlation, case_fatality_ratio, hospital_summary, monthly_totals, peak_month,
    trend_regression, CorrelationTest, HospitalSummary, MonthlyTotal, TrendRegression,
};

/// Correlation result paired with its significance call at the configured
/// threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationSummary {
    /// The underlying test.
    pub test: CorrelationTest,
    /// Whether the p-value clears the configured threshold.
    pub significant: bool,
}

/// Descriptive statistics for one region, computed in a single pass.
///
/// Every field that can be undefined on real data is an `Option`; missing
/// data never fails the report.
#[derive(Debug, Clone)]
pub struct StatReport {
    /// Case totals per calendar month, earliest first.
    pub monthly_cases: Vec<MonthlyTotal>,
    /// The month with the highest case total.
    pub peak_month: Option<MonthlyTotal>,
    /// Mean and peak of weekly hospital admissions.
    pub hospital: Option<HospitalSummary>,
    /// Rolling mean of daily cases.
    pub cases_rolling_avg: DailySeries,
    /// Rolling mean of daily deaths.
    pub deaths_rolling_avg: DailySeries,
    /// Correlation between the smoothed case and death series.
    pub correlation: Option<CorrelationSummary>,
    /// Case-fatality ratio in percent.
    pub cfr_percent: Option<f64>,
    /// OLS trend of daily cases against the day index.
    pub trend: Option<TrendRegression>,
}

/// Compute the descriptive report.
///
/// `target_year` in the config restricts monthly aggregation and the trend
/// regression to that calendar year; the remaining statistics always use the
/// full range.
pub fn analyze(data: &RegionData, config: &AnalysisConfig) -> StatReport {
    let scoped_cases = match config.target_year {
        Some(year) => data.new_cases.year(year),
        None => data.new_cases.clone(),
    };

    let monthly_cases = monthly_totals(&scoped_cases);
    let peak_month = peak_month(&monthly_cases);

    let correlation = case_death_correlation(&data.new_cases_smoothed, &data.new_deaths_smoothed)
        .map(|test| CorrelationSummary {
            significant: test.is_significant(config.significance_threshold),
            test,
        });

    StatReport {
        monthly_cases,
        peak_month,
        hospital: data
            .weekly_hosp_admissions
            .as_ref()
            .and_then(hospital_summary),
        cases_rolling_avg: data.new_cases.rolling_mean(config.rolling_window),
        deaths_rolling_avg: data.new_deaths.rolling_mean(config.rolling_window),
        correlation,
        cfr_percent: case_fatality_ratio(&data.new_cases, &data.new_deaths),
        trend: trend_regression(scoped_cases.values()),
    }
}

/// Fit the configured ARIMA model on the smoothed case series and forecast.
///
/// The training window holds the most recent `window_size` eligible points
/// of `new_cases_smoothed`. Estimation failures are returned as-is; no
/// fallback forecast is produced.
pub fn forecast_cases(data: &RegionData, config: &AnalysisConfig) -> Result<Forecast> {
    let window = data.new_cases_smoothed.training_window(config.window_size)?;
    let model = ARIMA::fit(&window, config.model)?;
    model.forecast(config.horizon)
}
