//! Descriptive statistics over daily series.
//!
//! Everything here is a pure function. Statistics are never errors: an
//! undefined result is `None` or an absent (NaN) value.

pub mod aggregate;
pub mod correlation;
pub mod regression;
pub mod rolling;

pub use aggregate::{
    case_fatality_ratio, hospital_summary, monthly_totals, peak_month, HospitalSummary,
    MonthlyTotal,
};
pub use correlation::{case_death_correlation, pearson_test, CorrelationTest};
pub use regression::{trend_regression, TrendDirection, TrendRegression};
pub use rolling::rolling_mean;
