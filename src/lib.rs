//! # epi-forecast
//!
//! Descriptive statistics and short-horizon ARIMA forecasting for daily
//! epidemiological time series.
//!
//! Raw rows for a region are prepared into per-metric daily series with
//! explicit missing-value policies. Two independent consumers then run over
//! the prepared data: a descriptive report (monthly aggregation, rolling
//! averages, case/death correlation, case-fatality ratio, trend regression)
//! and an ARIMA(p,d,q) forecast of the smoothed case series.
//!
//! ```
//! use epi_forecast::prelude::*;
//!
//! let rows: Vec<RawRow> = (1..=28)
//!     .map(|day| RawRow {
//!         date: format!("2021-03-{day:02}"),
//!         new_cases: Some(50.0 + day as f64),
//!         new_deaths: Some(1.0),
//!         new_cases_smoothed: Some(50.0 + day as f64),
//!         new_deaths_smoothed: Some(1.0),
//!         ..Default::default()
//!     })
//!     .collect();
//!
//! let data = prepare_region("Andorra", &rows)?;
//!
//! let report = analyze(&data, &AnalysisConfig::default());
//! assert!(report.cfr_percent.is_some());
//!
//! let forecast = forecast_cases(&data, &AnalysisConfig::default().with_horizon(7))?;
//! assert_eq!(forecast.horizon(), 7);
//! # Ok::<(), EpiError>(())
//! ```

#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod prepare;
pub mod stats;
pub mod utils;
pub mod validation;

pub use error::{EpiError, Result};

pub mod prelude {
    pub use crate::analysis::{analyze, forecast_cases, CorrelationSummary, StatReport};
    pub use crate::config::AnalysisConfig;
    pub use crate::core::{DailySeries, FillPolicy, Forecast, TrainingWindow};
    pub use crate::error::{EpiError, Result};
    pub use crate::models::{ARIMASpec, ARIMA};
    pub use crate::prepare::{prepare_region, RawRow, RegionData};
}
