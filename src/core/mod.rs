//! Core data structures for daily epidemiological series and forecasts.

mod forecast;
mod series;

pub use forecast::Forecast;
pub use series::{DailySeries, FillPolicy, TrainingWindow};
