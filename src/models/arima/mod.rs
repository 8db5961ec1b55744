//! ARIMA (Autoregressive Integrated Moving Average) modelling.
//!
//! Differencing utilities plus a conditional least-squares ARIMA fit with
//! calendar-aware forecasting.

mod diff;
mod model;

pub use diff::{difference, integrate, undifference_seeds};
pub use model::{ARIMASpec, ARIMA};
