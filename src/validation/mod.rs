//! Diagnostics for fitted models.

mod residuals;

pub use residuals::{ljung_box, LjungBoxTest};
