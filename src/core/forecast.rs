//! Forecast result structure holding dated point predictions.

use crate::error::{EpiError, Result};
use chrono::NaiveDate;

/// A forecast: one predicted value per future calendar day, with optional
/// prediction intervals.
///
/// Dates are contiguous calendar days starting the day after the training
/// window ends; the constructor only checks that every parallel vector has
/// the same length.
#[derive(Debug, Clone, Default)]
pub struct Forecast {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create a forecast from parallel date and value vectors.
    pub fn from_values(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(EpiError::LengthMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            dates,
            values,
            lower: None,
            upper: None,
        })
    }

    /// Create a forecast with symmetric prediction intervals.
    pub fn from_values_with_intervals(
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Result<Self> {
        let n = dates.len();
        for len in [values.len(), lower.len(), upper.len()] {
            if len != n {
                return Err(EpiError::LengthMismatch {
                    expected: n,
                    got: len,
                });
            }
        }
        Ok(Self {
            dates,
            values,
            lower: Some(lower),
            upper: Some(upper),
        })
    }

    /// Get the forecast dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Get the point predictions.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Check if the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (date, prediction) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// First forecast date, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last forecast date, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Lower interval bounds, when present.
    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Upper interval bounds, when present.
    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    /// Whether prediction intervals are attached.
    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }
}
