//! Daily series with a calendar-date index and an explicit missing-value
//! policy.

use crate::error::{EpiError, Result};
use chrono::{Datelike, NaiveDate};

/// Policy for absent observations, fixed per metric at construction.
///
/// The policy is part of the series definition, never inferred from the
/// metric name at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPolicy {
    /// Absent observations become zero. Used for daily counts and
    /// cumulative totals, where a missing report means nothing was added.
    ZeroFill,
    /// Absent observations stay absent, carried as NaN. Used for smoothed
    /// and rate metrics, where zero would fabricate an observation.
    PreserveAbsent,
}

/// A named daily time series.
///
/// Dates are strictly increasing; calendar gaps are allowed. Values use NaN
/// as the absent marker, so an absent observation can never be read as zero.
#[derive(Debug, Clone)]
pub struct DailySeries {
    name: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    policy: FillPolicy,
}

impl DailySeries {
    /// Build a series from (date, optional value) observations.
    ///
    /// Dates must already be sorted; equal neighbours are rejected as
    /// duplicates, decreasing ones as out of order. Non-finite inputs are
    /// treated as absent and resolved through the policy.
    pub fn from_observations(
        name: impl Into<String>,
        policy: FillPolicy,
        observations: &[(NaiveDate, Option<f64>)],
    ) -> Result<Self> {
        let mut dates: Vec<NaiveDate> = Vec::with_capacity(observations.len());
        let mut values: Vec<f64> = Vec::with_capacity(observations.len());

        for &(date, value) in observations {
            if let Some(&prev) = dates.last() {
                if date == prev {
                    return Err(EpiError::DuplicateDate(date));
                }
                if date < prev {
                    return Err(EpiError::UnorderedDates { prev, next: date });
                }
            }
            dates.push(date);
            values.push(match value {
                Some(v) if v.is_finite() => v,
                _ => match policy {
                    FillPolicy::ZeroFill => 0.0,
                    FillPolicy::PreserveAbsent => f64::NAN,
                },
            });
        }

        Ok(Self {
            name: name.into(),
            dates,
            values,
            policy,
        })
    }

    /// Get the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the missing-value policy.
    pub fn policy(&self) -> FillPolicy {
        self.policy
    }

    /// Get the date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Get the values; absent observations are NaN.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of observations, absent ones included.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series has no observations at all.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterate over (date, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Get the first date, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Get the last date, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Count the present (non-absent) observations.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Sum of the present observations. Zero for an empty series.
    pub fn sum(&self) -> f64 {
        self.values.iter().filter(|v| v.is_finite()).sum()
    }

    /// Restrict the series to one calendar year.
    pub fn year(&self, year: i32) -> DailySeries {
        let (dates, values) = self
            .iter()
            .filter(|(date, _)| date.year() == year)
            .unzip();
        DailySeries {
            name: self.name.clone(),
            dates,
            values,
            policy: self.policy,
        }
    }

    /// Trailing rolling mean over `window` index positions.
    ///
    /// The result keeps this series' dates. The first `window - 1`
    /// positions, and any position whose window contains an absent value,
    /// are absent in the output.
    pub fn rolling_mean(&self, window: usize) -> DailySeries {
        DailySeries {
            name: format!("{}_{}day_avg", self.name, window),
            dates: self.dates.clone(),
            values: crate::stats::rolling::rolling_mean(&self.values, window),
            policy: FillPolicy::PreserveAbsent,
        }
    }

    /// Extract the most recent eligible points for model fitting.
    ///
    /// Eligible points are present and strictly positive. At most `size`
    /// points are taken from the end of the eligible subsequence; when fewer
    /// exist, all of them are used and the shortfall is recorded on the
    /// window.
    pub fn training_window(&self, size: usize) -> Result<TrainingWindow> {
        if size == 0 {
            return Err(EpiError::InvalidArgument(
                "window size must be positive".to_string(),
            ));
        }

        let eligible: Vec<(NaiveDate, f64)> = self
            .iter()
            .filter(|(_, v)| v.is_finite() && *v > 0.0)
            .collect();
        if eligible.is_empty() {
            return Err(EpiError::EmptySeries(self.name.clone()));
        }

        let start = eligible.len().saturating_sub(size);
        let (dates, values) = eligible[start..].iter().copied().unzip();
        Ok(TrainingWindow {
            dates,
            values,
            requested: size,
        })
    }
}

/// The most recent eligible points of a series, ready for model fitting.
///
/// Never empty: extraction fails with `EmptySeries` instead. Values are
/// strictly positive with no absent entries; dates carry over from the
/// source series and keep whatever calendar gaps it had.
#[derive(Debug, Clone)]
pub struct TrainingWindow {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    requested: usize,
}

impl TrainingWindow {
    /// Get the number of points in the window.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// A window constructed through `training_window` is never empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the window values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the window dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The last (most recent) date in the window.
    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// How many points were requested at extraction.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// How many points short of the request the window came up.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.len())
    }

    /// Whether fewer points than requested were available.
    pub fn is_short(&self) -> bool {
        self.shortfall() > 0
    }
}
