//! Series preparation: raw tabular rows into per-metric daily series.

use chrono::NaiveDate;

use crate::core::{DailySeries, FillPolicy};
use crate::error::{EpiError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One raw row as delivered by the data loader.
///
/// Only the date is required; metric cells may be empty. Rows may arrive in
/// any order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// Calendar day in `YYYY-MM-DD` form.
    pub date: String,
    pub new_cases: Option<f64>,
    pub new_deaths: Option<f64>,
    pub new_cases_smoothed: Option<f64>,
    pub new_deaths_smoothed: Option<f64>,
    pub weekly_hosp_admissions: Option<f64>,
}

/// Prepared per-metric series for one region.
///
/// Count metrics are zero-filled, smoothed metrics keep absent values, and
/// the hospital series is only carried when it has at least one observation.
#[derive(Debug, Clone)]
pub struct RegionData {
    pub region: String,
    pub new_cases: DailySeries,
    pub new_deaths: DailySeries,
    pub new_cases_smoothed: DailySeries,
    pub new_deaths_smoothed: DailySeries,
    pub weekly_hosp_admissions: Option<DailySeries>,
}

/// Convert raw rows into a [`RegionData`].
///
/// Every date must parse; one bad date fails the whole step, since a series
/// with a broken chronology cannot be windowed. Rows are sorted by date and
/// duplicate dates are rejected.
pub fn prepare_region(region: impl Into<String>, rows: &[RawRow]) -> Result<RegionData> {
    let mut parsed: Vec<(NaiveDate, &RawRow)> = Vec::with_capacity(rows.len());
    for row in rows {
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|e| {
            EpiError::Parse {
                input: row.date.clone(),
                reason: e.to_string(),
            }
        })?;
        parsed.push((date, row));
    }
    parsed.sort_by_key(|(date, _)| *date);

    let weekly_hosp_admissions = {
        let series = series_of(
            &parsed,
            "weekly_hosp_admissions",
            FillPolicy::PreserveAbsent,
            |row| row.weekly_hosp_admissions,
        )?;
        (series.present_count() > 0).then_some(series)
    };

    Ok(RegionData {
        region: region.into(),
        new_cases: series_of(&parsed, "new_cases", FillPolicy::ZeroFill, |row| {
            row.new_cases
        })?,
        new_deaths: series_of(&parsed, "new_deaths", FillPolicy::ZeroFill, |row| {
            row.new_deaths
        })?,
        new_cases_smoothed: series_of(
            &parsed,
            "new_cases_smoothed",
            FillPolicy::PreserveAbsent,
            |row| row.new_cases_smoothed,
        )?,
        new_deaths_smoothed: series_of(
            &parsed,
            "new_deaths_smoothed",
            FillPolicy::PreserveAbsent,
            |row| row.new_deaths_smoothed,
        )?,
        weekly_hosp_admissions,
    })
}

fn series_of(
    parsed: &[(NaiveDate, &RawRow)],
    name: &str,
    policy: FillPolicy,
    field: impl Fn(&RawRow) -> Option<f64>,
) -> Result<DailySeries> {
    let observations: Vec<(NaiveDate, Option<f64>)> = parsed
        .iter()
        .map(|(date, row)| (*date, field(row)))
        .collect();
    DailySeries::from_observations(name, policy, &observations)
}
