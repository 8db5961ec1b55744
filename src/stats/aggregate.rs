//! Aggregate statistics: monthly totals, hospitalization summary and the
//! case fatality ratio.

use crate::core::DailySeries;
use crate::utils::stats::finite_mean;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Total of a metric over one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

/// Sum a series by calendar month, in chronological order.
///
/// Every month the series touches appears in the output; absent values
/// contribute nothing, so a month with only absent observations totals zero.
pub fn monthly_totals(series: &DailySeries) -> Vec<MonthlyTotal> {
    let mut groups: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (date, value) in series.iter() {
        let entry = groups.entry((date.year(), date.month())).or_insert(0.0);
        if value.is_finite() {
            *entry += value;
        }
    }
    groups
        .into_iter()
        .map(|((year, month), total)| MonthlyTotal { year, month, total })
        .collect()
}

/// The month with the largest total; the earliest month wins ties.
pub fn peak_month(totals: &[MonthlyTotal]) -> Option<MonthlyTotal> {
    let mut peak: Option<MonthlyTotal> = None;
    for &candidate in totals {
        let replace = match peak {
            None => true,
            Some(current) => candidate.total > current.total,
        };
        if replace {
            peak = Some(candidate);
        }
    }
    peak
}

/// Summary of the weekly hospital admissions metric.
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalSummary {
    /// Mean over the present observations.
    pub mean: f64,
    /// Largest present observation.
    pub peak_value: f64,
    /// Date of the largest observation; the earliest such date on ties.
    pub peak_date: NaiveDate,
}

/// Summarize hospital admissions; `None` when nothing was observed.
pub fn hospital_summary(series: &DailySeries) -> Option<HospitalSummary> {
    let mean = finite_mean(series.values())?;

    let mut peak: Option<(NaiveDate, f64)> = None;
    for (date, value) in series.iter() {
        if !value.is_finite() {
            continue;
        }
        if peak.map_or(true, |(_, best)| value > best) {
            peak = Some((date, value));
        }
    }
    let (peak_date, peak_value) = peak?;

    Some(HospitalSummary {
        mean,
        peak_value,
        peak_date,
    })
}

/// Case fatality ratio in percent, over the entire series.
///
/// Undefined when no cases were recorded; exactly zero when deaths sum to
/// zero but cases do not.
pub fn case_fatality_ratio(cases: &DailySeries, deaths: &DailySeries) -> Option<f64> {
    let total_cases = cases.sum();
    if total_cases > 0.0 {
        Some(deaths.sum() / total_cases * 100.0)
    } else {
        None
    }
}
