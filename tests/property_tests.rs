//! Property-based tests for series handling, statistics and forecasting.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated daily series.

use chrono::{Duration, NaiveDate};
use epi_forecast::core::{DailySeries, FillPolicy};
use epi_forecast::models::{ARIMASpec, ARIMA};
use epi_forecast::stats::{pearson_test, rolling_mean};
use proptest::prelude::*;

/// Create a daily series from a vector of values, one per day.
fn make_series(values: &[f64]) -> DailySeries {
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let observations: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (start + Duration::days(i as i64), Some(*v)))
        .collect();
    DailySeries::from_observations("new_cases_smoothed", FillPolicy::PreserveAbsent, &observations)
        .unwrap()
}

/// Strategy for daily counts at realistic magnitudes.
/// Adds small variation so no window is constant, which fitting rejects.
fn positive_values(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(1.0..1000.0_f64, len).prop_map(|mut v| {
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 0.001;
            }
            v
        })
    })
}

/// Strategy for two equally long slices of paired observations.
fn paired_values(min_len: usize, max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (min_len..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(-1000.0..1000.0_f64, len),
            prop::collection::vec(-1000.0..1000.0_f64, len),
        )
    })
}

// =============================================================================
// Property: Forecast length and dates match the requested horizon
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn forecast_length_matches_horizon(
        values in positive_values(30, 100),
        horizon in 1usize..20
    ) {
        let series = make_series(&values);
        let window = series.training_window(values.len()).unwrap();
        let model = ARIMA::fit(&window, ARIMASpec::new(1, 0, 1)).unwrap();
        let forecast = model.forecast(horizon).unwrap();
        prop_assert_eq!(forecast.horizon(), horizon);
    }

    #[test]
    fn forecast_dates_continue_the_calendar(
        values in positive_values(30, 100),
        horizon in 1usize..20
    ) {
        let series = make_series(&values);
        let window = series.training_window(values.len()).unwrap();
        let model = ARIMA::fit(&window, ARIMASpec::new(1, 0, 1)).unwrap();
        let forecast = model.forecast(horizon).unwrap();

        let mut expected = window.last_date();
        for &date in forecast.dates() {
            expected += Duration::days(1);
            prop_assert_eq!(date, expected);
        }
    }
}

// =============================================================================
// Property: Forecast values are finite (not NaN or Inf)
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn differenced_forecasts_are_finite(
        values in positive_values(40, 120),
        horizon in 1usize..30
    ) {
        let series = make_series(&values);
        let window = series.training_window(values.len()).unwrap();
        let model = ARIMA::fit(&window, ARIMASpec::default()).unwrap();
        let forecast = model.forecast(horizon).unwrap();

        for &value in forecast.values() {
            prop_assert!(value.is_finite());
        }
    }
}

// =============================================================================
// Property: Prediction intervals bracket the point forecast and widen
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn intervals_bracket_the_point_forecast(
        values in positive_values(30, 80),
        horizon in 1usize..15
    ) {
        let series = make_series(&values);
        let window = series.training_window(values.len()).unwrap();
        let model = ARIMA::fit(&window, ARIMASpec::new(1, 1, 1)).unwrap();
        let forecast = model.forecast_with_intervals(horizon, 0.95).unwrap();

        let lower = forecast.lower().unwrap();
        let upper = forecast.upper().unwrap();
        for (h, &value) in forecast.values().iter().enumerate() {
            prop_assert!(lower[h] <= value + 1e-10);
            prop_assert!(value <= upper[h] + 1e-10);
        }
    }

    #[test]
    fn interval_width_never_shrinks_with_the_horizon(
        values in positive_values(30, 80),
        horizon in 2usize..15
    ) {
        let series = make_series(&values);
        let window = series.training_window(values.len()).unwrap();
        let model = ARIMA::fit(&window, ARIMASpec::new(1, 1, 1)).unwrap();
        let forecast = model.forecast_with_intervals(horizon, 0.95).unwrap();

        let lower = forecast.lower().unwrap();
        let upper = forecast.upper().unwrap();
        let widths: Vec<f64> = upper.iter().zip(lower).map(|(u, l)| u - l).collect();
        for pair in widths.windows(2) {
            prop_assert!(pair[1] >= pair[0] - 1e-10);
        }
    }
}

// =============================================================================
// Property: Fitting is deterministic
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn fitting_is_deterministic(values in positive_values(30, 80)) {
        let series = make_series(&values);
        let window = series.training_window(values.len()).unwrap();

        let first = ARIMA::fit(&window, ARIMASpec::new(1, 0, 1)).unwrap();
        let second = ARIMA::fit(&window, ARIMASpec::new(1, 0, 1)).unwrap();

        prop_assert_eq!(first.ar_coefficients(), second.ar_coefficients());
        prop_assert_eq!(first.ma_coefficients(), second.ma_coefficients());
        let first_forecast = first.forecast(10).unwrap();
        let second_forecast = second.forecast(10).unwrap();
        prop_assert_eq!(first_forecast.values(), second_forecast.values());
    }
}

// =============================================================================
// Property: Correlation coefficient and p-value stay in range
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn correlation_is_bounded_with_a_valid_p_value((x, y) in paired_values(3, 60)) {
        if let Some(test) = pearson_test(&x, &y) {
            prop_assert!((-1.0..=1.0).contains(&test.coefficient));
            prop_assert!((0.0..=1.0).contains(&test.p_value));
            prop_assert_eq!(test.n, x.len());
        }
    }
}

// =============================================================================
// Property: Rolling mean defines exactly the full windows
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn rolling_mean_defines_exactly_the_full_windows(
        values in positive_values(1, 80),
        window in 1usize..10
    ) {
        let means = rolling_mean(&values, window);
        prop_assert_eq!(means.len(), values.len());

        let defined = means.iter().filter(|m| m.is_finite()).count();
        let expected = values.len().saturating_sub(window - 1);
        prop_assert_eq!(defined, expected);

        if window <= values.len() {
            let tail: f64 =
                values[values.len() - window..].iter().sum::<f64>() / window as f64;
            let last = means[means.len() - 1];
            prop_assert!((last - tail).abs() <= 1e-6 * tail.abs().max(1.0));
        }
    }
}

// =============================================================================
// Property: Training windows take at most the requested points
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn training_window_takes_at_most_the_requested_points(
        values in positive_values(5, 120),
        size in 1usize..200
    ) {
        let series = make_series(&values);
        let window = series.training_window(size).unwrap();

        prop_assert_eq!(window.len(), size.min(values.len()));
        prop_assert_eq!(window.shortfall() > 0, values.len() < size);
        prop_assert_eq!(window.values(), &values[values.len() - window.len()..]);
    }
}
