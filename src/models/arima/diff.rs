//! Differencing and integration for ARIMA models.

/// Difference a series `d` times.
///
/// Each pass replaces the series with consecutive deltas and shortens it by
/// one. A series with fewer than `d + 1` points differences away to empty.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Capture the seeds needed to undo `d` rounds of differencing.
///
/// `seeds[k]` is the final value of the series after `k` differencing
/// passes. Feeding them to [`integrate`] turns forecasts made on the
/// differenced scale back into levels that continue the original series.
pub fn undifference_seeds(series: &[f64], d: usize) -> Vec<f64> {
    let mut seeds = Vec::with_capacity(d);
    let mut current = series.to_vec();
    for _ in 0..d {
        seeds.push(current.last().copied().unwrap_or(0.0));
        current = current.windows(2).map(|w| w[1] - w[0]).collect();
    }
    seeds
}

/// Integrate a differenced forecast back to the original scale.
///
/// Seeds are applied innermost first, so each cumulative-sum pass undoes one
/// differencing round. With `seeds` from [`undifference_seeds`] the result
/// picks up exactly where the training series left off.
pub fn integrate(differenced: &[f64], seeds: &[f64]) -> Vec<f64> {
    let mut result = differenced.to_vec();
    for &seed in seeds.iter().rev() {
        let mut cumsum = seed;
        for value in result.iter_mut() {
            cumsum += *value;
            *value = cumsum;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn difference_order_0() {
        let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(difference(&series, 0), series);
    }

    #[test]
    fn difference_order_1() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        assert_eq!(difference(&series, 1), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn difference_order_2() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        // First pass: [2, 3, 4, 5], second pass: [1, 1, 1]
        assert_eq!(difference(&series, 2), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn difference_constant_series() {
        let series = vec![5.0, 5.0, 5.0, 5.0];
        assert_eq!(difference(&series, 1), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn difference_short_series_empties() {
        assert!(difference(&[], 1).is_empty());
        assert!(difference(&[7.0], 1).is_empty());
        assert!(difference(&[7.0, 9.0], 3).is_empty());
    }

    #[test]
    fn seeds_record_last_value_per_level() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        // Level 0 ends at 15, its first difference [2, 3, 4, 5] ends at 5.
        assert_eq!(undifference_seeds(&series, 2), vec![15.0, 5.0]);
        assert!(undifference_seeds(&series, 0).is_empty());
    }

    #[test]
    fn integrate_reverses_single_difference() {
        let original = vec![10.0, 12.0, 15.0, 19.0, 24.0];
        let seeds = undifference_seeds(&original, 1);
        let forecast_diff = vec![6.0, 7.0];

        let integrated = integrate(&forecast_diff, &seeds);
        // Continues from the last level: 24 + 6 = 30, 30 + 7 = 37.
        assert_relative_eq!(integrated[0], 30.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 37.0, epsilon = 1e-10);
    }

    #[test]
    fn integrate_reverses_double_difference() {
        // Second difference of [1, 3, 6, 10, 15] is constant 1; continuing
        // that pattern gives deltas 6, 7 and levels 21, 28.
        let original = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        let seeds = undifference_seeds(&original, 2);

        let integrated = integrate(&[1.0, 1.0], &seeds);
        assert_relative_eq!(integrated[0], 21.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 28.0, epsilon = 1e-10);
    }

    #[test]
    fn integrate_without_seeds_is_cumulative_identity() {
        let diffs = vec![1.0, 2.0, 3.0];
        assert_eq!(integrate(&diffs, &[]), diffs);
    }
}
