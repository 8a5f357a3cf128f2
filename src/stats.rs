//! Descriptive statistics for a bucket of throughput values.

/// Rendered when a bucket holds no samples.
pub const EMPTY_STATS: &str = "0.0 ± 0.0";

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the unbiased (n - 1) sample standard deviation given a
/// pre-computed mean. Returns 0.0 for fewer than two values.
pub fn sample_stddev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Formats a bucket as `"<mean> ± <stddev>"`, both to two decimals.
pub fn calc_stats(values: &[f64]) -> String {
    if values.is_empty() {
        return EMPTY_STATS.to_string();
    }
    let avg = mean(values);
    let sd = sample_stddev(values, avg);
    format!("{avg:.2} ± {sd:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_normal_values() {
        assert_eq!(mean(&[50.0, 60.0]), 55.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_sample_stddev_uses_n_minus_one() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_stddev(&values, mean(&values));
        // Population stddev of this set is exactly 2.0.
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_calc_stats_empty() {
        assert_eq!(calc_stats(&[]), "0.0 ± 0.0");
    }

    #[test]
    fn test_calc_stats_single_value() {
        assert_eq!(calc_stats(&[42.123]), "42.12 ± 0.00");
    }

    #[test]
    fn test_calc_stats_two_values() {
        // stddev of [50, 60] with n - 1 = sqrt(50) = 7.0710...
        assert_eq!(calc_stats(&[50.0, 60.0]), "55.00 ± 7.07");
    }

    #[test]
    fn test_calc_stats_identical_values() {
        assert_eq!(calc_stats(&[100.0, 100.0, 100.0]), "100.00 ± 0.00");
    }
}
