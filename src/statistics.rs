/// A simple statistics module with utility functions for area-weighted aggregation.
use crate::compare_floats::divide_or_zero;

/// Weighted mean of `(value, weight)` pairs. Gives 0 when the weights sum to 0.
pub fn weighted_mean(pairs: impl IntoIterator<Item = (f64, f64)>) -> f64 {
    let (weighted_sum, total_weight) = pairs
        .into_iter()
        .fold((0., 0.), |(sum, total), (value, weight)| {
            (sum + value * weight, total + weight)
        });

    divide_or_zero(weighted_sum, total_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn pairs() -> [(f64, f64); 4] {
        [(0.5, 8.), (0.7, 10.), (1.0, 0.), (0.25, 2.)]
    }

    #[rstest]
    fn test_weighted_mean(pairs: [(f64, f64); 4]) {
        assert_relative_eq!(weighted_mean(pairs), 11.5 / 20.);
    }

    #[rstest]
    fn test_weighted_mean_without_weight() {
        assert_eq!(weighted_mean([(3., 0.), (4., 0.)]), 0.);
        assert_eq!(weighted_mean([]), 0.);
    }
}
