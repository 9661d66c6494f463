pub fn min_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first < second {
        first
    } else {
        second
    }
}

pub fn max_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first > second {
        first
    } else {
        second
    }
}

/// Replace a value outside of `[lower, upper]` with the nearer bound.
pub(crate) fn clamp_to_bounds(value: f64, lower: f64, upper: f64) -> f64 {
    min_of_2(max_of_2(value, lower), upper)
}

/// Round to a given number of decimal places, half away from zero.
pub(crate) fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Divide, treating a zero (or non-finite) result as undefined.
pub(crate) fn divide_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0. {
        return 0.;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        0.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    pub fn should_calc_2_as_min_of_4_and_2_floats() {
        assert_eq!(min_of_2(4., 2.), 2.);
    }

    #[rstest]
    pub fn should_calc_4_as_max_of_2_and_4_ints() {
        assert_eq!(max_of_2(2, 4), 4);
    }

    #[rstest]
    #[case(0.9, 1.5)]
    #[case(1.5, 1.5)]
    #[case(3.2, 3.2)]
    #[case(5.8, 5.8)]
    #[case(7.1, 5.8)]
    fn should_clamp_to_nearer_bound(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(clamp_to_bounds(value, 1.5, 5.8), expected);
    }

    #[rstest]
    #[case(0.125, 2, 0.13)]
    #[case(1.0449, 2, 1.04)]
    #[case(-2.555, 1, -2.6)]
    fn should_round_to_places(#[case] value: f64, #[case] places: i32, #[case] expected: f64) {
        assert_eq!(round_to_places(value, places), expected);
    }

    #[test]
    fn should_give_zero_when_dividing_by_zero() {
        assert_eq!(divide_or_zero(2., 0.), 0.);
        assert_eq!(divide_or_zero(0., 0.), 0.);
        assert_eq!(divide_or_zero(3., 2.), 1.5);
    }
}
