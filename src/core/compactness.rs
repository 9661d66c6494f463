use crate::core::room::RoomTable;
use crate::errors::CalculationError;

/// Relative compactness, `6 * V^(2/3) / A`.
///
/// `volume` in m3, `envelope_area` in m2. A cube scores 1.
pub fn relative_compactness(volume: f64, envelope_area: f64) -> Result<f64, CalculationError> {
    if !(envelope_area > 0.) {
        return Err(CalculationError::ZeroEnvelopeArea);
    }

    Ok(6. * volume.powf(2. / 3.) / envelope_area)
}

/// Relative compactness of the whole building, regardless of facade scope.
pub fn building_relative_compactness(rooms: &RoomTable) -> Result<f64, CalculationError> {
    relative_compactness(rooms.total_volume(), rooms.total_envelope_area())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(27., 54., 1.)]
    #[case(8., 24., 1.)]
    #[case(0., 10., 0.)]
    fn test_relative_compactness(#[case] volume: f64, #[case] area: f64, #[case] expected: f64) {
        assert_relative_eq!(relative_compactness(volume, area).unwrap(), expected);
    }

    #[test]
    fn test_elongated_box_is_less_compact_than_cube() {
        // 1 x 1 x 8 box with the same volume as a 2 m cube
        let elongated = relative_compactness(8., 2. + 4. * 8.).unwrap();
        assert!(elongated < relative_compactness(8., 24.).unwrap());
    }

    #[rstest]
    #[case(0.)]
    #[case(-1.)]
    #[case(f64::NAN)]
    fn test_zero_envelope_area_is_a_domain_error(#[case] area: f64) {
        assert_eq!(
            relative_compactness(10., area),
            Err(CalculationError::ZeroEnvelopeArea)
        );
    }

    #[test]
    fn test_empty_building() {
        assert_eq!(
            building_relative_compactness(&RoomTable::aggregate(&[])),
            Err(CalculationError::ZeroEnvelopeArea)
        );
    }
}
