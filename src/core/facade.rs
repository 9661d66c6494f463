//! Aggregation of vertical envelope areas by orientation over a selection of rooms.

use crate::compare_floats::{max_of_2, min_of_2};
use crate::core::orientation::{Orientation, OrientationScheme};
use crate::core::units::{as_percentage, NorthAngle, PERCENT_PER_UNIT};
use crate::errors::{CalculationError, CalculationWarning};
use crate::input::{BoundaryCondition, FaceType, RoomInput};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smartstring::alias::String;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, instrument, warn};

/// Which rooms contribute to the facade areas.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
pub enum FacadeScope {
    #[default]
    #[serde(rename = "Conditioned Zones", alias = "ConditionedZones")]
    #[strum(to_string = "Conditioned Zones", serialize = "ConditionedZones")]
    ConditionedZones,
    #[serde(rename = "Entire Building", alias = "EntireBuilding")]
    #[strum(to_string = "Entire Building", serialize = "EntireBuilding")]
    EntireBuilding,
}

impl FacadeScope {
    pub fn includes(&self, room: &RoomInput) -> bool {
        match self {
            FacadeScope::ConditionedZones => room.is_conditioned,
            FacadeScope::EntireBuilding => true,
        }
    }
}

/// Areas in m2 for one orientation. The ratio is a percentage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct OrientationRow {
    pub aperture_area: f64,
    /// Gross vertical face area, apertures included
    pub face_area: f64,
    pub exterior_wall_area: f64,
    pub window_to_wall_ratio: f64,
}

impl OrientationRow {
    fn from_areas(aperture_area: f64, face_area: f64) -> Self {
        Self {
            aperture_area,
            face_area,
            exterior_wall_area: max_of_2(face_area - aperture_area, 0.),
            window_to_wall_ratio: min_of_2(as_percentage(aperture_area, face_area), PERCENT_PER_UNIT),
        }
    }

    /// Window-to-wall ratio as a fraction in [0, 1]
    pub fn window_to_wall_fraction(&self) -> f64 {
        self.window_to_wall_ratio / PERCENT_PER_UNIT
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FacadeSummary {
    pub scope: FacadeScope,
    pub selected_rooms: Vec<String>,
    pub orientations: IndexMap<Orientation, OrientationRow>,
    /// Exterior roof area of the selected rooms, skylights included
    pub roof_area: f64,
    /// Floor area of the selected rooms in contact with outside air or the ground
    pub exposed_floor_area: f64,
    #[serde(skip)]
    warnings: Vec<CalculationWarning>,
}

impl FacadeSummary {
    /// Bucket the vertical exterior faces and apertures of the rooms selected by `scope`.
    ///
    /// Apertures without an orientation (no azimuth, or an azimuth of exactly zero) are treated
    /// as skylights and left out. Every orientation of the scheme gets a row, so orientations
    /// with no area report zeros.
    #[instrument(skip(rooms, scheme))]
    pub fn aggregate(
        rooms: &[RoomInput],
        scope: FacadeScope,
        north: NorthAngle,
        scheme: &OrientationScheme,
    ) -> Result<Self, CalculationError> {
        let selected = rooms.iter().filter(|room| scope.includes(room)).collect_vec();
        if selected.is_empty() {
            return Err(CalculationError::NoMatchingRooms { scope });
        }

        let mut warnings = vec![];
        let mut aperture_areas: IndexMap<Orientation, f64> =
            scheme.orientations().map(|o| (o, 0.)).collect();
        let mut face_areas = aperture_areas.clone();
        let mut roof_area = 0.;
        let mut exposed_floor_area = 0.;

        for room in &selected {
            for aperture in room.apertures.iter().filter(|a| a.is_oriented()) {
                if let Some(azimuth) = aperture.azimuth {
                    *aperture_areas
                        .entry(scheme.classify_azimuth(azimuth, north))
                        .or_default() += aperture.area;
                }
            }

            for face in &room.faces {
                match (face.face_type, face.boundary_condition) {
                    (FaceType::RoofCeiling, BoundaryCondition::Outdoors) => {
                        roof_area += face.area
                    }
                    (FaceType::Floor, BoundaryCondition::Outdoors | BoundaryCondition::Ground) => {
                        exposed_floor_area += face.area
                    }
                    (FaceType::RoofCeiling | FaceType::Floor, _) => {}
                    (_, BoundaryCondition::Outdoors) => match face.azimuth {
                        Some(azimuth) => {
                            *face_areas
                                .entry(scheme.classify_azimuth(azimuth, north))
                                .or_default() += face.area
                        }
                        None => {
                            let warning = CalculationWarning::FaceWithoutAzimuth {
                                room: room.identifier.to_string(),
                                face: face.identifier.as_ref().map(|id| id.to_string()),
                            };
                            warn!("{warning}");
                            warnings.push(warning);
                        }
                    },
                    _ => {}
                }
            }
        }

        let orientations: IndexMap<Orientation, OrientationRow> = face_areas
            .iter()
            .map(|(orientation, face_area)| {
                let aperture_area = aperture_areas[orientation];
                if aperture_area > *face_area
                    && !is_close!(aperture_area, *face_area, abs_tol = 1e-9)
                {
                    let warning = CalculationWarning::ApertureExceedsFacade {
                        orientation: *orientation,
                        excess_area: aperture_area - face_area,
                    };
                    warn!("{warning}");
                    warnings.push(warning);
                }
                (
                    *orientation,
                    OrientationRow::from_areas(aperture_area, *face_area),
                )
            })
            .collect();
        debug!(?orientations, roof_area, exposed_floor_area);

        Ok(Self {
            scope,
            selected_rooms: selected
                .iter()
                .map(|room| room.identifier.clone())
                .sorted()
                .dedup()
                .collect(),
            orientations,
            roof_area,
            exposed_floor_area,
            warnings,
        })
    }

    /// Row for an orientation. Orientations outside the scheme read as empty.
    pub fn row(&self, orientation: Orientation) -> OrientationRow {
        self.orientations
            .get(&orientation)
            .copied()
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> &[CalculationWarning] {
        &self.warnings
    }

    pub fn total_face_area(&self) -> f64 {
        self.orientations.values().map(|row| row.face_area).sum()
    }

    pub fn total_aperture_area(&self) -> f64 {
        self.orientations.values().map(|row| row.aperture_area).sum()
    }

    pub fn total_exterior_wall_area(&self) -> f64 {
        self.orientations
            .values()
            .map(|row| row.exterior_wall_area)
            .sum()
    }

    /// Whole-facade window-to-wall ratio, percent
    pub fn overall_window_to_wall_ratio(&self) -> f64 {
        min_of_2(
            as_percentage(self.total_aperture_area(), self.total_face_area()),
            PERCENT_PER_UNIT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ApertureInput, FaceInput};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn wall(area: f64, azimuth: Option<f64>) -> FaceInput {
        FaceInput {
            identifier: None,
            face_type: FaceType::Wall,
            boundary_condition: BoundaryCondition::Outdoors,
            area,
            azimuth,
        }
    }

    fn horizontal(face_type: FaceType, boundary_condition: BoundaryCondition, area: f64) -> FaceInput {
        FaceInput {
            identifier: None,
            face_type,
            boundary_condition,
            area,
            azimuth: None,
        }
    }

    fn window(area: f64, azimuth: Option<f64>) -> ApertureInput {
        ApertureInput {
            identifier: None,
            area,
            azimuth,
            parent_face_type: FaceType::Wall,
        }
    }

    #[fixture]
    fn rooms() -> Vec<RoomInput> {
        vec![
            RoomInput {
                identifier: "Office".into(),
                is_conditioned: true,
                program_type: "Office".into(),
                volume: 75.,
                faces: vec![
                    wall(10., Some(1.)),
                    wall(10., Some(90.)),
                    wall(10., Some(180.)),
                    wall(10., Some(270.)),
                    horizontal(FaceType::Floor, BoundaryCondition::Ground, 25.),
                    horizontal(FaceType::RoofCeiling, BoundaryCondition::Outdoors, 25.),
                ],
                apertures: vec![
                    window(2., Some(1.)),
                    window(3., Some(90.)),
                    ApertureInput {
                        identifier: None,
                        area: 1.,
                        azimuth: None,
                        parent_face_type: FaceType::RoofCeiling,
                    },
                ],
            },
            RoomInput {
                identifier: "Plant".into(),
                is_conditioned: false,
                program_type: "Plant".into(),
                volume: 30.,
                faces: vec![
                    wall(6., Some(180.)),
                    horizontal(FaceType::Floor, BoundaryCondition::Surface, 10.),
                ],
                apertures: vec![window(1., Some(180.))],
            },
        ]
    }

    #[rstest]
    fn test_conditioned_zones(rooms: Vec<RoomInput>) {
        let summary = FacadeSummary::aggregate(
            &rooms,
            FacadeScope::ConditionedZones,
            NorthAngle::default(),
            &OrientationScheme::default(),
        )
        .unwrap();

        assert_eq!(summary.selected_rooms, vec![String::from("Office")]);
        assert_eq!(
            summary.row(Orientation::North),
            OrientationRow {
                aperture_area: 2.,
                face_area: 10.,
                exterior_wall_area: 8.,
                window_to_wall_ratio: 20.,
            }
        );
        assert_eq!(summary.row(Orientation::East).window_to_wall_ratio, 30.);
        assert_eq!(summary.row(Orientation::South).window_to_wall_ratio, 0.);
        assert_eq!(summary.roof_area, 25.);
        assert_eq!(summary.exposed_floor_area, 25.);
        assert!(summary.warnings().is_empty());
    }

    #[rstest]
    fn test_entire_building(rooms: Vec<RoomInput>) {
        let summary = FacadeSummary::aggregate(
            &rooms,
            FacadeScope::EntireBuilding,
            NorthAngle::default(),
            &OrientationScheme::default(),
        )
        .unwrap();

        let south = summary.row(Orientation::South);
        assert_eq!(south.face_area, 16.);
        assert_eq!(south.aperture_area, 1.);
        assert_relative_eq!(south.window_to_wall_ratio, 6.25);
        assert_eq!(summary.exposed_floor_area, 25.);
        assert_eq!(summary.total_face_area(), 46.);
        assert_eq!(summary.total_aperture_area(), 6.);
    }

    #[rstest]
    fn test_rows_follow_scheme_order(rooms: Vec<RoomInput>) {
        let summary = FacadeSummary::aggregate(
            &rooms,
            FacadeScope::EntireBuilding,
            NorthAngle::default(),
            &OrientationScheme::default(),
        )
        .unwrap();

        assert_eq!(
            summary.orientations.keys().copied().collect_vec(),
            vec![
                Orientation::North,
                Orientation::East,
                Orientation::South,
                Orientation::West
            ]
        );
    }

    #[rstest]
    fn test_ratios_within_bounds_for_any_rotation(rooms: Vec<RoomInput>) {
        for north in (-180..=180).step_by(30) {
            let summary = FacadeSummary::aggregate(
                &rooms,
                FacadeScope::EntireBuilding,
                NorthAngle::new(north as f64).unwrap(),
                &OrientationScheme::default(),
            )
            .unwrap();
            for row in summary.orientations.values() {
                assert!((0. ..=100.).contains(&row.window_to_wall_ratio));
            }
            assert_relative_eq!(summary.total_face_area(), 46.);
        }
    }

    #[test]
    fn test_empty_selection_is_reported() {
        let rooms = vec![RoomInput {
            identifier: "Store".into(),
            is_conditioned: false,
            program_type: "Storage".into(),
            volume: 10.,
            faces: vec![wall(5., Some(90.))],
            apertures: vec![],
        }];

        assert_eq!(
            FacadeSummary::aggregate(
                &rooms,
                FacadeScope::ConditionedZones,
                NorthAngle::default(),
                &OrientationScheme::default(),
            ),
            Err(CalculationError::NoMatchingRooms {
                scope: FacadeScope::ConditionedZones
            })
        );
    }

    #[test]
    fn test_aperture_exceeding_facade_is_clamped() {
        let rooms = vec![RoomInput {
            identifier: "Atrium".into(),
            is_conditioned: true,
            program_type: "Lobby".into(),
            volume: 100.,
            faces: vec![wall(4., Some(180.))],
            apertures: vec![window(5., Some(180.))],
        }];

        let summary = FacadeSummary::aggregate(
            &rooms,
            FacadeScope::ConditionedZones,
            NorthAngle::default(),
            &OrientationScheme::default(),
        )
        .unwrap();

        let south = summary.row(Orientation::South);
        assert_eq!(south.exterior_wall_area, 0.);
        assert_eq!(south.window_to_wall_ratio, 100.);
        assert_eq!(
            summary.warnings(),
            &[CalculationWarning::ApertureExceedsFacade {
                orientation: Orientation::South,
                excess_area: 1.,
            }]
        );
    }

    #[test]
    fn test_vertical_face_without_azimuth_is_skipped() {
        let mut unoriented = wall(8., None);
        unoriented.identifier = Some("Wall_1".into());
        let rooms = vec![RoomInput {
            identifier: "Hall".into(),
            is_conditioned: true,
            program_type: "Circulation".into(),
            volume: 40.,
            faces: vec![unoriented, wall(8., Some(90.))],
            apertures: vec![],
        }];

        let summary = FacadeSummary::aggregate(
            &rooms,
            FacadeScope::ConditionedZones,
            NorthAngle::default(),
            &OrientationScheme::default(),
        )
        .unwrap();

        assert_eq!(summary.total_face_area(), 8.);
        assert_eq!(
            summary.warnings(),
            &[CalculationWarning::FaceWithoutAzimuth {
                room: "Hall".to_string(),
                face: Some("Wall_1".to_string()),
            }]
        );
    }

    #[rstest]
    #[case("Conditioned Zones", FacadeScope::ConditionedZones)]
    #[case("EntireBuilding", FacadeScope::EntireBuilding)]
    fn test_scope_from_label(#[case] label: &str, #[case] expected: FacadeScope) {
        assert_eq!(label.parse::<FacadeScope>().unwrap(), expected);
    }
}
