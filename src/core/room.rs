use crate::compare_floats::max_of_2;
use crate::errors::CalculationWarning;
use crate::input::{BoundaryCondition, FaceType, RoomInput};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use smartstring::alias::String;
use tracing::{instrument, warn};

/// Envelope figures for one room identifier. Areas in m2, volume in m3.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RoomMetrics {
    pub is_conditioned: bool,
    pub program_type: String,
    pub volume: f64,
    pub floor_area: f64,
    pub roof_area: f64,
    pub exterior_wall_area: f64,
    pub exterior_aperture_area: f64,
    pub exterior_skylight_area: f64,
    pub internal_wall_area: f64,
}

impl RoomMetrics {
    /// Area of the room's share of the thermal envelope. Internal walls are not part of it.
    pub fn envelope_area(&self) -> f64 {
        self.floor_area
            + self.roof_area
            + self.exterior_wall_area
            + self.exterior_aperture_area
            + self.exterior_skylight_area
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct RoomAreas {
    floor: f64,
    roof_gross: f64,
    wall_gross: f64,
    aperture: f64,
    skylight: f64,
    internal_wall: f64,
}

impl RoomAreas {
    fn from_input(room: &RoomInput) -> Self {
        let mut areas = Self::default();

        for face in &room.faces {
            if face.is_internal_wall() {
                areas.internal_wall += face.area;
                continue;
            }
            match (face.face_type, face.boundary_condition) {
                (FaceType::Floor, BoundaryCondition::Outdoors | BoundaryCondition::Ground) => {
                    areas.floor += face.area
                }
                (FaceType::RoofCeiling, BoundaryCondition::Outdoors) => {
                    areas.roof_gross += face.area
                }
                (FaceType::Wall, BoundaryCondition::Outdoors) => areas.wall_gross += face.area,
                _ => {}
            }
        }

        for aperture in &room.apertures {
            if aperture.is_skylight() {
                areas.skylight += aperture.area;
            } else {
                areas.aperture += aperture.area;
            }
        }

        areas
    }
}

/// Per-room envelope table keyed by room identifier, sorted by identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RoomTable {
    rows: IndexMap<String, RoomMetrics>,
    #[serde(skip)]
    warnings: Vec<CalculationWarning>,
}

impl RoomTable {
    /// Aggregate rooms into one row per identifier.
    ///
    /// Rooms that share an identifier are merged: areas and volumes are summed and the
    /// conditioning status and program type of the first room are kept. The merge makes the
    /// internal wall figure for that identifier unreliable, so a warning is raised rather than an
    /// error.
    #[instrument(skip_all, fields(rooms = rooms.len()))]
    pub fn aggregate(rooms: &[RoomInput]) -> Self {
        let mut warnings = vec![];

        let duplicates = rooms
            .iter()
            .map(|room| room.identifier.as_str())
            .duplicates()
            .sorted()
            .map(std::string::String::from)
            .collect_vec();
        if !duplicates.is_empty() {
            let warning = CalculationWarning::DuplicateRoomIdentifiers {
                identifiers: duplicates,
            };
            warn!("{warning}");
            warnings.push(warning);
        }

        let mut rows: IndexMap<String, RoomMetrics> = Default::default();
        for room in rooms {
            let areas = RoomAreas::from_input(room);
            let net_wall = areas.wall_gross - areas.aperture;
            if net_wall < 0. && !is_close!(net_wall, 0., abs_tol = 1e-9) {
                let warning = CalculationWarning::ApertureExceedsRoomWall {
                    room: room.identifier.to_string(),
                    excess_area: -net_wall,
                };
                warn!("{warning}");
                warnings.push(warning);
            }
            let roof_net = max_of_2(areas.roof_gross - areas.skylight, 0.);

            let row = rows
                .entry(room.identifier.clone())
                .or_insert_with(|| RoomMetrics {
                    is_conditioned: room.is_conditioned,
                    program_type: room.program_type.clone(),
                    ..Default::default()
                });
            row.volume += room.volume;
            row.floor_area += areas.floor;
            row.roof_area += roof_net;
            row.exterior_wall_area += max_of_2(net_wall, 0.);
            row.exterior_aperture_area += areas.aperture;
            row.exterior_skylight_area += areas.skylight;
            row.internal_wall_area += areas.internal_wall;
        }
        rows.sort_unstable_keys();

        Self { rows, warnings }
    }

    pub fn rows(&self) -> &IndexMap<String, RoomMetrics> {
        &self.rows
    }

    pub fn get(&self, identifier: &str) -> Option<&RoomMetrics> {
        self.rows.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn warnings(&self) -> &[CalculationWarning] {
        &self.warnings
    }

    pub fn has_duplicate_identifiers(&self) -> bool {
        self.warnings.iter().any(|warning| {
            matches!(warning, CalculationWarning::DuplicateRoomIdentifiers { .. })
        })
    }

    /// Sum of room volumes, m3
    pub fn total_volume(&self) -> f64 {
        self.rows.values().map(|row| row.volume).sum()
    }

    /// Sum of room envelope areas, m2
    pub fn total_envelope_area(&self) -> f64 {
        self.rows.values().map(RoomMetrics::envelope_area).sum()
    }
}
