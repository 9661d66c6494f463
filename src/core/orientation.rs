//! Classification of surface bearings into compass sectors.
//!
//! A scheme is a ring of contiguous sectors, each open at its anticlockwise edge and closed at
//! its clockwise edge, e.g. North covers (315, 45]. The default is the four-point scheme used by
//! the NCC facade calculator; other jurisdictions can supply their own sectors.

use crate::core::units::{NorthAngle, DEGREES_PER_REVOLUTION};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub enum Orientation {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SectorInput {
    pub orientation: Orientation,
    /// Exclusive bound, degrees
    pub from: f64,
    /// Inclusive bound, degrees
    pub to: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sector {
    orientation: Orientation,
    // clockwise distance from the scheme origin to the inclusive edge of this sector
    end_offset: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(into = "Vec<SectorInput>")]
pub struct OrientationScheme {
    origin: f64,
    sectors: Vec<Sector>,
}

impl OrientationScheme {
    /// Build a scheme from sectors listed clockwise. Each sector must start where the previous
    /// one ended and together they must cover a full revolution exactly once.
    pub fn new(sectors: &[SectorInput]) -> Result<Self, OrientationSchemeError> {
        let first = sectors.first().ok_or(OrientationSchemeError::Empty)?;
        let origin = first.from.rem_euclid(DEGREES_PER_REVOLUTION);

        let mut previous_end = origin;
        let mut offset = 0.;
        let mut built = Vec::with_capacity(sectors.len());
        for sector in sectors {
            let from = sector.from.rem_euclid(DEGREES_PER_REVOLUTION);
            if from != previous_end {
                return Err(OrientationSchemeError::Gap {
                    orientation: sector.orientation,
                    expected: previous_end,
                    found: from,
                });
            }
            let width = (sector.to - sector.from).rem_euclid(DEGREES_PER_REVOLUTION);
            if width == 0. {
                return Err(OrientationSchemeError::EmptySector(sector.orientation));
            }
            if built
                .iter()
                .any(|existing: &Sector| existing.orientation == sector.orientation)
            {
                return Err(OrientationSchemeError::DuplicateOrientation(
                    sector.orientation,
                ));
            }
            offset += width;
            built.push(Sector {
                orientation: sector.orientation,
                end_offset: offset,
            });
            previous_end = sector.to.rem_euclid(DEGREES_PER_REVOLUTION);
        }

        if offset != DEGREES_PER_REVOLUTION {
            return Err(OrientationSchemeError::IncompleteCoverage(offset));
        }

        Ok(Self {
            origin,
            sectors: built,
        })
    }

    pub fn four_point() -> Self {
        Self {
            origin: 315.,
            sectors: vec![
                Sector {
                    orientation: Orientation::North,
                    end_offset: 90.,
                },
                Sector {
                    orientation: Orientation::East,
                    end_offset: 180.,
                },
                Sector {
                    orientation: Orientation::South,
                    end_offset: 270.,
                },
                Sector {
                    orientation: Orientation::West,
                    end_offset: 360.,
                },
            ],
        }
    }

    pub fn eight_point() -> Self {
        let orientations = [
            Orientation::North,
            Orientation::NorthEast,
            Orientation::East,
            Orientation::SouthEast,
            Orientation::South,
            Orientation::SouthWest,
            Orientation::West,
            Orientation::NorthWest,
        ];
        Self {
            origin: 337.5,
            sectors: orientations
                .into_iter()
                .enumerate()
                .map(|(i, orientation)| Sector {
                    orientation,
                    end_offset: 45. * (i + 1) as f64,
                })
                .collect(),
        }
    }

    /// Orientations of this scheme in clockwise order from the origin.
    pub fn orientations(&self) -> impl Iterator<Item = Orientation> + '_ {
        self.sectors.iter().map(|sector| sector.orientation)
    }

    /// Sector containing a bearing in degrees. Any real bearing is accepted and normalised
    /// modulo 360 first.
    pub fn classify(&self, bearing: f64) -> Orientation {
        let offset = (bearing - self.origin).rem_euclid(DEGREES_PER_REVOLUTION);
        // the origin is the open edge of the first sector, so it closes the last one
        let offset = if offset == 0. {
            DEGREES_PER_REVOLUTION
        } else {
            offset
        };

        let last = self.sectors[self.sectors.len() - 1];
        self.sectors
            .iter()
            .find(|sector| offset <= sector.end_offset)
            .unwrap_or(&last)
            .orientation
    }

    /// Classify a surface given its model azimuth and the true-north angle.
    pub fn classify_azimuth(&self, azimuth: f64, north: NorthAngle) -> Orientation {
        self.classify(north.bearing_for_azimuth(azimuth))
    }
}

impl Default for OrientationScheme {
    fn default() -> Self {
        Self::four_point()
    }
}

impl From<OrientationScheme> for Vec<SectorInput> {
    fn from(scheme: OrientationScheme) -> Self {
        let mut from = scheme.origin;
        scheme
            .sectors
            .iter()
            .map(|sector| {
                let to = (scheme.origin + sector.end_offset).rem_euclid(DEGREES_PER_REVOLUTION);
                let input = SectorInput {
                    orientation: sector.orientation,
                    from,
                    to,
                };
                from = to;
                input
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for OrientationScheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let sectors = Vec::<SectorInput>::deserialize(deserializer)?;
        Self::new(&sectors).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum OrientationSchemeError {
    #[error("An orientation scheme needs at least one sector")]
    Empty,
    #[error("Sector {orientation} should start at {expected} degrees but starts at {found}")]
    Gap {
        orientation: Orientation,
        expected: f64,
        found: f64,
    },
    #[error("Sector {0} has zero width")]
    EmptySector(Orientation),
    #[error("Orientation {0} appears in more than one sector")]
    DuplicateOrientation(Orientation),
    #[error("Sectors cover {0} degrees rather than a full revolution")]
    IncompleteCoverage(f64),
}
