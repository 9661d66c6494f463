use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

pub const DEGREES_PER_REVOLUTION: f64 = 360.;
pub const PERCENT_PER_UNIT: f64 = 100.;

/// Angle of the true-north vector in degrees, measured anticlockwise from the model's +X axis.
///
/// 90 degrees points north along the model +Y axis, which is the frame surface azimuths are
/// expressed in, and so applies no rotation.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, PartialOrd, Serialize, Validate)]
#[serde(transparent)]
#[repr(transparent)]
pub struct NorthAngle(
    #[validate(minimum = -180.)]
    #[validate(maximum = 180.)]
    f64,
);

impl NorthAngle {
    pub fn new(angle: f64) -> Result<Self, NorthAngleError> {
        if !(-180. ..=180.).contains(&angle) {
            return Err(NorthAngleError::InvalidAngle(angle));
        }

        Ok(Self(angle))
    }

    pub fn angle(&self) -> f64 {
        self.0
    }

    /// Clockwise angle from true north to a surface normal with the given model azimuth,
    /// normalised to [0, 360).
    pub fn bearing_for_azimuth(&self, azimuth: f64) -> f64 {
        // the north vector sits at a model azimuth of (90 - angle)
        (azimuth + self.0 - 90.).rem_euclid(DEGREES_PER_REVOLUTION)
    }
}

impl Default for NorthAngle {
    fn default() -> Self {
        Self(90.)
    }
}

impl Display for NorthAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NorthAngle {
    type Err = NorthAngleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let angle = s
            .parse::<f64>()
            .map_err(|_| NorthAngleError::Unparseable(s.to_string()))?;
        Self::new(angle)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum NorthAngleError {
    #[error("North angle must be between -180 and 180 degrees inclusive, got {0}")]
    InvalidAngle(f64),
    #[error("North angle '{0}' is not a number")]
    Unparseable(String),
}

/// Express a part/whole ratio as a percentage, with an empty whole giving 0 rather than NaN.
pub fn as_percentage(part: f64, whole: f64) -> f64 {
    if whole == 0. {
        0.
    } else {
        part / whole * PERCENT_PER_UNIT
    }
}
