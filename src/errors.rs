use crate::core::facade::FacadeScope;
use crate::core::orientation::Orientation;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FacadeCalcError {
    #[error("Request was considered invalid due to error: {0}")]
    InvalidRequest(#[from] anyhow::Error),
    #[error("Error identified during envelope calculation: {0}")]
    FailureInCalculation(#[from] CalculationError),
    #[error("Error while writing out results: {0}")]
    ErrorInOutput(OutputError),
}

/// An error that makes a single downstream metric unavailable, leaving independent metrics intact.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalculationError {
    #[error("No rooms match the facade scope '{scope}'")]
    NoMatchingRooms { scope: FacadeScope },
    #[error("Relative compactness is undefined for a building with zero envelope area")]
    ZeroEnvelopeArea,
    #[error("No matching regulatory rule for {rule} ({key})")]
    NoMatchingRegulatoryRule { rule: String, key: String },
    #[error("{0}")]
    NotImplemented(#[from] NotImplementedError),
}

impl CalculationError {
    pub(crate) fn no_matching_rule(rule: &str, key: impl Into<String>) -> Self {
        Self::NoMatchingRegulatoryRule {
            rule: rule.to_string(),
            key: key.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct OutputError {
    error: anyhow::Error,
}

impl OutputError {
    pub fn new(error: anyhow::Error) -> Self {
        Self { error }
    }
}

/// An error representing that an area of functionality has not been implemented.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("Not implemented: {0}")]
pub struct NotImplementedError(String);

impl NotImplementedError {
    pub(crate) fn new(message: &str) -> Self {
        NotImplementedError(message.to_string())
    }
}

/// Non-fatal problems with the input model. The calculation proceeds, but the affected figures
/// should be treated as suspect.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationWarning {
    DuplicateRoomIdentifiers { identifiers: Vec<String> },
    ApertureExceedsRoomWall { room: String, excess_area: f64 },
    ApertureExceedsFacade { orientation: Orientation, excess_area: f64 },
    FaceWithoutAzimuth { room: String, face: Option<String> },
}

impl std::fmt::Display for CalculationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationWarning::DuplicateRoomIdentifiers { identifiers } => write!(
                f,
                "There are rooms sharing the identifiers [{}]; internal wall areas for these rooms are merged and may be inaccurate",
                identifiers.join(", ")
            ),
            CalculationWarning::ApertureExceedsRoomWall { room, excess_area } => write!(
                f,
                "Aperture area in room '{room}' exceeds its exterior wall area by {excess_area:.2} m2; net wall area floored at 0"
            ),
            CalculationWarning::ApertureExceedsFacade {
                orientation,
                excess_area,
            } => write!(
                f,
                "Aperture area facing {orientation} exceeds the facade area by {excess_area:.2} m2; exterior wall area floored at 0"
            ),
            CalculationWarning::FaceWithoutAzimuth { room, face } => write!(
                f,
                "Vertical face {} in room '{room}' has no azimuth and was left out of the orientation tables",
                face.as_deref().unwrap_or("(unnamed)")
            ),
        }
    }
}
