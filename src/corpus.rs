use crate::baselines::{Baseline, BaselineResults, ChosenBaseline};
use crate::core::compactness::building_relative_compactness;
use crate::core::facade::FacadeSummary;
use crate::core::room::RoomTable;
use crate::errors::{CalculationError, CalculationWarning};
use crate::input::{CalculationParameters, ModelInput};
use smartstring::alias::String;
use tracing::{debug, instrument};

/// Everything computed for one model under one parameter set.
///
/// Metrics that can fail on their own are held as `Result`s so that a failure in one (an empty
/// facade selection, a missing regulatory rule) leaves the others available.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationResults {
    pub model_identifier: Option<String>,
    pub parameters: CalculationParameters,
    pub rooms: RoomTable,
    /// m2
    pub total_shade_area: f64,
    pub facade: Result<FacadeSummary, CalculationError>,
    pub relative_compactness: Result<f64, CalculationError>,
    /// Absent when no baseline was requested
    pub reference_building: Option<Result<BaselineResults, CalculationError>>,
    pub warnings: Vec<CalculationWarning>,
}

impl CalculationResults {
    /// The first metric that could not be calculated, if any.
    pub fn first_failure(&self) -> Option<&CalculationError> {
        self.facade
            .as_ref()
            .err()
            .or(self.relative_compactness.as_ref().err())
            .or(self
                .reference_building
                .as_ref()
                .and_then(|result| result.as_ref().err()))
    }
}

/// Calculation context for a single request: the model snapshot, the parameters it is evaluated
/// under and the baseline those parameters select.
pub struct Corpus {
    model: ModelInput,
    parameters: CalculationParameters,
    baseline: Option<ChosenBaseline>,
}

impl Corpus {
    pub fn from_inputs(
        model: ModelInput,
        parameters: &CalculationParameters,
    ) -> anyhow::Result<Self> {
        let parameters = parameters.clone().checked()?;
        let baseline = ChosenBaseline::from_parameters(&parameters);

        Ok(Self {
            model,
            parameters,
            baseline,
        })
    }

    #[instrument(skip_all, fields(rooms = self.model.rooms.len()))]
    pub fn run(&self) -> CalculationResults {
        let rooms = RoomTable::aggregate(&self.model.rooms);
        let relative_compactness = building_relative_compactness(&rooms);
        debug!(?relative_compactness);

        let facade = FacadeSummary::aggregate(
            &self.model.rooms,
            self.parameters.facade_scope,
            self.parameters.north_angle,
            &self.parameters.orientation_scheme,
        );

        let reference_building = self.baseline.as_ref().map(|baseline| {
            facade
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|facade| baseline.reference_building(facade, &self.parameters.proposed))
        });

        let mut warnings = rooms.warnings().to_vec();
        if let Ok(facade) = &facade {
            warnings.extend_from_slice(facade.warnings());
        }

        CalculationResults {
            model_identifier: self.model.identifier.clone(),
            parameters: self.parameters.clone(),
            total_shade_area: self
                .model
                .outdoor_shades
                .iter()
                .map(|shade| shade.area)
                .sum(),
            rooms,
            facade,
            relative_compactness,
            reference_building,
            warnings,
        }
    }
}
