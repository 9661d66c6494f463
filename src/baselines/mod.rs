//! Regulatory baselines a proposed facade can be compared against.

#[cfg(feature = "ncc2019")]
pub mod ncc2019;

use crate::core::facade::FacadeSummary;
use crate::errors::{CalculationError, NotImplementedError};
use crate::input::{CalculationParameters, ProposedDesign};
#[cfg(feature = "ncc2019")]
use ncc2019::{reference_building::ReferenceBuildingResults, Ncc2019Baseline};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

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
pub enum BaselineMethod {
    #[default]
    #[serde(rename = "None")]
    #[strum(to_string = "None")]
    None,
    #[serde(rename = "NCC2019-AU", alias = "Ncc2019")]
    #[strum(
        to_string = "NCC2019-AU",
        serialize = "Ncc2019",
        serialize = "Facade Calculator NCC 2019 (Australia)"
    )]
    Ncc2019,
    #[serde(rename = "ASHRAE 90.1", alias = "Ashrae901")]
    #[strum(to_string = "ASHRAE 90.1", serialize = "Ashrae901")]
    Ashrae901,
    #[serde(rename = "PassivHaus")]
    #[strum(to_string = "PassivHaus")]
    PassivHaus,
}

/// Common trait for a regulatory baseline, which derives a reference building from the facade
/// of the proposed design.
pub(crate) trait Baseline {
    fn reference_building(
        &self,
        facade: &FacadeSummary,
        proposed: &ProposedDesign,
    ) -> Result<BaselineResults, CalculationError>;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "method")]
pub enum BaselineResults {
    #[cfg(feature = "ncc2019")]
    #[serde(rename = "NCC2019-AU")]
    Ncc2019(ReferenceBuildingResults),
}

/// A baseline that is recognised but has no calculation behind it.
pub(crate) struct UnimplementedBaseline {
    method: BaselineMethod,
}

impl Baseline for UnimplementedBaseline {
    fn reference_building(
        &self,
        _facade: &FacadeSummary,
        _proposed: &ProposedDesign,
    ) -> Result<BaselineResults, CalculationError> {
        Err(NotImplementedError::new(&format!("the {} baseline", self.method)).into())
    }
}

/// An enum to wrap the known baselines that could be chosen for a given calculation.
pub(crate) enum ChosenBaseline {
    #[cfg(feature = "ncc2019")]
    Ncc2019(Ncc2019Baseline),
    Unimplemented(UnimplementedBaseline),
}

impl ChosenBaseline {
    /// The baseline selected by the parameters, if any.
    pub(crate) fn from_parameters(parameters: &CalculationParameters) -> Option<Self> {
        Some(match parameters.baseline_method {
            BaselineMethod::None => return None,
            #[cfg(feature = "ncc2019")]
            BaselineMethod::Ncc2019 => ChosenBaseline::Ncc2019(Ncc2019Baseline::new(parameters)),
            method => ChosenBaseline::Unimplemented(UnimplementedBaseline { method }),
        })
    }
}

impl Baseline for ChosenBaseline {
    fn reference_building(
        &self,
        facade: &FacadeSummary,
        proposed: &ProposedDesign,
    ) -> Result<BaselineResults, CalculationError> {
        match self {
            #[cfg(feature = "ncc2019")]
            ChosenBaseline::Ncc2019(baseline) => baseline.reference_building(facade, proposed),
            ChosenBaseline::Unimplemented(baseline) => baseline.reference_building(facade, proposed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("None", BaselineMethod::None)]
    #[case("NCC2019-AU", BaselineMethod::Ncc2019)]
    #[case("Facade Calculator NCC 2019 (Australia)", BaselineMethod::Ncc2019)]
    #[case("ASHRAE 90.1", BaselineMethod::Ashrae901)]
    #[case("PassivHaus", BaselineMethod::PassivHaus)]
    fn test_baseline_method_from_label(#[case] label: &str, #[case] expected: BaselineMethod) {
        assert_eq!(label.parse::<BaselineMethod>().unwrap(), expected);
    }

    #[test]
    fn test_no_baseline_chosen_by_default() {
        assert!(ChosenBaseline::from_parameters(&CalculationParameters::default()).is_none());
    }

    #[rstest]
    #[case(BaselineMethod::Ashrae901)]
    #[case(BaselineMethod::PassivHaus)]
    fn test_other_baselines_are_not_implemented(#[case] method: BaselineMethod) {
        let parameters = CalculationParameters {
            baseline_method: method,
            ..Default::default()
        };
        let facade = crate::core::facade::FacadeSummary::aggregate(
            &[crate::input::RoomInput {
                identifier: "Zone".into(),
                is_conditioned: true,
                program_type: "Office".into(),
                volume: 10.,
                faces: vec![],
                apertures: vec![],
            }],
            Default::default(),
            Default::default(),
            &Default::default(),
        )
        .unwrap();

        let result = ChosenBaseline::from_parameters(&parameters)
            .unwrap()
            .reference_building(&facade, &parameters.proposed);

        assert!(matches!(result, Err(CalculationError::NotImplemented(_))));
    }
}
