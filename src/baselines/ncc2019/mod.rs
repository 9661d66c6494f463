pub mod building_class;
pub mod reference_building;
pub mod tables;

use crate::baselines::{Baseline, BaselineResults};
use crate::core::facade::FacadeSummary;
use crate::errors::CalculationError;
use crate::input::{CalculationParameters, ProposedDesign};
use building_class::{BuildingClass, ClimateZone};
use reference_building::calculate_reference_building;
use std::sync::Arc;
use tables::{RegulatoryTables, NCC_2019_TABLES};

/// Deemed-to-satisfy reference building of the NCC 2019 facade calculator.
pub(crate) struct Ncc2019Baseline {
    building_class: BuildingClass,
    climate_zone: ClimateZone,
    tables: Arc<RegulatoryTables>,
}

impl Ncc2019Baseline {
    pub(crate) fn new(parameters: &CalculationParameters) -> Self {
        Self {
            building_class: parameters.building_class,
            climate_zone: parameters.climate_zone,
            tables: parameters
                .regulatory_tables
                .clone()
                .unwrap_or_else(|| NCC_2019_TABLES.clone()),
        }
    }
}

impl Baseline for Ncc2019Baseline {
    fn reference_building(
        &self,
        facade: &FacadeSummary,
        proposed: &ProposedDesign,
    ) -> Result<BaselineResults, CalculationError> {
        calculate_reference_building(
            facade,
            proposed,
            self.building_class,
            self.climate_zone,
            &self.tables,
        )
        .map(BaselineResults::Ncc2019)
    }
}
