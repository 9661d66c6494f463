//! Regulatory lookup tables for the NCC 2019 facade calculator.
//!
//! The built-in tables are read from a bundled CSV. Replacement tables (for another edition or
//! jurisdiction with the same structure) can be loaded from JSON.

use crate::baselines::ncc2019::building_class::{ClimateZone, Cohort};
use crate::compare_floats::clamp_to_bounds;
use crate::core::orientation::Orientation;
use crate::errors::CalculationError;
use anyhow::bail;
use csv::Reader;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::io::{BufReader, Cursor, Read};
use std::sync::{Arc, LazyLock};

pub static NCC_2019_TABLES: LazyLock<Arc<RegulatoryTables>> = LazyLock::new(|| {
    let mut reader = Reader::from_reader(BufReader::new(Cursor::new(include_str!(
        "./ncc2019_tables.csv"
    ))));
    let zones = reader
        .deserialize()
        .map(|record| {
            let record: ZoneTargetsRecord =
                record.expect("Reading the bundled NCC 2019 tables failed.");
            ZoneTargets::from(record)
        })
        .collect();

    Arc::new(RegulatoryTables {
        wall_r_value_threshold: 20.,
        high_glazing_wall_r_value: 1.0,
        weighting_threshold: 20.,
        shading_multiplier: 1.0,
        glazing_u_value_bounds: Bounds {
            lower: 1.5,
            upper: 5.8,
        },
        glazing_shgc_bounds: Bounds {
            lower: 0.16,
            upper: 0.81,
        },
        zones,
    })
});

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn clamp(&self, value: f64) -> f64 {
        clamp_to_bounds(value, self.lower, self.upper)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegulatoryTables {
    /// Window-to-wall ratio (%) at or below which the zone's wall R-value target applies
    #[validate(minimum = 0.)]
    #[validate(maximum = 100.)]
    pub wall_r_value_threshold: f64,
    /// Wall R-value target (m2.K/W) for orientations above the threshold
    #[validate(exclusive_minimum = 0.)]
    pub high_glazing_wall_r_value: f64,
    /// Window-to-wall ratio (%) from which an orientation carries a solar admittance weighting
    #[validate(minimum = 0.)]
    #[validate(maximum = 100.)]
    pub weighting_threshold: f64,
    #[validate(exclusive_minimum = 0.)]
    pub shading_multiplier: f64,
    pub glazing_u_value_bounds: Bounds,
    pub glazing_shgc_bounds: Bounds,
    pub zones: Vec<ZoneTargets>,
}

impl RegulatoryTables {
    pub fn from_reader(json: impl Read) -> anyhow::Result<Self> {
        let tables: Self = serde_json::from_reader(BufReader::new(json))?;
        tables.check()?;

        Ok(tables)
    }

    /// Field validation plus the cross-field checks serde_valid cannot express.
    pub fn check(&self) -> anyhow::Result<()> {
        if let Err(errors) = self.validate() {
            bail!("Invalid regulatory tables: {errors}");
        }
        for (name, bounds) in [
            ("glazing U-value", self.glazing_u_value_bounds),
            ("glazing SHGC", self.glazing_shgc_bounds),
        ] {
            if !(bounds.lower <= bounds.upper) {
                bail!(
                    "Invalid regulatory tables: {name} bounds [{}, {}] are inverted",
                    bounds.lower,
                    bounds.upper
                );
            }
        }

        Ok(())
    }

    pub fn zone_targets(
        &self,
        cohort: Cohort,
        climate_zone: ClimateZone,
    ) -> Result<&ZoneTargets, CalculationError> {
        self.zones
            .iter()
            .find(|zone| zone.cohort == cohort && zone.climate_zone == climate_zone)
            .ok_or_else(|| {
                CalculationError::no_matching_rule(
                    "zone targets",
                    format!("{cohort} cohort, climate zone {}", climate_zone.number()),
                )
            })
    }

    /// Target wall R-value for an orientation with the given window-to-wall ratio (%).
    pub fn target_wall_r_value(
        &self,
        cohort: Cohort,
        climate_zone: ClimateZone,
        window_to_wall_ratio: f64,
    ) -> Result<f64, CalculationError> {
        if window_to_wall_ratio > self.wall_r_value_threshold {
            Ok(self.high_glazing_wall_r_value)
        } else {
            Ok(self.zone_targets(cohort, climate_zone)?.wall_r_value)
        }
    }

    pub fn is_weighted(&self, window_to_wall_ratio: f64) -> bool {
        window_to_wall_ratio >= self.weighting_threshold
    }
}

/// Targets for one cohort in one climate zone.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneTargets {
    pub cohort: Cohort,
    pub climate_zone: ClimateZone,
    /// m2.K/W
    pub wall_r_value: f64,
    /// Allowed average U-value (W/m2.K) of a wall and glazing assembly
    pub wall_glazing_u_value: f64,
    pub solar_admittance: IndexMap<Orientation, f64>,
    pub weighting: IndexMap<Orientation, f64>,
}

impl ZoneTargets {
    pub fn solar_admittance_for(&self, orientation: Orientation) -> Result<f64, CalculationError> {
        self.solar_admittance
            .get(&orientation)
            .copied()
            .ok_or_else(|| self.orientation_miss("solar admittance", orientation))
    }

    pub fn weighting_for(&self, orientation: Orientation) -> Result<f64, CalculationError> {
        self.weighting
            .get(&orientation)
            .copied()
            .ok_or_else(|| self.orientation_miss("solar admittance weighting", orientation))
    }

    fn orientation_miss(&self, rule: &str, orientation: Orientation) -> CalculationError {
        CalculationError::no_matching_rule(
            rule,
            format!(
                "{} cohort, climate zone {}, {orientation}",
                self.cohort,
                self.climate_zone.number()
            ),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ZoneTargetsRecord {
    cohort: Cohort,
    climate_zone: ClimateZone,
    wall_r_value: f64,
    wall_glazing_u_value: f64,
    admittance_north: f64,
    admittance_east: f64,
    admittance_south: f64,
    admittance_west: f64,
    weight_north: f64,
    weight_east: f64,
    weight_south: f64,
    weight_west: f64,
}

impl From<ZoneTargetsRecord> for ZoneTargets {
    fn from(record: ZoneTargetsRecord) -> Self {
        Self {
            cohort: record.cohort,
            climate_zone: record.climate_zone,
            wall_r_value: record.wall_r_value,
            wall_glazing_u_value: record.wall_glazing_u_value,
            solar_admittance: IndexMap::from([
                (Orientation::North, record.admittance_north),
                (Orientation::East, record.admittance_east),
                (Orientation::South, record.admittance_south),
                (Orientation::West, record.admittance_west),
            ]),
            weighting: IndexMap::from([
                (Orientation::North, record.weight_north),
                (Orientation::East, record.weight_east),
                (Orientation::South, record.weight_south),
                (Orientation::West, record.weight_west),
            ]),
        }
    }
}
