//! Reference building fabric for the NCC 2019 facade calculator.
//!
//! Method 1 sets targets orientation by orientation. Method 2 rolls the same figures up into a
//! single set of whole-building values, together with two proposed-versus-reference comparisons:
//! the blended wall-glazing U-value and a solar admittance based air-conditioning energy proxy.

use crate::baselines::ncc2019::building_class::{BuildingClass, ClassCode, ClimateZone, Cohort};
use crate::baselines::ncc2019::tables::{Bounds, RegulatoryTables};
use crate::compare_floats::{divide_or_zero, min_of_2, round_to_places};
use crate::core::facade::{FacadeSummary, OrientationRow};
use crate::core::orientation::Orientation;
use crate::errors::CalculationError;
use crate::input::ProposedDesign;
use crate::statistics::weighted_mean;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReferenceBuildingResults {
    pub building_class: BuildingClass,
    pub class_code: ClassCode,
    pub cohort: Cohort,
    pub climate_zone: ClimateZone,
    pub shading_multiplier: f64,
    /// Allowed average U-value of the wall and glazing assembly, W/m2.K
    pub target_wall_glazing_u_value: f64,
    pub orientations: IndexMap<Orientation, OrientationReference>,
    pub method_2: WholeBuildingReference,
}

/// Method 1 figures for one orientation. U-values in W/m2.K, R-values in m2.K/W.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OrientationReference {
    pub window_to_wall_ratio: f64,
    pub target_wall_r_value: f64,
    pub wall_u_value: f64,
    /// Glazing U-value balancing the wall-glazing target, before the regulatory bounds apply.
    /// 0 where the orientation has no glazing.
    pub glazing_u_value_unclamped: f64,
    pub glazing_u_value: f64,
    pub glazing_shgc_unclamped: f64,
    pub glazing_shgc: f64,
    pub target_solar_admittance: f64,
    /// Solar admittance weighting, 0 for orientations below the weighting threshold
    pub weighting: f64,
    pub proposed_ua: f64,
    pub proposed_wall_glazing_u_value: f64,
    pub proposed_solar_admittance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WholeBuildingReference {
    pub wall_u_value: f64,
    pub glazing_u_value_unclamped: f64,
    pub glazing_u_value: f64,
    pub glazing_shgc_unclamped: f64,
    pub glazing_shgc: f64,
    pub wall_glazing_u_value: Comparison,
    pub ac_energy: Comparison,
}

/// A proposed design figure alongside the reference figure it must not exceed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub proposed: f64,
    pub reference: f64,
    pub complies: bool,
}

impl Comparison {
    pub fn new(proposed: f64, reference: f64) -> Self {
        Self {
            proposed,
            reference,
            complies: proposed <= reference,
        }
    }
}

// 0 marks an orientation (or building) without glazing and is reported as is
fn clamp_unless_unglazed(value: f64, has_glazing: bool, bounds: &Bounds) -> f64 {
    if has_glazing {
        bounds.clamp(value)
    } else {
        0.
    }
}

#[instrument(skip_all, fields(building_class = %building_class, climate_zone = climate_zone.number()))]
pub fn calculate_reference_building(
    facade: &FacadeSummary,
    proposed: &ProposedDesign,
    building_class: BuildingClass,
    climate_zone: ClimateZone,
    tables: &RegulatoryTables,
) -> Result<ReferenceBuildingResults, CalculationError> {
    let cohort = building_class.cohort();
    let zone = tables.zone_targets(cohort, climate_zone)?;

    let orientations = facade
        .orientations
        .iter()
        .map(|(orientation, row)| {
            let target_solar_admittance = zone.solar_admittance_for(*orientation)?;
            let weighting = zone.weighting_for(*orientation)?;
            let target_wall_r_value =
                tables.target_wall_r_value(cohort, climate_zone, row.window_to_wall_ratio)?;

            Ok((
                *orientation,
                orientation_reference(
                    row,
                    proposed,
                    tables,
                    zone.wall_glazing_u_value,
                    target_wall_r_value,
                    target_solar_admittance,
                    weighting,
                ),
            ))
        })
        .collect::<Result<IndexMap<_, _>, CalculationError>>()?;
    debug!(?orientations);

    let method_2 = whole_building_reference(
        facade,
        &orientations,
        tables,
        zone.wall_glazing_u_value,
    );
    debug!(?method_2);

    Ok(ReferenceBuildingResults {
        building_class,
        class_code: building_class.code(),
        cohort,
        climate_zone,
        shading_multiplier: tables.shading_multiplier,
        target_wall_glazing_u_value: zone.wall_glazing_u_value,
        orientations,
        method_2,
    })
}

fn orientation_reference(
    row: &OrientationRow,
    proposed: &ProposedDesign,
    tables: &RegulatoryTables,
    target_wall_glazing_u_value: f64,
    target_wall_r_value: f64,
    target_solar_admittance: f64,
    weighting: f64,
) -> OrientationReference {
    let shading = tables.shading_multiplier;
    let proposed_wall_u_value = 1. / proposed.wall_r_value;
    let has_glazing = row.aperture_area > 0.;

    // never worse than the proposed wall
    let wall_u_value = min_of_2(1. / target_wall_r_value, proposed_wall_u_value);

    // target_U * face = wall_U * (face - aperture) + glazing_U * aperture
    let glazing_u_value_unclamped = divide_or_zero(
        target_wall_glazing_u_value * row.face_area - wall_u_value * row.exterior_wall_area,
        row.aperture_area,
    );

    let glazing_shgc_unclamped = round_to_places(
        divide_or_zero(
            target_solar_admittance,
            shading * row.window_to_wall_fraction(),
        ),
        2,
    );

    let proposed_ua =
        proposed_wall_u_value * row.exterior_wall_area + proposed.glazing_u_value * row.aperture_area;

    OrientationReference {
        window_to_wall_ratio: row.window_to_wall_ratio,
        target_wall_r_value,
        wall_u_value,
        glazing_u_value_unclamped,
        glazing_u_value: clamp_unless_unglazed(
            glazing_u_value_unclamped,
            has_glazing,
            &tables.glazing_u_value_bounds,
        ),
        glazing_shgc_unclamped,
        glazing_shgc: clamp_unless_unglazed(
            glazing_shgc_unclamped,
            row.window_to_wall_ratio > 0.,
            &tables.glazing_shgc_bounds,
        ),
        target_solar_admittance,
        weighting: if tables.is_weighted(row.window_to_wall_ratio) {
            weighting
        } else {
            0.
        },
        proposed_ua,
        proposed_wall_glazing_u_value: divide_or_zero(proposed_ua, row.face_area),
        proposed_solar_admittance: if has_glazing {
            divide_or_zero(
                shading * proposed.glazing_shgc * row.aperture_area,
                row.face_area,
            )
        } else {
            0.
        },
    }
}

fn whole_building_reference(
    facade: &FacadeSummary,
    orientations: &IndexMap<Orientation, OrientationReference>,
    tables: &RegulatoryTables,
    target_wall_glazing_u_value: f64,
) -> WholeBuildingReference {
    let rows = || {
        orientations
            .iter()
            .map(|(orientation, reference)| (facade.row(*orientation), reference))
    };

    let wall_u_value = weighted_mean(
        rows().map(|(row, reference)| (reference.wall_u_value, row.exterior_wall_area)),
    );

    let total_aperture_area = facade.total_aperture_area();
    let glazing_u_value_unclamped = round_to_places(
        weighted_mean(
            rows().map(|(row, reference)| (reference.glazing_u_value_unclamped, row.aperture_area)),
        ),
        2,
    );

    let reference_ac_energy: f64 = rows()
        .map(|(row, reference)| {
            row.face_area * reference.weighting * reference.target_solar_admittance
        })
        .sum();
    let proposed_ac_energy: f64 = rows()
        .map(|(row, reference)| {
            row.face_area * reference.weighting * reference.proposed_solar_admittance
        })
        .sum();
    let weighted_glazing_area: f64 = rows()
        .map(|(row, reference)| reference.weighting * row.aperture_area * tables.shading_multiplier)
        .sum();
    let glazing_shgc_unclamped = divide_or_zero(reference_ac_energy, weighted_glazing_area);

    let total_ua: f64 = orientations
        .values()
        .map(|reference| reference.proposed_ua)
        .sum();

    WholeBuildingReference {
        wall_u_value,
        glazing_u_value_unclamped,
        glazing_u_value: clamp_unless_unglazed(
            glazing_u_value_unclamped,
            total_aperture_area > 0.,
            &tables.glazing_u_value_bounds,
        ),
        glazing_shgc_unclamped,
        glazing_shgc: clamp_unless_unglazed(
            glazing_shgc_unclamped,
            weighted_glazing_area > 0.,
            &tables.glazing_shgc_bounds,
        ),
        wall_glazing_u_value: Comparison::new(
            divide_or_zero(total_ua, facade.total_face_area()),
            target_wall_glazing_u_value,
        ),
        ac_energy: Comparison::new(proposed_ac_energy, reference_ac_energy),
    }
}
