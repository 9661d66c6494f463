use crate::core::facade::FacadeScope;
use crate::core::orientation::OrientationScheme;
use crate::core::units::{NorthAngle, DEGREES_PER_REVOLUTION};
use crate::baselines::BaselineMethod;
#[cfg(feature = "ncc2019")]
use crate::baselines::ncc2019::building_class::{BuildingClass, ClimateZone};
#[cfg(feature = "ncc2019")]
use crate::baselines::ncc2019::tables::RegulatoryTables;
use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use smartstring::alias::String;
use std::io::{BufReader, Read};
use std::sync::Arc;

pub fn ingest_for_processing(json: impl Read) -> Result<ModelInput, anyhow::Error> {
    let mut model: ModelInput = serde_json::from_reader(BufReader::new(json))?;
    model.check()?;
    model.normalise_azimuths();

    Ok(model)
}

/// Snapshot of a building model as provided by the geometry collaborator. Areas, volumes and
/// azimuths are already computed.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ModelInput {
    #[serde(default)]
    pub identifier: Option<String>,
    pub rooms: Vec<RoomInput>,
    #[serde(default)]
    pub outdoor_shades: Vec<ShadeInput>,
}

impl ModelInput {
    fn check(&self) -> anyhow::Result<()> {
        for room in &self.rooms {
            if !(room.volume >= 0.) {
                bail!(
                    "Room '{}' has an invalid volume ({})",
                    room.identifier,
                    room.volume
                );
            }
            for face in &room.faces {
                check_area(face.area, &room.identifier, "face")?;
                check_azimuth(face.azimuth, &room.identifier)?;
            }
            for aperture in &room.apertures {
                check_area(aperture.area, &room.identifier, "aperture")?;
                check_azimuth(aperture.azimuth, &room.identifier)?;
            }
        }
        for shade in &self.outdoor_shades {
            check_area(shade.area, "outdoor shades", "shade")?;
        }

        Ok(())
    }

    /// Wrap every azimuth into [0, 360).
    fn normalise_azimuths(&mut self) {
        for room in &mut self.rooms {
            let faces = room.faces.iter_mut().map(|face| &mut face.azimuth);
            let apertures = room.apertures.iter_mut().map(|aperture| &mut aperture.azimuth);
            for azimuth in faces.chain(apertures).flatten() {
                *azimuth = azimuth.rem_euclid(DEGREES_PER_REVOLUTION);
            }
        }
    }
}

fn check_area(area: f64, owner: &str, kind: &str) -> anyhow::Result<()> {
    if !(area >= 0.) {
        bail!("A {kind} in '{owner}' has an invalid area ({area})");
    }
    Ok(())
}

fn check_azimuth(azimuth: Option<f64>, owner: &str) -> anyhow::Result<()> {
    match azimuth {
        Some(azimuth) if !azimuth.is_finite() => Err(anyhow!(
            "A surface in '{owner}' has an invalid azimuth ({azimuth})"
        )),
        _ => Ok(()),
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoomInput {
    pub identifier: String,
    pub is_conditioned: bool,
    #[serde(default = "default_program_type")]
    pub program_type: String,
    pub volume: f64,
    #[serde(default)]
    pub faces: Vec<FaceInput>,
    /// Apertures with an outdoors boundary condition
    #[serde(default)]
    pub apertures: Vec<ApertureInput>,
}

fn default_program_type() -> String {
    "Unspecified".into()
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FaceType {
    Wall,
    RoofCeiling,
    Floor,
    AirBoundary,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BoundaryCondition {
    Outdoors,
    Ground,
    /// Shared with another room of the model
    Surface,
    Adiabatic,
    Other,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FaceInput {
    #[serde(default)]
    pub identifier: Option<String>,
    pub face_type: FaceType,
    pub boundary_condition: BoundaryCondition,
    /// Gross area including any apertures hosted by the face, m2
    pub area: f64,
    /// Degrees clockwise from the model +Y axis; absent for horizontal faces
    #[serde(default)]
    pub azimuth: Option<f64>,
}

impl FaceInput {
    /// Whether the face has a horizontal orientation. An azimuth of exactly zero counts as no
    /// orientation, which keeps horizontal shared faces out of the internal wall totals.
    pub fn is_oriented(&self) -> bool {
        is_oriented(self.azimuth)
    }

    pub fn is_internal_wall(&self) -> bool {
        self.boundary_condition == BoundaryCondition::Surface && self.is_oriented()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApertureInput {
    #[serde(default)]
    pub identifier: Option<String>,
    /// m2
    pub area: f64,
    #[serde(default)]
    pub azimuth: Option<f64>,
    #[serde(default = "default_parent_face_type")]
    pub parent_face_type: FaceType,
}

fn default_parent_face_type() -> FaceType {
    FaceType::Wall
}

impl ApertureInput {
    pub fn is_skylight(&self) -> bool {
        self.parent_face_type == FaceType::RoofCeiling
    }

    pub fn is_oriented(&self) -> bool {
        is_oriented(self.azimuth)
    }
}

fn is_oriented(azimuth: Option<f64>) -> bool {
    azimuth.is_some_and(|azimuth| azimuth > 0.)
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShadeInput {
    #[serde(default)]
    pub identifier: Option<String>,
    pub area: f64,
}

/// Material properties of the proposed design.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProposedDesign {
    /// m2.K/W
    #[validate(exclusive_minimum = 0.)]
    pub wall_r_value: f64,
    /// W/m2.K
    #[validate(exclusive_minimum = 0.)]
    pub glazing_u_value: f64,
    #[validate(exclusive_minimum = 0.)]
    pub glazing_shgc: f64,
}

impl Default for ProposedDesign {
    fn default() -> Self {
        Self {
            wall_r_value: 1.4,
            glazing_u_value: 3.5,
            glazing_shgc: 0.5,
        }
    }
}

/// User-selected parameters for one calculation cycle.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct CalculationParameters {
    #[validate]
    pub north_angle: NorthAngle,
    pub facade_scope: FacadeScope,
    pub baseline_method: BaselineMethod,
    #[cfg(feature = "ncc2019")]
    pub building_class: BuildingClass,
    #[cfg(feature = "ncc2019")]
    pub climate_zone: ClimateZone,
    #[validate]
    pub proposed: ProposedDesign,
    pub orientation_scheme: OrientationScheme,
    #[cfg(feature = "ncc2019")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulatory_tables: Option<Arc<RegulatoryTables>>,
}

impl CalculationParameters {
    pub fn checked(self) -> anyhow::Result<Self> {
        self.validate()
            .map_err(|errors| anyhow!("Invalid calculation parameters: {errors}"))?;
        #[cfg(feature = "ncc2019")]
        if let Some(tables) = &self.regulatory_tables {
            tables.check()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[fixture]
    fn model_json() -> serde_json::Value {
        json!({
            "Identifier": "Test building",
            "Rooms": [{
                "identifier": "Office",
                "is_conditioned": true,
                "volume": 30.0,
                "faces": [
                    {"face_type": "Wall", "boundary_condition": "Outdoors", "area": 10.0, "azimuth": 90.0},
                    {"face_type": "Floor", "boundary_condition": "Ground", "area": 10.0}
                ],
                "apertures": [
                    {"area": 2.0, "azimuth": 90.0}
                ]
            }],
            "OutdoorShades": [{"area": 4.5}]
        })
    }

    #[rstest]
    fn test_ingest_model(model_json: serde_json::Value) {
        let model = ingest_for_processing(model_json.to_string().as_bytes()).unwrap();

        assert_eq!(model.rooms.len(), 1);
        let room = &model.rooms[0];
        assert_eq!(room.program_type, "Unspecified");
        assert_eq!(room.faces[1].azimuth, None);
        assert_eq!(room.apertures[0].parent_face_type, FaceType::Wall);
        assert_eq!(model.outdoor_shades[0].area, 4.5);
    }

    #[rstest]
    fn test_ingest_rejects_negative_area(mut model_json: serde_json::Value) {
        model_json["Rooms"][0]["faces"][0]["area"] = json!(-1.0);
        assert!(ingest_for_processing(model_json.to_string().as_bytes()).is_err());
    }

    #[rstest]
    #[case(360., 0.)]
    #[case(370., 10.)]
    #[case(-90., 270.)]
    #[case(725., 5.)]
    fn test_ingest_wraps_azimuths(
        mut model_json: serde_json::Value,
        #[case] azimuth: f64,
        #[case] expected: f64,
    ) {
        model_json["Rooms"][0]["faces"][0]["azimuth"] = json!(azimuth);
        model_json["Rooms"][0]["apertures"][0]["azimuth"] = json!(azimuth);

        let model = ingest_for_processing(model_json.to_string().as_bytes()).unwrap();

        assert_eq!(model.rooms[0].faces[0].azimuth, Some(expected));
        assert_eq!(model.rooms[0].apertures[0].azimuth, Some(expected));
    }

    #[rstest]
    fn test_wrapped_full_turn_counts_as_unoriented(mut model_json: serde_json::Value) {
        model_json["Rooms"][0]["apertures"][0]["azimuth"] = json!(360.0);

        let model = ingest_for_processing(model_json.to_string().as_bytes()).unwrap();

        assert!(!model.rooms[0].apertures[0].is_oriented());
    }

    #[rstest]
    fn test_ingest_rejects_unknown_fields(mut model_json: serde_json::Value) {
        model_json["Rooms"][0]["colour"] = json!("red");
        assert!(ingest_for_processing(model_json.to_string().as_bytes()).is_err());
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(0.), false)]
    #[case(Some(0.5), true)]
    #[case(Some(270.), true)]
    fn test_zero_azimuth_counts_as_unoriented(#[case] azimuth: Option<f64>, #[case] expected: bool) {
        let face = FaceInput {
            identifier: None,
            face_type: FaceType::Wall,
            boundary_condition: BoundaryCondition::Surface,
            area: 1.,
            azimuth,
        };
        assert_eq!(face.is_internal_wall(), expected);
    }

    #[test]
    fn test_default_parameters() {
        let parameters = CalculationParameters::default().checked().unwrap();
        assert_eq!(parameters.north_angle.angle(), 90.);
        assert_eq!(parameters.facade_scope, FacadeScope::ConditionedZones);
        assert_eq!(parameters.proposed, ProposedDesign::default());
    }

    #[test]
    fn test_parameters_reject_non_positive_r_value() {
        let parameters = CalculationParameters {
            proposed: ProposedDesign {
                wall_r_value: 0.,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(parameters.checked().is_err());
    }

    #[test]
    fn test_parameters_reject_north_angle_out_of_range() {
        let parameters: CalculationParameters =
            serde_json::from_value(json!({"north_angle": 200.0})).unwrap();
        assert!(parameters.checked().is_err());
    }

    #[cfg(feature = "ncc2019")]
    fn parameters_with_tables(
        adjust: impl FnOnce(&mut RegulatoryTables),
    ) -> anyhow::Result<CalculationParameters> {
        use crate::baselines::ncc2019::tables::NCC_2019_TABLES;

        let mut tables = (**NCC_2019_TABLES).clone();
        adjust(&mut tables);
        let parameters: CalculationParameters =
            serde_json::from_value(json!({ "regulatory_tables": tables }))?;
        parameters.checked()
    }

    #[cfg(feature = "ncc2019")]
    #[test]
    fn test_parameters_accept_embedded_tables() {
        let parameters = parameters_with_tables(|_| {}).unwrap();
        assert!(parameters.regulatory_tables.is_some());
    }

    #[cfg(feature = "ncc2019")]
    #[test]
    fn test_parameters_reject_inverted_table_bounds() {
        let result = parameters_with_tables(|tables| {
            tables.glazing_u_value_bounds.lower = 5.8;
            tables.glazing_u_value_bounds.upper = 1.5;
        });
        assert!(result.is_err());
    }

    #[cfg(feature = "ncc2019")]
    #[test]
    fn test_parameters_reject_negative_shading_multiplier() {
        let result = parameters_with_tables(|tables| tables.shading_multiplier = -1.);
        assert!(result.is_err());
    }
}
