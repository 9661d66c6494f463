//! Writes calculation results out as tabular CSV files and a JSON summary.

use crate::baselines::{BaselineMethod, BaselineResults};
use crate::core::facade::{FacadeScope, FacadeSummary};
use crate::core::room::RoomTable;
use crate::corpus::CalculationResults;
use crate::errors::{CalculationError, CalculationWarning};
use crate::output::Output;
use crate::ProjectFlags;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, instrument};

const ROOM_TABLE_HEADINGS: [&str; 10] = [
    "Room",
    "Conditioning",
    "Program Type",
    "Volume",
    "Floor Area",
    "Roof Area",
    "Exterior Wall Area",
    "Exterior Aperture Area",
    "Exterior Skylight Area",
    "Internal Wall Area",
];

const FACADE_TABLE_HEADINGS: [&str; 5] = [
    "Orientation",
    "Aperture Area",
    "Face Area",
    "Exterior Wall Area",
    "Window To Wall Ratio",
];

#[instrument(skip_all)]
pub(crate) fn write_results(
    output: &impl Output,
    results: &CalculationResults,
    flags: &ProjectFlags,
) -> anyhow::Result<()> {
    if !flags.contains(ProjectFlags::SUMMARY_ONLY) {
        write_room_table(output.writer_for_location_key("rooms", "csv")?, &results.rooms)?;
        if let Ok(facade) = &results.facade {
            write_facade_table(output.writer_for_location_key("facade", "csv")?, facade)?;
        }
    }
    write_summary(output.writer_for_location_key("summary", "json")?, results)?;

    Ok(())
}

pub(crate) fn write_room_table(writer: impl Write, rooms: &RoomTable) -> anyhow::Result<()> {
    debug!("writing room table with {} rows", rooms.len());
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(ROOM_TABLE_HEADINGS)?;
    writer.write_record(["", "", "", "[m3]", "[m2]", "[m2]", "[m2]", "[m2]", "[m2]", "[m2]"])?;

    for (identifier, metrics) in rooms.rows() {
        writer.write_record([
            identifier.to_string(),
            if metrics.is_conditioned {
                "Conditioned"
            } else {
                "Unconditioned"
            }
            .to_string(),
            metrics.program_type.to_string(),
            metrics.volume.to_string(),
            metrics.floor_area.to_string(),
            metrics.roof_area.to_string(),
            metrics.exterior_wall_area.to_string(),
            metrics.exterior_aperture_area.to_string(),
            metrics.exterior_skylight_area.to_string(),
            metrics.internal_wall_area.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

pub(crate) fn write_facade_table(writer: impl Write, facade: &FacadeSummary) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);

    writer.write_record(FACADE_TABLE_HEADINGS)?;
    writer.write_record(["", "[m2]", "[m2]", "[m2]", "[%]"])?;

    for (orientation, row) in &facade.orientations {
        writer.write_record([
            orientation.to_string(),
            row.aperture_area.to_string(),
            row.face_area.to_string(),
            row.exterior_wall_area.to_string(),
            row.window_to_wall_ratio.to_string(),
        ])?;
    }
    writer.write_record([
        "Total".to_string(),
        facade.total_aperture_area().to_string(),
        facade.total_face_area().to_string(),
        facade.total_exterior_wall_area().to_string(),
        facade.overall_window_to_wall_ratio().to_string(),
    ])?;
    writer.write_record(["Roof".to_string(), "".to_string(), facade.roof_area.to_string()])?;
    writer.write_record([
        "Exposed Floor".to_string(),
        "".to_string(),
        facade.exposed_floor_area.to_string(),
    ])?;

    writer.flush()?;

    Ok(())
}

pub(crate) fn write_summary(mut writer: impl Write, results: &CalculationResults) -> anyhow::Result<()> {
    let summary = Summary::from(results);
    serde_json::to_writer_pretty(&mut writer, &summary)?;
    writer.flush()?;

    Ok(())
}

/// A metric that is either available or replaced by the reason it could not be calculated.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Metric<T> {
    Available(T),
    Unavailable { error: String },
}

impl<T> From<Result<T, &CalculationError>> for Metric<T> {
    fn from(result: Result<T, &CalculationError>) -> Self {
        match result {
            Ok(value) => Metric::Available(value),
            Err(error) => Metric::Unavailable {
                error: error.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct WarningOutput<'a> {
    message: String,
    #[serde(flatten)]
    detail: &'a CalculationWarning,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    model_identifier: Option<&'a str>,
    north_angle: f64,
    facade_scope: FacadeScope,
    baseline_method: BaselineMethod,
    room_count: usize,
    total_volume: f64,
    total_envelope_area: f64,
    total_shade_area: f64,
    relative_compactness: Metric<f64>,
    window_to_wall_ratio: Metric<f64>,
    facade: Metric<&'a FacadeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_building: Option<Metric<&'a BaselineResults>>,
    warnings: Vec<WarningOutput<'a>>,
}

impl<'a> From<&'a CalculationResults> for Summary<'a> {
    fn from(results: &'a CalculationResults) -> Self {
        Self {
            model_identifier: results.model_identifier.as_deref(),
            north_angle: results.parameters.north_angle.angle(),
            facade_scope: results.parameters.facade_scope,
            baseline_method: results.parameters.baseline_method,
            room_count: results.rooms.len(),
            total_volume: results.rooms.total_volume(),
            total_envelope_area: results.rooms.total_envelope_area(),
            total_shade_area: results.total_shade_area,
            relative_compactness: results.relative_compactness.as_ref().copied().into(),
            window_to_wall_ratio: results
                .facade
                .as_ref()
                .map(FacadeSummary::overall_window_to_wall_ratio)
                .into(),
            facade: results.facade.as_ref().into(),
            reference_building: results
                .reference_building
                .as_ref()
                .map(|result| result.as_ref().into()),
            warnings: results
                .warnings
                .iter()
                .map(|warning| WarningOutput {
                    message: warning.to_string(),
                    detail: warning,
                })
                .collect(),
        }
    }
}
