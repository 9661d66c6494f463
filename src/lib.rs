mod compare_floats;
pub mod baselines;
pub mod core;
pub mod corpus;
pub mod errors;
pub mod input;
pub mod output;
mod output_writer;
mod statistics;

#[macro_use]
extern crate is_close;

pub use crate::corpus::CalculationResults;
use crate::corpus::Corpus;
use crate::errors::{FacadeCalcError, OutputError};
use crate::input::{ingest_for_processing, CalculationParameters};
use crate::output::Output;
use crate::output_writer::write_results;
use anyhow::anyhow;
use bitflags::bitflags;
use itertools::Itertools;
use std::io::Read;
use tracing::{instrument, warn};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct ProjectFlags: u8 {
        /// Treat model warnings and unavailable metrics as failures of the whole request.
        const STRICT_MODEL_CHECKS = 0b1;
        /// Only write the JSON summary, skipping the room and facade tables.
        const SUMMARY_ONLY = 0b10;
    }
}

#[instrument(skip_all)]
pub fn run_project(
    model_json: impl Read,
    output: impl Output,
    parameters: &CalculationParameters,
    flags: &ProjectFlags,
) -> Result<CalculationResults, FacadeCalcError> {
    let model = ingest_for_processing(model_json)?;
    let corpus = Corpus::from_inputs(model, parameters)?;

    let results = corpus.run();

    for warning in &results.warnings {
        warn!("{warning}");
    }

    if flags.contains(ProjectFlags::STRICT_MODEL_CHECKS) {
        if !results.warnings.is_empty() {
            return Err(FacadeCalcError::InvalidRequest(anyhow!(
                "The model raised warnings: {}",
                results.warnings.iter().join("; ")
            )));
        }
        if let Some(error) = results.first_failure() {
            return Err(error.clone().into());
        }
    }

    if !output.is_noop() {
        write_results(&output, &results, flags)
            .map_err(|err| FacadeCalcError::ErrorInOutput(OutputError::new(err)))?;
    }

    Ok(results)
}
