use clap::{Args, Parser};
use facade_calc::baselines::BaselineMethod;
#[cfg(feature = "ncc2019")]
use facade_calc::baselines::ncc2019::building_class::{BuildingClass, ClimateZone};
#[cfg(feature = "ncc2019")]
use facade_calc::baselines::ncc2019::tables::RegulatoryTables;
use facade_calc::core::facade::FacadeScope;
use facade_calc::core::units::NorthAngle;
use facade_calc::input::CalculationParameters;
use facade_calc::output::FileOutput;
use facade_calc::{run_project, ProjectFlags};
use std::ffi::OsStr;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
#[cfg(feature = "ncc2019")]
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct FacadeCalcArgs {
    input_file: String,
    #[arg(
        long,
        help = "Path to a JSON file of calculation parameters; the options below override it"
    )]
    parameters: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Angle of true north in degrees, anticlockwise from the model X axis"
    )]
    north_angle: Option<f64>,
    #[arg(long, help = "Rooms contributing to the facade (\"Conditioned Zones\" or \"Entire Building\")")]
    facade_scope: Option<FacadeScope>,
    #[arg(long, help = "Regulatory baseline to compare against, e.g. \"NCC2019-AU\"")]
    baseline: Option<BaselineMethod>,
    #[cfg(feature = "ncc2019")]
    #[command(flatten)]
    ncc2019: Ncc2019Args,
    #[command(flatten)]
    proposed: ProposedArgs,
    #[clap(
        long,
        default_value_t = false,
        help = "Fail if the model raises warnings or a metric is unavailable"
    )]
    strict: bool,
    #[clap(
        long,
        default_value_t = false,
        help = "Only write the JSON summary"
    )]
    summary_only: bool,
    #[clap(long, default_value_t = false, help = "Whether to log out spans")]
    log_spans: bool,
}

#[cfg(feature = "ncc2019")]
#[derive(Args, Clone, Default, Debug)]
struct Ncc2019Args {
    #[arg(long, help = "NCC building class label, e.g. \"Class 5 - office building\"")]
    building_class: Option<BuildingClass>,
    #[arg(long, help = "NCC climate zone number (1 to 8)")]
    climate_zone: Option<ClimateZone>,
    #[arg(long, help = "Path to replacement regulatory tables in .json format")]
    regulatory_tables: Option<String>,
}

#[derive(Args, Clone, Copy, Default, Debug)]
struct ProposedArgs {
    #[arg(long, help = "Proposed wall R-value (m2.K/W)")]
    wall_r_value: Option<f64>,
    #[arg(long, help = "Proposed glazing U-value (W/m2.K)")]
    glazing_u_value: Option<f64>,
    #[arg(long, help = "Proposed glazing solar heat gain coefficient")]
    glazing_shgc: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let args = FacadeCalcArgs::parse();

    // set up basic tracing
    let tracing_subscriber = {
        let mut builder = tracing_subscriber::fmt::fmt().with_max_level(tracing::Level::TRACE);

        if args.log_spans {
            builder = builder.with_span_events(FmtSpan::CLOSE);
        }

        builder.finish()
    };
    tracing::subscriber::set_global_default(tracing_subscriber)
        .expect("setting tracing subscriber failed");

    let input_file = args.input_file.as_str();
    let input_file_ext = Path::new(input_file).extension().and_then(OsStr::to_str);
    let input_file_stem = match input_file_ext {
        Some(ext) => &input_file[..(input_file.len() - ext.len() - 1)],
        None => input_file,
    };
    let input_file_stem = PathBuf::from(input_file_stem);

    let mut output_path = PathBuf::new();
    output_path.push(format!("{}__results", input_file_stem.display()));
    fs::create_dir_all(&output_path)?;
    let input_file_name = input_file_stem
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("model");
    let file_output = FileOutput::new(output_path, format!("{input_file_name}__{{}}.{{}}"));

    let parameters = parameters_from_args(&args)?;
    let project_flags = (&args).into();

    let results = run_project(
        BufReader::new(File::open(Path::new(input_file))?),
        &file_output,
        &parameters,
        &project_flags,
    )?;

    debug!(
        "Relative compactness: {:?}, facade selection: {:?}",
        results.relative_compactness,
        results
            .facade
            .as_ref()
            .map(|facade| facade.selected_rooms.len())
    );

    Ok(())
}

fn parameters_from_args(args: &FacadeCalcArgs) -> anyhow::Result<CalculationParameters> {
    let mut parameters: CalculationParameters = match &args.parameters {
        Some(file) => serde_json::from_reader(BufReader::new(File::open(file)?))?,
        None => Default::default(),
    };

    if let Some(angle) = args.north_angle {
        parameters.north_angle = NorthAngle::new(angle)?;
    }
    if let Some(scope) = args.facade_scope {
        parameters.facade_scope = scope;
    }
    if let Some(baseline) = args.baseline {
        parameters.baseline_method = baseline;
    }
    #[cfg(feature = "ncc2019")]
    {
        let ncc2019 = &args.ncc2019;
        if let Some(building_class) = ncc2019.building_class {
            parameters.building_class = building_class;
        }
        if let Some(climate_zone) = ncc2019.climate_zone {
            parameters.climate_zone = climate_zone;
        }
        if let Some(file) = &ncc2019.regulatory_tables {
            parameters.regulatory_tables =
                Some(Arc::new(RegulatoryTables::from_reader(File::open(file)?)?));
        }
    }
    {
        let proposed = args.proposed;
        if let Some(wall_r_value) = proposed.wall_r_value {
            parameters.proposed.wall_r_value = wall_r_value;
        }
        if let Some(glazing_u_value) = proposed.glazing_u_value {
            parameters.proposed.glazing_u_value = glazing_u_value;
        }
        if let Some(glazing_shgc) = proposed.glazing_shgc {
            parameters.proposed.glazing_shgc = glazing_shgc;
        }
    }

    Ok(parameters)
}

impl From<&FacadeCalcArgs> for ProjectFlags {
    fn from(args: &FacadeCalcArgs) -> Self {
        let mut flags = ProjectFlags::empty();
        if args.strict {
            flags.insert(ProjectFlags::STRICT_MODEL_CHECKS);
        }
        if args.summary_only {
            flags.insert(ProjectFlags::SUMMARY_ONLY);
        }

        flags
    }
}
