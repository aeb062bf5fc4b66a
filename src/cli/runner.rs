use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use regionpro::{
    BatchReport, ProcessingParams, RunConfig, SearchMode, SizeCriterion, default_proposer,
    run_batch,
};

use super::args::CliArgs;
use super::errors::AppError;

/// JSON document written by `--report`
#[derive(Serialize)]
struct RunSummary<'a> {
    started_at: String,
    finished_at: String,
    manifest: &'a Path,
    output_directory: &'a Path,
    params: &'a ProcessingParams,
    #[serde(flatten)]
    report: &'a BatchReport,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_preset(path: &Path) -> Result<ProcessingParams, AppError> {
    let json = fs::read_to_string(path).map_err(|source| AppError::PresetRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| AppError::Preset {
        path: path.to_path_buf(),
        source,
    })
}

/// Preset values first, then explicit flags on top.
fn resolve_params(args: &CliArgs) -> Result<ProcessingParams, AppError> {
    let mut params = match &args.params {
        Some(path) => load_preset(path)?,
        None => ProcessingParams::default(),
    };

    if let Some(n) = args.number_regions {
        params.number_regions = n;
    }
    if let Some(fraction) = args.min_area {
        params.criterion = SizeCriterion::Area;
        params.min_fraction = fraction;
    }
    if let Some(fraction) = args.min_width {
        params.criterion = SizeCriterion::Width;
        params.min_fraction = fraction;
    }
    if args.fast_computation {
        params.mode = SearchMode::Fast;
    }
    if let Some(dialect) = args.dialect {
        params.dialect = dialect;
    }
    if let Some(threads) = args.threads {
        params.threads = threads;
    }
    if args.oracle_budget_ms.is_some() {
        params.oracle_budget_ms = args.oracle_budget_ms;
    }
    if args.overlay {
        params.overlay = true;
    }

    params.validate()?;
    Ok(params)
}

fn required(value: Option<PathBuf>, arg: &str) -> Result<PathBuf, AppError> {
    value.ok_or_else(|| {
        let mut cmd = CliArgs::command();
        eprintln!("{}", cmd.render_help());
        AppError::MissingArgument {
            arg: arg.to_string(),
        }
    })
}

fn write_report(path: &Path, summary: &RunSummary<'_>) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| AppError::Library(regionpro::Error::external(e)))?;
    fs::write(path, json).map_err(|source| AppError::Report {
        path: path.to_path_buf(),
        source,
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.verbose);

    let manifest = required(args.input_images.clone(), "--input-images")?;
    let output_dir = required(args.output_directory.clone(), "--output-directory")?;
    let params = resolve_params(&args)?;

    let mut config = RunConfig::new(manifest, output_dir).with_params(params);
    if let Some(base) = &args.base_image_dir {
        config = config.with_base_image_dir(base);
    }

    let started_at = chrono::Utc::now().to_rfc3339();
    let proposer = default_proposer();
    let report = run_batch(&config, proposer.as_ref()).map_err(AppError::from)?;
    let finished_at = chrono::Utc::now().to_rfc3339();

    if let Some(path) = &args.report {
        write_report(
            path,
            &RunSummary {
                started_at,
                finished_at,
                manifest: &config.manifest,
                output_directory: &config.output_dir,
                params: &config.params,
                report: &report,
            },
        )?;
        info!("Run report written to {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use regionpro::OutputDialect;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("regionpro").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn flags_map_onto_params() {
        let args = parse(&[
            "-i", "list.txt", "-o", "out", "--number-regions", "3", "--min-width", "0.1",
            "--fast-computation", "--dialect", "crops", "--threads", "2",
        ]);
        let p = resolve_params(&args).unwrap();
        assert_eq!(p.number_regions, 3);
        assert_eq!(p.criterion, SizeCriterion::Width);
        assert_eq!(p.min_fraction, 0.1);
        assert_eq!(p.mode, SearchMode::Fast);
        assert_eq!(p.dialect, OutputDialect::Crops);
        assert_eq!(p.threads, 2);
    }

    #[test]
    fn min_area_and_min_width_conflict() {
        let argv = ["regionpro", "--min-area", "0.1", "--min-width", "0.1"];
        assert!(CliArgs::try_parse_from(argv).is_err());
    }

    #[test]
    fn flags_override_preset() {
        let tmp = tempfile::tempdir().unwrap();
        let preset = tmp.path().join("preset.json");
        fs::write(&preset, r#"{"number_regions": 7, "mode": "fast", "min_fraction": 0.5}"#).unwrap();

        let args = parse(&["--params", preset.to_str().unwrap(), "--number-regions", "9"]);
        let p = resolve_params(&args).unwrap();
        assert_eq!(p.number_regions, 9);
        assert_eq!(p.mode, SearchMode::Fast);
        assert_eq!(p.min_fraction, 0.5);
    }

    #[test]
    fn zero_threads_is_rejected() {
        let args = parse(&["--threads", "0"]);
        assert!(resolve_params(&args).is_err());
    }

    #[test]
    fn gflags_style_names_are_accepted() {
        let args = parse(&[
            "--input_images", "list.txt", "--output_directory", "out", "--base_image_dir",
            "imgs", "--number_regions", "4", "--min_area", "0.3", "--fast_computation",
        ]);
        assert_eq!(args.input_images, Some(PathBuf::from("list.txt")));
        assert_eq!(args.output_directory, Some(PathBuf::from("out")));
        assert_eq!(args.base_image_dir, Some(PathBuf::from("imgs")));
        let p = resolve_params(&args).unwrap();
        assert_eq!(p.number_regions, 4);
        assert_eq!(p.criterion, SizeCriterion::Area);
        assert_eq!(p.min_fraction, 0.3);
        assert_eq!(p.mode, SearchMode::Fast);
    }

    #[test]
    fn overlay_flag_enables_overlay() {
        assert!(!resolve_params(&parse(&[])).unwrap().overlay);
        assert!(resolve_params(&parse(&["--overlay"])).unwrap().overlay);
    }
}
