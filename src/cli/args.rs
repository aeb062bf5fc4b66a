use clap::Parser;
use std::path::PathBuf;

use regionpro::OutputDialect;

#[derive(Parser)]
#[command(
    name = "regionpro",
    version,
    about = "regionpro CLI",
    override_usage = "regionpro --input-images <FILE> --output-directory <DIR> [OPTIONS]"
)]
pub struct CliArgs {
    /// File that contains one image per line (`path` or `id<TAB>path`)
    #[arg(short, long, alias = "input_images")]
    pub input_images: Option<PathBuf>,

    /// Base directory joined in front of every manifest path
    #[arg(long, alias = "base_image_dir")]
    pub base_image_dir: Option<PathBuf>,

    /// Directory where region files are saved
    #[arg(short, long, alias = "output_directory")]
    pub output_directory: Option<PathBuf>,

    /// Number of regions to keep per image [default: 100]
    #[arg(short, long, alias = "number_regions")]
    pub number_regions: Option<usize>,

    /// Minimum region area, as a fraction of the image area [default: 0.2]
    #[arg(long, alias = "min_area", conflicts_with = "min_width")]
    pub min_area: Option<f64>,

    /// Minimum region width, as a fraction of the image width
    #[arg(long)]
    pub min_width: Option<f64>,

    /// Use the fast (lower recall) proposal mode
    #[arg(long, alias = "fast_computation", default_value_t = false)]
    pub fast_computation: bool,

    /// Output dialect: plain coordinates, or a crop manifest plus JPEG crops
    #[arg(long, value_enum)]
    pub dialect: Option<OutputDialect>,

    /// Worker threads [default: available parallelism]
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Warn when proposing regions for one image takes longer than this
    #[arg(long)]
    pub oracle_budget_ms: Option<u64>,

    /// Also save `<output>/<path>.overlay.jpg` with the kept regions outlined
    #[arg(long, default_value_t = false)]
    pub overlay: bool,

    /// JSON parameter preset; explicit flags override its values
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
