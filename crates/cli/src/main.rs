//! colomine - mine spatial colocation patterns from tagged 2D points.
//!
//! A command line driver over `colocation_core`: reads points from a CSV
//! or GeoJSON file, mines colocation patterns, and reports them as text
//! or JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use memmap2::Mmap;
use tracing::{info, warn};

use colocation_core::{CsvPointSource, GeoJsonPointSource, MiningConfig, Pattern, PointSource, RawPoint};

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum InputFormat {
    #[default]
    Auto,
    Csv,
    Geojson,
}

/// Discover spatial colocation patterns in tagged 2D point data.
#[derive(Parser, Debug)]
#[command(name = "colomine")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input point file (CSV or GeoJSON)
    #[arg(long, short)]
    input: PathBuf,

    /// Input format; inferred from the file extension if not given
    #[arg(long, value_enum, default_value = "auto")]
    format: InputFormat,

    /// Neighborhood radius
    #[arg(long)]
    radius: f64,

    /// Minimum participation index (θ) for a pattern to be reported
    #[arg(long, default_value = "0.3")]
    min_prevalence: f64,

    /// Disable the coarse-grid multi-resolution pruner
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_coarse_pruning: bool,

    /// Override the coarse grid cell size (default: 2 * radius)
    #[arg(long)]
    grid_size: Option<f64>,

    /// Cap the number of witnessing instances kept per pattern
    #[arg(long, default_value = "1000000")]
    max_instances: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Bounding box accepted for interface parity with dataset-backed
    /// loaders; this build only reads local files, so it has no effect
    #[arg(long, value_name = "MIN_LAT,MIN_LON,MAX_LAT,MAX_LON")]
    area: Option<String>,

    /// POI/species type filter accepted for interface parity; see `--area`
    #[arg(long = "poi-types", value_delimiter = ',')]
    poi_types: Vec<String>,
}

fn read_mapped(path: &PathBuf) -> Result<Mmap> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    unsafe { Mmap::map(&file) }.with_context(|| format!("mapping {}", path.display()))
}

fn infer_format(path: &PathBuf) -> InputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("geojson") || ext.eq_ignore_ascii_case("json") => InputFormat::Geojson,
        _ => InputFormat::Csv,
    }
}

fn load_points(args: &Args) -> Result<Vec<RawPoint>> {
    let mapped = read_mapped(&args.input)?;
    let format = match args.format {
        InputFormat::Auto => infer_format(&args.input),
        other => other,
    };

    match format {
        InputFormat::Csv => {
            let mut source = CsvPointSource::new(io::Cursor::new(&mapped[..]));
            source.load().context("reading CSV point source")
        }
        InputFormat::Geojson => {
            let mut source = GeoJsonPointSource::new(io::Cursor::new(&mapped[..]));
            source.load().context("reading GeoJSON point source")
        }
        InputFormat::Auto => unreachable!("resolved above"),
    }
}

fn build_config(args: &Args) -> Result<MiningConfig> {
    let mut builder = MiningConfig::builder()
        .radius(args.radius)
        .min_prevalence(args.min_prevalence)
        .coarse_pruning(!args.no_coarse_pruning)
        .max_instances_per_pattern(args.max_instances);
    if let Some(grid_size) = args.grid_size {
        builder = builder.grid_size(grid_size);
    }
    builder.build().context("invalid mining configuration")
}

fn print_text(patterns: &[Pattern], writer: &mut impl Write) -> io::Result<()> {
    for pattern in patterns {
        writeln!(
            writer,
            "{} (PI={:.3}, instances={})",
            pattern.types().join(", "),
            pattern.participation_index(),
            pattern.instances().len()
        )?;
    }
    Ok(())
}

fn print_json(patterns: &[Pattern], writer: &mut impl Write) -> io::Result<()> {
    let entries: Vec<serde_json::Value> = patterns
        .iter()
        .map(|pattern| {
            serde_json::json!({
                "types": pattern.types(),
                "participation_index": pattern.participation_index(),
                "instances": pattern.instances(),
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &entries)?;
    writeln!(writer)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.area.is_some() || !args.poi_types.is_empty() {
        warn!("--area and --poi-types only constrain network-backed loaders, which this build does not include; ignoring");
    }

    let points = load_points(&args)?;
    info!(points = points.len(), "loaded point set");

    let config = build_config(&args)?;
    let patterns = colocation_core::mine(&points, &config).context("mining colocation patterns")?;
    info!(patterns = patterns.len(), "mining complete");

    let mut stdout = BufWriter::new(io::stdout());
    match args.output {
        OutputFormat::Text => print_text(&patterns, &mut stdout)?,
        OutputFormat::Json => print_json(&patterns, &mut stdout)?,
    }
    stdout.flush()?;

    Ok(())
}
