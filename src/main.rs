//! CLI entry point for snpflank.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use snpflank::config::{
    parse_distance_threshold, AssemblyPolicy, Config, CoordinateMode, DistanceThreshold,
    DEFAULT_ALTERNATE_PATTERN, DEFAULT_PRIMARY_PATTERN,
};
use snpflank::index::{build_index, GenomicAnnotationIndex};
use snpflank::matcher::{annotate_markers, Retention, RetentionStrategy};
use snpflank::output::{write_database_dump, write_unresolved_report};
use snpflank::parser::{parse_excluded, ExcludedMarkers, MarkerReader};

/// Nearest flanking gene annotation for SNP markers.
///
/// Builds a gene position index from a seq_gene.md style database and
/// reports, for each marker, the closest genes on the 5' and 3' side.
#[derive(Parser, Debug)]
#[command(name = "snpflank")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Gene database (seq_gene.md, plain or gzip)
    #[arg(short = 'g', long = "db")]
    db: PathBuf,

    /// Marker list: MARKER_ID CHR CONTIG POSITION, tab-separated
    #[arg(short = 'm', long = "markers", required_unless_present = "print_db")]
    markers: Option<PathBuf>,

    /// Markers to skip, one id per line (optionally prefixed, e.g. rs123)
    #[arg(short = 'e', long = "exclude")]
    exclude: Option<PathBuf>,

    /// Report every gene within this distance (k suffix = x1000);
    /// negative reports only the nearest genes
    #[arg(
        short = 'd',
        long = "distance",
        default_value = "-1",
        allow_hyphen_values = true,
        value_parser = parse_distance_threshold
    )]
    distance: DistanceThreshold,

    /// Use chromosome coordinates instead of contig coordinates
    #[arg(short = 'c', long = "chromosome-coordinates")]
    chromosome_coordinates: bool,

    /// Print the gene index and exit
    #[arg(short = 'p', long = "print-db")]
    print_db: bool,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Group label pattern of the primary assembly
    #[arg(long = "primary-assembly", default_value = DEFAULT_PRIMARY_PATTERN)]
    primary_assembly: String,

    /// Group label pattern of the alternate chromosome 7 assembly
    #[arg(long = "alternate-assembly", default_value = DEFAULT_ALTERNATE_PATTERN)]
    alternate_assembly: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    // Build configuration
    let mut config = Config::new();
    config.threshold = args.distance;
    if args.chromosome_coordinates {
        config.coordinate_mode = CoordinateMode::Chromosome;
    }
    config.assembly = AssemblyPolicy::new(&args.primary_assembly, &args.alternate_assembly)
        .context("Invalid assembly group label pattern")?;

    let index = build_index(&args.db, &config.assembly, config.coordinate_mode)?;

    let mut writer = open_output(args.output.as_deref())?;

    if args.print_db {
        let lines = write_database_dump(&mut writer, &index, &config.assembly)?;
        writer.flush()?;
        info!("Printed {} gene entries", lines);
        return Ok(());
    }

    let excluded = match &args.exclude {
        Some(path) => {
            let excluded = parse_excluded(path)?;
            info!("Loaded {} excluded markers from {}", excluded.len(), path.display());
            excluded
        }
        None => ExcludedMarkers::new(),
    };

    let markers_path = args
        .markers
        .as_deref()
        .context("A marker list is required unless --print-db is given")?;

    // The retention strategy is fixed for the whole run
    let unresolved = match Retention::from(config.threshold) {
        Retention::Nearest(strategy) => {
            run(&index, &excluded, strategy, markers_path, &mut writer)?
        }
        Retention::WithinDistance(strategy) => {
            run(&index, &excluded, strategy, markers_path, &mut writer)?
        }
    };
    writer.flush()?;

    let stderr = io::stderr();
    let mut report = stderr.lock();
    write_unresolved_report(&mut report, &unresolved)?;

    Ok(())
}

/// Resolve every marker in the list, returning the unresolved marker ids.
fn run<S, W>(
    index: &GenomicAnnotationIndex,
    excluded: &ExcludedMarkers,
    strategy: S,
    markers_path: &Path,
    writer: &mut W,
) -> Result<Vec<u32>>
where
    S: RetentionStrategy + Clone,
    W: Write,
{
    info!("Processing marker list: {}", markers_path.display());
    let markers = MarkerReader::new(markers_path)?;
    let summary = annotate_markers(index, excluded, strategy, markers, writer)?;
    Ok(summary.unresolved)
}

/// Open the output destination, stdout if no path is given.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            info!("Writing output to: {}", path.display());
            let file = File::create(path).context("Failed to create output file")?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
