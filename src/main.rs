use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use walkdir::WalkDir;

mod config;
mod densifier;
mod error;
mod exporter;
mod flight_data;
mod geodesy;
mod gpx_reader;
mod gpx_writer;
mod interpolation;
mod report;
mod smoother;
mod track_processor;

use config::{ProcessingConfig, DEFAULT_MAX_DISTANCE_M, DEFAULT_WINDOW_SIZE};
use exporter::{export_track, ExportResult};
use flight_data::load_track;

#[derive(Parser)]
#[command(name = "flight-track-export")]
#[command(about = "Export accumulated in-flight position history as smoothed GPX tracks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one flight history JSON file to GPX
    Export {
        history: PathBuf,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Write the GPX document to stdout instead of a file
        #[arg(long)]
        stdout: bool,
        #[command(flatten)]
        processing: ProcessingArgs,
    },
    /// Export every history JSON file under a directory
    Batch {
        folder: PathBuf,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        processing: ProcessingArgs,
    },
    /// Summarize an exported GPX file
    Inspect { gpx: PathBuf },
}

#[derive(Args)]
struct ProcessingArgs {
    /// Largest gap between consecutive exported points, in meters
    #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE_M)]
    max_distance: f64,
    /// Moving-average window, in points
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window: usize,
}

impl ProcessingArgs {
    fn config(&self) -> error::Result<ProcessingConfig> {
        ProcessingConfig::new(self.max_distance, self.window)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Export { history, out, stdout, processing } => processing.config().and_then(|config| {
            if stdout {
                print_gpx(&history, config)
            } else {
                export_one(&history, &out, config)
            }
        }),
        Commands::Batch { folder, out, processing } => processing.config().and_then(|config| {
            let out = out.unwrap_or_else(|| folder.join("gpx"));
            export_folder(&folder, &out, config)
        }),
        Commands::Inspect { gpx } => inspect(&gpx),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn export_one(history: &Path, out: &Path, config: ProcessingConfig) -> error::Result<()> {
    let track = load_track(history)?;
    let (path, result) = export_track(&track, &history.display().to_string(), out, config)?;

    println!("✅ {} exported: {} fixes → {} points", result.flight_number, result.original_points, result.processed_points);
    println!("   {:.1}km raw, {:.1}km smoothed", result.original_distance_km, result.processed_distance_km);
    println!("📁 {}", path.display());
    Ok(())
}

fn print_gpx(history: &Path, config: ProcessingConfig) -> error::Result<()> {
    let track = load_track(history)?;
    println!("{}", gpx_writer::convert_to_gpx(&track, config));
    Ok(())
}

fn export_folder(folder: &Path, out: &Path, config: ProcessingConfig) -> error::Result<()> {
    let mut histories = Vec::new();
    for entry in WalkDir::new(folder) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()).map(|e| e.eq_ignore_ascii_case("json")) == Some(true)
        {
            histories.push(entry.path().to_path_buf());
        }
    }

    println!("🔍 Found {} flight histories in {}", histories.len(), folder.display());
    println!("⚡ Using parallel processing on {} cores", num_cpus::get());
    log::debug!("Max gap {:.0}m, smoothing window {}", config.max_distance_m, config.window_size);

    let results: Vec<ExportResult> = histories
        .par_iter()
        .map(|path| {
            let source = path.display().to_string();
            match load_track(path).and_then(|track| export_track(&track, &source, out, config)) {
                Ok((_, result)) => result,
                Err(e) => {
                    log::warn!("Failed to export {}: {}", source, e);
                    ExportResult::failed(&source, &e.to_string())
                }
            }
        })
        .collect();

    std::fs::create_dir_all(out)?;
    report::save_results_to_csv(&results, &out.join("export_results.csv"))?;
    report::print_export_summary(&results);
    Ok(())
}

fn inspect(path: &Path) -> error::Result<()> {
    let summary = gpx_reader::inspect_gpx(path)?;

    println!("📍 {}", path.display());
    println!("  Track: {}", summary.track_name.as_deref().unwrap_or("(unnamed)"));
    println!("  Points: {}", summary.points);
    println!("  Length: {:.1}km", summary.length_m / 1000.0);
    println!("  Max spacing: {:.0}m", summary.max_spacing_m);
    match summary.duration_seconds {
        Some(s) => println!("  Duration: {}h {:02}m", s / 3600, (s % 3600) / 60),
        None => println!("  Duration: n/a"),
    }
    Ok(())
}
