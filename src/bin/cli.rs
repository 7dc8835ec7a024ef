// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! geoprism CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use geoprism::geometry::IntersectionReport;
use geoprism::{import_geo_file, reconstruct_file, Config};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geoprism")]
#[command(
    about = "Reconstruct prisms from Netgen algebraic3d plane descriptions",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./geoprism.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .geo file and output the plane lists as JSON
    Parse {
        /// Input .geo file
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reconstruct every solid and output the prisms as JSON
    Reconstruct {
        /// Input .geo file
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check shells and fillers for pairwise intersections
    Check {
        /// Input .geo file
        input: PathBuf,

        /// Distance at or below which two prisms intersect
        #[arg(short, long)]
        epsilon: Option<f64>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env()?;
            config
        }
        None => Config::load()?,
    };
    init_tracing(&config, cli.verbose);

    match &cli.command {
        Commands::Parse { input, output } => parse_command(input, output.as_deref(), &config),
        Commands::Reconstruct { input, output } => {
            reconstruct_command(input, output.as_deref(), &config)
        }
        Commands::Check { input, epsilon } => {
            if let Some(epsilon) = epsilon {
                config.epsilon = *epsilon;
            }
            check_command(input, &config)
        }
        Commands::Version => {
            println!("geoprism v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_tracing(config: &Config, verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter.as_deref().unwrap_or(level)))
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_json(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Written:".bright_black(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn parse_command(input: &Path, output: Option<&Path>, config: &Config) -> Result<()> {
    let document = import_geo_file(input, config.unterminated_solid)?;
    write_json(&serde_json::to_string_pretty(&document)?, output)
}

fn reconstruct_command(input: &Path, output: Option<&Path>, config: &Config) -> Result<()> {
    let start = std::time::Instant::now();
    let scene = reconstruct_file(input, config)?;
    let elapsed = start.elapsed();

    let summary = scene.summary(config.analysis_tolerance);
    eprintln!("{}", "Reconstruction Summary".bold());
    if let Some(cell) = &scene.cell {
        eprintln!(
            "  {} {:.4} × {:.4} × {:.4}",
            "Cell:".bright_black(),
            cell.xlen(),
            cell.ylen(),
            cell.zlen()
        );
    }
    eprintln!(
        "  {} {} (volume {:.4})",
        "Fillers:".bright_black(),
        summary.fillers.count.to_string().cyan(),
        summary.fillers.total_volume
    );
    eprintln!(
        "  {} {} (volume {:.4})",
        "Shells:".bright_black(),
        summary.shells.count.to_string().cyan(),
        summary.shells.total_volume
    );
    for failure in &scene.failures {
        eprintln!("  {} {}", "Skipped:".yellow(), failure);
    }
    let outside = summary.fillers.outside_cell.len() + summary.shells.outside_cell.len();
    if outside > 0 {
        eprintln!("  {} {} prism(s) leave the cell", "Warning:".yellow(), outside);
    }
    eprintln!("  {} {:.2?}", "Time:".bright_black(), elapsed);

    write_json(&serde_json::to_string_pretty(&scene)?, output)
}

fn print_report(label: &str, report: &IntersectionReport) {
    match report.min_distance() {
        None => println!("{}: fewer than two prisms, nothing to check", label),
        Some(min_distance) if report.has_intersection() => println!(
            "{}: {} ({} pair(s), min distance {})",
            label,
            "intersection exists".red().bold(),
            report.intersecting.len(),
            min_distance
        ),
        Some(min_distance) => println!(
            "{}: {}, min distance is {}",
            label,
            "no intersection".green(),
            min_distance
        ),
    }
}

fn check_command(input: &Path, config: &Config) -> Result<()> {
    let scene = reconstruct_file(input, config)?;
    let report = scene.check_intersections(config.epsilon)?;

    print_report("shells", &report.shells);
    print_report("fillers", &report.fillers);

    Ok(())
}
