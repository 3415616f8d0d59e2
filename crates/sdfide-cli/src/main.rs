//! sdfide CLI - probe and sample the demo fields

mod settings;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use sdfide_core::prelude::*;
use settings::{OutputFormat, Settings, load_settings};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sdfide")]
#[command(about = "Signed distance field playground", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available demos
    List,

    /// Print the distance of a demo field at one or more points
    Probe {
        /// Demo name
        demo: Demo,

        /// Query point as x,y,z (repeatable)
        #[arg(short, long = "point", value_parser = parse_point, num_args = 1.., required = true)]
        points: Vec<Vec3>,
    },

    /// Sample a demo field on a regular grid and report statistics
    Sample {
        /// Demo name
        demo: Demo,

        /// Target number of grid points
        #[arg(short, long)]
        samples: Option<u64>,

        /// Report format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::List => {
            for demo in Demo::all() {
                println!("{demo}");
            }
        }
        Commands::Probe { demo, points } => {
            run_probe(demo, &points);
        }
        Commands::Sample {
            demo,
            samples,
            format,
            output,
        } => {
            run_sample(demo, &settings, samples, format, output)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_point(s: &str) -> Result<Vec3> {
    let coords = s
        .split(',')
        .map(|c| {
            c.trim()
                .parse::<f32>()
                .with_context(|| format!("invalid coordinate {c:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    match coords[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => bail!("expected x,y,z, got {s:?}"),
    }
}

fn run_probe(demo: Demo, points: &[Vec3]) {
    tracing::info!(%demo, count = points.len(), "probing");
    let field = demo.build();
    for d in field.evaluate(points) {
        println!("{d}");
    }
}

fn run_sample(
    demo: Demo,
    settings: &Settings,
    samples: Option<u64>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = SampleConfig::default()
        .with_samples(samples.unwrap_or(settings.samples))
        .with_chunk_size(settings.chunk_size);
    let format = format.unwrap_or(settings.format);

    tracing::info!(%demo, samples = config.samples, "sampling");
    let field = demo.build();
    let report =
        sample_grid(&field, &config).with_context(|| format!("Failed to sample {demo}"))?;

    let rendered = match format {
        OutputFormat::Text => render_text(demo, &report),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        }
    };

    match output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Saved to: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_text(demo: Demo, r: &SampleReport) -> String {
    let [nx, ny, nz] = r.resolution;
    let mut lines = vec![
        format!("demo:        {demo}"),
        format!("bounds:      {:?} .. {:?}", r.bounds_min, r.bounds_max),
        format!("resolution:  {nx} x {ny} x {nz} (step {})", r.step),
        format!("points:      {}", r.total),
        format!("inside:      {}", r.inside),
    ];
    if r.non_finite > 0 {
        lines.push(format!("non-finite:  {}", r.non_finite));
    }
    if let (Some(lo), Some(hi)) = (r.min_distance, r.max_distance) {
        lines.push(format!("distance:    {lo} .. {hi}"));
    }
    lines.push(format!("volume:      {}", r.volume));
    lines.join("\n")
}
