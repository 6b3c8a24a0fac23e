//! movements: drive the chord engine from scripts and inspect its tables

mod render;
mod script;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use movements_core::{ChordState, ScaleId};
use movements_services::{EngineService, EngineUpdate, LogSink, MovementsConfig};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Contrary-motion chord voicings from a two-axis controller
#[derive(Parser)]
#[command(name = "movements")]
#[command(version)]
struct Cli {
    /// Config file (default: the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run events through the engine (from a script, or stdin)
    Play {
        /// Event script, one event per line
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Show contrary-motion voicings from the pivot down two octaves
    Ladder {
        /// Chord degree 1-8
        #[arg(short, long, default_value = "1")]
        degree: i32,

        /// Pivot pitch (default: middle C)
        #[arg(short, long)]
        pivot: Option<i32>,
    },

    /// List the scale table
    Scales,

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("movements=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => movements_services::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => movements_services::load_config(),
    };
    tracing::debug!(key_root = config.key_root, "Config loaded");

    match cli.command {
        Commands::Play { script } => play(config, script, cli.format),
        Commands::Ladder { degree, pivot } => ladder(&config, degree, pivot, cli.format),
        Commands::Scales => scales(cli.format),
        Commands::Config => show_config(&config, cli.config, cli.format),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn print_update(update: &EngineUpdate, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", render::update_line(update)),
        OutputFormat::Json => print_json(&update.output)?,
    }
    Ok(())
}

fn play(config: MovementsConfig, script_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let mut service = EngineService::new(config);
    let updates = service.start(Box::new(LogSink::new()))?;

    let run = |event: movements_core::Event| -> Result<()> {
        service.send(event)?;
        let update = updates.recv().context("Engine stopped")?;
        print_update(&update, format)
    };

    match script_path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            let events = script::parse_script(&text).with_context(|| path.display().to_string())?;
            for event in events {
                run(event)?;
            }
        }
        None => {
            for (number, line) in io::stdin().lock().lines().enumerate() {
                let line = line.context("Failed to read stdin")?;
                let result = script::parse_line(&line).and_then(|event| match event {
                    Some(event) => run(event),
                    None => Ok(()),
                });
                if let Err(e) = result {
                    tracing::warn!(line = number + 1, error = %e, "Skipping event");
                    eprintln!("line {}: {e:#}", number + 1);
                }
            }
        }
    }

    service.stop()?;
    Ok(())
}

#[derive(Serialize)]
struct LadderRow {
    target: i32,
    notes: Vec<i32>,
    stage: Option<&'static str>,
}

fn ladder(config: &MovementsConfig, degree: i32, pivot: Option<i32>, format: OutputFormat) -> Result<()> {
    let mut state = ChordState::with_key_root(config.key_root);
    state.select_degree(degree);
    let pivot = pivot.unwrap_or(state.pivot_pitch());
    state.set_pivot(pivot);

    if format == OutputFormat::Text {
        println!("{} (pivot {})", state.label(), render::note_name(pivot));
    }
    for target in (pivot - 24..=pivot).rev() {
        let voicing = state.contrary_motion(target);
        match format {
            OutputFormat::Text => println!("{}", render::ladder_line(target, &voicing)),
            OutputFormat::Json => print_json(&LadderRow {
                target,
                stage: voicing.stage.map(|s| s.name()),
                notes: voicing.notes,
            })?,
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ScaleRow {
    id: ScaleId,
    name: String,
    family: &'static str,
    pitch_classes: [u8; 8],
}

fn scales(format: OutputFormat) -> Result<()> {
    for id in ScaleId::ALL {
        match format {
            OutputFormat::Text => println!("{}", render::scale_line(id)),
            OutputFormat::Json => print_json(&ScaleRow {
                id,
                name: id.to_string(),
                family: id.family().name(),
                pitch_classes: *id.pitch_classes(),
            })?,
        }
    }
    Ok(())
}

fn show_config(config: &MovementsConfig, path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let path = path.unwrap_or_else(movements_services::config_path);
    match format {
        OutputFormat::Text => {
            println!("# {}", path.display());
            print!("{}", config.to_toml()?);
        }
        OutputFormat::Json => print_json(config)?,
    }
    Ok(())
}
