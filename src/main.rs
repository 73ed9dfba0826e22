//! Persona Grid - Headless Runner
//!
//! Runs one simulation and prints the run summary, or the full output as JSON.

use std::path::PathBuf;

use clap::Parser;

use persona_grid::core::config::SimulationConfig;
use persona_grid::core::error::Result;
use persona_grid::simulation::SimulationEngine;

/// Headless Persona Grid runner
#[derive(Parser, Debug)]
#[command(name = "persona_grid")]
#[command(about = "Run a toroidal grid simulation of roaming personas")]
struct Args {
    /// TOML config file (defaults apply to anything it leaves out)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of turns to simulate
    #[arg(long)]
    turns: Option<u32>,

    /// Board width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Board height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Persons placed before the first turn
    #[arg(long)]
    population: Option<u32>,

    /// Print the full output as JSON to stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "persona_grid=debug" } else { "persona_grid=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(turns) = args.turns {
        config.turns = turns;
    }
    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }
    if let Some(population) = args.population {
        config.initial_population = population;
    }

    let output = SimulationEngine::new(config)?.run()?;

    if args.json {
        println!("{}", output.to_json()?);
    } else {
        println!("{}", output.summary());
    }

    Ok(())
}
