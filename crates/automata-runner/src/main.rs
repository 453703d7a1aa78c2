//! Terminal runner: ticks a world on a fixed interval, reads commands from stdin
//! and prints a frame per generation.

mod input;
mod render;
mod telemetry;

use anyhow::{Context, Result};
use automata_core::{InitialState, RuleFamily, RunnerConfig};
use automata_world::Engine;
use clap::Parser;
use input::Command;
use render::{Format, Renderer};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Simulate two- and three-state cellular automata
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON runner configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the grid, in cells
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Height of the grid, in cells
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Display pixels per cell, used to map click coordinates
    #[arg(long)]
    pixel_scale: Option<i32>,

    /// Rule family: life (two-state) or brain (three-state)
    #[arg(short, long)]
    family: Option<RuleFamily>,

    /// Seed for the random generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Probability that a reseeded cell starts alive
    #[arg(long)]
    alive_probability: Option<f64>,

    /// Start from an empty grid instead of a random one
    #[arg(long)]
    blank: bool,

    /// Time to wait between each tick
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Start paused
    #[arg(long)]
    paused: bool,

    /// Frame format written to stdout
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn runner_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_json_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => RunnerConfig::default(),
        };

        let world = &mut config.world;
        if let Some(width) = self.width {
            world.width = width;
        }
        if let Some(height) = self.height {
            world.height = height;
        }
        if let Some(pixel_scale) = self.pixel_scale {
            world.pixel_scale = pixel_scale;
        }
        if let Some(family) = self.family {
            world.rule_family = family;
        }
        if let Some(seed) = self.seed {
            world.seed = Some(seed);
        }
        if let Some(p) = self.alive_probability {
            world.alive_probability = p;
        }
        if self.blank {
            world.initial = InitialState::Blank;
        }
        if let Some(ms) = self.interval_ms {
            config.tick_interval_ms = ms;
        }
        if self.max_ticks.is_some() {
            config.max_ticks = self.max_ticks;
        }
        if self.paused {
            config.start_paused = true;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    telemetry::init_telemetry(args.log_json)?;

    let config = args.runner_config()?;
    let mut engine = Engine::new();
    engine
        .initialize(config.world.clone())
        .context("failed to initialize world")?;

    info!(
        family = %config.world.rule_family,
        width = config.world.width,
        height = config.world.height,
        interval_ms = config.tick_interval_ms,
        "Starting automaton"
    );

    run(&mut engine, &config, Renderer::new(args.format)).await?;

    info!("Runner stopped");
    Ok(())
}

async fn run(engine: &mut Engine, config: &RunnerConfig, renderer: Renderer) -> Result<()> {
    let mut ticker = interval(Duration::from_millis(config.tick_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut paused = config.start_paused;
    let mut ticks: u64 = 0;

    draw(engine, &renderer)?;

    loop {
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "Reached tick limit");
            break;
        }

        tokio::select! {
            _ = ticker.tick(), if !paused => {
                advance(engine, config)?;
                ticks += 1;
                draw(engine, &renderer)?;
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    stdin_open = false;
                    continue;
                };
                let command = match Command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!("{}", e);
                        continue;
                    }
                };
                if command == Command::Step {
                    ticks += 1;
                }
                if apply(engine, config, command, &mut paused)? == Flow::Quit {
                    break;
                }
                draw(engine, &renderer)?;
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

fn apply(
    engine: &mut Engine,
    config: &RunnerConfig,
    command: Command,
    paused: &mut bool,
) -> Result<Flow> {
    match command {
        Command::TogglePause => {
            *paused = !*paused;
            info!(paused = *paused, "Toggled pause");
        }
        Command::Reload => engine.reload()?,
        Command::Blank => engine.blank()?,
        Command::Step => advance(engine, config)?,
        Command::Click { px, py } => {
            let toggled = engine.click(px, py)?;
            debug!(px, py, toggled, "Click");
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// One generation, with a census line every `census_interval` generations
fn advance(engine: &mut Engine, config: &RunnerConfig) -> Result<()> {
    engine.tick().context("simulation halted")?;

    let world = engine.world()?;
    let generation = world.generation();
    if config.census_interval > 0 && generation % config.census_interval == 0 {
        let census = world.census();
        info!(
            event = "census",
            generation,
            alive = census.alive,
            dying = census.dying,
            inactive = census.inactive,
            changed = world.last_changes().len(),
            "Census snapshot"
        );
    }
    Ok(())
}

fn draw(engine: &Engine, renderer: &Renderer) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    renderer.draw(engine.world()?, &mut out)
}
