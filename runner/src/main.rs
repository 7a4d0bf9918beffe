//! Headless simulation runner.
//!
//! Drives a life or liquid engine on a fixed timer and logs statistics.
//!
//! Usage: `runner <life|liquid> [--ticks N] [--report N] [--config FILE]`
//! (`runner --help` lists the defaults).
//!
//! Set `RUST_LOG=info` to see the reports.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use cellgrid::patterns;
use cellgrid::{
    ConfigError, CycleDetector, DemoConfig, GridError, LiquidFlowRule, Paint, PaintOp,
    SimulationEngine,
};
use tokio::time::{self, MissedTickBehavior};

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Life,
    Liquid,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which simulation to drive.
    mode: Mode,
    /// Number of ticks to run before stopping.
    #[arg(long, value_name = "N", default_value_t = 500)]
    ticks: u64,
    /// Log statistics every N ticks.
    #[arg(long, value_name = "N", default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    report: u64,
    /// RON config file; the mode's preset is used when absent.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), RunError> {
    env_logger::init();

    let args = Args::parse();
    let config = match (&args.config, args.mode) {
        (Some(path), _) => DemoConfig::load(path)?,
        (None, Mode::Life) => DemoConfig::life(),
        (None, Mode::Liquid) => DemoConfig::liquid(),
    };

    match args.mode {
        Mode::Life => {
            run_life(&config, &args).await?;
        }
        Mode::Liquid => {
            run_liquid(&config, &args).await?;
        }
    }
    Ok(())
}

fn timer(config: &DemoConfig) -> time::Interval {
    let mut interval = time::interval(config.tick_interval());
    // A late tick shifts the schedule rather than bursting to catch up.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Returns the final population.
async fn run_life(config: &DemoConfig, args: &Args) -> Result<usize, RunError> {
    let mut engine = SimulationEngine::life(config.width, config.height)?;
    let seed = config.life.seed.unwrap_or(0);
    patterns::randomize(&mut engine, seed, config.life.density);
    log::info!("Life {}x{} seed {seed}, {} live cells", config.width, config.height, engine.population());

    let mut cycles = CycleDetector::new();
    let mut interval = timer(config);
    for _ in 0..args.ticks {
        interval.tick().await;
        engine.tick();

        if engine.generation() % args.report == 0 {
            log::info!("generation {}: {} live cells", engine.generation(), engine.population());
        }
        if cycles.observe(engine.fingerprint()) {
            log::info!("Board repeats at generation {}, stopping", engine.generation());
            break;
        }
    }

    log::info!("Finished at generation {} with {} live cells", engine.generation(), engine.population());
    Ok(engine.population())
}

/// Returns the final total volume.
async fn run_liquid(config: &DemoConfig, args: &Args) -> Result<i64, RunError> {
    let rule = LiquidFlowRule::new(config.liquid.variant.constants());
    let mut engine = SimulationEngine::liquid(rule, config.width, config.height)?;
    let spout = (config.width / 2, 0);
    log::info!(
        "Liquid {}x{} ({}), pouring {} per tick at {:?}",
        config.width,
        config.height,
        config.liquid.variant.name(),
        config.liquid.pour_amount,
        spout
    );

    let mut interval = timer(config);
    for _ in 0..args.ticks {
        interval.tick().await;
        engine.queue_paint(Paint::new(spout.0, spout.1, PaintOp::AddVolume(config.liquid.pour_amount)));
        engine.tick();

        if engine.generation() % args.report == 0 {
            log::info!("generation {}: total volume {}", engine.generation(), engine.total_volume());
        }
    }

    log::info!("Finished at generation {} with total volume {}", engine.generation(), engine.total_volume());
    Ok(engine.total_volume())
}
