//! Colony foraging run
//!
//! Environment:
//!   FORAGE_CONFIG  path to a TOML config (reference scenario when unset)
//!   FORAGE_STEPS   number of steps to run (default 1000)
//!   RUST_LOG       log filter (default colony_forage=info)

use std::time::Instant;

use colony_forage::{Colony, ColonyConfig, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_STEPS: u64 = 1000;
const PROGRESS_INTERVAL: u64 = 100;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("colony_forage=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::var("FORAGE_CONFIG") {
        Ok(path) => {
            tracing::info!(%path, "Loading config");
            ColonyConfig::load(&path)?
        }
        Err(_) => ColonyConfig::default(),
    };

    let steps = match std::env::var("FORAGE_STEPS") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(%raw, "FORAGE_STEPS is not a number, using {}", DEFAULT_STEPS);
            DEFAULT_STEPS
        }),
        Err(_) => DEFAULT_STEPS,
    };

    println!("Colony Foraging Simulation");
    println!("==========================");
    println!(
        "Grid: {}x{}, {} agents, seed {}",
        config.grid_size, config.grid_size, config.agent_count, config.seed
    );
    println!(
        "p_attrition {}, p_recruit {}, p_give_up {}",
        config.p_attrition, config.p_recruit, config.p_give_up
    );
    println!("Running {} steps...", steps);
    println!();

    let mut colony = Colony::new(config)?;
    let start = Instant::now();

    let mut done = 0;
    while done < steps {
        let chunk = PROGRESS_INTERVAL.min(steps - done);
        colony.run(chunk)?;
        done += chunk;

        if let Some(entry) = colony.metrics().last() {
            tracing::info!(
                step = entry.step,
                committed_a = entry.committed_a,
                committed_b = entry.committed_b,
                uncommitted = entry.uncommitted,
                food_a = entry.food_a,
                food_b = entry.food_b,
                "Progress"
            );
        }
    }

    let elapsed = start.elapsed();
    println!("{}", colony.summary().summary());
    println!("Actual time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    Ok(())
}
