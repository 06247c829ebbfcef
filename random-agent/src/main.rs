use anyhow::Result;
use clap::Parser;
use games_tetris::TetrisConfig;
use tracing::{error, info};

mod agent;
mod config;
mod policy;
mod render;

use crate::agent::Agent;
use crate::config::Config;

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(config.level()?).init();

    let tetris_config = match &config.tetris_config {
        Some(path) => TetrisConfig::load(path)?,
        None => TetrisConfig::default(),
    };
    games_tetris::register(tetris_config)?;
    info!(games = ?engine_core::registry::list_registered_games(), "registered environments");

    info!("Starting random agent for environment {}", config.env_id);

    let mut agent = Agent::new(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match agent.run(&mut out) {
        Ok(summaries) => {
            let total: i64 = summaries.iter().map(|s| s.total_reward).sum();
            info!("Completed {} episodes, total reward {}", summaries.len(), total);
            Ok(())
        }
        Err(e) => {
            error!("Agent failed: {}", e);
            Err(e)
        }
    }
}
