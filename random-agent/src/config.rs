use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug, Clone)]
#[command(name = "random-agent")]
#[command(about = "Random agent for registered environments")]
#[command(long_about = "Plays episodes of a registered environment by picking
actions uniformly at random from its discrete action space, optionally
printing every frame.")]
pub struct Config {
    /// Environment ID to run
    #[arg(long, env = "AGENT_ENV_ID", default_value = "tetris")]
    pub env_id: String,

    /// Number of episodes to play
    #[arg(long, env = "AGENT_EPISODES", default_value = "1")]
    pub episodes: u32,

    /// Step limit per episode
    #[arg(long, env = "AGENT_MAX_STEPS", default_value = "1000000")]
    pub max_steps: u64,

    /// Environment seed; random when omitted
    #[arg(long, env = "AGENT_SEED")]
    pub seed: Option<u64>,

    /// Policy seed; random when omitted
    #[arg(long, env = "AGENT_POLICY_SEED")]
    pub policy_seed: Option<u64>,

    /// TOML file with Tetris tunables
    #[arg(long, env = "AGENT_TETRIS_CONFIG")]
    pub tetris_config: Option<PathBuf>,

    /// Print every frame to stdout
    #[arg(long, env = "AGENT_RENDER")]
    pub render: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "AGENT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.env_id.is_empty() {
            return Err(anyhow!("env_id cannot be empty"));
        }

        if self.episodes == 0 {
            return Err(anyhow!("episodes must be greater than 0"));
        }

        if self.max_steps == 0 {
            return Err(anyhow!("max_steps must be greater than 0"));
        }

        self.level()?;

        Ok(())
    }

    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow!("invalid log_level '{}'", self.log_level))
    }
}
