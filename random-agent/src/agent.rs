use anyhow::{anyhow, Result};
use engine_core::registry::{create_game, create_game_with_seed, list_registered_games};
use engine_core::ErasedGame;
use std::io::Write;
use tracing::{debug, info};

use crate::config::Config;
use crate::policy::{Policy, RandomPolicy};
use crate::render::render_frame;

/// Outcome of one episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeSummary {
    pub steps: u64,
    pub total_reward: i64,
    pub done: bool,
}

pub struct Agent {
    config: Config,
    game: Box<dyn ErasedGame>,
    policy: Box<dyn Policy>,
}

impl Agent {
    pub fn new(config: Config) -> Result<Self> {
        let game = match config.seed {
            Some(seed) => create_game_with_seed(&config.env_id, seed),
            None => create_game(&config.env_id),
        }
        .ok_or_else(|| {
            anyhow!(
                "environment '{}' is not registered (available: {})",
                config.env_id,
                list_registered_games().join(", ")
            )
        })?;

        let capabilities = game.capabilities();
        let policy = match config.policy_seed {
            Some(seed) => RandomPolicy::with_seed(&capabilities, seed),
            None => RandomPolicy::new(&capabilities),
        }
        .map_err(|e| anyhow!("Failed to create policy: {}", e))?;

        info!(
            env_id = %capabilities.id.env_id,
            build_id = %capabilities.id.build_id,
            action_space = ?capabilities.action_space,
            "agent initialized"
        );

        Ok(Self {
            config,
            game,
            policy: Box::new(policy),
        })
    }

    /// Play every configured episode, writing frames to `out` when rendering
    pub fn run(&mut self, out: &mut impl Write) -> Result<Vec<EpisodeSummary>> {
        let mut summaries = Vec::with_capacity(self.config.episodes as usize);

        for episode in 0..self.config.episodes {
            let summary = self.run_episode(out)?;
            info!(
                episode,
                steps = summary.steps,
                total_reward = summary.total_reward,
                done = summary.done,
                "episode finished"
            );
            summaries.push(summary);
        }

        Ok(summaries)
    }

    fn run_episode(&mut self, out: &mut impl Write) -> Result<EpisodeSummary> {
        let mut obs = Vec::new();
        self.game.reset_into(&mut obs)?;
        self.render(out, &obs)?;

        let mut summary = EpisodeSummary {
            steps: 0,
            total_reward: 0,
            done: false,
        };

        while summary.steps < self.config.max_steps {
            let action = self.policy.select_action(&obs)?;
            let (reward, done) = self.game.step_into(action, &mut obs)?;
            summary.steps += 1;
            summary.total_reward += reward;
            self.render(out, &obs)?;

            if reward > 0 {
                debug!(step = summary.steps, reward, "rows cleared");
            }
            if done {
                summary.done = true;
                break;
            }
        }

        Ok(summary)
    }

    fn render(&self, out: &mut impl Write, obs: &[u8]) -> Result<()> {
        if self.config.render && self.config.env_id == games_tetris::ENV_ID {
            writeln!(out, "{}", render_frame(obs)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use games_tetris::TetrisConfig;

    fn config(args: &[&str]) -> Config {
        games_tetris::register(TetrisConfig::default()).unwrap();
        Config::try_parse_from(std::iter::once("random-agent").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_unknown_environment() {
        let config = config(&["--env-id", "pong"]);
        let message = Agent::new(config).err().unwrap().to_string();
        assert!(message.contains("'pong' is not registered"));
        assert!(message.contains(games_tetris::ENV_ID));
    }

    #[test]
    fn test_step_limit() {
        let config = config(&["--seed", "1", "--policy-seed", "2", "--max-steps", "50", "--episodes", "2"]);
        let mut agent = Agent::new(config).unwrap();
        let mut out: Vec<u8> = Vec::new();

        let summaries = agent.run(&mut out).unwrap();

        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.steps <= 50));
        assert!(out.is_empty());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let args = ["--seed", "5", "--policy-seed", "6", "--max-steps", "3000"];
        let first = Agent::new(config(&args)).unwrap().run(&mut std::io::sink()).unwrap();
        let second = Agent::new(config(&args)).unwrap().run(&mut std::io::sink()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_writes_frames() {
        let config = config(&["--seed", "3", "--policy-seed", "4", "--max-steps", "2", "--render"]);
        let mut agent = Agent::new(config).unwrap();
        let mut out: Vec<u8> = Vec::new();

        agent.run(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        // Reset frame plus up to two step frames
        let frames = text.matches("next: ").count();
        assert!((2..=3).contains(&frames));
    }
}
