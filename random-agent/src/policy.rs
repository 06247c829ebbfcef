use anyhow::{anyhow, Result};
use engine_core::typed::{ActionSpace, Capabilities};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

/// Trait for action selection policies
pub trait Policy {
    /// Select a raw action index given an encoded observation
    fn select_action(&mut self, observation: &[u8]) -> Result<u32>;
}

/// Random policy that selects actions uniformly at random
pub struct RandomPolicy {
    rng: ChaCha20Rng,
    n: u32,
}

impl RandomPolicy {
    pub fn new(capabilities: &Capabilities) -> Result<Self> {
        Self::with_rng(capabilities, ChaCha20Rng::from_entropy())
    }

    pub fn with_seed(capabilities: &Capabilities, seed: u64) -> Result<Self> {
        Self::with_rng(capabilities, ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(capabilities: &Capabilities, rng: ChaCha20Rng) -> Result<Self> {
        let ActionSpace::Discrete(n) = capabilities.action_space;

        if n == 0 {
            return Err(anyhow!("Discrete action space must have n > 0"));
        }

        Ok(Self { rng, n })
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _observation: &[u8]) -> Result<u32> {
        Ok(self.rng.gen_range(0..self.n))
    }
}
