//! Adapter layer turning a typed game into a playable session
//!
//! `GameAdapter` owns a typed `Game`, the episode state and a seeded RNG. It
//! offers the typed session API (`reset` / `step` with raw action indices) and
//! implements the `ErasedGame` interface on top of it.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::erased::{ErasedGame, ErasedGameError};
use crate::typed::{Capabilities, EngineId, Game};

/// Empty auxiliary record returned with every step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Info {}

/// Result of one session step
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O> {
    pub obs: O,
    pub reward: i64,
    pub done: bool,
    pub info: Info,
}

/// Session wrapping a typed game
///
/// The session seed is fixed when the adapter is created. Every `reset`
/// re-seeds the RNG from it, so two resets in a row start identical episodes.
///
/// # Example
///
/// ```rust
/// # use engine_core::typed::*;
/// # use engine_core::adapter::GameAdapter;
/// # use rand_chacha::ChaCha20Rng;
///
/// # struct MyGame;
/// # impl Game for MyGame {
/// #     type State = u32;
/// #     type Action = u8;
/// #     type Obs = u32;
/// #     fn engine_id(&self) -> EngineId { todo!() }
/// #     fn capabilities(&self) -> Capabilities { todo!() }
/// #     fn reset(&mut self, _rng: &mut ChaCha20Rng) -> (Self::State, Self::Obs) { (0, 0) }
/// #     fn step(&mut self, state: &mut Self::State, action: Self::Action, _rng: &mut ChaCha20Rng) -> (Self::Obs, i64, bool) {
/// #         *state += u32::from(action);
/// #         (*state, 1, false)
/// #     }
/// #     fn decode_action(raw: u32) -> Result<Self::Action, DecodeError> {
/// #         if raw < 2 { Ok(raw as u8) } else { Err(DecodeError::ActionOutOfRange { value: raw, n: 2 }) }
/// #     }
/// #     fn encode_obs(obs: &Self::Obs, out: &mut Vec<u8>) -> Result<(), EncodeError> { todo!() }
/// # }
/// let mut session = GameAdapter::with_seed(MyGame, 42);
/// session.reset();
/// let step = session.step(1).unwrap();
/// assert_eq!(step.obs, 1);
/// assert!(session.step(9).is_err());
/// ```
pub struct GameAdapter<T: Game> {
    game: T,
    seed: u64,
    rng: ChaCha20Rng,
    state: Option<T::State>,
}

impl<T: Game> GameAdapter<T> {
    /// Create a new session with a random seed
    pub fn new(game: T) -> Self {
        Self::with_seed(game, rand::random())
    }

    /// Create a new session with a fixed seed
    pub fn with_seed(game: T, seed: u64) -> Self {
        Self {
            game,
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            state: None,
        }
    }

    /// Seed used by every reset
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current episode state, if the session has been reset
    pub fn state(&self) -> Option<&T::State> {
        self.state.as_ref()
    }

    /// Get a reference to the underlying game
    pub fn game(&self) -> &T {
        &self.game
    }

    /// Get a mutable reference to the underlying game
    pub fn game_mut(&mut self) -> &mut T {
        &mut self.game
    }

    /// Consume the adapter and return the underlying game
    pub fn into_inner(self) -> T {
        self.game
    }

    /// Start a new episode and return its first observation
    pub fn reset(&mut self) -> T::Obs {
        self.rng = ChaCha20Rng::seed_from_u64(self.seed);
        let (state, obs) = self.game.reset(&mut self.rng);
        self.state = Some(state);
        debug!(env_id = %self.game.engine_id().env_id, seed = self.seed, "session reset");
        obs
    }

    /// Advance the episode by one step
    ///
    /// # Errors
    ///
    /// `InvalidAction` when `action` is outside the action space, in which case
    /// the state is left untouched. `NotReset` before the first `reset`.
    pub fn step(&mut self, action: u32) -> Result<Step<T::Obs>, ErasedGameError> {
        let action = T::decode_action(action).map_err(|_| ErasedGameError::InvalidAction(action))?;
        let state = self.state.as_mut().ok_or(ErasedGameError::NotReset)?;

        let (obs, reward, done) = self.game.step(state, action, &mut self.rng);

        Ok(Step {
            obs,
            reward,
            done,
            info: Info::default(),
        })
    }
}

impl<T: Game> ErasedGame for GameAdapter<T> {
    fn engine_id(&self) -> EngineId {
        self.game.engine_id()
    }

    fn capabilities(&self) -> Capabilities {
        self.game.capabilities()
    }

    fn reset_into(&mut self, out_obs: &mut Vec<u8>) -> Result<(), ErasedGameError> {
        out_obs.clear();

        let obs = self.reset();

        T::encode_obs(&obs, out_obs).map_err(|e| ErasedGameError::Encoding(e.to_string()))
    }

    fn step_into(&mut self, action: u32, out_obs: &mut Vec<u8>) -> Result<(i64, bool), ErasedGameError> {
        out_obs.clear();

        let step = self.step(action)?;

        T::encode_obs(&step.obs, out_obs).map_err(|e| ErasedGameError::Encoding(e.to_string()))?;

        Ok((step.reward, step.done))
    }
}
