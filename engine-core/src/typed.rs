//! Typed Game trait providing ergonomic interface for game developers
//!
//! This trait allows game implementations to work with strongly-typed state,
//! action, and observation types while maintaining compile-time type safety.

use rand_chacha::ChaCha20Rng;

/// Engine identification information
#[derive(Debug, Clone, PartialEq)]
pub struct EngineId {
    pub env_id: String,
    pub build_id: String,
}

/// Encoding format specifications
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub action: String,
    pub obs: String,
    pub schema_version: u32,
}

/// Action space variants
#[derive(Debug, Clone, PartialEq)]
pub enum ActionSpace {
    Discrete(u32),
}

/// Game capabilities and configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub id: EngineId,
    pub encoding: Encoding,
    pub action_space: ActionSpace,
}

/// Main trait for game implementations
///
/// Games implement this trait with their specific types for State, Action, and Obs.
/// The state is owned by the caller and passed back in on every step, so a game
/// value only carries configuration.
///
/// # Type Parameters
///
/// * `State` - Full simulation state of one episode
/// * `Action` - Action type, small and Copy
/// * `Obs` - Observation handed to the agent after reset and every step
///
/// # Example
///
/// ```rust
/// # use engine_core::typed::*;
/// # use rand_chacha::ChaCha20Rng;
///
/// #[derive(Clone, Copy)]
/// enum Nudge {
///     Up,
///     Down,
/// }
///
/// struct Counter;
///
/// impl Game for Counter {
///     type State = i32;
///     type Action = Nudge;
///     type Obs = i32;
///
///     // Implementation methods...
/// #   fn engine_id(&self) -> EngineId { todo!() }
/// #   fn capabilities(&self) -> Capabilities { todo!() }
/// #   fn reset(&mut self, rng: &mut ChaCha20Rng) -> (Self::State, Self::Obs) { todo!() }
/// #   fn step(&mut self, state: &mut Self::State, action: Self::Action, rng: &mut ChaCha20Rng) -> (Self::Obs, i64, bool) { todo!() }
/// #   fn decode_action(raw: u32) -> Result<Self::Action, DecodeError> { todo!() }
/// #   fn encode_obs(obs: &Self::Obs, out: &mut Vec<u8>) -> Result<(), EncodeError> { todo!() }
/// }
/// ```
pub trait Game: Send + Sync + 'static {
    /// Game state type
    type State: Send + Sync + 'static;

    /// Action type - should be small and Copy
    type Action: Copy + Send + Sync + 'static;

    /// Observation type
    type Obs: Clone + Send + Sync + 'static;

    /// Get engine identification information
    fn engine_id(&self) -> EngineId;

    /// Get game capabilities and configuration
    fn capabilities(&self) -> Capabilities;

    /// Reset the game to initial state
    ///
    /// # Arguments
    ///
    /// * `rng` - Deterministic random number generator for reproducible resets
    ///
    /// # Returns
    ///
    /// A tuple of (initial_state, initial_observation)
    fn reset(&mut self, rng: &mut ChaCha20Rng) -> (Self::State, Self::Obs);

    /// Perform one simulation step
    ///
    /// # Arguments
    ///
    /// * `state` - Current game state (mutable for in-place updates)
    /// * `action` - Action to take
    /// * `rng` - Random number generator for stochastic elements
    ///
    /// # Returns
    ///
    /// A tuple of (observation, reward, done)
    fn step(&mut self, state: &mut Self::State, action: Self::Action, rng: &mut ChaCha20Rng) -> (Self::Obs, i64, bool);

    /// Decode a raw discrete action index
    fn decode_action(raw: u32) -> Result<Self::Action, DecodeError>;

    /// Encode observation to bytes
    fn encode_obs(obs: &Self::Obs, out: &mut Vec<u8>) -> Result<(), EncodeError>;
}

/// Error type for encoding operations
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Error type for decoding operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Action {value} out of range, expected 0..{n}")]
    ActionOutOfRange { value: u32, n: u32 },
}
