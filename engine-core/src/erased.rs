//! Erased Game interface for runtime polymorphism
//!
//! This trait provides a bytes-only interface without generics. All typed games
//! are converted to this interface via the adapter layer, which lets the
//! registry hand out sessions for any registered game behind one type.

use crate::typed::{Capabilities, EngineId};

/// Runtime error for erased game operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErasedGameError {
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("Invalid action: {0}")]
    InvalidAction(u32),
    #[error("Session has not been reset")]
    NotReset,
}

/// Erased game trait that works only with raw actions and encoded observations
///
/// A value of this trait is a whole session: it owns the game state and the
/// seeded RNG, so callers only pass action indices in and read observation
/// bytes out.
///
/// # Example Usage
///
/// ```rust
/// # use engine_core::erased::*;
///
/// fn play_noops(game: &mut dyn ErasedGame, noop: u32) -> Result<i64, ErasedGameError> {
///     let mut obs_buf = Vec::new();
///     game.reset_into(&mut obs_buf)?;
///
///     let mut total = 0;
///     for _ in 0..100 {
///         let (reward, done) = game.step_into(noop, &mut obs_buf)?;
///         total += reward;
///         if done {
///             break;
///         }
///     }
///     Ok(total)
/// }
/// ```
pub trait ErasedGame: Send + Sync + 'static {
    /// Get engine identification information
    fn engine_id(&self) -> EngineId;

    /// Get game capabilities and configuration
    fn capabilities(&self) -> Capabilities;

    /// Reset the session to its initial state
    ///
    /// The session RNG is re-seeded from the session seed, so repeated resets
    /// replay the same episode start.
    ///
    /// # Errors
    ///
    /// Returns `ErasedGameError` if encoding the observation fails
    fn reset_into(&mut self, out_obs: &mut Vec<u8>) -> Result<(), ErasedGameError>;

    /// Perform one simulation step
    ///
    /// # Arguments
    ///
    /// * `action` - Raw discrete action index
    /// * `out_obs` - Buffer to write the encoded observation
    ///
    /// # Returns
    ///
    /// Returns `Ok((reward, done))` on success
    ///
    /// # Errors
    ///
    /// Returns `ErasedGameError::InvalidAction` for an index outside the action
    /// space, `ErasedGameError::NotReset` before the first reset
    fn step_into(&mut self, action: u32, out_obs: &mut Vec<u8>) -> Result<(i64, bool), ErasedGameError>;
}
