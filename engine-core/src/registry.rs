//! Global game registry
//!
//! This module provides a thread-safe registry that maps an env_id to a factory
//! building seeded sessions, so drivers can look games up by name at runtime.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

use crate::erased::ErasedGame;

/// Factory building a session for the given seed
pub type GameFactory = Arc<dyn Fn(u64) -> Box<dyn ErasedGame> + Send + Sync>;

/// Thread-safe registry mapping env_id to game factories
static REGISTRY: Lazy<Mutex<HashMap<String, GameFactory>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Register a game with the global registry
///
/// Registering an env_id twice replaces the earlier factory.
///
/// # Arguments
///
/// * `env_id` - Unique environment identifier (e.g., "tetris")
/// * `factory` - Closure that creates a new session from a seed
///
/// # Example
///
/// ```rust
/// # use engine_core::registry::*;
/// # use engine_core::erased::ErasedGame;
/// # use engine_core::adapter::GameAdapter;
/// # use engine_core::typed::*;
///
/// # struct MyGame;
/// # impl Game for MyGame {
/// #     type State = ();
/// #     type Action = ();
/// #     type Obs = ();
/// #     fn engine_id(&self) -> EngineId { todo!() }
/// #     fn capabilities(&self) -> Capabilities { todo!() }
/// #     fn reset(&mut self, rng: &mut rand_chacha::ChaCha20Rng) -> (Self::State, Self::Obs) { todo!() }
/// #     fn step(&mut self, state: &mut Self::State, action: Self::Action, rng: &mut rand_chacha::ChaCha20Rng) -> (Self::Obs, i64, bool) { todo!() }
/// #     fn decode_action(raw: u32) -> Result<Self::Action, DecodeError> { todo!() }
/// #     fn encode_obs(obs: &Self::Obs, out: &mut Vec<u8>) -> Result<(), EncodeError> { todo!() }
/// # }
/// register_game("my_game", |seed| -> Box<dyn ErasedGame> { Box::new(GameAdapter::with_seed(MyGame, seed)) });
/// assert!(is_registered("my_game"));
/// ```
pub fn register_game<F>(env_id: impl Into<String>, factory: F)
where
    F: Fn(u64) -> Box<dyn ErasedGame> + Send + Sync + 'static,
{
    let env_id = env_id.into();
    let mut registry = REGISTRY.lock().unwrap();
    if registry.contains_key(&env_id) {
        warn!(env_id = %env_id, "overriding existing game registration");
    }
    registry.insert(env_id, Arc::new(factory));
}

fn factory_for(env_id: &str) -> Option<GameFactory> {
    let registry = REGISTRY.lock().unwrap();
    registry.get(env_id).cloned()
}

/// Create a new session by env_id with a random seed
///
/// Returns `None` if the env_id is not registered.
pub fn create_game(env_id: &str) -> Option<Box<dyn ErasedGame>> {
    create_game_with_seed(env_id, rand::random())
}

/// Create a new session by env_id with a fixed seed
///
/// # Example
///
/// ```rust
/// # use engine_core::registry::*;
///
/// match create_game_with_seed("tetris", 7) {
///     Some(game) => {
///         println!("Created game: {}", game.engine_id().env_id);
///     }
///     None => {
///         println!("Game 'tetris' not found");
///     }
/// }
/// ```
pub fn create_game_with_seed(env_id: &str, seed: u64) -> Option<Box<dyn ErasedGame>> {
    // The factory runs outside the lock so it may itself touch the registry
    factory_for(env_id).map(|factory| factory(seed))
}

/// Get list of all registered environment IDs, sorted
pub fn list_registered_games() -> Vec<String> {
    let registry = REGISTRY.lock().unwrap();
    let mut ids: Vec<String> = registry.keys().cloned().collect();
    ids.sort();
    ids
}

/// Check if a game is registered
pub fn is_registered(env_id: &str) -> bool {
    let registry = REGISTRY.lock().unwrap();
    registry.contains_key(env_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::GameAdapter;
    use crate::typed::{ActionSpace, Capabilities, DecodeError, EncodeError, Encoding, EngineId, Game};
    use rand_chacha::ChaCha20Rng;

    // Registry state is global and tests run in parallel, so every test uses
    // its own env ids.
    struct TestGame {
        name: String,
    }

    impl TestGame {
        fn new(name: &str) -> Self {
            Self { name: name.to_string() }
        }
    }

    impl Game for TestGame {
        type State = u32;
        type Action = u8;
        type Obs = u32;

        fn engine_id(&self) -> EngineId {
            EngineId {
                env_id: self.name.clone(),
                build_id: "0.1.0".to_string(),
            }
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities {
                id: self.engine_id(),
                encoding: Encoding {
                    action: "discrete:v1".to_string(),
                    obs: "u32le:v1".to_string(),
                    schema_version: 1,
                },
                action_space: ActionSpace::Discrete(4),
            }
        }

        fn reset(&mut self, _rng: &mut ChaCha20Rng) -> (Self::State, Self::Obs) {
            (0, 0)
        }

        fn step(&mut self, state: &mut Self::State, action: Self::Action, _rng: &mut ChaCha20Rng) -> (Self::Obs, i64, bool) {
            *state += u32::from(action);
            (*state, 1, *state >= 10)
        }

        fn decode_action(raw: u32) -> Result<Self::Action, DecodeError> {
            if raw < 4 {
                Ok(raw as u8)
            } else {
                Err(DecodeError::ActionOutOfRange { value: raw, n: 4 })
            }
        }

        fn encode_obs(obs: &Self::Obs, out: &mut Vec<u8>) -> Result<(), EncodeError> {
            out.extend_from_slice(&obs.to_le_bytes());
            Ok(())
        }
    }

    #[test]
    fn test_register_and_create_game() {
        register_game("test_game", |seed| -> Box<dyn ErasedGame> { Box::new(GameAdapter::with_seed(TestGame::new("test_game"), seed)) });

        let game = create_game("test_game");
        assert!(game.is_some());

        let mut game = game.unwrap();
        assert_eq!(game.engine_id().env_id, "test_game");

        let mut obs = Vec::new();
        game.reset_into(&mut obs).unwrap();
        assert_eq!(game.step_into(3, &mut obs).unwrap(), (1, false));
        assert_eq!(obs, 3u32.to_le_bytes().to_vec());
    }

    #[test]
    fn test_create_nonexistent_game() {
        assert!(create_game("nonexistent").is_none());
        assert!(create_game_with_seed("nonexistent", 1).is_none());
    }

    #[test]
    fn test_list_registered_games() {
        register_game("list_b", |seed| -> Box<dyn ErasedGame> { Box::new(GameAdapter::with_seed(TestGame::new("list_b"), seed)) });
        register_game("list_a", |seed| -> Box<dyn ErasedGame> { Box::new(GameAdapter::with_seed(TestGame::new("list_a"), seed)) });

        let games: Vec<String> = list_registered_games()
            .into_iter()
            .filter(|id| id.starts_with("list_"))
            .collect();

        assert_eq!(games, vec!["list_a".to_string(), "list_b".to_string()]);
    }

    #[test]
    fn test_is_registered() {
        assert!(!is_registered("registered_game"));

        register_game("registered_game", |seed| -> Box<dyn ErasedGame> {
            Box::new(GameAdapter::with_seed(TestGame::new("registered_game"), seed))
        });
        assert!(is_registered("registered_game"));
        assert!(!is_registered("unregistered_game"));
    }

    #[test]
    fn test_override_registration() {
        register_game("override", |seed| -> Box<dyn ErasedGame> { Box::new(GameAdapter::with_seed(TestGame::new("first"), seed)) });
        register_game("override", |seed| -> Box<dyn ErasedGame> { Box::new(GameAdapter::with_seed(TestGame::new("second"), seed)) });

        let game = create_game_with_seed("override", 5).unwrap();
        assert_eq!(game.engine_id().env_id, "second");
    }
}
