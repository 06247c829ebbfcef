//! Tetris game implementation for the engine
//!
//! A 20×10 Tetris driven one discrete tick at a time by an agent choosing
//! from five actions. Locked cells live in a sparse coordinate map; the dense
//! grid handed out as observation is rebuilt from it every tick.
//!
//! ```rust
//! use engine_core::GameAdapter;
//! use games_tetris::{Action, Tetris};
//!
//! let mut env = GameAdapter::with_seed(Tetris::default(), 7);
//! let obs = env.reset();
//! assert_eq!(obs.score, 0);
//!
//! let step = env.step(Action::Rotate.index()).unwrap();
//! assert!(!step.done);
//! assert!(env.step(5).is_err());
//! ```

pub mod board;
pub mod config;
pub mod game;
pub mod piece;
pub mod shapes;

pub use board::{Grid, LockedPositions, COLS, ROWS};
pub use config::{ConfigError, SpeedUpConfig, TetrisConfig, MAX_SCORE_PER_LINE};
pub use game::{Action, Observation, State, Tetris, OBS_LEN};
pub use piece::Piece;
pub use shapes::{Rgb, ShapeKind, EMPTY};

use engine_core::{register_game, ErasedGame, GameAdapter};

/// Environment id under which `register` installs the game
pub const ENV_ID: &str = "tetris";

/// Register Tetris with the engine registry using `config`
///
/// # Errors
///
/// `ConfigError::Invalid` when `config` does not validate; nothing is
/// registered in that case.
pub fn register(config: TetrisConfig) -> Result<(), ConfigError> {
    let game = Tetris::new(config)?;
    register_game(ENV_ID, move |seed| -> Box<dyn ErasedGame> {
        Box::new(GameAdapter::with_seed(game.clone(), seed))
    });
    Ok(())
}
