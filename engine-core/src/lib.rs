//! Core traits and types for the game engine
//!
//! This crate provides the fundamental abstractions shared by every game:
//! - `Game`: Typed trait for ergonomic game development
//! - `ErasedGame`: Runtime interface that works with raw actions and bytes
//! - `GameAdapter`: Seeded session turning a typed game into both interfaces
//! - `Registry`: Global env_id to factory lookup

pub mod typed;
pub mod erased;
pub mod adapter;
pub mod registry;

// Re-export main types for convenience
pub use typed::Game;
pub use erased::{ErasedGame, ErasedGameError};
pub use adapter::{GameAdapter, Info, Step};
pub use registry::{register_game, create_game, create_game_with_seed, GameFactory};
