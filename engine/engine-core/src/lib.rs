//! Core traits and types for the gambit search engine
//!
//! This crate provides the contract between the search engine and the games it plays:
//! - `Game`: Typed trait every two-player, zero-sum, perfect-information game implements
//! - `Player`: The two seats at the table
//! - `GameError`: Failures a game may report when asked about a state
//! - `game_utils`: Small helpers shared by game implementations

pub mod game;
pub mod game_utils;

// Re-export main types for convenience
pub use game::{Game, GameError, Player};
pub use game_utils::zero_sum_reward;
