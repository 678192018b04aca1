//! Monte Carlo Tree Search (MCTS) for two-player zero-sum games.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` [`Game`](engine_core::Game) trait.
//!
//! # Overview
//!
//! MCTS builds a search tree by running iterations. Each iteration consists of
//! four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT (Upper Confidence bound applied
//!    to Trees) to balance exploration and exploitation
//! 2. **Expansion**: When reaching a node with untried actions, add one child
//! 3. **Simulation**: Play the new position out with a rollout policy
//!    (uniform random by default)
//! 4. **Backpropagation**: Update visit counts and rewards along the path from
//!    leaf to root, flipping the sign at every level
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_tictactoe::TicTacToe;
//! use mcts::{run_mcts, MctsConfig, RandomRollout};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = TicTacToe::new();
//! let config = MctsConfig::for_testing();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(&game, &RandomRollout, config, game.initial_state(), &mut rng).unwrap();
//!
//! println!("Best action: {}", result.action);
//! println!("Value: {}", result.value);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: Number of iterations per search (default: 1000)
//! - `exploration_constant`: C in the UCT formula (default: sqrt(2))
//! - `time_limit`: Optional wall-clock budget, checked between iterations
//! - `rollouts_per_leaf`: Rollouts averaged per simulation (default: 1)
//! - `final_selection`: Most visited child (default) or best mean reward
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MctsSearch                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  MctsTree   │  │    Game     │  │   RolloutPolicy     │  │
//! │  │  (arena)    │  │ (contract)  │  │  (random default)   │  │
//! │  └──────┬──────┘  └──────┬──────┘  └──────────┬──────────┘  │
//! │         │                │                    │             │
//! │         ▼                ▼                    ▼             │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │          select → expand → simulate →                 │  │
//! │  │                  backpropagate                        │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod node;
pub mod rollout;
pub mod scoring;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main types
pub use config::{FinalSelection, MctsConfig};
pub use node::{MctsNode, NodeId};
pub use rollout::{rollout, RandomRollout, RolloutPolicy};
pub use scoring::uct;
pub use search::{get_best_action, run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{Levels, MctsTree, TreeStats};
