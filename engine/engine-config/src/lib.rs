//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the gambit binaries.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`GAMBIT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! GAMBIT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     GAMBIT_COMMON_LOG_LEVEL=debug
//!     GAMBIT_MCTS_ITERATIONS=5000
//!     GAMBIT_MCTS_EXPLORATION_CONSTANT=1.0
//!     GAMBIT_MCTS_SEED=42
//!     GAMBIT_PLAY_DUMP_TREE=true
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_ENV, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
