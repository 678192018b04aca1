//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_exploration_constant() -> f64 {
    defaults::exploration_constant()
}
fn d_time_limit_ms() -> u64 {
    defaults::time_limit_ms()
}
fn d_rollouts_per_leaf() -> u32 {
    defaults::rollouts_per_leaf()
}
fn d_final_selection() -> String {
    defaults::final_selection().into()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_human_player() -> u8 {
    defaults::human_player()
}
fn d_dump_tree() -> bool {
    defaults::dump_tree()
}
fn d_dump_dir() -> String {
    defaults::dump_dir().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub play: PlayConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search parameters
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f64,
    /// Wall-clock budget per move in milliseconds (0 = unlimited)
    #[serde(default = "d_time_limit_ms")]
    pub time_limit_ms: u64,
    #[serde(default = "d_rollouts_per_leaf")]
    pub rollouts_per_leaf: u32,
    /// "most_visited" or "best_mean_reward"
    #[serde(default = "d_final_selection")]
    pub final_selection: String,
    /// Fixed RNG seed (None = seed from entropy)
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            exploration_constant: defaults::exploration_constant(),
            time_limit_ms: defaults::time_limit_ms(),
            rollouts_per_leaf: defaults::rollouts_per_leaf(),
            final_selection: defaults::final_selection().into(),
            seed: defaults::seed(),
        }
    }
}

/// Interactive play configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlayConfig {
    /// Seat of the human player: 0 plays first, 1 plays second
    #[serde(default = "d_human_player")]
    pub human_player: u8,
    /// Write tree.txt and tree.dot after every engine move
    #[serde(default = "d_dump_tree")]
    pub dump_tree: bool,
    #[serde(default = "d_dump_dir")]
    pub dump_dir: String,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human_player: defaults::human_player(),
            dump_tree: defaults::dump_tree(),
            dump_dir: defaults::dump_dir().into(),
        }
    }
}
