//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the binary and the documented defaults can never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    play: PlayDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    iterations: u32,
    exploration_constant: f64,
    time_limit_ms: u64,
    rollouts_per_leaf: u32,
    final_selection: String,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PlayDefaults {
    human_player: u8,
    dump_tree: bool,
    dump_dir: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}
pub fn rollouts_per_leaf() -> u32 {
    DEFAULTS.mcts.rollouts_per_leaf
}
pub fn final_selection() -> &'static str {
    &DEFAULTS.mcts.final_selection
}
pub fn seed() -> Option<u64> {
    DEFAULTS.mcts.seed
}

// Play
pub fn human_player() -> u8 {
    DEFAULTS.play.human_player
}
pub fn dump_tree() -> bool {
    DEFAULTS.play.dump_tree
}
pub fn dump_dir() -> &'static str {
    &DEFAULTS.play.dump_dir
}
