//! Configuration for the play binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use engine_core::Player;
use mcts::{FinalSelection, MctsConfig};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_exploration_constant() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_time_limit_ms() -> u64 {
    CENTRAL_CONFIG.mcts.time_limit_ms
}

fn default_rollouts_per_leaf() -> u32 {
    CENTRAL_CONFIG.mcts.rollouts_per_leaf
}

fn default_final_selection() -> String {
    CENTRAL_CONFIG.mcts.final_selection.clone()
}

fn default_human_player() -> u8 {
    CENTRAL_CONFIG.play.human_player
}

fn default_dump_tree() -> bool {
    CENTRAL_CONFIG.play.dump_tree
}

fn default_dump_dir() -> String {
    CENTRAL_CONFIG.play.dump_dir.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "gambit-play")]
#[command(about = "Play TicTacToe against a Monte Carlo Tree Search engine")]
#[command(
    long_about = "Interactive TicTacToe against the gambit MCTS engine. Enter moves as
row,col with both values in 1..3.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// MCTS iterations per engine move
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// Exploration constant C of the UCT formula
    #[arg(long, default_value_t = default_exploration_constant())]
    pub exploration_constant: f64,

    /// Wall-clock limit per engine move in milliseconds (0 = unlimited)
    #[arg(long, default_value_t = default_time_limit_ms())]
    pub time_limit_ms: u64,

    /// Random rollouts averaged per simulated leaf
    #[arg(long, default_value_t = default_rollouts_per_leaf())]
    pub rollouts_per_leaf: u32,

    /// Final move rule: most_visited or best_mean_reward
    #[arg(long, default_value_t = default_final_selection())]
    pub final_selection: String,

    /// RNG seed for reproducible engine play (random when unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Human seat: 0 plays X and moves first, 1 plays O
    #[arg(long, default_value_t = default_human_player())]
    pub human_player: u8,

    /// Write tree.txt and tree.dot after every engine move
    #[arg(long, action = clap::ArgAction::Set, default_value_t = default_dump_tree())]
    pub dump_tree: bool,

    /// Directory receiving the tree dumps
    #[arg(long, default_value_t = default_dump_dir())]
    pub dump_dir: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if self.human_player > 1 {
            return Err(anyhow!(
                "human_player must be 0 or 1, got {}",
                self.human_player
            ));
        }

        self.mcts_config()?
            .validate()
            .map_err(|e| anyhow!("invalid search settings: {}", e))?;

        Ok(())
    }

    /// Seat taken by the human
    pub fn human(&self) -> Player {
        if self.human_player == 0 {
            Player::First
        } else {
            Player::Second
        }
    }

    /// Seed from the CLI, falling back to the central config
    pub fn seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.mcts.seed)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }

    pub fn dump_dir(&self) -> PathBuf {
        PathBuf::from(&self.dump_dir)
    }

    /// Search settings for one engine move
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let final_selection: FinalSelection =
            self.final_selection.parse().map_err(|e: String| anyhow!(e))?;

        let mut config = MctsConfig::default()
            .with_iterations(self.iterations)
            .with_exploration_constant(self.exploration_constant)
            .with_rollouts_per_leaf(self.rollouts_per_leaf)
            .with_final_selection(final_selection)
            .with_dump_tree(self.dump_tree);
        config.time_limit = self.time_limit();
        Ok(config)
    }
}
