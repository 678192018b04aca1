//! gambit-play - TicTacToe against the MCTS engine
//!
//! Reads moves as `row,col` from stdin, answers with an engine move chosen by
//! Monte Carlo Tree Search, and optionally dumps each search tree to
//! `tree.txt` / `tree.dot` for inspection.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod config;
mod render;
mod session;

use crate::config::Config;
use crate::session::Session;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");
    info!(
        iterations = config.iterations,
        exploration_constant = config.exploration_constant,
        rollouts_per_leaf = config.rollouts_per_leaf,
        human_player = config.human_player,
        dump_tree = config.dump_tree,
        "Starting game"
    );

    let mut session = Session::new(&config)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    match session.run(stdin.lock(), stdout.lock()) {
        Ok(status) => {
            info!(?status, "Game completed");
            Ok(())
        }
        Err(e) => {
            error!("Game aborted: {:#}", e);
            Err(e)
        }
    }
}
