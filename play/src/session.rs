//! Interactive game loop: a human against the MCTS engine.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use engine_core::{Game, Player};
use games_tictactoe::{Action, State, Status, TicTacToe};
use mcts::{run_mcts, MctsConfig, RandomRollout};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::render;

/// Why a typed move was refused. The messages are shown to the player.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid input. Please enter two numbers separated by a comma.")]
    Format,
    #[error("Invalid input. Must be two integers.")]
    NotANumber,
    #[error("Coordinates must be between 1 and 3.")]
    OutOfRange,
    #[error("This cell is either occupied or invalid.")]
    Occupied,
}

/// Parse a `row,col` line (1-based) into a legal action for `state`.
pub fn parse_move(line: &str, state: &State) -> Result<Action, MoveError> {
    let coords: Vec<&str> = line.trim().split(',').collect();
    let [row, col] = coords.as_slice() else {
        return Err(MoveError::Format);
    };
    let row: u8 = row.trim().parse().map_err(|_| MoveError::NotANumber)?;
    let col: u8 = col.trim().parse().map_err(|_| MoveError::NotANumber)?;
    let action = Action::from_coords(row, col).ok_or(MoveError::OutOfRange)?;

    if state.legal_moves().contains(&action.position()) {
        Ok(action)
    } else {
        Err(MoveError::Occupied)
    }
}

fn marker(player: Player) -> &'static str {
    match player {
        Player::First => "X",
        Player::Second => "O",
    }
}

/// One game between a human seat and the engine.
pub struct Session {
    game: TicTacToe,
    human: Player,
    search: MctsConfig,
    dump_dir: std::path::PathBuf,
    rng: ChaCha20Rng,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        let rng = match config.seed() {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Ok(Self {
            game: TicTacToe::new(),
            human: config.human(),
            search: config.mcts_config()?,
            dump_dir: config.dump_dir(),
            rng,
        })
    }

    /// Play until the game ends, reading moves from `input` and writing to `out`.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<Status> {
        let mut state = self.game.initial_state();
        info!(human = %self.human, "Game started");

        while let Some(player) = self.game.current_player(&state) {
            print_board(&mut out, &state)?;

            let action = if player == self.human {
                self.read_human_move(&mut input, &mut out, &state, player)?
            } else {
                self.engine_move(&mut out, &state, player)?
            };
            state = self.game.apply(&state, &action)?;
        }

        print_board(&mut out, &state)?;
        let status = state.status();
        match status {
            Status::Won(winner) => writeln!(
                out,
                "Player {} ({}) won!",
                winner.index(),
                marker(winner)
            )?,
            Status::Draw => writeln!(out, "It's a draw!")?,
            Status::Ongoing => bail!("game loop ended on an unfinished board"),
        }
        info!(?status, "Game over");
        Ok(status)
    }

    fn read_human_move<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        state: &State,
        player: Player,
    ) -> Result<Action> {
        loop {
            write!(out, "Player {} (enter row,col in [1..3]): ", player.index())?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line).context("Failed to read move")? == 0 {
                bail!("input closed before the game ended");
            }

            match parse_move(&line, state) {
                Ok(action) => return Ok(action),
                Err(e) => {
                    debug!(input = line.trim(), error = %e, "Rejected move");
                    writeln!(out, "  {}\n", e)?;
                }
            }
        }
    }

    fn engine_move<W: Write>(&mut self, out: &mut W, state: &State, player: Player) -> Result<Action> {
        let result = run_mcts(
            &self.game,
            &RandomRollout,
            self.search.clone(),
            *state,
            &mut self.rng,
        )
        .context("Engine search failed")?;

        info!(
            action = %result.action,
            value = result.value,
            iterations = result.iterations,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Engine moved"
        );

        if let Some(tree) = &result.tree {
            render::dump_tree(tree, &self.dump_dir)?;
        }

        let pos = result.action.position();
        writeln!(
            out,
            "Computer (player {}) chose action: {} (row {}, col {})",
            player.index(),
            pos,
            pos / 3 + 1,
            pos % 3 + 1
        )?;
        Ok(result.action)
    }
}

fn print_board<W: Write>(out: &mut W, state: &State) -> Result<()> {
    writeln!(out, "Current board:")?;
    for row in state.to_string().lines() {
        writeln!(out, "  {}", row)?;
    }
    writeln!(out)?;
    Ok(())
}
