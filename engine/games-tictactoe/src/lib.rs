//! TicTacToe game implementation for the gambit engine
//!
//! This crate provides a complete reference implementation of TicTacToe
//! demonstrating how to implement the Game trait for the search engine.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_tictactoe::{Action, TicTacToe};
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state();
//! let state = game.apply(&state, &Action::Place(4)).unwrap();
//! assert_eq!(game.legal_actions(&state).unwrap().len(), 8);
//! ```

use engine_core::{zero_sum_reward, Game, GameError, Player};

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Cell value for an empty square
pub const EMPTY: u8 = 0;

/// Board marker for a player: 1 = X (first), 2 = O (second)
#[inline]
pub fn marker(player: Player) -> u8 {
    match player {
        Player::First => 1,
        Player::Second => 2,
    }
}

/// Progress of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Won(Player),
    Draw,
}

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, and outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Player to move (meaningless once the game is over)
    current_player: Player,
    /// Cached outcome of the board
    status: StatusCode,
}

/// Compact, hashable form of [`Status`] stored in the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum StatusCode {
    Ongoing,
    WonFirst,
    WonSecond,
    Draw,
}

impl From<StatusCode> for Status {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::Ongoing => Status::Ongoing,
            StatusCode::WonFirst => Status::Won(Player::First),
            StatusCode::WonSecond => Status::Won(Player::Second),
            StatusCode::Draw => Status::Draw,
        }
    }
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [EMPTY; 9],
            current_player: Player::First, // X goes first
            status: StatusCode::Ongoing,
        }
    }

    /// Build a state from a raw board (0=empty, 1=X, 2=O).
    ///
    /// X always moves first, so the player to move is derived from the piece
    /// counts. Boards that cannot arise from legal play are rejected.
    pub fn from_board(board: [u8; 9]) -> Result<Self, GameError> {
        if let Some(cell) = board.iter().find(|&&cell| cell > 2) {
            return Err(GameError::InvalidState(format!(
                "Invalid board cell: {}",
                cell
            )));
        }

        let xs = board.iter().filter(|&&cell| cell == 1).count();
        let os = board.iter().filter(|&&cell| cell == 2).count();
        let current_player = match xs.checked_sub(os) {
            Some(0) => Player::First,
            Some(1) => Player::Second,
            _ => {
                return Err(GameError::InvalidState(format!(
                    "Unreachable piece counts: {} X, {} O",
                    xs, os
                )))
            }
        };

        Ok(Self {
            board,
            current_player,
            status: Self::check_winner(&board),
        })
    }

    /// Raw board cells: 0=empty, 1=X, 2=O
    pub fn board(&self) -> &[u8; 9] {
        &self.board
    }

    /// Player to move, or `None` once the game is over
    pub fn current_player(&self) -> Option<Player> {
        (!self.is_done()).then_some(self.current_player)
    }

    /// Outcome of the game so far
    pub fn status(&self) -> Status {
        self.status.into()
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.status != StatusCode::Ongoing
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == EMPTY)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> Result<State, GameError> {
        if position >= 9 {
            return Err(GameError::IllegalAction(format!(
                "Invalid action index: {}. Must be between 0 and 8.",
                position
            )));
        }
        if self.is_done() {
            return Err(GameError::IllegalAction(format!(
                "Position {} played after the game ended",
                position
            )));
        }
        if self.board[position as usize] != EMPTY {
            return Err(GameError::IllegalAction(format!(
                "Cell ({}, {}) is already occupied",
                position / 3,
                position % 3
            )));
        }

        let mut new_state = *self;
        new_state.board[position as usize] = marker(self.current_player);
        new_state.status = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if !new_state.is_done() {
            new_state.current_player = self.current_player.opponent();
        }

        Ok(new_state)
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> StatusCode {
        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != EMPTY && board[a] == board[b] && board[b] == board[c] {
                return if board[a] == 1 {
                    StatusCode::WonFirst
                } else {
                    StatusCode::WonSecond
                };
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != EMPTY) {
            return StatusCode::Draw;
        }

        StatusCode::Ongoing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for State {
    /// Three rows of `X`, `O` and `.` separated by spaces.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.board.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let line: Vec<&str> = cells
                .iter()
                .map(|cell| match cell {
                    1 => "X",
                    2 => "O",
                    _ => ".",
                })
                .collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// TicTacToe action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place a piece at the given position (0-8)
    Place(u8),
}

impl Action {
    /// Get the position for this action
    pub fn position(&self) -> u8 {
        match self {
            Action::Place(pos) => *pos,
        }
    }

    /// Action for a 1-based `(row, col)` pair, as typed by a human player.
    pub fn from_coords(row: u8, col: u8) -> Option<Action> {
        if (1..=3).contains(&row) && (1..=3).contains(&col) {
            Some(Action::Place((row - 1) * 3 + (col - 1)))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.position())
    }
}

/// TicTacToe game implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new TicTacToe game
    pub fn new() -> Self {
        Self
    }
}

impl Game for TicTacToe {
    type State = State;
    type Action = Action;

    fn initial_state(&self) -> State {
        State::new()
    }

    fn legal_actions(&self, state: &State) -> Result<Vec<Action>, GameError> {
        if state.is_done() {
            return Err(GameError::InvalidState(
                "No legal actions on a finished board".to_string(),
            ));
        }
        Ok(state.legal_moves().into_iter().map(Action::Place).collect())
    }

    fn apply(&self, state: &State, action: &Action) -> Result<State, GameError> {
        state.make_move(action.position())
    }

    fn is_terminal(&self, state: &State) -> bool {
        state.is_done()
    }

    fn reward(&self, state: &State, perspective: Player) -> Result<f64, GameError> {
        match state.status() {
            Status::Ongoing => Err(GameError::InvalidState(
                "Reward requested before the game ended".to_string(),
            )),
            Status::Won(winner) => Ok(zero_sum_reward(Some(winner), perspective)),
            Status::Draw => Ok(zero_sum_reward(None, perspective)),
        }
    }

    fn current_player(&self, state: &State) -> Option<Player> {
        state.current_player()
    }
}
