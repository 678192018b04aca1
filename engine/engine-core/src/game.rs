//! Typed Game trait consumed by the search engine
//!
//! The engine never inspects states or actions. Everything it knows about a game
//! comes through the methods of this trait, checked at compile time through the
//! `State` and `Action` associated types.

use std::fmt::Debug;
use std::hash::Hash;

/// One of the two players in a zero-sum game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The player who moves first from the initial state
    First,
    /// The player who moves second
    Second,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Zero-based seat index (0 for `First`, 1 for `Second`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.index())
    }
}

/// Errors a game reports when an operation's preconditions are violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Illegal action: {0}")]
    IllegalAction(String),
}

/// Main trait for game implementations
///
/// Implementations describe a deterministic, two-player, zero-sum game with
/// perfect information. States are treated as immutable snapshots: `apply`
/// returns a new state instead of mutating the old one.
///
/// # Type Parameters
///
/// * `State` - Complete snapshot of the game, including whose turn it is
/// * `Action` - One legal move from a state; compared and hashed by the engine
///
/// # Example
///
/// ```rust
/// use engine_core::{Game, GameError, Player};
///
/// /// Players alternately take one or two stones; whoever takes the last stone wins.
/// #[derive(Debug)]
/// struct Subtraction;
///
/// #[derive(Debug, Clone)]
/// struct Pile {
///     stones: u8,
///     to_move: Player,
/// }
///
/// impl Game for Subtraction {
///     type State = Pile;
///     type Action = u8;
///
///     fn initial_state(&self) -> Pile {
///         Pile { stones: 5, to_move: Player::First }
///     }
///
///     fn legal_actions(&self, state: &Pile) -> Result<Vec<u8>, GameError> {
///         if state.stones == 0 {
///             return Err(GameError::InvalidState("pile is empty".into()));
///         }
///         Ok((1..=state.stones.min(2)).collect())
///     }
///
///     fn apply(&self, state: &Pile, action: &u8) -> Result<Pile, GameError> {
///         if *action == 0 || *action > state.stones.min(2) {
///             return Err(GameError::IllegalAction(format!("take {action}")));
///         }
///         Ok(Pile { stones: state.stones - action, to_move: state.to_move.opponent() })
///     }
///
///     fn is_terminal(&self, state: &Pile) -> bool {
///         state.stones == 0
///     }
///
///     fn reward(&self, state: &Pile, perspective: Player) -> Result<f64, GameError> {
///         if state.stones != 0 {
///             return Err(GameError::InvalidState("game not over".into()));
///         }
///         // The player to move on an empty pile did not take the last stone.
///         Ok(if perspective == state.to_move { -1.0 } else { 1.0 })
///     }
///
///     fn current_player(&self, state: &Pile) -> Option<Player> {
///         (state.stones != 0).then_some(state.to_move)
///     }
/// }
///
/// let game = Subtraction;
/// let state = game.apply(&game.initial_state(), &2).unwrap();
/// assert_eq!(game.current_player(&state), Some(Player::Second));
/// ```
pub trait Game: Debug {
    /// Game state type - cloned into every tree node
    type State: Clone + Debug;

    /// Action type - small, comparable and hashable
    type Action: Clone + Eq + Hash + Debug;

    /// The state a fresh game starts from.
    fn initial_state(&self) -> Self::State;

    /// All actions available to the player to move.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidState` when called on a terminal state.
    fn legal_actions(&self, state: &Self::State) -> Result<Vec<Self::Action>, GameError>;

    /// The state reached by taking `action` from `state`.
    ///
    /// # Errors
    ///
    /// `GameError::IllegalAction` when `action` is not in `legal_actions(state)`.
    fn apply(&self, state: &Self::State, action: &Self::Action) -> Result<Self::State, GameError>;

    /// Whether the game is over at `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Outcome of a finished game from `perspective`'s point of view.
    ///
    /// Values lie in a fixed zero-sum range: +1 win, 0 draw, -1 loss.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidState` when `state` is not terminal.
    fn reward(&self, state: &Self::State, perspective: Player) -> Result<f64, GameError>;

    /// Whose turn it is, or `None` on a terminal state.
    fn current_player(&self, state: &Self::State) -> Option<Player>;
}
