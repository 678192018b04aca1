//! Small game used by the unit tests.

use engine_core::{zero_sum_reward, Game, GameError, Player};

/// Subtraction game: players alternately take 1 or 2 stones, and whoever
/// takes the last stone wins. Piles that are multiples of 3 lose for the
/// player to move.
#[derive(Debug, Clone, Copy)]
pub struct Subtraction {
    start: u8,
}

impl Subtraction {
    pub fn new(start: u8) -> Self {
        Self { start }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pile {
    pub stones: u8,
    pub to_move: Player,
}

impl Game for Subtraction {
    type State = Pile;
    type Action = u8;

    fn initial_state(&self) -> Pile {
        Pile {
            stones: self.start,
            to_move: Player::First,
        }
    }

    fn legal_actions(&self, state: &Pile) -> Result<Vec<u8>, GameError> {
        if state.stones == 0 {
            return Err(GameError::InvalidState("pile is empty".to_string()));
        }
        Ok((1..=state.stones.min(2)).collect())
    }

    fn apply(&self, state: &Pile, action: &u8) -> Result<Pile, GameError> {
        if !(1..=2).contains(action) || *action > state.stones {
            return Err(GameError::IllegalAction(format!(
                "cannot take {} from {}",
                action, state.stones
            )));
        }
        Ok(Pile {
            stones: state.stones - action,
            to_move: state.to_move.opponent(),
        })
    }

    fn is_terminal(&self, state: &Pile) -> bool {
        state.stones == 0
    }

    fn reward(&self, state: &Pile, perspective: Player) -> Result<f64, GameError> {
        if state.stones != 0 {
            return Err(GameError::InvalidState("game not over".to_string()));
        }
        // The player who took the last stone is the one not on move
        Ok(zero_sum_reward(Some(state.to_move.opponent()), perspective))
    }

    fn current_player(&self, state: &Pile) -> Option<Player> {
        (state.stones > 0).then_some(state.to_move)
    }
}

/// Which contract call [`Faulty`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `apply` rejects taking two stones.
    RejectTakeTwo,
    /// `legal_actions` fails once the pile is below its starting size.
    FailBelowStart,
    /// `legal_actions` returns nothing once the pile is below its starting size.
    EmptyBelowStart,
}

/// [`Subtraction`] with one deliberately broken contract call.
#[derive(Debug, Clone, Copy)]
pub struct Faulty {
    inner: Subtraction,
    fault: Fault,
}

impl Faulty {
    pub fn new(start: u8, fault: Fault) -> Self {
        Self {
            inner: Subtraction::new(start),
            fault,
        }
    }

    fn below_start(&self, state: &Pile) -> bool {
        state.stones < self.inner.start
    }
}

impl Game for Faulty {
    type State = Pile;
    type Action = u8;

    fn initial_state(&self) -> Pile {
        self.inner.initial_state()
    }

    fn legal_actions(&self, state: &Pile) -> Result<Vec<u8>, GameError> {
        match self.fault {
            Fault::FailBelowStart if self.below_start(state) => Err(GameError::InvalidState(
                format!("cannot list moves for {} stones", state.stones),
            )),
            Fault::EmptyBelowStart if self.below_start(state) => Ok(Vec::new()),
            _ => self.inner.legal_actions(state),
        }
    }

    fn apply(&self, state: &Pile, action: &u8) -> Result<Pile, GameError> {
        if self.fault == Fault::RejectTakeTwo && *action == 2 {
            return Err(GameError::IllegalAction("taking two is refused".to_string()));
        }
        self.inner.apply(state, action)
    }

    fn is_terminal(&self, state: &Pile) -> bool {
        self.inner.is_terminal(state)
    }

    fn reward(&self, state: &Pile, perspective: Player) -> Result<f64, GameError> {
        self.inner.reward(state, perspective)
    }

    fn current_player(&self, state: &Pile) -> Option<Player> {
        self.inner.current_player(state)
    }
}
