//! Rollout policies for the simulation phase.
//!
//! A rollout plays a game from a leaf state to a terminal state without
//! adding anything to the tree. The default policy picks uniformly among the
//! legal actions; any type implementing [`RolloutPolicy`] can replace it.

use engine_core::{Game, GameError};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Trait for rollout policies.
///
/// Implementations could be:
/// - RandomRollout: uniform over legal actions (default)
/// - Heuristic policies that prefer winning or blocking moves
/// - Plain closures `Fn(&G, &G::State, &mut ChaCha20Rng) -> Result<G::Action, GameError>`
pub trait RolloutPolicy<G: Game> {
    /// Choose the next action to play from a non-terminal `state`.
    fn choose(
        &self,
        game: &G,
        state: &G::State,
        rng: &mut ChaCha20Rng,
    ) -> Result<G::Action, GameError>;
}

/// Uniform random rollout policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRollout;

impl<G: Game> RolloutPolicy<G> for RandomRollout {
    fn choose(
        &self,
        game: &G,
        state: &G::State,
        rng: &mut ChaCha20Rng,
    ) -> Result<G::Action, GameError> {
        let actions = game.legal_actions(state)?;
        actions.choose(rng).cloned().ok_or_else(|| {
            GameError::InvalidState(format!(
                "Non-terminal state has no legal actions: {:?}",
                state
            ))
        })
    }
}

impl<G, F> RolloutPolicy<G> for F
where
    G: Game,
    F: Fn(&G, &G::State, &mut ChaCha20Rng) -> Result<G::Action, GameError>,
{
    fn choose(
        &self,
        game: &G,
        state: &G::State,
        rng: &mut ChaCha20Rng,
    ) -> Result<G::Action, GameError> {
        self(game, state, rng)
    }
}

/// Play `state` out to a terminal state using `policy`.
///
/// Returns the terminal state. Any contract error aborts the rollout.
pub fn rollout<G, R>(
    game: &G,
    policy: &R,
    state: &G::State,
    rng: &mut ChaCha20Rng,
) -> Result<G::State, GameError>
where
    G: Game,
    R: RolloutPolicy<G> + ?Sized,
{
    let mut current = state.clone();
    while !game.is_terminal(&current) {
        let action = policy.choose(game, &current, rng)?;
        current = game.apply(&current, &action)?;
    }
    Ok(current)
}
