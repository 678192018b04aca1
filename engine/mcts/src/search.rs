//! MCTS search implementation.
//!
//! Implements the core MCTS loop:
//! 1. Selection: Traverse tree using UCT until a terminal node or a node with untried actions
//! 2. Expansion: Add one child for a randomly chosen untried action
//! 3. Simulation: Play the new node out with the rollout policy
//! 4. Backpropagation: Update statistics along the path, flipping the sign per level

use std::time::{Duration, Instant};

use engine_core::{Game, GameError};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::{rollout, RolloutPolicy};
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<S, A> {
    /// Best action to take
    pub action: A,

    /// Mean reward at the root, for the player to move
    pub value: f64,

    /// Number of iterations performed
    pub iterations: u32,

    /// Wall-clock time spent searching
    pub elapsed: Duration,

    /// Share of root visits per action, in expansion order
    pub visit_distribution: Vec<(A, f64)>,

    /// The finished tree, kept only when `dump_tree` is set
    pub tree: Option<MctsTree<S, A>>,
}

/// MCTS search state.
pub struct MctsSearch<'a, G: Game, R: RolloutPolicy<G> + ?Sized> {
    tree: MctsTree<G::State, G::Action>,
    game: &'a G,
    policy: &'a R,
    config: MctsConfig,
}

impl<'a, G, R> MctsSearch<'a, G, R>
where
    G: Game,
    R: RolloutPolicy<G> + ?Sized,
{
    /// Create a new MCTS search from the given game state.
    ///
    /// Fails if the configuration is invalid or `state` is terminal.
    pub fn new(
        game: &'a G,
        policy: &'a R,
        config: MctsConfig,
        state: G::State,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        if game.is_terminal(&state) {
            return Err(SearchError::InvalidState(format!(
                "Cannot search from a terminal state: {:?}",
                state
            )));
        }
        let to_move = game.current_player(&state).ok_or_else(|| {
            SearchError::InvalidState(format!("No player to move in state: {:?}", state))
        })?;

        Ok(Self {
            tree: MctsTree::new(state, to_move),
            game,
            policy,
            config,
        })
    }

    /// Run the search until the iteration budget or the deadline is exhausted.
    pub fn run(
        &mut self,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<G::State, G::Action>, SearchError> {
        let start = Instant::now();
        let deadline = self.config.time_limit.map(|limit| start + limit);

        debug!(
            iterations = self.config.iterations,
            exploration_constant = self.config.exploration_constant,
            rollouts_per_leaf = self.config.rollouts_per_leaf,
            time_limit_ms = self.config.time_limit.map(|d| d.as_millis() as u64),
            "Starting MCTS search"
        );

        let mut iterations = 0;
        while iterations < self.config.iterations {
            // The in-flight iteration always completes; only check between iterations.
            if iterations > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
                debug!(iterations, "MCTS deadline reached");
                break;
            }
            self.iterate(rng)?;
            iterations += 1;
        }

        let elapsed = start.elapsed();
        let root_id = self.tree.root();
        let best = self
            .tree
            .best_child(root_id, self.config.final_selection)
            .ok_or_else(|| SearchError::InvalidState("root has no children".to_string()))?;
        let action = self
            .tree
            .get(best)
            .action
            .clone()
            .ok_or_else(|| SearchError::InvalidState("child without an action".to_string()))?;
        let stats = self.tree.stats();

        debug!(
            action = ?action,
            value = stats.root_value,
            iterations,
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            elapsed_ms = elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(SearchResult {
            action,
            value: stats.root_value,
            iterations,
            elapsed,
            visit_distribution: self.tree.visit_distribution(),
            tree: self.config.dump_tree.then(|| self.tree.clone()),
        })
    }

    /// Run a single iteration (select -> expand -> simulate -> backpropagate).
    fn iterate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        let selected = self.select()?;
        let leaf_id = self.expand(selected, rng)?;
        let value = self.simulate(leaf_id, rng)?;
        self.tree.backpropagate(leaf_id, value);

        trace!(
            selected = selected.0,
            leaf = leaf_id.0,
            value,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Descend from the root until a terminal node or a node with untried actions.
    ///
    /// Legal actions are computed the first time a node is reached.
    fn select(&mut self) -> Result<NodeId, SearchError> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal {
                return Ok(current);
            }

            if !node.is_visited() {
                let actions = self.game.legal_actions(&node.state)?;
                if actions.is_empty() {
                    return Err(GameError::InvalidState(format!(
                        "Non-terminal state has no legal actions: {:?}",
                        node.state
                    ))
                    .into());
                }
                self.tree.get_mut(current).untried_actions = Some(actions);
            }

            if self.tree.get(current).has_untried_actions() {
                return Ok(current);
            }

            current = self
                .tree
                .select_child(current, self.config.exploration_constant)
                .ok_or_else(|| {
                    SearchError::InvalidState(format!("node {} has no children", current.0))
                })?;
        }
    }

    /// Expand one untried action of `node_id` into a new child.
    ///
    /// Terminal nodes are returned unchanged.
    fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> Result<NodeId, SearchError> {
        let action = match self.tree.get_mut(node_id).untried_actions.as_mut() {
            Some(untried) if !untried.is_empty() => {
                let index = rng.gen_range(0..untried.len());
                untried.swap_remove(index)
            }
            _ => return Ok(node_id),
        };

        let state = self.game.apply(&self.tree.get(node_id).state, &action)?;
        let is_terminal = self.game.is_terminal(&state);
        let to_move = if is_terminal {
            None
        } else {
            self.game.current_player(&state)
        };

        Ok(self
            .tree
            .add_child(node_id, action, state, to_move, is_terminal))
    }

    /// Estimate the value of `node_id` for the player who moved into it.
    ///
    /// Terminal nodes are scored exactly; others average `rollouts_per_leaf` rollouts.
    fn simulate(&self, node_id: NodeId, rng: &mut ChaCha20Rng) -> Result<f64, SearchError> {
        let node = self.tree.get(node_id);
        let perspective = node.mover;

        if node.is_terminal {
            return Ok(self.game.reward(&node.state, perspective)?);
        }

        let mut total = 0.0;
        for _ in 0..self.config.rollouts_per_leaf {
            let terminal = rollout(self.game, self.policy, &node.state, rng)?;
            total += self.game.reward(&terminal, perspective)?;
        }
        Ok(total / self.config.rollouts_per_leaf as f64)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::State, G::Action> {
        &self.tree
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<G, R>(
    game: &G,
    policy: &R,
    config: MctsConfig,
    state: G::State,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<G::State, G::Action>, SearchError>
where
    G: Game,
    R: RolloutPolicy<G> + ?Sized,
{
    let mut search = MctsSearch::new(game, policy, config, state)?;
    search.run(rng)
}

/// Pick the best action for the player to move in `state`.
///
/// The tree is built from scratch and discarded before returning.
pub fn get_best_action<G, R>(
    game: &G,
    policy: &R,
    config: MctsConfig,
    state: G::State,
    rng: &mut ChaCha20Rng,
) -> Result<G::Action, SearchError>
where
    G: Game,
    R: RolloutPolicy<G> + ?Sized,
{
    run_mcts(game, policy, config, state, rng).map(|result| result.action)
}
