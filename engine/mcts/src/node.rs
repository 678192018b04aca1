//! MCTS tree node representation.
//!
//! Each node represents a game state reached by taking an action from the parent.
//! Nodes store visit statistics used for UCT selection and the final move choice.

use engine_core::Player;

use crate::scoring::uct;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S, A> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub action: Option<A>,

    /// Game state at this node
    pub state: S,

    /// Player whose action produced this node.
    /// For the root this is the opponent of the player to move.
    pub mover: Player,

    /// Player to move at this node (None on terminal states)
    pub to_move: Option<Player>,

    /// Number of simulations that passed through this node
    pub visit_count: u32,

    /// Sum of rewards backpropagated through this node, from `mover`'s perspective.
    /// Q = total_reward / visit_count
    pub total_reward: f64,

    /// Whether this is a terminal state (game over)
    pub is_terminal: bool,

    /// Legal actions not yet expanded into children.
    /// `None` until the node is first selected.
    pub untried_actions: Option<Vec<A>>,

    /// Children: Vec of (action, NodeId) pairs in expansion order.
    pub children: Vec<(A, NodeId)>,
}

impl<S, A> MctsNode<S, A> {
    /// Create a new root node for `state`, where `to_move` is about to play.
    pub fn new_root(state: S, to_move: Player) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            mover: to_move.opponent(),
            to_move: Some(to_move),
            visit_count: 0,
            total_reward: 0.0,
            is_terminal: false,
            untried_actions: None,
            children: Vec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(
        parent: NodeId,
        action: A,
        state: S,
        mover: Player,
        to_move: Option<Player>,
        is_terminal: bool,
    ) -> Self {
        Self {
            parent,
            action: Some(action),
            state,
            mover,
            to_move,
            visit_count: 0,
            total_reward: 0.0,
            is_terminal,
            untried_actions: None,
            children: Vec::new(),
        }
    }

    /// Calculate mean reward Q = total_reward / visit_count.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_reward / self.visit_count as f64
        }
    }

    /// UCT score of this node as seen from its parent.
    ///
    /// `Q` is already stored from the perspective of the player choosing at the
    /// parent, so no negation is needed here. Takes a pre-computed `ln(N_parent)`
    /// to avoid a logarithm per child.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f64, exploration_constant: f64) -> f64 {
        uct(
            self.mean_reward(),
            self.visit_count,
            parent_visits_ln,
            exploration_constant,
        )
    }

    /// Whether the node's legal actions have been computed.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.untried_actions.is_some()
    }

    /// Whether some legal action still has no child.
    #[inline]
    pub fn has_untried_actions(&self) -> bool {
        self.untried_actions
            .as_ref()
            .is_some_and(|actions| !actions.is_empty())
    }

    /// Sum of the children's visit counts.
    pub fn children_visits(&self, arena: &[MctsNode<S, A>]) -> u32 {
        self.children
            .iter()
            .map(|(_, id)| arena[id.index()].visit_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node: MctsNode<u8, u8> = MctsNode::new_root(7, Player::First);

        assert!(node.parent.is_none());
        assert!(node.action.is_none());
        assert_eq!(node.state, 7);
        assert_eq!(node.mover, Player::Second);
        assert_eq!(node.to_move, Some(Player::First));
        assert_eq!(node.visit_count, 0);
        assert!(!node.is_terminal);
        assert!(!node.is_visited());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_mean_reward() {
        let mut node: MctsNode<u8, u8> = MctsNode::new_root(0, Player::First);

        // Unvisited
        assert!(node.mean_reward().abs() < 1e-12);

        // After visits
        node.visit_count = 4;
        node.total_reward = 2.0;
        assert!((node.mean_reward() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score() {
        let mut node: MctsNode<u8, u8> =
            MctsNode::new_child(NodeId(0), 1, 0, Player::First, Some(Player::Second), false);
        node.visit_count = 10;
        node.total_reward = 5.0;

        let parent_visits: u32 = 100;
        let c = std::f64::consts::SQRT_2;

        // UCT = 0.5 + sqrt(2) * sqrt(ln(100) / 10)
        let expected = 0.5 + c * ((parent_visits as f64).ln() / 10.0).sqrt();
        let score = node.uct_score((parent_visits as f64).ln(), c);
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unvisited_child_scores_infinite() {
        let node: MctsNode<u8, u8> =
            MctsNode::new_child(NodeId(0), 1, 0, Player::First, Some(Player::Second), false);
        assert_eq!(node.uct_score(3.0_f64.ln(), 1.0), f64::INFINITY);
    }

    #[test]
    fn test_expansion_flags() {
        let mut node: MctsNode<u8, u8> = MctsNode::new_root(0, Player::First);
        assert!(!node.is_visited());
        assert!(!node.has_untried_actions());

        node.untried_actions = Some(vec![1, 2]);
        assert!(node.is_visited());
        assert!(node.has_untried_actions());

        node.untried_actions = Some(Vec::new());
        assert!(node.is_visited());
        assert!(!node.has_untried_actions());
    }
}
