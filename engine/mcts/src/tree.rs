//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices, so parent links never form
//! ownership cycles.

use std::cmp::Ordering;
use std::collections::VecDeque;

use engine_core::Player;

use crate::config::FinalSelection;
use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct MctsTree<S, A> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S, A>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S, A: Clone> MctsTree<S, A> {
    /// Create a new tree rooted at `root_state`, with `to_move` about to play.
    pub fn new(root_state: S, to_move: Player) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state, to_move)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S, A> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S, A> {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<S, A>] {
        &self.nodes
    }

    /// Select the child of `node_id` with the highest UCT score.
    ///
    /// Ties are broken by visit count, then mean reward, then expansion order.
    /// Returns `None` when the node has no children.
    pub fn select_child(&self, node_id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln(N) once instead of per child
        let parent_visits_ln = (node.visit_count.max(1) as f64).ln();

        self.argmax_child(node_id, |child| {
            (
                child.uct_score(parent_visits_ln, exploration_constant),
                child.visit_count as f64,
                child.mean_reward(),
            )
        })
    }

    /// Pick the root-level child of `node_id` preferred by `rule`.
    pub fn best_child(&self, node_id: NodeId, rule: FinalSelection) -> Option<NodeId> {
        match rule {
            FinalSelection::MostVisited => self.argmax_child(node_id, |child| {
                (child.visit_count as f64, child.mean_reward(), 0.0)
            }),
            FinalSelection::BestMeanReward => self.argmax_child(node_id, |child| {
                (child.mean_reward(), child.visit_count as f64, 0.0)
            }),
        }
    }

    /// First child (in expansion order) with the lexicographically largest key.
    fn argmax_child<F>(&self, node_id: NodeId, key: F) -> Option<NodeId>
    where
        F: Fn(&MctsNode<S, A>) -> (f64, f64, f64),
    {
        let mut best: Option<(NodeId, (f64, f64, f64))> = None;
        for (_, child_id) in &self.get(node_id).children {
            let candidate = key(self.get(*child_id));
            let better = match &best {
                None => true,
                Some((_, current)) => compare_keys(&candidate, current) == Ordering::Greater,
            };
            if better {
                best = Some((*child_id, candidate));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        action: A,
        state: S,
        to_move: Option<Player>,
        is_terminal: bool,
    ) -> NodeId {
        let mover = self.get(parent_id).mover.opponent();
        let child = MctsNode::new_child(
            parent_id,
            action.clone(),
            state,
            mover,
            to_move,
            is_terminal,
        );
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push((action, child_id));

        child_id
    }

    /// Backpropagate a value from a leaf to the root.
    /// `value` is from the leaf mover's perspective and is negated at each
    /// level (opponent's perspective).
    pub fn backpropagate(&mut self, leaf_id: NodeId, value: f64) {
        let mut current_id = leaf_id;
        let mut current_value = value;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.total_reward += current_value;

            // Negate for opponent's perspective
            current_value = -current_value;

            current_id = node.parent;
        }
    }

    /// Share of the root's visits that went to each child, in expansion order.
    pub fn visit_distribution(&self) -> Vec<(A, f64)> {
        let root = self.get(self.root);
        let total = root.children_visits(&self.nodes);
        if total == 0 {
            return Vec::new();
        }

        root.children
            .iter()
            .map(|(action, id)| {
                (
                    action.clone(),
                    self.get(*id).visit_count as f64 / total as f64,
                )
            })
            .collect()
    }

    /// Breadth-first traversal down to `max_depth` (root is depth 0).
    ///
    /// The iterator is lazy: nodes are yielded level by level as it is advanced.
    pub fn iterate_levels(&self, max_depth: u32) -> Levels<'_, S, A> {
        let mut queue = VecDeque::new();
        queue.push_back((self.root, 0));
        Levels {
            tree: self,
            queue,
            max_depth,
        }
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            // Root stores rewards for the player who moved into it; flip for the player to move.
            root_value: -root.mean_reward(),
            max_depth: self
                .iterate_levels(u32::MAX)
                .map(|(_, _, depth)| depth)
                .max()
                .unwrap_or(0),
        }
    }
}

fn compare_keys(a: &(f64, f64, f64), b: &(f64, f64, f64)) -> Ordering {
    a.0.total_cmp(&b.0)
        .then(a.1.total_cmp(&b.1))
        .then(a.2.total_cmp(&b.2))
}

/// Lazy breadth-first iterator over a tree, returned by [`MctsTree::iterate_levels`].
pub struct Levels<'a, S, A> {
    tree: &'a MctsTree<S, A>,
    queue: VecDeque<(NodeId, u32)>,
    max_depth: u32,
}

impl<'a, S, A: Clone> Iterator for Levels<'a, S, A> {
    type Item = (NodeId, &'a MctsNode<S, A>, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.queue.pop_front()?;
        let node = self.tree.get(id);
        if depth < self.max_depth {
            self.queue
                .extend(node.children.iter().map(|(_, child)| (*child, depth + 1)));
        }
        Some((id, node, depth))
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    /// Mean reward for the player to move at the root.
    pub root_value: f64,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> MctsTree<u8, u8> {
        MctsTree::new(0, Player::First)
    }

    #[test]
    fn test_new_tree() {
        let tree = MctsTree::<u8, u8>::new(42, Player::First);

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert_eq!(root.state, 42);
        assert_eq!(root.mover, Player::Second);
    }

    #[test]
    fn test_add_child() {
        let mut tree = tree();

        let child_id = tree.add_child(tree.root(), 1, 10, Some(Player::Second), false);

        assert_eq!(tree.len(), 2);
        assert_eq!(child_id, NodeId(1));

        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0], (1, NodeId(1)));

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert_eq!(child.action, Some(1));
        assert_eq!(child.state, 10);
        assert_eq!(child.mover, Player::First);
        assert_eq!(child.to_move, Some(Player::Second));

        let grandchild = tree.add_child(child_id, 2, 20, Some(Player::First), false);
        assert_eq!(tree.get(grandchild).mover, Player::Second);
    }

    #[test]
    fn test_backpropagate() {
        let mut tree = tree();

        // Create a chain: root -> child -> grandchild
        let child_id = tree.add_child(tree.root(), 0, 1, Some(Player::Second), false);
        let grandchild_id = tree.add_child(child_id, 1, 2, None, true);

        // Backpropagate value 1.0 from grandchild
        tree.backpropagate(grandchild_id, 1.0);

        // Check visits
        assert_eq!(tree.get(grandchild_id).visit_count, 1);
        assert_eq!(tree.get(child_id).visit_count, 1);
        assert_eq!(tree.get(tree.root()).visit_count, 1);

        // Check values (negated at each level)
        assert!((tree.get(grandchild_id).total_reward - 1.0).abs() < 1e-12);
        assert!((tree.get(child_id).total_reward - (-1.0)).abs() < 1e-12);
        assert!((tree.get(tree.root()).total_reward - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_select_child_prefers_unvisited() {
        let mut tree = tree();
        let c1 = tree.add_child(tree.root(), 0, 1, Some(Player::Second), false);
        let c2 = tree.add_child(tree.root(), 1, 2, Some(Player::Second), false);

        tree.backpropagate(c1, 1.0);
        let best = tree.select_child(tree.root(), 1.0).unwrap();
        assert_eq!(best, c2);
    }

    #[test]
    fn test_select_child_exploits_with_zero_exploration() {
        let mut tree = tree();
        let c1 = tree.add_child(tree.root(), 0, 1, Some(Player::Second), false);
        let c2 = tree.add_child(tree.root(), 1, 2, Some(Player::Second), false);

        tree.backpropagate(c1, -1.0);
        tree.backpropagate(c2, 1.0);

        assert_eq!(tree.select_child(tree.root(), 0.0), Some(c2));
    }

    #[test]
    fn test_select_child_ties_keep_expansion_order() {
        let mut tree = tree();
        let c1 = tree.add_child(tree.root(), 0, 1, Some(Player::Second), false);
        tree.add_child(tree.root(), 1, 2, Some(Player::Second), false);

        // Both unvisited: infinite scores tie, first child wins
        assert_eq!(tree.select_child(tree.root(), 1.4), Some(c1));
    }

    #[test]
    fn test_select_child_without_children() {
        let tree = tree();
        assert_eq!(tree.select_child(tree.root(), 1.0), None);
        assert_eq!(tree.best_child(tree.root(), FinalSelection::MostVisited), None);
    }

    #[test]
    fn test_best_child_rules() {
        let mut tree = tree();
        let many = tree.add_child(tree.root(), 0, 1, Some(Player::Second), false);
        let strong = tree.add_child(tree.root(), 1, 2, Some(Player::Second), false);

        // `many`: 3 visits averaging 1/3, `strong`: 1 visit averaging 1
        tree.backpropagate(many, 1.0);
        tree.backpropagate(many, 1.0);
        tree.backpropagate(many, -1.0);
        tree.backpropagate(strong, 1.0);

        assert_eq!(
            tree.best_child(tree.root(), FinalSelection::MostVisited),
            Some(many)
        );
        assert_eq!(
            tree.best_child(tree.root(), FinalSelection::BestMeanReward),
            Some(strong)
        );
    }

    #[test]
    fn test_best_child_tie_breaks_on_mean_then_order() {
        let mut tree = tree();
        let first = tree.add_child(tree.root(), 0, 1, Some(Player::Second), false);
        let better = tree.add_child(tree.root(), 1, 2, Some(Player::Second), false);
        let same = tree.add_child(tree.root(), 2, 3, Some(Player::Second), false);

        tree.backpropagate(first, 0.0);
        tree.backpropagate(better, 1.0);
        tree.backpropagate(same, 1.0);

        // Equal visits: highest mean wins, earliest child among equals
        assert_eq!(
            tree.best_child(tree.root(), FinalSelection::MostVisited),
            Some(better)
        );
    }

    #[test]
    fn test_visit_distribution() {
        let mut tree = tree();
        assert!(tree.visit_distribution().is_empty());

        let c1 = tree.add_child(tree.root(), 0, 1, Some(Player::Second), false);
        let c2 = tree.add_child(tree.root(), 1, 2, Some(Player::Second), false);

        tree.get_mut(c1).visit_count = 30;
        tree.get_mut(c2).visit_count = 70;

        let dist = tree.visit_distribution();
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].0, 0);
        assert!((dist[0].1 - 0.3).abs() < 1e-12);
        assert!((dist[1].1 - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_iterate_levels() {
        let mut tree = tree();
        let a = tree.add_child(tree.root(), 0, 1, Some(Player::Second), false);
        let b = tree.add_child(tree.root(), 1, 2, Some(Player::Second), false);
        let a1 = tree.add_child(a, 2, 3, Some(Player::First), false);
        let a1x = tree.add_child(a1, 3, 4, None, true);

        let all: Vec<(NodeId, u32)> = tree
            .iterate_levels(u32::MAX)
            .map(|(id, _, depth)| (id, depth))
            .collect();
        assert_eq!(
            all,
            vec![(tree.root(), 0), (a, 1), (b, 1), (a1, 2), (a1x, 3)]
        );

        let clamped: Vec<NodeId> = tree.iterate_levels(1).map(|(id, _, _)| id).collect();
        assert_eq!(clamped, vec![tree.root(), a, b]);

        let root_only: Vec<NodeId> = tree.iterate_levels(0).map(|(id, _, _)| id).collect();
        assert_eq!(root_only, vec![tree.root()]);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = tree();
        let child = tree.add_child(tree.root(), 0, 1, Some(Player::Second), false);
        tree.backpropagate(child, 1.0);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 2);
        assert_eq!(stats.root_visits, 1);
        assert_eq!(stats.max_depth, 1);
        // Root holds -1 for the opponent, i.e. +1 for the player to move
        assert!((stats.root_value - 1.0).abs() < 1e-12);
    }
}
