//! UCT scoring used during selection.

/// Upper Confidence bound applied to Trees.
///
/// `UCT = Q + C * sqrt(ln(N) / n)` where `Q` is the child's mean reward from the
/// point of view of the player choosing at the parent, `N` the parent's visit
/// count (passed as `ln(N)`) and `n` the child's visit count.
///
/// An unvisited child scores `+inf` so every action is tried once before any
/// is revisited.
#[inline]
pub fn uct(mean_reward: f64, visits: u32, parent_visits_ln: f64, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    mean_reward + exploration_constant * (parent_visits_ln / visits as f64).sqrt()
}
