//! Shared utilities for two-player game implementations
//!
//! This module provides common functionality used across game implementations
//! so every game reports outcomes on the same scale.

use crate::game::Player;

/// Reward for a finished two-player zero-sum game.
///
/// # Arguments
/// * `winner` - The winning player, or `None` for a draw
/// * `perspective` - The player the reward is reported for
///
/// # Returns
/// * `1.0` if `perspective` won
/// * `-1.0` if `perspective` lost
/// * `0.0` for draws
///
/// # Example
/// ```
/// use engine_core::{zero_sum_reward, Player};
///
/// assert_eq!(zero_sum_reward(Some(Player::First), Player::First), 1.0);
/// assert_eq!(zero_sum_reward(Some(Player::First), Player::Second), -1.0);
/// assert_eq!(zero_sum_reward(None, Player::Second), 0.0);
/// ```
#[inline]
pub fn zero_sum_reward(winner: Option<Player>, perspective: Player) -> f64 {
    match winner {
        Some(player) if player == perspective => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}
