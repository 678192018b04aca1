//! MCTS configuration parameters.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::search::SearchError;

/// Rule used to pick the root's child once the search budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalSelection {
    /// Highest visit count; ties broken by mean reward, then expansion order.
    #[default]
    MostVisited,
    /// Highest mean reward; ties broken by visit count, then expansion order.
    BestMeanReward,
}

impl FromStr for FinalSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "most_visited" | "visits" => Ok(Self::MostVisited),
            "best_mean_reward" | "mean" => Ok(Self::BestMeanReward),
            other => Err(format!(
                "unknown final selection '{}', expected 'most_visited' or 'best_mean_reward'",
                other
            )),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of iterations to run per search.
    pub iterations: u32,

    /// Exploration constant C in the UCT formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    /// sqrt(2) is the textbook choice for rewards in [-1, 1].
    pub exploration_constant: f64,

    /// Optional wall-clock budget. Checked between iterations, so the
    /// iteration in flight always completes.
    pub time_limit: Option<Duration>,

    /// Number of rollouts played from each simulated leaf. Their rewards are averaged.
    pub rollouts_per_leaf: u32,

    /// How the returned action is picked among the root's children.
    pub final_selection: FinalSelection,

    /// Keep the finished tree in the search result for external rendering.
    pub dump_tree: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: std::f64::consts::SQRT_2,
            time_limit: None,
            rollouts_per_leaf: 1,
            final_selection: FinalSelection::MostVisited,
            dump_tree: false,
        }
    }
}

impl MctsConfig {
    /// Create config for interactive play against a human.
    pub fn for_play() -> Self {
        Self {
            iterations: 2000,
            time_limit: Some(Duration::from_secs(5)),
            ..Self::default()
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 50,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set a wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Builder pattern: set rollouts averaged per leaf.
    pub fn with_rollouts_per_leaf(mut self, n: u32) -> Self {
        self.rollouts_per_leaf = n;
        self
    }

    /// Builder pattern: set the final selection rule.
    pub fn with_final_selection(mut self, rule: FinalSelection) -> Self {
        self.final_selection = rule;
        self
    }

    /// Builder pattern: keep the tree in the result.
    pub fn with_dump_tree(mut self, dump: bool) -> Self {
        self.dump_tree = dump;
        self
    }

    /// Check the parameters before a search starts.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration constant must be a finite non-negative number, got {}",
                self.exploration_constant
            )));
        }
        if self.exploration_constant == 0.0 {
            warn!("Exploration constant is 0, search will be purely greedy");
        }
        if self.rollouts_per_leaf == 0 {
            return Err(SearchError::InvalidConfig(
                "rollouts_per_leaf must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 1000);
        assert!((config.exploration_constant - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(config.rollouts_per_leaf, 1);
        assert_eq!(config.final_selection, FinalSelection::MostVisited);
        assert!(config.time_limit.is_none());
        assert!(!config.dump_tree);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_exploration_constant(0.7)
            .with_rollouts_per_leaf(4)
            .with_final_selection(FinalSelection::BestMeanReward)
            .with_time_limit(Duration::from_millis(250))
            .with_dump_tree(true);

        assert_eq!(config.iterations, 100);
        assert!((config.exploration_constant - 0.7).abs() < 1e-12);
        assert_eq!(config.rollouts_per_leaf, 4);
        assert_eq!(config.final_selection, FinalSelection::BestMeanReward);
        assert_eq!(config.time_limit, Some(Duration::from_millis(250)));
        assert!(config.dump_tree);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(MctsConfig::default().validate().is_ok());
        assert!(MctsConfig::for_testing().validate().is_ok());
        assert!(MctsConfig::for_play().validate().is_ok());
        assert_eq!(MctsConfig::for_testing().iterations, 50);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_iterations = MctsConfig::default().with_iterations(0);
        assert!(matches!(
            zero_iterations.validate(),
            Err(SearchError::InvalidConfig(_))
        ));

        let negative_c = MctsConfig::default().with_exploration_constant(-1.0);
        assert!(matches!(
            negative_c.validate(),
            Err(SearchError::InvalidConfig(_))
        ));

        let nan_c = MctsConfig::default().with_exploration_constant(f64::NAN);
        assert!(matches!(nan_c.validate(), Err(SearchError::InvalidConfig(_))));

        let no_rollouts = MctsConfig::default().with_rollouts_per_leaf(0);
        assert!(matches!(
            no_rollouts.validate(),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_exploration_is_allowed() {
        let greedy = MctsConfig::default().with_exploration_constant(0.0);
        assert!(greedy.validate().is_ok());
    }

    #[test]
    fn test_final_selection_from_str() {
        assert_eq!(
            "most_visited".parse::<FinalSelection>(),
            Ok(FinalSelection::MostVisited)
        );
        assert_eq!(
            "Best_Mean_Reward".parse::<FinalSelection>(),
            Ok(FinalSelection::BestMeanReward)
        );
        assert_eq!("mean".parse::<FinalSelection>(), Ok(FinalSelection::BestMeanReward));
        assert!("random".parse::<FinalSelection>().is_err());
    }
}
