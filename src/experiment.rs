use log::info;

use crate::{
    algo::tabular::{ValueAgent, ValueAgentConfig},
    error::Result,
    gym::Maze,
};

/// Configuration for a single training run in the maze
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    pub alpha: f32,
    pub epsilon: f32,
    pub episodes: u32,
    /// Steps after which an episode is cut short
    pub step_cap: u32,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            epsilon: 0.25,
            episodes: 5000,
            step_cap: 1000,
        }
    }
}

/// Train a fresh agent in the maze, rebuilding the maze for every episode
///
/// **Returns** the number of steps each episode took
pub fn run(config: &ExperimentConfig, seed: u64) -> Result<Vec<u32>> {
    let mut maze = Maze::new();
    let agent_config = ValueAgentConfig::new(config.alpha, config.epsilon)?;
    let mut agent = ValueAgent::seeded(&maze, agent_config, seed)?;

    let mut history = Vec::with_capacity(config.episodes as usize);
    for i in 0..config.episodes {
        if i % 1000 == 0 {
            info!("alpha {}: episode {i}, epsilon {:.4}", config.alpha, agent.epsilon());
        }
        history.push(agent.go(&mut maze, config.step_cap)?);
        maze = Maze::new();
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use statrs::statistics::Statistics;

    use super::*;

    fn window_mean(steps: &[u32]) -> f64 {
        steps.iter().map(|&s| s as f64).mean()
    }

    #[test]
    fn steps_to_goal_shrink_with_training() {
        let config = ExperimentConfig {
            alpha: 0.99,
            episodes: 3000,
            ..Default::default()
        };
        let history = run(&config, 7).unwrap();
        assert_eq!(history.len(), 3000);
        assert!(history.iter().all(|&s| (10..=1001).contains(&s)), "Steps within bounds");

        let early = window_mean(&history[..100]);
        let late = window_mean(&history[history.len() - 100..]);
        assert!(late < early, "late average {late} not below early average {early}");
    }

    #[test]
    fn same_seed_same_history() {
        let config = ExperimentConfig {
            episodes: 20,
            ..Default::default()
        };
        assert_eq!(run(&config, 3).unwrap(), run(&config, 3).unwrap());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ExperimentConfig {
            alpha: -0.1,
            ..Default::default()
        };
        assert!(run(&config, 0).is_err());
    }
}
