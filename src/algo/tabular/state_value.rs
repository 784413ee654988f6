use std::collections::HashMap;

use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::{
    decay, ensure_interval,
    env::{DiscreteActionSpace, Environment},
    error::{Error, Result},
    exploration::{Choice, EpsilonGreedy},
};

use super::Hashable;

/// Amount epsilon drops by after every episode
pub const EPSILON_DECREMENT: f32 = 1e-4;

/// Configuration for the [`ValueAgent`]
pub struct ValueAgentConfig {
    pub exploration: EpsilonGreedy<decay::Linear>,
    pub alpha: f32,
}

impl ValueAgentConfig {
    /// Learning rate `alpha` with an exploration rate starting at `epsilon` and
    /// dropping by [`EPSILON_DECREMENT`] per episode until it reaches zero
    pub fn new(alpha: f32, epsilon: f32) -> Result<Self> {
        Ok(Self {
            exploration: EpsilonGreedy::new(decay::Linear::new(EPSILON_DECREMENT, epsilon, 0.0)?),
            alpha,
        })
    }
}

impl Default for ValueAgentConfig {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(
                decay::Linear::new(EPSILON_DECREMENT, 0.2, 0.0).expect("decay is valid"),
            ),
            alpha: 0.15,
        }
    }
}

/// A state-value agent that learns from whole episodes
///
/// The agent keeps one value per state, estimating the return of continuing from
/// that state. Actions are picked epsilon-greedily by looking one step ahead at the
/// value of the state each legal action leads to. At the end of an episode the
/// trajectory is walked backwards and every visited state is pulled toward the sum
/// of the rewards that followed it.
///
/// ### Generics
/// - `E` - The [`Environment`] in which the agent will learn
///     - Its state space must be enumerable so every state gets a value up front
/// - `R` - Source of randomness for exploration and value initialization
pub struct ValueAgent<E, R = StdRng>
where
    E: DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
    R: Rng,
{
    values: HashMap<E::State, f32>,
    trajectory: Vec<(E::State, f32)>,
    exploration: EpsilonGreedy<decay::Linear>,
    alpha: f32,   // learning rate
    episode: u32, // completed learning updates
    rng: R,
}

impl<E> ValueAgent<E>
where
    E: DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
{
    /// Initialize a new `ValueAgent` for `env`, seeded from the OS
    pub fn new(env: &E, config: ValueAgentConfig) -> Result<Self> {
        Self::with_rng(env, config, StdRng::from_entropy())
    }

    /// Initialize a new `ValueAgent` for `env` with a reproducible seed
    pub fn seeded(env: &E, config: ValueAgentConfig, seed: u64) -> Result<Self> {
        Self::with_rng(env, config, StdRng::seed_from_u64(seed))
    }
}

impl<E, R> ValueAgent<E, R>
where
    E: DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
    R: Rng,
{
    /// Initialize a new `ValueAgent` for `env` drawing randomness from `rng`
    ///
    /// Every state gets a value drawn uniformly from `[-1.0, -0.1)`.
    ///
    /// **Errors** if `alpha` or the initial epsilon is not in the interval `[0,1]`
    pub fn with_rng(env: &E, config: ValueAgentConfig, mut rng: R) -> Result<Self> {
        let alpha = config.alpha;
        let epsilon = config.exploration.epsilon(0);
        ensure_interval!(alpha, 0.0, 1.0);
        ensure_interval!(epsilon, 0.0, 1.0);

        let dist = Uniform::new(-1.0, -0.1);
        let values = env
            .states()
            .into_iter()
            .map(|state| (state, dist.sample(&mut rng)))
            .collect();

        Ok(Self {
            values,
            trajectory: vec![(env.start(), 0.0)],
            exploration: config.exploration,
            alpha,
            episode: 0,
            rng,
        })
    }

    pub fn value_table(&self) -> &HashMap<E::State, f32> {
        &self.values
    }

    pub fn trajectory(&self) -> &[(E::State, f32)] {
        &self.trajectory
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Number of completed learning updates
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f32 {
        self.exploration.epsilon(self.episode)
    }

    fn value(&self, state: &E::State) -> Result<f32> {
        self.values
            .get(state)
            .copied()
            .ok_or_else(|| Error::UnknownState(format!("{state:?}")))
    }

    /// Choose an action from `actions` based on the exploration policy and a one-step lookahead
    ///
    /// Ties between equally valued actions go to the one listed first.
    ///
    /// **Errors** if `actions` is empty or an action leads to a state with no value
    pub fn choose_action(&mut self, state: &E::State, actions: &[E::Action]) -> Result<E::Action> {
        if actions.is_empty() {
            return Err(Error::NoLegalActions(format!("{state:?}")));
        }

        match self.exploration.choose(self.episode, &mut self.rng) {
            Choice::Explore => Ok(actions[self.rng.gen_range(0..actions.len())]),
            Choice::Exploit => {
                let mut best = actions[0];
                let mut best_value = self.value(&E::successor(state, best))?;
                for &action in &actions[1..] {
                    let value = self.value(&E::successor(state, action))?;
                    if value > best_value {
                        best = action;
                        best_value = value;
                    }
                }
                Ok(best)
            }
        }
    }

    /// Record the state reached and the reward received for it
    pub fn update_trajectory(&mut self, state: E::State, reward: f32) {
        self.trajectory.push((state, reward));
    }

    /// Walk the trajectory backwards and pull each state's value toward the rewards that followed it
    ///
    /// The trajectory is emptied and epsilon decays afterwards.
    ///
    /// **Errors** if the trajectory holds a state with no value. Nothing is updated in that case.
    pub fn learn(&mut self) -> Result<()> {
        if let Some((state, _)) = self
            .trajectory
            .iter()
            .find(|(state, _)| !self.values.contains_key(state))
        {
            return Err(Error::UnknownState(format!("{state:?}")));
        }

        let mut target = 0.0;
        for &(state, reward) in self.trajectory.iter().rev() {
            if let Some(value) = self.values.get_mut(&state) {
                *value += self.alpha * (target - *value);
            }
            target += reward;
        }

        trace!("learned from {} transitions, return {target}", self.trajectory.len());
        self.trajectory.clear();
        self.episode += 1;
        Ok(())
    }

    /// Run one episode in `env`, learning from it once it ends
    ///
    /// An episode that runs past `step_cap` steps is forced into the terminal state.
    ///
    /// **Returns** the number of steps taken
    pub fn go(&mut self, env: &mut E, step_cap: u32) -> Result<u32> {
        while !env.is_terminal() {
            let (state, _) = env.state_and_reward();
            let action = self.choose_action(&state, env.actions(&state))?;
            env.step(action)?;

            let (state, reward) = env.state_and_reward();
            self.update_trajectory(state, reward);

            if env.steps() > step_cap {
                env.truncate();
            }
        }

        let steps = env.steps();
        self.learn()?;
        debug!(
            "episode {} finished in {steps} steps, epsilon {:.4}",
            self.episode,
            self.epsilon()
        );
        Ok(steps)
    }
}
