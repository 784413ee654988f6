use crate::error::Result;

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent
/// and a finite state space and action space. The environment is driven one step at
/// a time and queried for its state and reward in between.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// The state every episode starts from
    fn start(&self) -> Self::State;

    /// Determine if the current state is terminal
    fn is_terminal(&self) -> bool;

    /// Update the environment in response to an action taken by an agent
    ///
    /// **Errors** if the action is not legal in the current state. The environment is left untouched.
    fn step(&mut self, action: Self::Action) -> Result<()>;

    /// The current state and the reward associated with it
    ///
    /// **Returns** `(state, reward)`
    fn state_and_reward(&self) -> (Self::State, f32);

    /// Number of steps taken since the last reset
    fn steps(&self) -> u32;

    /// Force the environment into its terminal state, ending a runaway episode
    fn truncate(&mut self);

    /// Reset the environment to its initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}

/// An environment with a finite, enumerable state space and a fixed set of legal actions per state
pub trait DiscreteActionSpace: Environment {
    /// Get the legal actions for a state
    ///
    /// The returned slice is empty for states the agent can never occupy.
    fn actions(&self, state: &Self::State) -> &[Self::Action];

    /// Every state the agent can occupy, in a fixed order
    fn states(&self) -> Vec<Self::State>;

    /// The state reached by taking `action` from `state`
    ///
    /// This is pure arithmetic on the action and does not consult the environment, so
    /// the result is only meaningful when `action` is legal in `state`.
    fn successor(state: &Self::State, action: Self::Action) -> Self::State;
}
