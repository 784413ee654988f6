/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

/// Error type shared by environments and agents
pub mod error;

/// Training runs over many episodes
pub mod experiment;

/// Exploration policies
pub mod exploration;

/// Testing environments
pub mod gym;

mod util;

pub use error::{Error, Result};
