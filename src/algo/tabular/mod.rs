pub mod state_value;

pub use state_value::{ValueAgent, ValueAgentConfig};

/// A trait for state and action types that can be used as keys in a [`HashMap`](std::collections::HashMap)
pub trait Hashable: Copy + Eq + std::hash::Hash + std::fmt::Debug {}

impl<T> Hashable for T where T: Copy + Eq + std::hash::Hash + std::fmt::Debug {}
