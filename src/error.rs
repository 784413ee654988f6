use thiserror::Error;

/// Errors raised when a caller breaks the contract of an environment or agent
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The action is not in the legal-move table for the state it was taken from
    #[error("action {action} is not legal from state {state}")]
    IllegalMove { state: String, action: String },

    /// An action was requested from an empty set of legal actions
    #[error("no legal actions available from state {0}")]
    NoLegalActions(String),

    /// A state was looked up that has no entry in the value table
    #[error("state {0} has no entry in the value table")]
    UnknownState(String),

    /// A hyperparameter fell outside of its valid interval
    #[error("invalid value for `{name}`: {value} is outside the interval [{min}, {max}]")]
    OutOfInterval {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A decay schedule moves away from its final value
    #[error("`vi - vf` must have same sign as `rate`")]
    InvalidDecay,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
