//! Error types for Grove operations.
//!
//! Controllers never propagate errors: a failed commit is an
//! [`ActionFailure`] converted to "did not happen this tick" at the call
//! site, and a bad probe is a [`ProbeError`] logged and treated as a
//! negative answer. [`GroveError`] covers everything outside the tick loop
//! (configuration, I/O, serialization).

use crate::types::Role;
use thiserror::Error;

/// Result type for Grove operations outside the tick loop.
pub type Result<T, E = GroveError> = std::result::Result<T, E>;

/// Why a commit was rejected by the environment.
///
/// A commit can fail even when its matching `can_*` check passed, because
/// the world may have changed between the two calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionFailure {
    #[error("destination is blocked")]
    Blocked,
    #[error("destination is outside the arena")]
    OutOfBounds,
    #[error("action is still on cooldown")]
    Cooldown,
    #[error("insufficient funds: need {needed:.1}, have {available:.1}")]
    InsufficientFunds { needed: f64, available: f64 },
    #[error("no eligible target at the requested location")]
    NoTarget,
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("a {0} cannot perform this action")]
    WrongRole(Role),
    #[error("the acting agent is no longer in the arena")]
    Gone,
}

/// A sensing probe called with a nonsensical argument.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeError {
    #[error("degenerate probe radius: {0}")]
    DegenerateRadius(f64),
}

/// Errors outside the tick loop.
#[derive(Debug, Error)]
pub enum GroveError {
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GroveError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        GroveError::InvalidConfig {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
