//! Unified error types for the interaction layer

use std::time::Duration;
use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single locator strategy failed to resolve.
///
/// One of these is recorded per attempted strategy so an exhausted chain can
/// report exactly what was tried and how each attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyFailure {
    /// No matching element was present when the strategy timed out
    NoMatch,
    /// More than one visible, interactable element matched
    Ambiguous(usize),
    /// Matches existed but none was both visible and enabled
    NotInteractable,
    /// The underlying session reported an error for this strategy
    Failed(String),
}

impl std::fmt::Display for StrategyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyFailure::NoMatch => write!(f, "no match"),
            StrategyFailure::Ambiguous(n) => write!(f, "{} candidates matched", n),
            StrategyFailure::NotInteractable => write!(f, "matched but not interactable"),
            StrategyFailure::Failed(msg) => write!(f, "query failed: {}", msg),
        }
    }
}

/// One attempted strategy and how it ended.
#[derive(Debug, Clone)]
pub struct StrategyAttempt {
    /// Human-readable strategy description
    pub strategy: String,
    /// Why this strategy did not resolve
    pub failure: StrategyFailure,
}

/// Unified error type for the interaction layer
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No strategy in a locator chain resolved within its allotted time
    #[error("no strategy resolved {chain} after {elapsed:?}: [{}]", format_attempts(.attempts))]
    NotFound {
        /// Description of the attempted chain
        chain: String,
        /// Per-strategy failure reasons, in attempt order
        attempts: Vec<StrategyAttempt>,
        /// Total time spent across all strategies
        elapsed: Duration,
    },

    /// A readiness condition did not become true in time
    #[error("timed out after {waited:?} waiting for {what}")]
    ReadinessTimeout {
        /// What was being awaited
        what: String,
        /// How long the poller waited
        waited: Duration,
    },

    /// The session ended while an operation was in flight
    #[error("session closed: {0}")]
    SessionClosed(String),

    /// A multi-step workflow was invoked out of its required order
    #[error("workflow invariant violated: {0}")]
    WorkflowInvariant(String),

    /// Navigation failed
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

fn format_attempts(attempts: &[StrategyAttempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.strategy, a.failure))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create a new session closed error
    pub fn session_closed<S: Into<String>>(msg: S) -> Self {
        Error::SessionClosed(msg.into())
    }

    /// Create a new readiness timeout error
    pub fn readiness_timeout<S: Into<String>>(what: S, waited: Duration) -> Self {
        Error::ReadinessTimeout {
            what: what.into(),
            waited,
        }
    }

    /// Create a new workflow invariant error
    pub fn workflow_invariant<S: Into<String>>(msg: S) -> Self {
        Error::WorkflowInvariant(msg.into())
    }

    /// Create a new navigation failed error
    pub fn navigation<S: Into<String>>(msg: S) -> Self {
        Error::Navigation(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// True for errors that are benign during cleanup-phase actions
    pub fn is_session_closed(&self) -> bool {
        matches!(self, Error::SessionClosed(_))
    }
}
