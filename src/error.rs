//! Error types.
//!
//! Two kinds of failure reach the caller:
//!
//! - [`MoeaError::Configuration`]: detected eagerly, before any objective
//!   is evaluated. Never retried.
//! - [`MoeaError::Evaluation`]: an objective function failed. The run is
//!   aborted immediately; no individual is silently skipped.
//!
//! Numerical degeneracies (zero objective ranges, empty fronts, singular
//! normalization hyperplanes) are handled where they occur and never
//! surface as errors.

use thiserror::Error;

/// Failure reported by a user-supplied objective function.
///
/// ```
/// use u_moea::ObjectiveError;
///
/// let err = ObjectiveError::new("simulation diverged");
/// assert_eq!(err.to_string(), "simulation diverged");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ObjectiveError {
    message: String,
}

impl ObjectiveError {
    /// Creates an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors produced by problem construction and optimizer runs.
#[derive(Debug, Error)]
pub enum MoeaError {
    /// Invalid parameters or problem definition.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An objective function failed while evaluating an individual.
    #[error(
        "objective {objective} failed for individual {index} in generation {generation}: {source}"
    )]
    Evaluation {
        /// Generation in which the failure happened (0 = initial population).
        generation: usize,
        /// Index of the individual within the evaluated batch.
        index: usize,
        /// Index of the failing objective.
        objective: usize,
        /// The underlying failure.
        #[source]
        source: ObjectiveError,
    },
}

impl MoeaError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        MoeaError::Configuration(message.into())
    }

    /// Returns `true` for configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MoeaError::Configuration(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MoeaError>;
