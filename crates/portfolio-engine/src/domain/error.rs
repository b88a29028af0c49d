//! Error types for the engine and its collaborators

use super::entity::PropertyId;
use crate::navigation::{Screen, Transition};

/// Failures reported by a data store or session provider
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The record does not exist (or is not visible to this owner)
    #[error("not found: {0}")]
    NotFound(PropertyId),

    /// The store refused the request; `message` is shown to the user as is
    #[error("{message}")]
    Rejected { message: String },

    /// The request never got a usable answer
    #[error("transport error: {0}")]
    Transport(String),

    /// No session, or the store no longer accepts it
    #[error("not signed in")]
    Unauthenticated,
}

impl StoreError {
    pub fn rejected(message: impl Into<String>) -> Self {
        StoreError::Rejected { message: message.into() }
    }

    /// Text for the notification channel. Store and transport messages are
    /// passed through untouched.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Transport(message) => message.clone(),
            StoreError::Unauthenticated => "Session expirée, veuillez vous reconnecter".to_string(),
            other => other.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Engine-level errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("annual income is required")]
    MissingIncome,

    #[error("{transition:?} is not allowed from {from:?}")]
    InvalidTransition { from: Screen, transition: Transition },

    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type EngineResult<T> = Result<T, EngineError>;
