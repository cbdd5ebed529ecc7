//! State manager messages
//!
//! Commands and responses for the actor pattern.

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::{Estado, Solicitud};

/// Errors from state operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Solicitud not found: {0}")]
    NotFound(String),

    #[error("Invalid payload: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Channel error")]
    Channel,
}

/// Response from state operations
pub type StateResponse<T> = Result<T, StateError>;

/// Commands sent to the StateManager actor
#[derive(Debug)]
pub enum StateCommand {
    /// Append a new solicitud built from the client payload
    Submit {
        campos: Map<String, Value>,
        reply: oneshot::Sender<StateResponse<Solicitud>>,
    },

    /// Full collection, insertion order
    List {
        reply: oneshot::Sender<StateResponse<Vec<Solicitud>>>,
    },

    /// Transition the estado of the record matching `key`
    Decide {
        key: String,
        decision: Estado,
        reply: oneshot::Sender<StateResponse<Solicitud>>,
    },

    /// Stop the actor
    Shutdown,
}
