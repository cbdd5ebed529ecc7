//! Persistent state management
//!
//! A single-writer actor owns the solicitud collection and its on-disk
//! document; all mutations funnel through its command channel.

mod manager;
mod messages;

pub use manager::StateManager;
pub use messages::{StateCommand, StateError, StateResponse};
