//! Solicitud relay
//!
//! Receives transport-request form submissions over HTTP, appends them
//! to a single persisted JSON collection, and sends best-effort email
//! notifications to operations and the requester.
//!
//! # Modules
//!
//! - [`api`] - HTTP routes, handlers and embedded front-end
//! - [`domain`] - Solicitud record, estado lifecycle and id generation
//! - [`state`] - Single-writer actor owning the persisted collection
//! - [`notify`] - Notification trait, templates and mail gateway client
//! - [`lifecycle`] - Persist-then-notify coordination per request
//! - [`config`] - Configuration types and loading

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod lifecycle;
pub mod notify;
pub mod state;

// Re-export commonly used types
pub use config::{AuthConfig, Config, MailConfig, ServerConfig, StorageConfig};
pub use domain::{Estado, Solicitud};
pub use lifecycle::{DecideOutcome, Lifecycle, SubmitOutcome};
pub use notify::{DeliveryError, HttpMailer, Notifier, Template};
pub use state::{StateCommand, StateError, StateManager, StateResponse};
