//! Notification dispatch
//!
//! Best-effort templated mail for solicitud events. The `Notifier` is an
//! explicitly injected dependency so tests can substitute a double; the
//! production implementation delivers through an HTTP mail gateway.
//! Delivery failure is always advisory: it never fails the operation
//! that triggered it.

mod mailer;
mod templates;

pub use mailer::HttpMailer;
pub use templates::registry;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Solicitud;

/// Errors from a delivery attempt
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Mail gateway error {status}: {message}")]
    Gateway { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

/// The two fixed message templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Full record dump to the operations address
    AdminAlert,
    /// Field subset back to the requester
    RequesterConfirmation,
}

/// Best-effort templated message delivery
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt delivery of one message to one recipient
    async fn notify(
        &self,
        to: &str,
        template: Template,
        record: &Solicitud,
    ) -> Result<(), DeliveryError>;
}
