//! HTTP mail gateway client
//!
//! Delivers rendered messages as JSON posts to a configured gateway
//! endpoint. The SMTP wire protocol itself lives behind the gateway;
//! this client only speaks HTTP with basic auth.

use std::time::Duration;

use async_trait::async_trait;
use eyre::{Context, Result};
use handlebars::Handlebars;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

use crate::config::MailConfig;
use crate::domain::Solicitud;

use super::templates;
use super::{DeliveryError, Notifier, Template};

/// Notifier backed by an HTTP mail gateway
pub struct HttpMailer {
    http: Client,
    url: String,
    user: Option<String>,
    password: Option<String>,
    from: String,
    hb: Handlebars<'static>,
}

impl HttpMailer {
    /// Build a mailer from configuration
    ///
    /// Returns `None` when mail is not configured: the relay runs with
    /// notification disabled rather than failing startup.
    pub fn from_config(config: &MailConfig) -> Result<Option<Self>> {
        let (Some(url), Some(from)) = (config.url.clone(), config.from.clone()) else {
            info!("Mail not configured, notification disabled");
            return Ok(None);
        };

        let mut builder = Client::builder().timeout(Duration::from_millis(config.timeout_ms));
        if config.allow_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build().context("Failed to build mail HTTP client")?;

        let hb = templates::registry().context("Failed to register mail templates")?;

        info!(%url, %from, "Mail gateway configured");
        Ok(Some(Self {
            http,
            url,
            user: config.user.clone(),
            password: config.password.clone(),
            from,
            hb,
        }))
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn notify(
        &self,
        to: &str,
        template: Template,
        record: &Solicitud,
    ) -> Result<(), DeliveryError> {
        let body = self
            .hb
            .render(templates::template_name(template), &templates::context(record))?;
        let subject = templates::subject(template, record);

        let mut request = self.http.post(&self.url).json(&json!({
            "from": self.from,
            "to": to,
            "subject": subject,
            "text": body,
        }));
        if let Some(user) = &self.user {
            request = request.basic_auth(user, self.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        debug!(%to, ?template, id = %record.id, "Mail delivered");
        Ok(())
    }
}
