//! Request lifecycle controller
//!
//! Coordinates validation, persistence and notification for one
//! solicitud's life. Persistence goes through the StateManager actor;
//! notification is attempted after the record is safe and its failure is
//! carried back only as an advisory field.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{Estado, Solicitud};
use crate::export::{self, ExportError};
use crate::notify::{Notifier, Template};
use crate::state::{StateManager, StateResponse};

/// Result of a submit: the stored record plus advisory mail status
#[derive(Debug)]
pub struct SubmitOutcome {
    pub record: Solicitud,
    pub email_error: Option<String>,
}

/// Result of a decision: the updated record plus advisory mail status
#[derive(Debug)]
pub struct DecideOutcome {
    pub record: Solicitud,
    pub email_error: Option<String>,
}

/// Coordinates the solicitud lifecycle
pub struct Lifecycle {
    state: StateManager,
    notifier: Option<Arc<dyn Notifier>>,
    admin_to: Option<String>,
}

impl Lifecycle {
    pub fn new(
        state: StateManager,
        notifier: Option<Arc<dyn Notifier>>,
        admin_to: Option<String>,
    ) -> Self {
        Self {
            state,
            notifier,
            admin_to,
        }
    }

    /// Validate, persist, then attempt admin alert and requester
    /// confirmation. The submit succeeds regardless of mail outcome.
    pub async fn submit(&self, campos: serde_json::Map<String, serde_json::Value>) -> StateResponse<SubmitOutcome> {
        let record = self.state.submit(campos).await?;

        let mut email_error = None;
        if let Some(admin) = self.admin_to.clone() {
            self.attempt(&record, &admin, Template::AdminAlert, &mut email_error).await;
        }
        if let Some(correo) = record.correo().map(str::to_string) {
            self.attempt(&record, &correo, Template::RequesterConfirmation, &mut email_error)
                .await;
        }

        Ok(SubmitOutcome { record, email_error })
    }

    /// Full collection, insertion order
    pub async fn list(&self) -> StateResponse<Vec<Solicitud>> {
        self.state.list().await
    }

    /// Transition a record's estado, then confirm to the requester
    pub async fn decide(&self, key: &str, decision: Estado) -> StateResponse<DecideOutcome> {
        let record = self.state.decide(key, decision).await?;

        let mut email_error = None;
        if let Some(correo) = record.correo().map(str::to_string) {
            self.attempt(&record, &correo, Template::RequesterConfirmation, &mut email_error)
                .await;
        }

        Ok(DecideOutcome { record, email_error })
    }

    /// CSV projection of the whole collection
    pub async fn export(&self) -> Result<Vec<u8>, ExportError> {
        let records = self.state.list().await?;
        export::to_csv(&records)
    }

    /// One independent delivery attempt; failure is recorded, not raised
    async fn attempt(
        &self,
        record: &Solicitud,
        to: &str,
        template: Template,
        email_error: &mut Option<String>,
    ) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        if let Err(e) = notifier.notify(to, template, record).await {
            warn!(%to, ?template, id = %record.id, error = %e, "Notification failed");
            email_error.get_or_insert(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::DeliveryError;
    use async_trait::async_trait;
    use docstore::DocStore;
    use serde_json::{Map, Value, json};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every attempt; optionally fails them all
    struct MockNotifier {
        fail: bool,
        sent: Mutex<Vec<(String, Template)>>,
    }

    impl MockNotifier {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify(
            &self,
            to: &str,
            template: Template,
            _record: &Solicitud,
        ) -> Result<(), DeliveryError> {
            self.sent.lock().unwrap().push((to.to_string(), template));
            if self.fail {
                Err(DeliveryError::Gateway {
                    status: 502,
                    message: "gateway unreachable".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn lifecycle(temp: &TempDir, notifier: Option<Arc<MockNotifier>>) -> Lifecycle {
        let store = DocStore::open(temp.path().join("solicitudes.json")).unwrap();
        let state = StateManager::spawn(store);
        Lifecycle::new(
            state,
            notifier.map(|n| n as Arc<dyn Notifier>),
            Some("ops@example.com".to_string()),
        )
    }

    fn payload(fields: Value) -> Map<String, Value> {
        fields.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_submit_notifies_admin_and_requester() {
        let temp = TempDir::new().unwrap();
        let mock = MockNotifier::new(false);
        let lc = lifecycle(&temp, Some(mock.clone()));

        let outcome = lc
            .submit(payload(json!({"placa": "ABC-123", "correo": "ana@example.com"})))
            .await
            .unwrap();

        assert!(outcome.email_error.is_none());
        let sent = mock.sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec![
                ("ops@example.com".to_string(), Template::AdminAlert),
                ("ana@example.com".to_string(), Template::RequesterConfirmation),
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_without_correo_skips_confirmation() {
        let temp = TempDir::new().unwrap();
        let mock = MockNotifier::new(false);
        let lc = lifecycle(&temp, Some(mock.clone()));

        lc.submit(payload(json!({"placa": "ABC-123"}))).await.unwrap();

        let sent = mock.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, Template::AdminAlert);
    }

    #[tokio::test]
    async fn test_failed_delivery_is_advisory() {
        let temp = TempDir::new().unwrap();
        let mock = MockNotifier::new(true);
        let lc = lifecycle(&temp, Some(mock.clone()));

        let outcome = lc
            .submit(payload(json!({"placa": "ABC-123", "correo": "ana@example.com"})))
            .await
            .unwrap();

        // The record is persisted and both recipients were attempted
        assert!(outcome.email_error.is_some());
        assert_eq!(lc.list().await.unwrap().len(), 1);
        assert_eq!(mock.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_disabled_notifier_means_no_attempt_and_no_error() {
        let temp = TempDir::new().unwrap();
        let lc = lifecycle(&temp, None);

        let outcome = lc
            .submit(payload(json!({"placa": "ABC-123", "correo": "ana@example.com"})))
            .await
            .unwrap();

        assert!(outcome.email_error.is_none());
    }

    #[tokio::test]
    async fn test_decide_confirms_to_requester() {
        let temp = TempDir::new().unwrap();
        let mock = MockNotifier::new(false);
        let lc = lifecycle(&temp, Some(mock.clone()));

        lc.submit(payload(json!({"placa": "ABC-123", "correo": "ana@example.com"})))
            .await
            .unwrap();
        let outcome = lc.decide("ABC-123", Estado::Aprobado).await.unwrap();

        assert_eq!(outcome.record.estado, Estado::Aprobado);
        let sent = mock.sent.lock().unwrap();
        assert_eq!(sent.last().unwrap().0, "ana@example.com");
    }

    #[tokio::test]
    async fn test_export_empty_collection_fails() {
        let temp = TempDir::new().unwrap();
        let lc = lifecycle(&temp, None);

        assert!(matches!(lc.export().await, Err(ExportError::EmptyCollection)));
    }
}
