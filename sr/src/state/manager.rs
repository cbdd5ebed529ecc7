//! StateManager - actor that owns the solicitud collection
//!
//! Processes commands via channels so every load-mutate-save cycle is
//! serialized through one task: concurrent submits or decisions cannot
//! lose each other's writes.

use docstore::DocStore;
use serde_json::{Map, Value};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::domain::{Estado, Solicitud};

use super::messages::{StateCommand, StateError, StateResponse};

/// Handle to send commands to the StateManager actor
#[derive(Clone)]
pub struct StateManager {
    tx: mpsc::Sender<StateCommand>,
}

impl StateManager {
    /// Spawn the actor, loading the persisted collection
    pub fn spawn(store: DocStore<Solicitud>) -> Self {
        let records = store.load();
        info!(count = records.len(), path = %store.path().display(), "Loaded solicitud collection");

        let (tx, rx) = mpsc::channel(256);
        tokio::spawn(actor_loop(store, records, rx));

        Self { tx }
    }

    /// Validate and append a new solicitud
    pub async fn submit(&self, campos: Map<String, Value>) -> StateResponse<Solicitud> {
        debug!(field_count = campos.len(), "submit: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::Submit {
                campos,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::Channel)?;
        reply_rx.await.map_err(|_| StateError::Channel)?
    }

    /// Full collection in insertion order
    pub async fn list(&self) -> StateResponse<Vec<Solicitud>> {
        debug!("list: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::List { reply: reply_tx })
            .await
            .map_err(|_| StateError::Channel)?;
        reply_rx.await.map_err(|_| StateError::Channel)?
    }

    /// Transition the estado of the record matching `key`
    ///
    /// The key is matched against the stable id first, then against the
    /// placa domain field for callers that still address records by
    /// plate.
    pub async fn decide(&self, key: &str, decision: Estado) -> StateResponse<Solicitud> {
        debug!(%key, %decision, "decide: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::Decide {
                key: key.to_string(),
                decision,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::Channel)?;
        reply_rx.await.map_err(|_| StateError::Channel)?
    }

    /// Request actor shutdown
    pub async fn shutdown(&self) {
        let _ = self.tx.send(StateCommand::Shutdown).await;
    }
}

/// The actor task: exclusive owner of the store and the collection
async fn actor_loop(
    store: DocStore<Solicitud>,
    mut records: Vec<Solicitud>,
    mut rx: mpsc::Receiver<StateCommand>,
) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            StateCommand::Submit { campos, reply } => {
                let result = handle_submit(&store, &mut records, campos);
                let _ = reply.send(result);
            }

            StateCommand::List { reply } => {
                let _ = reply.send(Ok(records.clone()));
            }

            StateCommand::Decide {
                key,
                decision,
                reply,
            } => {
                let result = handle_decide(&store, &mut records, &key, decision);
                let _ = reply.send(result);
            }

            StateCommand::Shutdown => break,
        }
    }

    debug!("StateManager stopped");
}

fn handle_submit(
    store: &DocStore<Solicitud>,
    records: &mut Vec<Solicitud>,
    campos: Map<String, Value>,
) -> StateResponse<Solicitud> {
    if campos.is_empty() {
        return Err(StateError::Validation("Solicitud vacía".to_string()));
    }

    let record = Solicitud::new(campos);
    records.push(record.clone());
    persist(store, records);

    info!(id = %record.id, placa = ?record.placa(), "Nueva solicitud registrada");
    Ok(record)
}

fn handle_decide(
    store: &DocStore<Solicitud>,
    records: &mut [Solicitud],
    key: &str,
    decision: Estado,
) -> StateResponse<Solicitud> {
    // Stable id wins; placa is a legacy, non-unique fallback
    let index = records
        .iter()
        .position(|r| r.id == key)
        .or_else(|| records.iter().position(|r| r.placa() == Some(key)));

    let Some(index) = index else {
        return Err(StateError::NotFound(key.to_string()));
    };

    records[index].estado = decision;
    persist(store, records);

    info!(id = %records[index].id, %decision, "Solicitud decidida");
    Ok(records[index].clone())
}

/// Persist the full collection. A failed save is logged but does not
/// fail the operation: the record is already accepted in memory and the
/// previous document stays intact on disk.
fn persist(store: &DocStore<Solicitud>, records: &[Solicitud]) {
    if let Err(e) = store.save(records) {
        warn!(error = %e, "Failed to persist collection, continuing with in-memory state");
    }
}
