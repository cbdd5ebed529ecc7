//! HTTP handlers for the relay API

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::auth;
use crate::domain::{Estado, Solicitud};

/// Response body for a stored submission
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
    pub id: String,
    #[serde(rename = "emailError", skip_serializing_if = "Option::is_none")]
    pub email_error: Option<String>,
}

/// POST /api/solicitud and POST /solicitud
///
/// The body is any JSON object; its fields become the record's campos.
/// Parsed from raw bytes so a missing or malformed body maps to the
/// same 400 as an empty one.
pub async fn submit(State(state): State<AppState>, body: Bytes) -> Result<Json<SubmitResponse>, ApiError> {
    let campos = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err(ApiError::Validation("Solicitud vacía".to_string())),
    };

    let outcome = state.lifecycle.submit(campos).await?;
    Ok(Json(SubmitResponse {
        message: "Solicitud guardada",
        id: outcome.record.id,
        email_error: outcome.email_error,
    }))
}

/// GET /solicitudes and GET /solicitudes.json
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Solicitud>>, ApiError> {
    let records = state.lifecycle.list().await?;
    Ok(Json(records))
}

/// GET /export
///
/// CSV download of the full collection; 404 when nothing is stored yet.
pub async fn export(State(state): State<AppState>) -> Result<Response, ApiError> {
    let csv = state.lifecycle.export().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"solicitudes.csv\""),
        ],
        csv,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct DecideRequest {
    pub placa: Option<String>,
    pub id: Option<String>,
    pub decision: String,
}

#[derive(Debug, Serialize)]
pub struct DecideResponse {
    pub message: &'static str,
    pub estado: Estado,
    #[serde(rename = "emailError", skip_serializing_if = "Option::is_none")]
    pub email_error: Option<String>,
}

/// POST /decidir
pub async fn decide(
    State(state): State<AppState>,
    Json(req): Json<DecideRequest>,
) -> Result<Json<DecideResponse>, ApiError> {
    let decision = Estado::decision(&req.decision)
        .ok_or_else(|| ApiError::Validation(format!("Decisión inválida: {}", req.decision)))?;

    let key = req
        .id
        .or(req.placa)
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Falta placa o id".to_string()))?;

    let outcome = state.lifecycle.decide(&key, decision).await?;
    Ok(Json(DecideResponse {
        message: "Solicitud actualizada",
        estado: outcome.record.estado,
        email_error: outcome.email_error,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub clave: String,
}

/// POST /login
///
/// Advisory gate for the front-end; a wrong clave gets a plain-text 401
/// and never a JSON error body.
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    if auth::verify_clave(&req.clave, &state.auth) {
        Json(serde_json::json!({ "ok": true })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "No autorizado").into_response()
    }
}
