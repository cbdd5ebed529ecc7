//! Solicitud record type
//!
//! The client payload is free-form: whatever domain fields it carries
//! (chofer, proveedor, placa, producto, peso, correo, observaciones,
//! destino, fecha, ...) are stored verbatim in `campos`. The server owns
//! `id`, `createdAt` and `estado`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::generate_id;

/// Field names owned by the server; stripped from client payloads
pub const RESERVED_FIELDS: [&str; 3] = ["id", "createdAt", "estado"];

/// Decision state of a solicitud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Estado {
    #[default]
    Pendiente,
    Aprobado,
    Rechazado,
}

impl std::fmt::Display for Estado {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pendiente => write!(f, "Pendiente"),
            Self::Aprobado => write!(f, "Aprobado"),
            Self::Rechazado => write!(f, "Rechazado"),
        }
    }
}

impl Estado {
    /// Parse a decision value; only the two terminal states are valid
    /// decisions. Anything else is rejected rather than stored verbatim.
    pub fn decision(value: &str) -> Option<Self> {
        match value.trim() {
            "Aprobado" => Some(Self::Aprobado),
            "Rechazado" => Some(Self::Rechazado),
            _ => None,
        }
    }
}

/// One submitted transport request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solicitud {
    /// Server-assigned identity, unique and creation-ordered
    pub id: String,

    /// Creation timestamp (Unix milliseconds), immutable
    #[serde(rename = "createdAt")]
    pub created_at: i64,

    /// Decision state, starts Pendiente
    #[serde(default)]
    pub estado: Estado,

    /// Client-supplied domain fields, verbatim
    #[serde(flatten)]
    pub campos: Map<String, Value>,
}

impl Solicitud {
    /// Build a new record from a client payload
    ///
    /// Reserved keys are stripped so the server-assigned values always
    /// win; everything else is kept as submitted.
    pub fn new(mut campos: Map<String, Value>) -> Self {
        for key in RESERVED_FIELDS {
            campos.remove(key);
        }
        Self {
            id: generate_id(),
            created_at: now_ms(),
            estado: Estado::default(),
            campos,
        }
    }

    /// String view of a domain field, empty when absent or null
    pub fn campo_str(&self, name: &str) -> String {
        match self.campos.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Plate field, the legacy lookup key for decisions
    pub fn placa(&self) -> Option<&str> {
        self.campos.get("placa").and_then(Value::as_str)
    }

    /// Requester address; confirmation mail is only sent when present
    pub fn correo(&self) -> Option<&str> {
        self.campos
            .get("correo")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Current Unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(fields: Value) -> Map<String, Value> {
        fields.as_object().unwrap().clone()
    }

    #[test]
    fn test_new_assigns_id_created_at_and_estado() {
        let record = Solicitud::new(payload(json!({"chofer": "Juan", "placa": "ABC-123"})));

        assert!(!record.id.is_empty());
        assert!(record.created_at > 0);
        assert_eq!(record.estado, Estado::Pendiente);
        assert_eq!(record.campos["chofer"], "Juan");
        assert_eq!(record.campos["placa"], "ABC-123");
    }

    #[test]
    fn test_new_strips_reserved_fields() {
        let record = Solicitud::new(payload(json!({
            "id": "client-id",
            "createdAt": 1,
            "estado": "Aprobado",
            "placa": "XYZ-9"
        })));

        assert_ne!(record.id, "client-id");
        assert_ne!(record.created_at, 1);
        assert_eq!(record.estado, Estado::Pendiente);
        assert_eq!(record.campos.len(), 1);
    }

    #[test]
    fn test_serde_uses_spanish_estado_labels() {
        let mut record = Solicitud::new(payload(json!({"placa": "ABC-123"})));
        record.estado = Estado::Aprobado;

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["estado"], "Aprobado");
        assert_eq!(value["placa"], "ABC-123");
        assert!(value["createdAt"].is_i64());

        let back: Solicitud = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_decision_rejects_unknown_values() {
        assert_eq!(Estado::decision("Aprobado"), Some(Estado::Aprobado));
        assert_eq!(Estado::decision(" Rechazado "), Some(Estado::Rechazado));
        assert_eq!(Estado::decision("Pendiente"), None);
        assert_eq!(Estado::decision("aprobado"), None);
        assert_eq!(Estado::decision("DROP TABLE"), None);
    }

    #[test]
    fn test_campo_str_formats_non_strings() {
        let record = Solicitud::new(payload(json!({"peso": 1500, "chofer": "Ana"})));
        assert_eq!(record.campo_str("peso"), "1500");
        assert_eq!(record.campo_str("chofer"), "Ana");
        assert_eq!(record.campo_str("missing"), "");
    }

    #[test]
    fn test_correo_ignores_blank() {
        let record = Solicitud::new(payload(json!({"correo": "  "})));
        assert_eq!(record.correo(), None);

        let record = Solicitud::new(payload(json!({"correo": "ana@example.com"})));
        assert_eq!(record.correo(), Some("ana@example.com"));
    }
}
