//! Embedded mail templates
//!
//! Compiled into the binary; rendered with handlebars against a flat
//! context of the record's fields (missing fields render as "N/A").

use handlebars::Handlebars;
use serde_json::{Value, json};

use crate::domain::Solicitud;

use super::Template;

/// Full record dump for the operations address
const ADMIN_ALERT: &str = "\
Nueva solicitud de transporte recibida.

Folio:         {{id}}
Registrada:    {{registrada}}
Chofer:        {{chofer}}
Proveedor:     {{proveedor}}
Placa:         {{placa}}
Producto:      {{producto}}
Peso:          {{peso}}
Correo:        {{correo}}
Destino:       {{destino}}
Fecha:         {{fecha}}
Observaciones: {{observaciones}}
";

/// Confirmation subset for the requester
const REQUESTER_CONFIRMATION: &str = "\
Hola,

Tu solicitud {{id}} fue registrada y su estado es: {{estado}}.

Placa:    {{placa}}
Producto: {{producto}}
Fecha:    {{fecha}}

Este es un mensaje automático, no es necesario responder.
";

/// Build a registry with both templates registered
pub fn registry() -> Result<Handlebars<'static>, handlebars::TemplateError> {
    let mut hb = Handlebars::new();
    hb.register_template_string("admin_alert", ADMIN_ALERT)?;
    hb.register_template_string("requester_confirmation", REQUESTER_CONFIRMATION)?;
    Ok(hb)
}

pub fn template_name(template: Template) -> &'static str {
    match template {
        Template::AdminAlert => "admin_alert",
        Template::RequesterConfirmation => "requester_confirmation",
    }
}

pub fn subject(template: Template, record: &Solicitud) -> String {
    match template {
        Template::AdminAlert => format!("Nueva solicitud {}", campo_or_na(record, "placa")),
        Template::RequesterConfirmation => format!("Solicitud registrada: {}", record.estado),
    }
}

/// Flat render context: server fields plus the known domain fields
pub fn context(record: &Solicitud) -> Value {
    let registrada = chrono::DateTime::from_timestamp_millis(record.created_at)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default();

    json!({
        "id": record.id,
        "estado": record.estado.to_string(),
        "registrada": registrada,
        "chofer": campo_or_na(record, "chofer"),
        "proveedor": campo_or_na(record, "proveedor"),
        "placa": campo_or_na(record, "placa"),
        "producto": campo_or_na(record, "producto"),
        "peso": campo_or_na(record, "peso"),
        "correo": campo_or_na(record, "correo"),
        "destino": campo_or_na(record, "destino"),
        "fecha": campo_or_na(record, "fecha"),
        "observaciones": campo_or_na(record, "observaciones"),
    })
}

/// Template placeholder for a missing field
fn campo_or_na(record: &Solicitud, name: &str) -> String {
    let value = record.campo_str(name);
    if value.is_empty() { "N/A".to_string() } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn record() -> Solicitud {
        let mut campos = Map::new();
        campos.insert("chofer".into(), "Juan".into());
        campos.insert("placa".into(), "ABC-123".into());
        Solicitud::new(campos)
    }

    #[test]
    fn test_admin_alert_renders_full_dump() {
        let hb = registry().unwrap();
        let record = record();

        let body = hb
            .render(template_name(Template::AdminAlert), &context(&record))
            .unwrap();

        assert!(body.contains(&record.id));
        assert!(body.contains("Juan"));
        assert!(body.contains("ABC-123"));
        // Missing fields use the placeholder
        assert!(body.contains("Proveedor:     N/A"));
    }

    #[test]
    fn test_requester_confirmation_renders_subset() {
        let hb = registry().unwrap();
        let record = record();

        let body = hb
            .render(
                template_name(Template::RequesterConfirmation),
                &context(&record),
            )
            .unwrap();

        assert!(body.contains(&record.id));
        assert!(body.contains("Pendiente"));
        assert!(!body.contains("Chofer"));
    }

    #[test]
    fn test_subjects() {
        let record = record();
        assert_eq!(subject(Template::AdminAlert, &record), "Nueva solicitud ABC-123");
        assert_eq!(
            subject(Template::RequesterConfirmation, &record),
            "Solicitud registrada: Pendiente"
        );
    }
}
