//! CSV export of the solicitud collection
//!
//! Projects a fixed column set from every record into an RFC-4180 CSV
//! document, one data row per record.

use thiserror::Error;

use crate::domain::Solicitud;
use crate::state::StateError;

/// Fixed export column set, in order
pub const COLUMNS: [&str; 9] = [
    "id",
    "createdAt",
    "chofer",
    "proveedor",
    "placa",
    "producto",
    "peso",
    "correo",
    "observaciones",
];

/// Errors from export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No solicitudes to export")]
    EmptyCollection,

    #[error(transparent)]
    State(#[from] StateError),
}

/// Render the collection as a CSV document
pub fn to_csv(records: &[Solicitud]) -> Result<Vec<u8>, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyCollection);
    }

    let mut out = String::new();
    push_row(&mut out, COLUMNS.iter().map(|c| c.to_string()));

    for record in records {
        push_row(
            &mut out,
            COLUMNS.iter().map(|column| match *column {
                "id" => record.id.clone(),
                "createdAt" => record.created_at.to_string(),
                field => record.campo_str(field),
            }),
        );
    }

    Ok(out.into_bytes())
}

fn push_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let row: Vec<String> = fields.map(|f| escape(&f)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// RFC-4180 quoting: fields containing separators or quotes are quoted,
/// embedded quotes doubled
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
