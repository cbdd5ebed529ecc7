//! Embedded front-end assets

use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Served when no index.html is embedded, so the relay still answers
/// on / with something useful.
const PLACEHOLDER: &str = r#"<!doctype html>
<html lang="es">
<head><meta charset="utf-8"><title>Solicitudes</title></head>
<body>
<h1>Relay de solicitudes</h1>
<p>POST /api/solicitud para registrar una solicitud.</p>
</body>
</html>
"#;

pub async fn static_handler(uri: Uri) -> impl IntoResponse {
    let mut path = uri.path().trim_start_matches('/').to_string();
    if path.is_empty() {
        path = "index.html".to_string();
    }

    match Assets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None if path == "index.html" => Html(PLACEHOLDER).into_response(),
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}
