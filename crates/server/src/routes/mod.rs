//! HTTP surface of each service plus the endpoints every service shares.

pub mod usuarios;
pub mod animales;
pub mod productos;
pub mod carrito;
pub mod formularios;
pub mod ordenes;

use axum::{
    extract::Multipart,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::openapi::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::json::image_content_type;
use common::metrics::encode_metrics;
use common::types::Health;

/// Upload size accepted on image endpoints.
pub const IMAGE_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    encode_metrics()
}

/// `?emailAdmin=` on admin-gated endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminQuery {
    pub email_admin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BuscarQuery {
    pub nombre: Option<String>,
}

/// Multipart image upload: the `file` part plus an `emailAdmin` that may come
/// either in the query string or as a form field.
#[derive(Debug, Default)]
pub struct ImageUpload {
    pub email_admin: Option<String>,
    pub bytes: Vec<u8>,
}

pub async fn read_image_upload(
    query: AdminQuery,
    mut multipart: Multipart,
) -> Result<ImageUpload, axum::extract::multipart::MultipartError> {
    let mut upload = ImageUpload { email_admin: query.email_admin, bytes: Vec::new() };
    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => upload.bytes = field.bytes().await?.to_vec(),
            Some("emailAdmin") => {
                let value = field.text().await?;
                if upload.email_admin.is_none() {
                    upload.email_admin = Some(value);
                }
            }
            _ => {}
        }
    }
    Ok(upload)
}

/// Raw image with a sniffed content type.
pub fn image_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, image_content_type(&bytes))], bytes).into_response()
}

/// Wrap a service router with the shared endpoints and layers.
pub fn app(service_routes: Router, doc: OpenApi) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", doc))
        .merge(service_routes)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
pub(crate) mod test_util {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = send(app, req).await;
        let v = if bytes.is_empty() { serde_json::Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, v)
    }

    pub async fn send_text(app: &Router, req: Request<Body>) -> (StatusCode, String) {
        let (status, bytes) = send(app, req).await;
        (status, String::from_utf8(bytes).unwrap())
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    pub fn json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn empty(method: &str, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    /// Single-part multipart body carrying `file`.
    pub fn multipart(uri: &str, bytes: &[u8]) -> Request<Body> {
        let boundary = "X-AMILIMETROS-BOUNDARY";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Request::post(uri)
            .header("content-type", format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap()
    }
}
