use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};

use service::catalog::domain::{Producto, ProductoFilter, ProductoInput};
use service::catalog::CatalogService;

use super::{image_response, read_image_upload, AdminQuery, BuscarQuery, IMAGE_BODY_LIMIT};
use crate::errors::ApiError;

type Svc = State<Arc<CatalogService>>;

pub fn router(svc: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/productos", get(list).post(create))
        .route("/productos/buscar", get(buscar))
        .route("/productos/categoria/:categoria", get(por_categoria))
        .route("/productos/:id", get(get_one).put(update).delete(remove))
        .route(
            "/productos/:id/imagen",
            get(imagen).post(subir_imagen).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .with_state(svc)
}

#[utoipa::path(get, path = "/productos", tag = "productos", responses((status = 200, description = "Todos los productos", body = [crate::openapi::ProductoDoc])))]
pub async fn list(State(svc): Svc) -> Result<Json<Vec<Producto>>, ApiError> {
    Ok(Json(svc.list(ProductoFilter::All).await?))
}

#[utoipa::path(get, path = "/productos/buscar", tag = "productos", params(("nombre" = Option<String>, Query, description = "Parte del nombre, sin distinguir mayúsculas")), responses((status = 200, description = "Coincidencias", body = [crate::openapi::ProductoDoc])))]
pub async fn buscar(State(svc): Svc, Query(q): Query<BuscarQuery>) -> Result<Json<Vec<Producto>>, ApiError> {
    let nombre = q.nombre.unwrap_or_default();
    Ok(Json(svc.list(ProductoFilter::NombreContains(nombre)).await?))
}

#[utoipa::path(get, path = "/productos/categoria/{categoria}", tag = "productos", params(("categoria" = String, Path, description = "Categoría exacta")), responses((status = 200, description = "Productos de la categoría", body = [crate::openapi::ProductoDoc])))]
pub async fn por_categoria(State(svc): Svc, Path(categoria): Path<String>) -> Result<Json<Vec<Producto>>, ApiError> {
    Ok(Json(svc.list(ProductoFilter::Categoria(categoria)).await?))
}

#[utoipa::path(get, path = "/productos/{id}", tag = "productos", params(("id" = i64, Path, description = "ID del producto")), responses((status = 200, description = "Producto", body = crate::openapi::ProductoDoc), (status = 404, description = "Producto no encontrado")))]
pub async fn get_one(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Producto>, ApiError> {
    Ok(Json(svc.get(id).await?))
}

#[utoipa::path(post, path = "/productos", tag = "productos", request_body = crate::openapi::ProductoRequest, responses((status = 201, description = "Producto creado", body = crate::openapi::ProductoDoc), (status = 400, description = "Datos inválidos"), (status = 403, description = "Sin permisos")))]
pub async fn create(
    State(svc): Svc,
    body: Result<Json<ProductoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Producto>), ApiError> {
    let Json(input) = body?;
    Ok((StatusCode::CREATED, Json(svc.create(input).await?)))
}

#[utoipa::path(put, path = "/productos/{id}", tag = "productos", params(("id" = i64, Path, description = "ID del producto")), request_body = crate::openapi::ProductoRequest, responses((status = 200, description = "Producto actualizado", body = crate::openapi::ProductoDoc), (status = 403, description = "Sin permisos"), (status = 404, description = "Producto no encontrado")))]
pub async fn update(
    State(svc): Svc,
    Path(id): Path<i64>,
    body: Result<Json<ProductoInput>, JsonRejection>,
) -> Result<Json<Producto>, ApiError> {
    let Json(input) = body?;
    Ok(Json(svc.update(id, input).await?))
}

#[utoipa::path(post, path = "/productos/{id}/imagen", tag = "productos", params(("id" = i64, Path, description = "ID del producto"), ("emailAdmin" = Option<String>, Query, description = "Email del admin")), responses((status = 200, description = "Imagen actualizada correctamente"), (status = 403, description = "Sin permisos"), (status = 404, description = "Producto no encontrado")))]
pub async fn subir_imagen(
    State(svc): Svc,
    Path(id): Path<i64>,
    Query(q): Query<AdminQuery>,
    multipart: Multipart,
) -> Result<&'static str, ApiError> {
    let upload = read_image_upload(q, multipart).await?;
    svc.update_image(id, upload.email_admin.as_deref(), upload.bytes).await?;
    Ok("Imagen actualizada correctamente")
}

#[utoipa::path(get, path = "/productos/{id}/imagen", tag = "productos", params(("id" = i64, Path, description = "ID del producto")), responses((status = 200, description = "Bytes de la imagen"), (status = 404, description = "Imagen no encontrada")))]
pub async fn imagen(State(svc): Svc, Path(id): Path<i64>) -> Result<Response, ApiError> {
    Ok(image_response(svc.image(id).await?))
}

#[utoipa::path(delete, path = "/productos/{id}", tag = "productos", params(("id" = i64, Path, description = "ID del producto"), ("emailAdmin" = Option<String>, Query, description = "Email del admin")), responses((status = 204, description = "Eliminado"), (status = 403, description = "Sin permisos"), (status = 404, description = "Producto no encontrado")))]
pub async fn remove(State(svc): Svc, Path(id): Path<i64>, Query(q): Query<AdminQuery>) -> Result<StatusCode, ApiError> {
    svc.delete(id, q.email_admin.as_deref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_util::{empty, get, json, multipart, send, send_json, send_text};
    use service::admin::StaticAdminAuthorizer;
    use service::catalog::repository::mock::MockProductoRepository;
    use serde_json::json;

    const ADMIN: &str = "admin@amilimetros.cl";

    fn app() -> Router {
        router(Arc::new(CatalogService::new(
            Arc::new(MockProductoRepository::default()),
            Arc::new(StaticAdminAuthorizer { admins: vec![ADMIN.into()] }),
        )))
    }

    fn collar(precio: serde_json::Value) -> serde_json::Value {
        json!({
            "emailAdmin": ADMIN, "nombre": "Collar Ajustable", "descripcion": "Nylon",
            "categoria": "Accesorios", "precio": precio
        })
    }

    #[tokio::test]
    async fn price_rules() {
        let app = app();
        let (status, text) = send_text(&app, json("POST", "/productos", collar(json!(999)))).await;
        assert_eq!((status, text.as_str()), (StatusCode::BAD_REQUEST, "El precio mínimo es 1000 pesos"));
        let (status, text) = send_text(&app, json("POST", "/productos", collar(json!("mucho")))).await;
        assert_eq!((status, text.as_str()), (StatusCode::BAD_REQUEST, "El precio debe ser un número válido"));
        let (status, text) = send_text(&app, json("POST", "/productos", collar(json!(null)))).await;
        assert_eq!((status, text.as_str()), (StatusCode::BAD_REQUEST, "El precio es obligatorio"));

        let (status, created) = send_json(&app, json("POST", "/productos", collar(json!("6990")))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["precio"], 6990.0);
        assert_eq!(created["imagen"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn non_admin_is_denied() {
        let app = app();
        let mut body = collar(json!(6990));
        body["emailAdmin"] = json!("ana@correo.cl");
        let (status, text) = send_text(&app, json("POST", "/productos", body)).await;
        assert_eq!((status, text.as_str()), (StatusCode::FORBIDDEN, "No tienes permisos para crear productos"));

        let (status, text) = send_text(&app, empty("DELETE", "/productos/1")).await;
        assert_eq!((status, text.as_str()), (StatusCode::FORBIDDEN, "No tienes permisos para eliminar productos"));
    }

    #[tokio::test]
    async fn mistyped_fields_do_not_bypass_the_gate() {
        let app = app();
        let mut body = collar(json!([6990]));
        body["emailAdmin"] = json!("ana@correo.cl");
        body["categoria"] = json!(false);
        let (status, text) = send_text(&app, json("POST", "/productos", body.clone())).await;
        assert_eq!((status, text.as_str()), (StatusCode::FORBIDDEN, "No tienes permisos para crear productos"));
        let (status, text) = send_text(&app, json("PUT", "/productos/1", body.clone())).await;
        assert_eq!((status, text.as_str()), (StatusCode::FORBIDDEN, "No tienes permisos para actualizar productos"));

        body["emailAdmin"] = json!(ADMIN);
        let (status, text) = send_text(&app, json("POST", "/productos", body)).await;
        assert_eq!((status, text.as_str()), (StatusCode::BAD_REQUEST, "La categoría no puede estar vacía"));
    }

    #[tokio::test]
    async fn queries_update_image_and_delete() {
        let app = app();
        let (_, created) = send_json(&app, json("POST", "/productos", collar(json!(6990)))).await;
        let id = created["id"].as_i64().unwrap();

        let (_, found) = send_json(&app, get("/productos/buscar?nombre=collar")).await;
        assert_eq!(found.as_array().map(Vec::len), Some(1));
        let (_, none) = send_json(&app, get("/productos/categoria/Alimento")).await;
        assert_eq!(none, json!([]));

        let mut body = collar(json!(7990));
        body["categoria"] = json!("Perros");
        let (status, updated) = send_json(&app, json("PUT", &format!("/productos/{id}"), body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["precio"], 7990.0);

        let (status, _) = send(&app, multipart(&format!("/productos/{id}/imagen?emailAdmin={ADMIN}"), b"\xff\xd8\xff")).await;
        assert_eq!(status, StatusCode::OK);
        let res = tower::ServiceExt::oneshot(app.clone(), get(&format!("/productos/{id}/imagen"))).await.unwrap();
        assert_eq!(res.headers()["content-type"], "image/jpeg");

        let (status, _) = send(&app, empty("DELETE", &format!("/productos/{id}?emailAdmin={ADMIN}"))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, text) = send_text(&app, get(&format!("/productos/{id}"))).await;
        assert_eq!((status, text.as_str()), (StatusCode::NOT_FOUND, "Producto no encontrado"));
    }
}
