use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;

use service::cart::domain::{AgregarInput, CantidadInput, CarritoDetalle, ItemCarrito, QuantityChange};
use service::cart::CartService;

use crate::errors::{ApiError, Wrapped};

type Svc = State<Arc<CartService>>;
type CartError = ApiError<Wrapped>;

#[derive(Debug, Serialize)]
pub struct TotalResponse {
    pub total: f64,
}

pub fn router(svc: Arc<CartService>) -> Router {
    Router::new()
        .route("/carrito/usuario/:id", get(items).delete(vaciar))
        .route("/carrito/usuario/:id/detalles", get(detalles))
        .route("/carrito/usuario/:id/total", get(total))
        .route("/carrito/agregar", post(agregar))
        .route("/carrito/item/:id", put(cantidad).delete(quitar))
        .with_state(svc)
}

#[utoipa::path(get, path = "/carrito/usuario/{id}", tag = "carrito", params(("id" = i64, Path, description = "ID del usuario")), responses((status = 200, description = "Líneas del carrito", body = [crate::openapi::ItemCarritoDoc]), (status = 400, description = "Usuario no encontrado", body = crate::openapi::ErrorDoc)))]
pub async fn items(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Vec<ItemCarrito>>, CartError> {
    Ok(Json(svc.items(id).await?))
}

#[utoipa::path(get, path = "/carrito/usuario/{id}/detalles", tag = "carrito", params(("id" = i64, Path, description = "ID del usuario")), responses((status = 200, description = "Usuario, líneas y total", body = crate::openapi::CarritoDetalleDoc), (status = 400, description = "Usuario no encontrado", body = crate::openapi::ErrorDoc)))]
pub async fn detalles(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<CarritoDetalle>, CartError> {
    Ok(Json(svc.detail(id).await?))
}

#[utoipa::path(get, path = "/carrito/usuario/{id}/total", tag = "carrito", params(("id" = i64, Path, description = "ID del usuario")), responses((status = 200, description = "Total del carrito", body = crate::openapi::TotalDoc), (status = 400, description = "Usuario no encontrado", body = crate::openapi::ErrorDoc)))]
pub async fn total(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<TotalResponse>, CartError> {
    Ok(Json(TotalResponse { total: svc.total(id).await? }))
}

#[utoipa::path(post, path = "/carrito/agregar", tag = "carrito", request_body = crate::openapi::AgregarRequest, responses((status = 201, description = "Línea creada o sumada", body = crate::openapi::ItemCarritoDoc), (status = 400, description = "Datos inválidos o referencia inexistente", body = crate::openapi::ErrorDoc)))]
pub async fn agregar(
    State(svc): Svc,
    body: Result<Json<AgregarInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemCarrito>), CartError> {
    let Json(input) = body?;
    Ok((StatusCode::CREATED, Json(svc.add(input).await?)))
}

/// 200 with the line, or 204 when a quantity of zero or less removed it.
#[utoipa::path(put, path = "/carrito/item/{id}", tag = "carrito", params(("id" = i64, Path, description = "ID de la línea")), request_body = crate::openapi::CantidadRequest, responses((status = 200, description = "Línea actualizada", body = crate::openapi::ItemCarritoDoc), (status = 204, description = "Línea eliminada"), (status = 404, description = "Item no encontrado", body = crate::openapi::ErrorDoc)))]
pub async fn cantidad(
    State(svc): Svc,
    Path(id): Path<i64>,
    body: Result<Json<CantidadInput>, JsonRejection>,
) -> Result<Response, CartError> {
    let Json(input) = body?;
    Ok(match svc.set_quantity(id, input).await? {
        QuantityChange::Updated(item) => Json(item).into_response(),
        QuantityChange::Removed => StatusCode::NO_CONTENT.into_response(),
    })
}

#[utoipa::path(delete, path = "/carrito/item/{id}", tag = "carrito", params(("id" = i64, Path, description = "ID de la línea")), responses((status = 204, description = "Eliminada"), (status = 404, description = "Item no encontrado", body = crate::openapi::ErrorDoc)))]
pub async fn quitar(State(svc): Svc, Path(id): Path<i64>) -> Result<StatusCode, CartError> {
    svc.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/carrito/usuario/{id}", tag = "carrito", params(("id" = i64, Path, description = "ID del usuario")), responses((status = 204, description = "Carrito vaciado"), (status = 400, description = "Usuario no encontrado", body = crate::openapi::ErrorDoc)))]
pub async fn vaciar(State(svc): Svc, Path(id): Path<i64>) -> Result<StatusCode, CartError> {
    svc.clear(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_util::{empty, get, json, send, send_json};
    use service::cart::repository::mock::MockCartRepository;
    use service::peers::mock::{MockProductCatalog, MockUserDirectory};
    use serde_json::json;

    fn app() -> Router {
        router(Arc::new(CartService::new(
            Arc::new(MockCartRepository::default()),
            Arc::new(MockUserDirectory::default().with_user(1, "ana@correo.cl", false)),
            Arc::new(MockProductCatalog::default().with_product(3, "Collar Ajustable", 6990.0, true)),
        )))
    }

    #[tokio::test]
    async fn add_twice_merges_and_totals() {
        let app = app();
        let (status, line) =
            send_json(&app, json("POST", "/carrito/agregar", json!({"usuarioId": 1, "productoId": 3, "cantidad": 1}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(line["imageUrl"], "http://catalogo.test/productos/3/imagen");

        let (_, line) = send_json(
            &app,
            json("POST", "/carrito/agregar", json!({"usuarioId": "1", "productoId": "3", "cantidad": "2"})),
        )
        .await;
        assert_eq!(line["cantidad"], 3);

        let (_, total) = send_json(&app, get("/carrito/usuario/1/total")).await;
        assert_eq!(total, json!({"total": 20970.0}));
        let (_, detail) = send_json(&app, get("/carrito/usuario/1/detalles")).await;
        assert_eq!(detail["cantidadItems"], 1);
        assert_eq!(detail["usuario"]["email"], "ana@correo.cl");
    }

    #[tokio::test]
    async fn errors_are_wrapped() {
        let app = app();
        let (status, body) =
            send_json(&app, json("POST", "/carrito/agregar", json!({"usuarioId": 9, "productoId": 3, "cantidad": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Usuario no encontrado"}));

        let (status, body) =
            send_json(&app, json("POST", "/carrito/agregar", json!({"usuarioId": 1, "productoId": 4, "cantidad": 1}))).await;
        assert_eq!((status, body), (StatusCode::BAD_REQUEST, json!({"error": "Producto no encontrado"})));

        let (status, body) = send_json(&app, json("PUT", "/carrito/item/77", json!({"cantidad": 2}))).await;
        assert_eq!((status, body), (StatusCode::NOT_FOUND, json!({"error": "Item no encontrado"})));
    }

    #[tokio::test]
    async fn quantity_zero_deletes_the_line() {
        let app = app();
        let (_, line) =
            send_json(&app, json("POST", "/carrito/agregar", json!({"usuarioId": 1, "productoId": 3, "cantidad": 2}))).await;
        let uri = format!("/carrito/item/{}", line["id"]);

        let (status, updated) = send_json(&app, json("PUT", &uri, json!({"cantidad": 5}))).await;
        assert_eq!((status, updated["cantidad"].as_i64()), (StatusCode::OK, Some(5)));

        let (status, _) = send(&app, json("PUT", &uri, json!({"cantidad": 0}))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, items) = send_json(&app, get("/carrito/usuario/1")).await;
        assert_eq!(items, json!([]));

        let (status, _) = send(&app, empty("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, empty("DELETE", "/carrito/usuario/1")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
