use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use service::orders::domain::{CrearOrdenInput, ItemOrden, Orden, OrdenDetalle};
use service::orders::OrderService;

use crate::errors::{ApiError, Wrapped};

type Svc = State<Arc<OrderService>>;
type OrderError = ApiError<Wrapped>;

pub fn router(svc: Arc<OrderService>) -> Router {
    Router::new()
        .route("/ordenes", get(list).post(crear))
        .route("/ordenes/usuario/:id", get(por_usuario))
        .route("/ordenes/:id", get(get_one))
        .route("/ordenes/:id/items", get(items))
        .route("/ordenes/:id/detalles", get(detalles))
        .route("/ordenes/:id/cancelar", put(cancelar))
        .with_state(svc)
}

#[utoipa::path(get, path = "/ordenes", tag = "ordenes", responses((status = 200, description = "Todas las órdenes, más recientes primero", body = [crate::openapi::OrdenDoc])))]
pub async fn list(State(svc): Svc) -> Result<Json<Vec<Orden>>, OrderError> {
    Ok(Json(svc.list_all().await?))
}

#[utoipa::path(get, path = "/ordenes/usuario/{id}", tag = "ordenes", params(("id" = i64, Path, description = "ID del usuario")), responses((status = 200, description = "Órdenes del usuario, más recientes primero", body = [crate::openapi::OrdenDoc]), (status = 400, description = "Usuario no encontrado", body = crate::openapi::ErrorDoc)))]
pub async fn por_usuario(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Vec<Orden>>, OrderError> {
    Ok(Json(svc.by_usuario(id).await?))
}

#[utoipa::path(get, path = "/ordenes/{id}", tag = "ordenes", params(("id" = i64, Path, description = "ID de la orden")), responses((status = 200, description = "Orden", body = crate::openapi::OrdenDoc), (status = 404, description = "Orden no encontrada", body = crate::openapi::ErrorDoc)))]
pub async fn get_one(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Orden>, OrderError> {
    Ok(Json(svc.get(id).await?))
}

#[utoipa::path(get, path = "/ordenes/{id}/items", tag = "ordenes", params(("id" = i64, Path, description = "ID de la orden")), responses((status = 200, description = "Líneas de la orden", body = [crate::openapi::ItemOrdenDoc]), (status = 400, description = "Orden no encontrada", body = crate::openapi::ErrorDoc)))]
pub async fn items(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Vec<ItemOrden>>, OrderError> {
    Ok(Json(svc.items(id).await?))
}

#[utoipa::path(get, path = "/ordenes/{id}/detalles", tag = "ordenes", params(("id" = i64, Path, description = "ID de la orden")), responses((status = 200, description = "Orden con sus líneas", body = crate::openapi::OrdenDetalleDoc), (status = 400, description = "Orden no encontrada", body = crate::openapi::ErrorDoc)))]
pub async fn detalles(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<OrdenDetalle>, OrderError> {
    Ok(Json(svc.detail(id).await?))
}

#[utoipa::path(post, path = "/ordenes", tag = "ordenes", request_body = crate::openapi::CrearOrdenRequest, responses((status = 201, description = "Orden creada", body = crate::openapi::OrdenDoc), (status = 400, description = "Datos inválidos, usuario inexistente u orden vacía", body = crate::openapi::ErrorDoc)))]
pub async fn crear(
    State(svc): Svc,
    body: Result<Json<CrearOrdenInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Orden>), OrderError> {
    let Json(input) = body?;
    Ok((StatusCode::CREATED, Json(svc.checkout(input).await?)))
}

#[utoipa::path(put, path = "/ordenes/{id}/cancelar", tag = "ordenes", params(("id" = i64, Path, description = "ID de la orden")), responses((status = 200, description = "Orden cancelada", body = crate::openapi::OrdenDoc), (status = 400, description = "Orden no encontrada o ya cancelada", body = crate::openapi::ErrorDoc)))]
pub async fn cancelar(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Orden>, OrderError> {
    Ok(Json(svc.cancel(id).await?))
}
