use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post, put},
    Json, Router,
};

use service::animals::domain::{Animal, AnimalFilter, AnimalInput};
use service::animals::AnimalService;

use super::{image_response, read_image_upload, AdminQuery, BuscarQuery, IMAGE_BODY_LIMIT};
use crate::errors::ApiError;

type Svc = State<Arc<AnimalService>>;

pub fn router(svc: Arc<AnimalService>) -> Router {
    Router::new()
        .route("/animales", get(list).post(create))
        .route("/animales/disponibles", get(disponibles))
        .route("/animales/adoptados", get(adoptados))
        .route("/animales/buscar", get(buscar))
        .route("/animales/especie/:especie", get(por_especie))
        .route("/animales/:id", get(get_one).put(update).delete(remove))
        .route(
            "/animales/:id/imagen",
            get(imagen).post(subir_imagen).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .route("/animales/:id/adoptar", put(adoptar))
        .with_state(svc)
}

#[utoipa::path(get, path = "/animales", tag = "animales", responses((status = 200, description = "Todos los animales", body = [crate::openapi::AnimalDoc])))]
pub async fn list(State(svc): Svc) -> Result<Json<Vec<Animal>>, ApiError> {
    Ok(Json(svc.list(AnimalFilter::All).await?))
}

#[utoipa::path(get, path = "/animales/disponibles", tag = "animales", responses((status = 200, description = "Animales no adoptados", body = [crate::openapi::AnimalDoc])))]
pub async fn disponibles(State(svc): Svc) -> Result<Json<Vec<Animal>>, ApiError> {
    Ok(Json(svc.list(AnimalFilter::Adoptado(false)).await?))
}

#[utoipa::path(get, path = "/animales/adoptados", tag = "animales", responses((status = 200, description = "Animales adoptados", body = [crate::openapi::AnimalDoc])))]
pub async fn adoptados(State(svc): Svc) -> Result<Json<Vec<Animal>>, ApiError> {
    Ok(Json(svc.list(AnimalFilter::Adoptado(true)).await?))
}

#[utoipa::path(get, path = "/animales/buscar", tag = "animales", params(("nombre" = Option<String>, Query, description = "Parte del nombre, sin distinguir mayúsculas")), responses((status = 200, description = "Coincidencias", body = [crate::openapi::AnimalDoc])))]
pub async fn buscar(State(svc): Svc, Query(q): Query<BuscarQuery>) -> Result<Json<Vec<Animal>>, ApiError> {
    let nombre = q.nombre.unwrap_or_default();
    Ok(Json(svc.list(AnimalFilter::NombreContains(nombre)).await?))
}

#[utoipa::path(get, path = "/animales/especie/{especie}", tag = "animales", params(("especie" = String, Path, description = "Especie exacta")), responses((status = 200, description = "Animales de la especie", body = [crate::openapi::AnimalDoc])))]
pub async fn por_especie(State(svc): Svc, Path(especie): Path<String>) -> Result<Json<Vec<Animal>>, ApiError> {
    Ok(Json(svc.list(AnimalFilter::Especie(especie)).await?))
}

#[utoipa::path(get, path = "/animales/{id}", tag = "animales", params(("id" = i64, Path, description = "ID del animal")), responses((status = 200, description = "Animal", body = crate::openapi::AnimalDoc), (status = 404, description = "Animal no encontrado")))]
pub async fn get_one(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Animal>, ApiError> {
    Ok(Json(svc.get(id).await?))
}

#[utoipa::path(post, path = "/animales", tag = "animales", request_body = crate::openapi::AnimalRequest, responses((status = 201, description = "Animal creado", body = crate::openapi::AnimalDoc), (status = 400, description = "Datos inválidos"), (status = 403, description = "Sin permisos")))]
pub async fn create(
    State(svc): Svc,
    body: Result<Json<AnimalInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Animal>), ApiError> {
    let Json(input) = body?;
    Ok((StatusCode::CREATED, Json(svc.create(input).await?)))
}

#[utoipa::path(put, path = "/animales/{id}", tag = "animales", params(("id" = i64, Path, description = "ID del animal")), request_body = crate::openapi::AnimalRequest, responses((status = 200, description = "Animal actualizado", body = crate::openapi::AnimalDoc), (status = 403, description = "Sin permisos"), (status = 404, description = "Animal no encontrado")))]
pub async fn update(
    State(svc): Svc,
    Path(id): Path<i64>,
    body: Result<Json<AnimalInput>, JsonRejection>,
) -> Result<Json<Animal>, ApiError> {
    let Json(input) = body?;
    Ok(Json(svc.update(id, input).await?))
}

#[utoipa::path(post, path = "/animales/{id}/imagen", tag = "animales", params(("id" = i64, Path, description = "ID del animal"), ("emailAdmin" = Option<String>, Query, description = "Email del admin")), responses((status = 200, description = "Imagen actualizada correctamente"), (status = 403, description = "Sin permisos"), (status = 404, description = "Animal no encontrado")))]
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

#[utoipa::path(get, path = "/animales/{id}/imagen", tag = "animales", params(("id" = i64, Path, description = "ID del animal")), responses((status = 200, description = "Bytes de la imagen"), (status = 404, description = "Imagen no encontrada")))]
pub async fn imagen(State(svc): Svc, Path(id): Path<i64>) -> Result<Response, ApiError> {
    Ok(image_response(svc.image(id).await?))
}

#[utoipa::path(put, path = "/animales/{id}/adoptar", tag = "animales", params(("id" = i64, Path, description = "ID del animal"), ("emailAdmin" = Option<String>, Query, description = "Email del admin")), responses((status = 200, description = "Animal marcado como adoptado"), (status = 403, description = "Sin permisos"), (status = 404, description = "Animal no encontrado")))]
pub async fn adoptar(State(svc): Svc, Path(id): Path<i64>, Query(q): Query<AdminQuery>) -> Result<&'static str, ApiError> {
    svc.mark_adopted(id, q.email_admin.as_deref()).await?;
    Ok("Animal marcado como adoptado")
}

#[utoipa::path(delete, path = "/animales/{id}", tag = "animales", params(("id" = i64, Path, description = "ID del animal"), ("emailAdmin" = Option<String>, Query, description = "Email del admin")), responses((status = 204, description = "Eliminado"), (status = 403, description = "Sin permisos"), (status = 404, description = "Animal no encontrado")))]
pub async fn remove(State(svc): Svc, Path(id): Path<i64>, Query(q): Query<AdminQuery>) -> Result<StatusCode, ApiError> {
    svc.delete(id, q.email_admin.as_deref()).await?;
    Ok(StatusCode::NO_CONTENT)
}
