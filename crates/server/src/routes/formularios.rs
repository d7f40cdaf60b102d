use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use service::forms::domain::{FormInput, FormularioAdopcion, ReviewInput};
use service::forms::FormService;

use super::AdminQuery;
use crate::errors::ApiError;

type Svc = State<Arc<FormService>>;

pub fn router(svc: Arc<FormService>) -> Router {
    Router::new()
        .route("/formularios", get(list))
        .route("/formularios/:id", get(get_one).delete(remove))
        .route("/formularios/usuario/:id", get(por_usuario))
        .route("/formularios/animal/:id", get(por_animal))
        .route("/formularios/estado/:estado", get(por_estado))
        .route("/formularios/adoptar/:usuario_id/:animal_id", post(adoptar))
        .route("/formularios/:id/aprobar", put(aprobar))
        .route("/formularios/:id/rechazar", put(rechazar))
        .with_state(svc)
}

#[utoipa::path(get, path = "/formularios", tag = "formularios", params(("emailAdmin" = Option<String>, Query, description = "Email del admin")), responses((status = 200, description = "Todos los formularios", body = [crate::openapi::FormularioDoc]), (status = 403, description = "Sin permisos")))]
pub async fn list(State(svc): Svc, Query(q): Query<AdminQuery>) -> Result<Json<Vec<FormularioAdopcion>>, ApiError> {
    Ok(Json(svc.list_all(q.email_admin.as_deref()).await?))
}

#[utoipa::path(get, path = "/formularios/{id}", tag = "formularios", params(("id" = i64, Path, description = "ID del formulario")), responses((status = 200, description = "Formulario", body = crate::openapi::FormularioDoc), (status = 404, description = "Formulario no encontrado")))]
pub async fn get_one(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<FormularioAdopcion>, ApiError> {
    Ok(Json(svc.get(id).await?))
}

#[utoipa::path(get, path = "/formularios/usuario/{id}", tag = "formularios", params(("id" = i64, Path, description = "ID del usuario")), responses((status = 200, description = "Formularios del usuario", body = [crate::openapi::FormularioDoc])))]
pub async fn por_usuario(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Vec<FormularioAdopcion>>, ApiError> {
    Ok(Json(svc.by_usuario(id).await?))
}

#[utoipa::path(get, path = "/formularios/animal/{id}", tag = "formularios", params(("id" = i64, Path, description = "ID del animal")), responses((status = 200, description = "Formularios del animal", body = [crate::openapi::FormularioDoc])))]
pub async fn por_animal(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Vec<FormularioAdopcion>>, ApiError> {
    Ok(Json(svc.by_animal(id).await?))
}

#[utoipa::path(get, path = "/formularios/estado/{estado}", tag = "formularios", params(("estado" = String, Path, description = "PENDIENTE, APROBADO o RECHAZADO"), ("emailAdmin" = Option<String>, Query, description = "Email del admin")), responses((status = 200, description = "Formularios en ese estado", body = [crate::openapi::FormularioDoc]), (status = 400, description = "Estado inválido"), (status = 403, description = "Sin permisos")))]
pub async fn por_estado(
    State(svc): Svc,
    Path(estado): Path<String>,
    Query(q): Query<AdminQuery>,
) -> Result<Json<Vec<FormularioAdopcion>>, ApiError> {
    Ok(Json(svc.by_estado(&estado, q.email_admin.as_deref()).await?))
}

#[utoipa::path(post, path = "/formularios/adoptar/{usuarioId}/{animalId}", tag = "formularios", params(("usuarioId" = i64, Path, description = "ID del usuario"), ("animalId" = i64, Path, description = "ID del animal")), request_body = crate::openapi::FormularioRequest, responses((status = 201, description = "Solicitud creada", body = crate::openapi::FormularioDoc), (status = 400, description = "Datos inválidos o solicitud rechazada")))]
pub async fn adoptar(
    State(svc): Svc,
    Path((usuario_id, animal_id)): Path<(i64, i64)>,
    body: Result<Json<FormInput>, JsonRejection>,
) -> Result<(StatusCode, Json<FormularioAdopcion>), ApiError> {
    let Json(input) = body?;
    Ok((StatusCode::CREATED, Json(svc.create(usuario_id, animal_id, input).await?)))
}

#[utoipa::path(put, path = "/formularios/{id}/aprobar", tag = "formularios", params(("id" = i64, Path, description = "ID del formulario")), request_body = crate::openapi::RevisionRequest, responses((status = 200, description = "Aprobado", body = crate::openapi::FormularioDoc), (status = 403, description = "Sin permisos"), (status = 404, description = "Formulario no encontrado")))]
pub async fn aprobar(
    State(svc): Svc,
    Path(id): Path<i64>,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> Result<Json<FormularioAdopcion>, ApiError> {
    let Json(input) = body?;
    Ok(Json(svc.approve(id, input).await?))
}

#[utoipa::path(put, path = "/formularios/{id}/rechazar", tag = "formularios", params(("id" = i64, Path, description = "ID del formulario")), request_body = crate::openapi::RevisionRequest, responses((status = 200, description = "Rechazado", body = crate::openapi::FormularioDoc), (status = 403, description = "Sin permisos"), (status = 404, description = "Formulario no encontrado")))]
pub async fn rechazar(
    State(svc): Svc,
    Path(id): Path<i64>,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> Result<Json<FormularioAdopcion>, ApiError> {
    let Json(input) = body?;
    Ok(Json(svc.reject(id, input).await?))
}

#[utoipa::path(delete, path = "/formularios/{id}", tag = "formularios", params(("id" = i64, Path, description = "ID del formulario"), ("emailAdmin" = Option<String>, Query, description = "Email del admin")), responses((status = 204, description = "Eliminado"), (status = 403, description = "Sin permisos"), (status = 404, description = "Formulario no encontrado")))]
pub async fn remove(State(svc): Svc, Path(id): Path<i64>, Query(q): Query<AdminQuery>) -> Result<StatusCode, ApiError> {
    svc.delete(id, q.email_admin.as_deref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_util::{empty, get, json, send, send_json, send_text};
    use service::admin::StaticAdminAuthorizer;
    use service::forms::repository::mock::MockFormRepository;
    use service::peers::mock::{MockAnimalRegistry, MockUserDirectory};
    use serde_json::json;

    const ADMIN: &str = "admin@amilimetros.cl";

    fn app() -> Router {
        router(Arc::new(FormService::new(
            Arc::new(MockFormRepository::default()),
            Arc::new(MockUserDirectory::default().with_user(1, "ana@correo.cl", false)),
            Arc::new(MockAnimalRegistry::default().with_animal(1, "Max", false).with_animal(2, "Luna", true)),
            Arc::new(StaticAdminAuthorizer { admins: vec![ADMIN.into()] }),
        )))
    }

    fn answers() -> serde_json::Value {
        json!({
            "direccion": "Los Aromos 123", "tipoVivienda": "Casa", "tieneMallasVentanas": true,
            "viveEnDepartamento": false, "tieneOtrosAnimales": "false", "motivoAdopcion": "Compañía"
        })
    }

    #[tokio::test]
    async fn submit_review_and_resubmit() {
        let app = app();
        let (status, form) = send_json(&app, json("POST", "/formularios/adoptar/1/1", answers())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(form["estado"], "PENDIENTE");
        assert_eq!(form["fechaRevision"], serde_json::Value::Null);

        let (status, text) = send_text(&app, json("POST", "/formularios/adoptar/1/1", answers())).await;
        assert_eq!(
            (status, text.as_str()),
            (StatusCode::BAD_REQUEST, "Ya tienes una solicitud pendiente para este animal")
        );

        let uri = format!("/formularios/{}/aprobar", form["id"]);
        let (status, text) = send_text(&app, json("PUT", &uri, json!({"emailAdmin": "ana@correo.cl"}))).await;
        assert_eq!((status, text.as_str()), (StatusCode::FORBIDDEN, "No tienes permisos para aprobar formularios"));

        let (status, approved) =
            send_json(&app, json("PUT", &uri, json!({"emailAdmin": ADMIN, "comentarios": "OK"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(approved["estado"], "APROBADO");
        assert_eq!(approved["comentariosAdmin"], "OK");
        assert!(approved["fechaRevision"].is_string());

        let (status, _) = send_json(&app, json("POST", "/formularios/adoptar/1/1", answers())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, mine) = send_json(&app, get("/formularios/usuario/1")).await;
        assert_eq!(mine.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn mistyped_review_is_still_gated() {
        let app = app();
        let (_, form) = send_json(&app, json("POST", "/formularios/adoptar/1/1", answers())).await;
        let body = json!({"emailAdmin": "ana@correo.cl", "comentarios": {"nota": 1}});
        for accion in ["aprobar", "rechazar"] {
            let uri = format!("/formularios/{}/{accion}", form["id"]);
            let (status, text) = send_text(&app, json("PUT", &uri, body.clone())).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(text, format!("No tienes permisos para {accion} formularios"));
        }

        let uri = format!("/formularios/{}/rechazar", form["id"]);
        let (status, reviewed) = send_json(&app, json("PUT", &uri, json!({"emailAdmin": ADMIN, "comentarios": 7}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reviewed["estado"], "RECHAZADO");
        assert_eq!(reviewed["comentariosAdmin"], "7");
    }

    #[tokio::test]
    async fn rejections_are_plain_text() {
        let app = app();
        let (status, text) = send_text(&app, json("POST", "/formularios/adoptar/1/2", answers())).await;
        assert_eq!((status, text.as_str()), (StatusCode::BAD_REQUEST, "El animal ya está adoptado"));

        let mut body = answers();
        body["tipoVivienda"] = json!("");
        let (status, text) = send_text(&app, json("POST", "/formularios/adoptar/1/1", body)).await;
        assert_eq!((status, text.as_str()), (StatusCode::BAD_REQUEST, "El tipo de vivienda es obligatorio"));

        let (status, text) = send_text(&app, get(&format!("/formularios/estado/otro?emailAdmin={ADMIN}"))).await;
        assert_eq!(
            (status, text.as_str()),
            (StatusCode::BAD_REQUEST, "Estado inválido. Use: PENDIENTE, APROBADO o RECHAZADO")
        );
        let (status, _) = send_text(&app, get("/formularios")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_lists_filters_and_deletes() {
        let app = app();
        let (_, form) = send_json(&app, json("POST", "/formularios/adoptar/1/1", answers())).await;

        let (_, all) = send_json(&app, get(&format!("/formularios?emailAdmin={ADMIN}"))).await;
        assert_eq!(all.as_array().map(Vec::len), Some(1));
        let (_, pending) = send_json(&app, get(&format!("/formularios/estado/pending?emailAdmin={ADMIN}"))).await;
        assert_eq!(pending[0]["id"], form["id"]);
        let (_, by_animal) = send_json(&app, get("/formularios/animal/1")).await;
        assert_eq!(by_animal.as_array().map(Vec::len), Some(1));

        let uri = format!("/formularios/{}", form["id"]);
        let (status, _) = send(&app, empty("DELETE", &format!("{uri}?emailAdmin={ADMIN}"))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, text) = send_text(&app, get(&uri)).await;
        assert_eq!((status, text.as_str()), (StatusCode::NOT_FOUND, "Formulario no encontrado"));
        let (status, _) = send(&app, empty("DELETE", &format!("{uri}?emailAdmin={ADMIN}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
