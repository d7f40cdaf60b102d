use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use service::errors::ServiceError;
use service::users::domain::{DeleteUserInput, LoginInput, RegisterInput, Usuario};
use service::users::UserService;

use super::AdminQuery;
use crate::errors::ApiError;

type Svc = State<Arc<UserService>>;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub success: bool,
}

pub fn router(svc: Arc<UserService>) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/usuarios", get(list))
        .route("/auth/usuarios/:id", get(get_by_id))
        .route("/auth/usuario/correo/:email", get(get_by_email))
        .route("/api/usuarios/:id", delete(remove))
        .with_state(svc)
}

#[utoipa::path(post, path = "/auth/register", tag = "usuarios", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Usuario registrado", body = crate::openapi::UsuarioDoc), (status = 400, description = "Datos inválidos o duplicados")))]
pub async fn register(State(svc): Svc, body: Result<Json<RegisterInput>, JsonRejection>) -> Result<Json<Usuario>, ApiError> {
    let Json(input) = body?;
    let user = svc.register(input).await?;
    Ok(Json(user))
}

#[utoipa::path(post, path = "/auth/login", tag = "usuarios", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Login exitoso", body = crate::openapi::LoginResponseDoc), (status = 401, description = "Credenciales incorrectas", body = crate::openapi::LoginResponseDoc)))]
pub async fn login(State(svc): Svc, body: Result<Json<LoginInput>, JsonRejection>) -> Response {
    let input = match body {
        Ok(Json(input)) => input,
        Err(r) => return ApiError::<crate::errors::Plain>::from(r).into_response(),
    };
    match svc.login(input).await {
        Ok(user) => {
            info!(user_id = user.id, "login_ok");
            Json(LoginResponse { message: "Login exitoso.".into(), success: true }).into_response()
        }
        Err(ServiceError::Unauthorized(message)) => {
            (StatusCode::UNAUTHORIZED, Json(LoginResponse { message, success: false })).into_response()
        }
        Err(e) => ApiError::<crate::errors::Plain>::from(e).into_response(),
    }
}

#[utoipa::path(get, path = "/auth/usuarios", tag = "usuarios", responses((status = 200, description = "Todos los usuarios", body = [crate::openapi::UsuarioDoc])))]
pub async fn list(State(svc): Svc) -> Result<Json<Vec<Usuario>>, ApiError> {
    Ok(Json(svc.list().await?))
}

#[utoipa::path(get, path = "/auth/usuarios/{id}", tag = "usuarios", params(("id" = i64, Path, description = "ID del usuario")), responses((status = 200, description = "Usuario", body = crate::openapi::UsuarioDoc), (status = 404, description = "Usuario no encontrado")))]
pub async fn get_by_id(State(svc): Svc, Path(id): Path<i64>) -> Result<Json<Usuario>, ApiError> {
    Ok(Json(svc.get(id).await?))
}

#[utoipa::path(get, path = "/auth/usuario/correo/{email}", tag = "usuarios", params(("email" = String, Path, description = "Correo del usuario")), responses((status = 200, description = "Usuario", body = crate::openapi::UsuarioDoc), (status = 404, description = "Usuario no encontrado")))]
pub async fn get_by_email(State(svc): Svc, Path(email): Path<String>) -> Result<Json<Usuario>, ApiError> {
    Ok(Json(svc.get_by_email(&email).await?))
}

/// The admin email travels in the JSON body; `?emailAdmin=` is accepted too.
#[utoipa::path(delete, path = "/api/usuarios/{id}", tag = "usuarios", params(("id" = i64, Path, description = "ID del usuario")), request_body = crate::openapi::AdminRequest, responses((status = 200, description = "Usuario eliminado correctamente"), (status = 400, description = "Falta el email del admin"), (status = 403, description = "Sin permisos"), (status = 404, description = "Usuario no encontrado")))]
pub async fn remove(
    State(svc): Svc,
    Path(id): Path<i64>,
    Query(q): Query<AdminQuery>,
    body: Option<Json<DeleteUserInput>>,
) -> Result<&'static str, ApiError> {
    let email_admin = body.and_then(|Json(b)| b.email_admin).or(q.email_admin);
    svc.delete(id, email_admin.as_deref()).await?;
    Ok("Usuario eliminado correctamente")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_util::{empty, get, json, send_json, send_text};
    use service::admin::LocalAdminAuthorizer;
    use service::users::repository::mock::MockUserRepository;
    use service::users::repository::UserRepository;
    use serde_json::json;

    async fn app() -> Router {
        let repo: Arc<dyn UserRepository> = Arc::new(MockUserRepository::default());
        service::bootstrap::seed_admin(repo.as_ref(), &configs::BootstrapConfig::default()).await.unwrap();
        let admin = Arc::new(LocalAdminAuthorizer::new(repo.clone()));
        router(Arc::new(UserService::new(repo, admin)))
    }

    fn ana() -> serde_json::Value {
        json!({"nombre": "Ana", "email": "ana@correo.cl", "telefono": "+56 9 1234 5678", "contrasena": "secreta"})
    }

    #[tokio::test]
    async fn register_then_login() {
        let app = app().await;
        let (status, user) = send_json(&app, json("POST", "/auth/register", ana())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["isAdmin"], false);
        assert!(user.get("password").is_none() && user.get("contrasena").is_none());

        let (status, text) = send_text(&app, json("POST", "/auth/register", ana())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "El correo ya está registrado");

        let (status, body) =
            send_json(&app, json("POST", "/auth/login", json!({"email": "ana@correo.cl", "contrasena": "secreta"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Login exitoso.", "success": true}));

        let (status, body) =
            send_json(&app, json("POST", "/auth/login", json!({"email": "ana@correo.cl", "contrasena": "mala"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"message": "Credenciales incorrectas.", "success": false}));
    }

    #[tokio::test]
    async fn lookups_by_id_and_email() {
        let app = app().await;
        let (status, admin) = send_json(&app, get("/auth/usuario/correo/admin@amilimetros.cl")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(admin["isAdmin"], true);

        let (status, _) = send_json(&app, get(&format!("/auth/usuarios/{}", admin["id"]))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, text) = send_text(&app, get("/auth/usuarios/999")).await;
        assert_eq!((status, text.as_str()), (StatusCode::NOT_FOUND, "Usuario no encontrado"));

        let (_, all) = send_json(&app, get("/auth/usuarios")).await;
        assert_eq!(all.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn delete_requires_admin() {
        let app = app().await;
        let (_, user) = send_json(&app, json("POST", "/auth/register", ana())).await;
        let uri = format!("/api/usuarios/{}", user["id"]);

        let (status, text) = send_text(&app, empty("DELETE", &uri)).await;
        assert_eq!((status, text.as_str()), (StatusCode::BAD_REQUEST, "Debe enviar el email del admin"));

        let (status, text) = send_text(&app, json("DELETE", &uri, json!({"emailAdmin": "ana@correo.cl"}))).await;
        assert_eq!((status, text.as_str()), (StatusCode::FORBIDDEN, "No tiene permisos para eliminar usuarios"));

        let (status, text) =
            send_text(&app, json("DELETE", &uri, json!({"emailAdmin": "admin@amilimetros.cl"}))).await;
        assert_eq!((status, text.as_str()), (StatusCode::OK, "Usuario eliminado correctamente"));

        let (status, _) =
            send_text(&app, empty("DELETE", &format!("{uri}?emailAdmin=admin@amilimetros.cl"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
