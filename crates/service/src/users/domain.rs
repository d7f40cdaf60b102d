use serde::{Deserialize, Serialize};

/// Public view of a user. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub is_admin: bool,
}

impl From<models::usuario::Model> for Usuario {
    fn from(m: models::usuario::Model) -> Self {
        Self { id: m.id, nombre: m.nombre, email: m.email, telefono: m.telefono, is_admin: m.is_admin }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub contrasena: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub contrasena: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserInput {
    pub email_admin: Option<String>,
}

/// Row to insert; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUsuario {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub password_hash: String,
    pub is_admin: bool,
}
