use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: i64,
    pub nombre: String,
    pub especie: String,
    pub raza: String,
    pub edad: String,
    pub descripcion: String,
    #[serde(with = "common::json::base64_bytes", default)]
    pub imagen: Option<Vec<u8>>,
    pub is_adoptado: bool,
}

impl From<models::animal::Model> for Animal {
    fn from(m: models::animal::Model) -> Self {
        Self {
            id: m.id,
            nombre: m.nombre,
            especie: m.especie,
            raza: m.raza,
            edad: m.edad,
            descripcion: m.descripcion,
            imagen: m.imagen,
            is_adoptado: m.is_adoptado,
        }
    }
}

/// Body of create and full update. Fields stay untyped until the admin check
/// has passed; text fields accept strings or bare numbers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalInput {
    pub email_admin: Option<Value>,
    pub nombre: Option<Value>,
    pub especie: Option<Value>,
    pub raza: Option<Value>,
    pub edad: Option<Value>,
    pub descripcion: Option<Value>,
    pub is_adoptado: Option<Value>,
}

/// Validated descriptive fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimalFields {
    pub nombre: String,
    pub especie: String,
    pub raza: String,
    pub edad: String,
    pub descripcion: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnimalFilter {
    All,
    Adoptado(bool),
    Especie(String),
    /// Case-insensitive substring of the name.
    NombreContains(String),
}
