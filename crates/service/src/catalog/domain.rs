use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    #[serde(with = "common::json::base64_bytes", default)]
    pub imagen: Option<Vec<u8>>,
    pub categoria: String,
}

impl From<models::producto::Model> for Producto {
    fn from(m: models::producto::Model) -> Self {
        Self {
            id: m.id,
            nombre: m.nombre,
            descripcion: m.descripcion,
            precio: m.precio,
            imagen: m.imagen,
            categoria: m.categoria,
        }
    }
}

/// Body of create and update, read after the admin check. `precio` may be a
/// number or a numeric string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductoInput {
    pub email_admin: Option<Value>,
    pub nombre: Option<Value>,
    pub descripcion: Option<Value>,
    pub categoria: Option<Value>,
    pub precio: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductoFields {
    pub nombre: String,
    pub descripcion: String,
    pub categoria: String,
    pub precio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductoFilter {
    All,
    Categoria(String),
    /// Case-insensitive substring of the name.
    NombreContains(String),
}
