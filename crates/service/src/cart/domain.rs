use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::peers::RemoteUser;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCarrito {
    pub id: i64,
    pub usuario_id: i64,
    pub producto_id: i64,
    pub producto_nombre: String,
    pub producto_precio: f64,
    pub cantidad: i32,
    pub image_url: Option<String>,
}

impl From<models::item_carrito::Model> for ItemCarrito {
    fn from(m: models::item_carrito::Model) -> Self {
        Self {
            id: m.id,
            usuario_id: m.usuario_id,
            producto_id: m.producto_id,
            producto_nombre: m.producto_nombre,
            producto_precio: m.producto_precio,
            cantidad: m.cantidad,
            image_url: m.image_url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgregarInput {
    pub usuario_id: Option<Value>,
    pub producto_id: Option<Value>,
    pub cantidad: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CantidadInput {
    pub cantidad: Option<Value>,
}

/// Line to add; merged into an existing line for the same product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine {
    pub usuario_id: i64,
    pub producto_id: i64,
    pub producto_nombre: String,
    pub producto_precio: f64,
    pub cantidad: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarritoDetalle {
    pub usuario: RemoteUser,
    pub items: Vec<ItemCarrito>,
    pub total: f64,
    pub cantidad_items: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    Updated(ItemCarrito),
    /// The requested quantity was zero or negative and the line is gone.
    Removed,
}

pub fn total(items: &[ItemCarrito]) -> f64 {
    items.iter().map(|i| i.producto_precio * f64::from(i.cantidad)).sum()
}
