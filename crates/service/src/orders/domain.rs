use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use models::orden::Status;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orden {
    pub id: i64,
    pub usuario_id: i64,
    pub total: f64,
    pub created_at: DateTime<FixedOffset>,
    pub status: Status,
}

impl From<models::orden::Model> for Orden {
    fn from(m: models::orden::Model) -> Self {
        Self { id: m.id, usuario_id: m.usuario_id, total: m.total, created_at: m.created_at, status: m.status }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOrden {
    pub id: i64,
    pub orden_id: i64,
    pub producto_id: i64,
    pub producto_nombre: String,
    pub producto_precio: f64,
    pub cantidad: i32,
    pub image_url: Option<String>,
}

impl From<models::item_orden::Model> for ItemOrden {
    fn from(m: models::item_orden::Model) -> Self {
        Self {
            id: m.id,
            orden_id: m.orden_id,
            producto_id: m.producto_id,
            producto_nombre: m.producto_nombre,
            producto_precio: m.producto_precio,
            cantidad: m.cantidad,
            image_url: m.image_url,
        }
    }
}

/// Checkout body. The total is taken as sent; lines are not re-priced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrearOrdenInput {
    pub usuario_id: Option<Value>,
    pub total: Option<Value>,
    pub items: Option<Vec<ItemOrdenInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOrdenInput {
    pub producto_id: Option<Value>,
    pub producto_nombre: Option<String>,
    pub producto_precio: Option<Value>,
    pub cantidad: Option<Value>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrden {
    pub usuario_id: i64,
    pub total: f64,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewItemOrden {
    pub producto_id: i64,
    pub producto_nombre: String,
    pub producto_precio: f64,
    pub cantidad: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdenDetalle {
    pub orden: Orden,
    pub items: Vec<ItemOrden>,
    pub cantidad_items: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    Cancelled(models::orden::Model),
    AlreadyCancelled,
    Missing,
}
