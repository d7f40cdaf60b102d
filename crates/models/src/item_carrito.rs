use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart line. Product name and price are snapshots taken when the line was
/// first added.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_carrito")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub usuario_id: i64,
    pub producto_id: i64,
    pub producto_nombre: String,
    pub producto_precio: f64,
    pub cantidad: i32,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn subtotal(&self) -> f64 {
        self.producto_precio * f64::from(self.cantidad)
    }
}
