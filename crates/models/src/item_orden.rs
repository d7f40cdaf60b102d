use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a purchased line.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_orden")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub orden_id: i64,
    pub producto_id: i64,
    pub producto_nombre: String,
    pub producto_precio: f64,
    pub cantidad: i32,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orden::Entity",
        from = "Column::OrdenId",
        to = "super::orden::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Orden,
}

impl Related<super::orden::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orden.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
