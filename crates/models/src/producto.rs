use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::require;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "producto")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    #[sea_orm(column_type = "Text")]
    pub descripcion: String,
    pub precio: f64,
    #[sea_orm(nullable)]
    pub imagen: Option<Vec<u8>>,
    pub categoria: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Lowest accepted price, in pesos.
pub const PRECIO_MINIMO: f64 = 1000.0;

pub fn validate_fields(nombre: &str, descripcion: &str, categoria: &str) -> Result<(), ModelError> {
    require(nombre, "El nombre no puede estar vacío")?;
    require(descripcion, "La descripción no puede estar vacía")?;
    require(categoria, "La categoría no puede estar vacía")?;
    Ok(())
}

pub fn validate_precio(precio: f64) -> Result<(), ModelError> {
    if !precio.is_finite() {
        return Err(ModelError::Validation("El precio debe ser un número válido".into()));
    }
    if precio < PRECIO_MINIMO {
        return Err(ModelError::Validation("El precio mínimo es 1000 pesos".into()));
    }
    Ok(())
}
