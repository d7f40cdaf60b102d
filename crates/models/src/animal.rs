use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::require;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "animal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    pub especie: String,
    pub raza: String,
    /// Free text ("2 años", "6 meses").
    pub edad: String,
    #[sea_orm(column_type = "Text")]
    pub descripcion: String,
    #[sea_orm(nullable)]
    pub imagen: Option<Vec<u8>>,
    pub is_adoptado: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Required text fields, checked in declaration order.
pub fn validate_fields(
    nombre: &str,
    especie: &str,
    raza: &str,
    descripcion: &str,
    edad: &str,
) -> Result<(), ModelError> {
    require(nombre, "El nombre no puede estar vacío")?;
    require(especie, "La especie no puede estar vacía")?;
    require(raza, "La raza no puede estar vacía")?;
    require(descripcion, "La descripción no puede estar vacía")?;
    require(edad, "La edad es obligatoria")?;
    Ok(())
}
