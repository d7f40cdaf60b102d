use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuario")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub telefono: String,
    /// Argon2 PHC string; never leaves the service.
    #[serde(skip_serializing)]
    pub password: String,
    pub is_admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const TELEFONO_MIN_DIGITS: usize = 8;
pub const TELEFONO_MAX_DIGITS: usize = 12;

/// Number of ASCII digits in a phone number, ignoring `+`, spaces and dashes.
pub fn telefono_digits(telefono: &str) -> usize {
    telefono.chars().filter(|c| c.is_ascii_digit()).count()
}

pub fn validate_telefono(telefono: &str) -> Result<(), ModelError> {
    if telefono.trim().is_empty() {
        return Err(ModelError::Validation(
            "El número de teléfono no puede estar vacío".into(),
        ));
    }
    let digits = telefono_digits(telefono);
    if !(TELEFONO_MIN_DIGITS..=TELEFONO_MAX_DIGITS).contains(&digits) {
        return Err(ModelError::Validation(
            "El número de teléfono debe tener entre 8 y 12 dígitos.".into(),
        ));
    }
    Ok(())
}
