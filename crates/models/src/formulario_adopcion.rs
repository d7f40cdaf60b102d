use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::require;

#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Estado {
    #[sea_orm(string_value = "PENDIENTE")]
    #[serde(rename = "PENDIENTE")]
    Pendiente,
    #[sea_orm(string_value = "APROBADO")]
    #[serde(rename = "APROBADO")]
    Aprobado,
    #[sea_orm(string_value = "RECHAZADO")]
    #[serde(rename = "RECHAZADO")]
    Rechazado,
}

impl Estado {
    pub fn as_str(&self) -> &'static str {
        match self {
            Estado::Pendiente => "PENDIENTE",
            Estado::Aprobado => "APROBADO",
            Estado::Rechazado => "RECHAZADO",
        }
    }

    /// Parse a status name, case-insensitive; English names are accepted too.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDIENTE" | "PENDING" => Some(Estado::Pendiente),
            "APROBADO" | "APPROVED" => Some(Estado::Aprobado),
            "RECHAZADO" | "REJECTED" => Some(Estado::Rechazado),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "formulario_adopcion")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub usuario_id: i64,
    pub animal_id: i64,
    pub direccion: String,
    pub tipo_vivienda: String,
    pub tiene_mallas_ventanas: bool,
    pub vive_en_departamento: bool,
    pub tiene_otros_animales: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub motivo_adopcion: Option<String>,
    pub estado: Estado,
    #[sea_orm(column_type = "Text", nullable)]
    pub comentarios_admin: Option<String>,
    pub fecha_creacion: DateTimeWithTimeZone,
    pub fecha_revision: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Answers an applicant must give; the three yes/no questions are mandatory.
pub fn validate_answers(
    direccion: &str,
    tipo_vivienda: &str,
    tiene_mallas_ventanas: Option<bool>,
    vive_en_departamento: Option<bool>,
    tiene_otros_animales: Option<bool>,
) -> Result<(), ModelError> {
    require(direccion, "La dirección es obligatoria")?;
    require(tipo_vivienda, "El tipo de vivienda es obligatorio")?;
    if tiene_mallas_ventanas.is_none() {
        return Err(ModelError::Validation("Debe indicar si tiene mallas en ventanas".into()));
    }
    if vive_en_departamento.is_none() {
        return Err(ModelError::Validation("Debe indicar si vive en departamento".into()));
    }
    if tiene_otros_animales.is_none() {
        return Err(ModelError::Validation("Debe indicar si tiene otros animales".into()));
    }
    Ok(())
}
