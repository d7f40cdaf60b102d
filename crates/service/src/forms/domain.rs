use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use models::formulario_adopcion::Estado;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormularioAdopcion {
    pub id: i64,
    pub usuario_id: i64,
    pub animal_id: i64,
    pub direccion: String,
    pub tipo_vivienda: String,
    pub tiene_mallas_ventanas: bool,
    pub vive_en_departamento: bool,
    pub tiene_otros_animales: bool,
    pub motivo_adopcion: Option<String>,
    pub estado: Estado,
    pub comentarios_admin: Option<String>,
    pub fecha_creacion: DateTime<FixedOffset>,
    pub fecha_revision: Option<DateTime<FixedOffset>>,
}

impl From<models::formulario_adopcion::Model> for FormularioAdopcion {
    fn from(m: models::formulario_adopcion::Model) -> Self {
        Self {
            id: m.id,
            usuario_id: m.usuario_id,
            animal_id: m.animal_id,
            direccion: m.direccion,
            tipo_vivienda: m.tipo_vivienda,
            tiene_mallas_ventanas: m.tiene_mallas_ventanas,
            vive_en_departamento: m.vive_en_departamento,
            tiene_otros_animales: m.tiene_otros_animales,
            motivo_adopcion: m.motivo_adopcion,
            estado: m.estado,
            comentarios_admin: m.comentarios_admin,
            fecha_creacion: m.fecha_creacion,
            fecha_revision: m.fecha_revision,
        }
    }
}

/// What the applicant fills in. The yes/no answers accept booleans or
/// `"true"`/`"false"` strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub direccion: Option<String>,
    pub tipo_vivienda: Option<String>,
    pub tiene_mallas_ventanas: Option<Value>,
    pub vive_en_departamento: Option<Value>,
    pub tiene_otros_animales: Option<Value>,
    pub motivo_adopcion: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub email_admin: Option<Value>,
    pub comentarios: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFormulario {
    pub usuario_id: i64,
    pub animal_id: i64,
    pub direccion: String,
    pub tipo_vivienda: String,
    pub tiene_mallas_ventanas: bool,
    pub vive_en_departamento: bool,
    pub tiene_otros_animales: bool,
    pub motivo_adopcion: Option<String>,
    pub fecha_creacion: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormFilter {
    All,
    Usuario(i64),
    Animal(i64),
    Estado(Estado),
}
