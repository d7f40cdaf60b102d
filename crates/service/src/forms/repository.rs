use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use models::formulario_adopcion::{self, Estado};

use super::domain::{FormFilter, NewFormulario};
use crate::errors::ServiceError;

pub const SOLICITUD_PENDIENTE: &str = "Ya tienes una solicitud pendiente para este animal";

#[async_trait]
pub trait FormRepository: Send + Sync {
    async fn list(&self, filter: FormFilter) -> Result<Vec<formulario_adopcion::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<formulario_adopcion::Model>, ServiceError>;
    async fn exists_pending(&self, usuario_id: i64, animal_id: i64) -> Result<bool, ServiceError>;
    /// Inserts as PENDIENTE. A second pending form for the same pair is
    /// rejected even when two submissions race.
    async fn create(&self, new: NewFormulario) -> Result<formulario_adopcion::Model, ServiceError>;
    async fn review(
        &self,
        id: i64,
        estado: Estado,
        comentarios: Option<String>,
        fecha: DateTime<FixedOffset>,
    ) -> Result<Option<formulario_adopcion::Model>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

pub(crate) fn matches(filter: &FormFilter, f: &formulario_adopcion::Model) -> bool {
    match filter {
        FormFilter::All => true,
        FormFilter::Usuario(id) => f.usuario_id == *id,
        FormFilter::Animal(id) => f.animal_id == *id,
        FormFilter::Estado(e) => &f.estado == e,
    }
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockFormRepository {
        rows: Mutex<Vec<formulario_adopcion::Model>>,
    }

    #[async_trait]
    impl FormRepository for MockFormRepository {
        async fn list(&self, filter: FormFilter) -> Result<Vec<formulario_adopcion::Model>, ServiceError> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().filter(|f| matches(&filter, f)).cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<formulario_adopcion::Model>, ServiceError> {
            Ok(self.rows.lock().await.iter().find(|f| f.id == id).cloned())
        }

        async fn exists_pending(&self, usuario_id: i64, animal_id: i64) -> Result<bool, ServiceError> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().any(|f| {
                f.usuario_id == usuario_id && f.animal_id == animal_id && f.estado == Estado::Pendiente
            }))
        }

        async fn create(&self, new: NewFormulario) -> Result<formulario_adopcion::Model, ServiceError> {
            let mut rows = self.rows.lock().await;
            let pending = rows.iter().any(|f| {
                f.usuario_id == new.usuario_id
                    && f.animal_id == new.animal_id
                    && f.estado == Estado::Pendiente
            });
            if pending {
                return Err(ServiceError::rejected(SOLICITUD_PENDIENTE));
            }
            let id = rows.iter().map(|f| f.id).max().unwrap_or(0) + 1;
            let row = formulario_adopcion::Model {
                id,
                usuario_id: new.usuario_id,
                animal_id: new.animal_id,
                direccion: new.direccion,
                tipo_vivienda: new.tipo_vivienda,
                tiene_mallas_ventanas: new.tiene_mallas_ventanas,
                vive_en_departamento: new.vive_en_departamento,
                tiene_otros_animales: new.tiene_otros_animales,
                motivo_adopcion: new.motivo_adopcion,
                estado: Estado::Pendiente,
                comentarios_admin: None,
                fecha_creacion: new.fecha_creacion,
                fecha_revision: None,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn review(
            &self,
            id: i64,
            estado: Estado,
            comentarios: Option<String>,
            fecha: DateTime<FixedOffset>,
        ) -> Result<Option<formulario_adopcion::Model>, ServiceError> {
            let mut rows = self.rows.lock().await;
            Ok(rows.iter_mut().find(|f| f.id == id).map(|f| {
                f.estado = estado;
                f.comentarios_admin = comentarios;
                f.fecha_revision = Some(fecha);
                f.clone()
            }))
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|f| f.id != id);
            Ok(rows.len() != before)
        }
    }
}
