use async_trait::async_trait;

use models::animal;

use super::domain::{AnimalFields, AnimalFilter};
use crate::errors::ServiceError;

#[async_trait]
pub trait AnimalRepository: Send + Sync {
    async fn list(&self, filter: AnimalFilter) -> Result<Vec<animal::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<animal::Model>, ServiceError>;
    async fn create(
        &self,
        fields: AnimalFields,
        imagen: Option<Vec<u8>>,
    ) -> Result<animal::Model, ServiceError>;
    /// Full update of the descriptive fields and the adoption flag.
    async fn update(
        &self,
        id: i64,
        fields: AnimalFields,
        is_adoptado: bool,
    ) -> Result<Option<animal::Model>, ServiceError>;
    async fn set_imagen(&self, id: i64, imagen: Vec<u8>) -> Result<bool, ServiceError>;
    async fn mark_adoptado(&self, id: i64) -> Result<bool, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

pub(crate) fn matches(filter: &AnimalFilter, a: &animal::Model) -> bool {
    match filter {
        AnimalFilter::All => true,
        AnimalFilter::Adoptado(flag) => a.is_adoptado == *flag,
        AnimalFilter::Especie(e) => &a.especie == e,
        AnimalFilter::NombreContains(n) => a.nombre.to_lowercase().contains(&n.to_lowercase()),
    }
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockAnimalRepository {
        rows: Mutex<Vec<animal::Model>>,
    }

    #[async_trait]
    impl AnimalRepository for MockAnimalRepository {
        async fn list(&self, filter: AnimalFilter) -> Result<Vec<animal::Model>, ServiceError> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().filter(|a| matches(&filter, a)).cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<animal::Model>, ServiceError> {
            Ok(self.rows.lock().await.iter().find(|a| a.id == id).cloned())
        }

        async fn create(
            &self,
            f: AnimalFields,
            imagen: Option<Vec<u8>>,
        ) -> Result<animal::Model, ServiceError> {
            let mut rows = self.rows.lock().await;
            let id = rows.iter().map(|a| a.id).max().unwrap_or(0) + 1;
            let row = animal::Model {
                id,
                nombre: f.nombre,
                especie: f.especie,
                raza: f.raza,
                edad: f.edad,
                descripcion: f.descripcion,
                imagen,
                is_adoptado: false,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            id: i64,
            f: AnimalFields,
            is_adoptado: bool,
        ) -> Result<Option<animal::Model>, ServiceError> {
            let mut rows = self.rows.lock().await;
            Ok(rows.iter_mut().find(|a| a.id == id).map(|a| {
                a.nombre = f.nombre;
                a.especie = f.especie;
                a.raza = f.raza;
                a.edad = f.edad;
                a.descripcion = f.descripcion;
                a.is_adoptado = is_adoptado;
                a.clone()
            }))
        }

        async fn set_imagen(&self, id: i64, imagen: Vec<u8>) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            Ok(rows.iter_mut().find(|a| a.id == id).map(|a| a.imagen = Some(imagen)).is_some())
        }

        async fn mark_adoptado(&self, id: i64) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            Ok(rows.iter_mut().find(|a| a.id == id).map(|a| a.is_adoptado = true).is_some())
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|a| a.id != id);
            Ok(rows.len() != before)
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.rows.lock().await.len() as u64)
        }
    }
}
