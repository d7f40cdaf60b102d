use async_trait::async_trait;

use models::producto;

use super::domain::{ProductoFields, ProductoFilter};
use crate::errors::ServiceError;

#[async_trait]
pub trait ProductoRepository: Send + Sync {
    async fn list(&self, filter: ProductoFilter) -> Result<Vec<producto::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<producto::Model>, ServiceError>;
    async fn create(
        &self,
        fields: ProductoFields,
        imagen: Option<Vec<u8>>,
    ) -> Result<producto::Model, ServiceError>;
    async fn update(
        &self,
        id: i64,
        fields: ProductoFields,
    ) -> Result<Option<producto::Model>, ServiceError>;
    async fn set_imagen(&self, id: i64, imagen: Vec<u8>) -> Result<bool, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

pub(crate) fn matches(filter: &ProductoFilter, p: &producto::Model) -> bool {
    match filter {
        ProductoFilter::All => true,
        ProductoFilter::Categoria(c) => &p.categoria == c,
        ProductoFilter::NombreContains(n) => p.nombre.to_lowercase().contains(&n.to_lowercase()),
    }
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockProductoRepository {
        rows: Mutex<Vec<producto::Model>>,
    }

    #[async_trait]
    impl ProductoRepository for MockProductoRepository {
        async fn list(&self, filter: ProductoFilter) -> Result<Vec<producto::Model>, ServiceError> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().filter(|p| matches(&filter, p)).cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<producto::Model>, ServiceError> {
            Ok(self.rows.lock().await.iter().find(|p| p.id == id).cloned())
        }

        async fn create(
            &self,
            f: ProductoFields,
            imagen: Option<Vec<u8>>,
        ) -> Result<producto::Model, ServiceError> {
            let mut rows = self.rows.lock().await;
            let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let row = producto::Model {
                id,
                nombre: f.nombre,
                descripcion: f.descripcion,
                precio: f.precio,
                imagen,
                categoria: f.categoria,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            id: i64,
            f: ProductoFields,
        ) -> Result<Option<producto::Model>, ServiceError> {
            let mut rows = self.rows.lock().await;
            Ok(rows.iter_mut().find(|p| p.id == id).map(|p| {
                p.nombre = f.nombre;
                p.descripcion = f.descripcion;
                p.categoria = f.categoria;
                p.precio = f.precio;
                p.clone()
            }))
        }

        async fn set_imagen(&self, id: i64, imagen: Vec<u8>) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            Ok(rows.iter_mut().find(|p| p.id == id).map(|p| p.imagen = Some(imagen)).is_some())
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|p| p.id != id);
            Ok(rows.len() != before)
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.rows.lock().await.len() as u64)
        }
    }
}
