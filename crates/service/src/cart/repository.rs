use async_trait::async_trait;

use models::item_carrito;

use super::domain::NewCartLine;
use crate::errors::ServiceError;

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn list_by_usuario(&self, usuario_id: i64) -> Result<Vec<item_carrito::Model>, ServiceError>;
    /// Insert the line, or add its quantity to the existing line for the
    /// same (usuario, producto). The existing snapshot is kept.
    async fn upsert_add(&self, line: NewCartLine) -> Result<item_carrito::Model, ServiceError>;
    async fn set_cantidad(&self, id: i64, cantidad: i32) -> Result<Option<item_carrito::Model>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn delete_by_usuario(&self, usuario_id: i64) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockCartRepository {
        rows: Mutex<Vec<item_carrito::Model>>,
    }

    #[async_trait]
    impl CartRepository for MockCartRepository {
        async fn list_by_usuario(&self, usuario_id: i64) -> Result<Vec<item_carrito::Model>, ServiceError> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().filter(|i| i.usuario_id == usuario_id).cloned().collect())
        }

        async fn upsert_add(&self, line: NewCartLine) -> Result<item_carrito::Model, ServiceError> {
            let mut rows = self.rows.lock().await;
            if let Some(existing) = rows
                .iter_mut()
                .find(|i| i.usuario_id == line.usuario_id && i.producto_id == line.producto_id)
            {
                existing.cantidad += line.cantidad;
                return Ok(existing.clone());
            }
            let id = rows.iter().map(|i| i.id).max().unwrap_or(0) + 1;
            let row = item_carrito::Model {
                id,
                usuario_id: line.usuario_id,
                producto_id: line.producto_id,
                producto_nombre: line.producto_nombre,
                producto_precio: line.producto_precio,
                cantidad: line.cantidad,
                image_url: line.image_url,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn set_cantidad(&self, id: i64, cantidad: i32) -> Result<Option<item_carrito::Model>, ServiceError> {
            let mut rows = self.rows.lock().await;
            Ok(rows.iter_mut().find(|i| i.id == id).map(|i| {
                i.cantidad = cantidad;
                i.clone()
            }))
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|i| i.id != id);
            Ok(rows.len() != before)
        }

        async fn delete_by_usuario(&self, usuario_id: i64) -> Result<u64, ServiceError> {
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|i| i.usuario_id != usuario_id);
            Ok((before - rows.len()) as u64)
        }
    }
}
