use async_trait::async_trait;

use models::{item_orden, orden};

use super::domain::{CancelOutcome, NewItemOrden, NewOrden};
use crate::errors::ServiceError;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Newest first; all users when `usuario_id` is `None`.
    async fn list(&self, usuario_id: Option<i64>) -> Result<Vec<orden::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<orden::Model>, ServiceError>;
    async fn items(&self, orden_id: i64) -> Result<Vec<item_orden::Model>, ServiceError>;
    /// Writes the order and every line, or nothing.
    async fn checkout(&self, orden: NewOrden, items: Vec<NewItemOrden>) -> Result<orden::Model, ServiceError>;
    /// Completada -> Cancelada, at most once.
    async fn cancel(&self, id: i64) -> Result<CancelOutcome, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use models::orden::Status;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockOrderRepository {
        state: Mutex<(Vec<orden::Model>, Vec<item_orden::Model>)>,
    }

    #[async_trait]
    impl OrderRepository for MockOrderRepository {
        async fn list(&self, usuario_id: Option<i64>) -> Result<Vec<orden::Model>, ServiceError> {
            let state = self.state.lock().await;
            let mut rows: Vec<_> = state
                .0
                .iter()
                .filter(|o| usuario_id.map_or(true, |u| o.usuario_id == u))
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(rows)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<orden::Model>, ServiceError> {
            Ok(self.state.lock().await.0.iter().find(|o| o.id == id).cloned())
        }

        async fn items(&self, orden_id: i64) -> Result<Vec<item_orden::Model>, ServiceError> {
            let state = self.state.lock().await;
            Ok(state.1.iter().filter(|i| i.orden_id == orden_id).cloned().collect())
        }

        async fn checkout(&self, new: NewOrden, items: Vec<NewItemOrden>) -> Result<orden::Model, ServiceError> {
            let mut state = self.state.lock().await;
            let id = state.0.iter().map(|o| o.id).max().unwrap_or(0) + 1;
            let row = orden::Model {
                id,
                usuario_id: new.usuario_id,
                total: new.total,
                created_at: new.created_at,
                status: Status::Completada,
            };
            state.0.push(row.clone());
            let mut next = state.1.iter().map(|i| i.id).max().unwrap_or(0);
            for item in items {
                next += 1;
                state.1.push(item_orden::Model {
                    id: next,
                    orden_id: id,
                    producto_id: item.producto_id,
                    producto_nombre: item.producto_nombre,
                    producto_precio: item.producto_precio,
                    cantidad: item.cantidad,
                    image_url: item.image_url,
                });
            }
            Ok(row)
        }

        async fn cancel(&self, id: i64) -> Result<CancelOutcome, ServiceError> {
            let mut state = self.state.lock().await;
            Ok(match state.0.iter_mut().find(|o| o.id == id) {
                None => CancelOutcome::Missing,
                Some(o) if o.status == Status::Cancelada => CancelOutcome::AlreadyCancelled,
                Some(o) => {
                    o.status = Status::Cancelada;
                    CancelOutcome::Cancelled(o.clone())
                }
            })
        }
    }
}
