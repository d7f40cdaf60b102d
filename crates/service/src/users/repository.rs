use async_trait::async_trait;

use models::usuario;

use super::domain::NewUsuario;
use crate::errors::ServiceError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<usuario::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<usuario::Model>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<usuario::Model>, ServiceError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError>;
    async fn exists_by_telefono(&self, telefono: &str) -> Result<bool, ServiceError>;
    async fn create(&self, new: NewUsuario) -> Result<usuario::Model, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        rows: Mutex<Vec<usuario::Model>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn list(&self) -> Result<Vec<usuario::Model>, ServiceError> {
            Ok(self.rows.lock().await.clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<usuario::Model>, ServiceError> {
            Ok(self.rows.lock().await.iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<usuario::Model>, ServiceError> {
            Ok(self.rows.lock().await.iter().find(|u| u.email == email).cloned())
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().await.iter().any(|u| u.email == email))
        }

        async fn exists_by_telefono(&self, telefono: &str) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().await.iter().any(|u| u.telefono == telefono))
        }

        async fn create(&self, new: NewUsuario) -> Result<usuario::Model, ServiceError> {
            let mut rows = self.rows.lock().await;
            if rows.iter().any(|u| u.email == new.email) {
                return Err(ServiceError::validation("El correo ya está registrado"));
            }
            let id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
            let row = usuario::Model {
                id,
                nombre: new.nombre,
                email: new.email,
                telefono: new.telefono,
                password: new.password_hash,
                is_admin: new.is_admin,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|u| u.id != id);
            Ok(rows.len() != before)
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.rows.lock().await.len() as u64)
        }
    }
}
