use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use models::usuario;

use crate::errors::ServiceError;
use crate::users::domain::NewUsuario;
use crate::users::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list(&self) -> Result<Vec<usuario::Model>, ServiceError> {
        Ok(usuario::Entity::find()
            .order_by_asc(usuario::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<usuario::Model>, ServiceError> {
        Ok(usuario::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<usuario::Model>, ServiceError> {
        Ok(usuario::Entity::find()
            .filter(usuario::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let n = usuario::Entity::find()
            .filter(usuario::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn exists_by_telefono(&self, telefono: &str) -> Result<bool, ServiceError> {
        let n = usuario::Entity::find()
            .filter(usuario::Column::Telefono.eq(telefono))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn create(&self, new: NewUsuario) -> Result<usuario::Model, ServiceError> {
        let am = usuario::ActiveModel {
            nombre: Set(new.nombre),
            email: Set(new.email),
            telefono: Set(new.telefono),
            password: Set(new.password_hash),
            is_admin: Set(new.is_admin),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| match e.sql_err() {
            // Lost a race with a concurrent registration.
            Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("telefono") => {
                ServiceError::validation("El número de teléfono ya está registrado")
            }
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ServiceError::validation("El correo ya está registrado")
            }
            _ => ServiceError::from(e),
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = usuario::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(usuario::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, skip_db};
    use migration::{MigratorTrait, UsuariosMigrator};

    #[tokio::test]
    async fn create_find_delete() -> anyhow::Result<()> {
        if skip_db() {
            return Ok(());
        }
        let db = get_db().await?;
        UsuariosMigrator::up(&db, None).await?;
        let repo = SeaOrmUserRepository { db };
        let stamp = chrono::Utc::now().timestamp_micros();
        let email = format!("repo_{stamp}@correo.cl");
        let created = repo
            .create(NewUsuario {
                nombre: "Repo".into(),
                email: email.clone(),
                telefono: format!("+56{}", stamp % 1_000_000_000),
                password_hash: "hash".into(),
                is_admin: false,
            })
            .await?;
        assert!(repo.exists_by_email(&email).await?);
        assert_eq!(repo.find_by_email(&email).await?.map(|u| u.id), Some(created.id));

        let dup = repo
            .create(NewUsuario {
                nombre: "Repo".into(),
                email: email.clone(),
                telefono: "000000000".into(),
                password_hash: "hash".into(),
                is_admin: false,
            })
            .await;
        assert_eq!(dup.err(), Some(ServiceError::validation("El correo ya está registrado")));

        assert!(repo.delete(created.id).await?);
        assert!(!repo.delete(created.id).await?);
        Ok(())
    }
}
