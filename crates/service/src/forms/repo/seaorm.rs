use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use models::formulario_adopcion::{self, Estado};

use crate::errors::ServiceError;
use crate::forms::domain::{FormFilter, NewFormulario};
use crate::forms::repository::{FormRepository, SOLICITUD_PENDIENTE};

pub struct SeaOrmFormRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl FormRepository for SeaOrmFormRepository {
    async fn list(&self, filter: FormFilter) -> Result<Vec<formulario_adopcion::Model>, ServiceError> {
        let mut q = formulario_adopcion::Entity::find();
        q = match filter {
            FormFilter::All => q,
            FormFilter::Usuario(id) => q.filter(formulario_adopcion::Column::UsuarioId.eq(id)),
            FormFilter::Animal(id) => q.filter(formulario_adopcion::Column::AnimalId.eq(id)),
            FormFilter::Estado(e) => q.filter(formulario_adopcion::Column::Estado.eq(e)),
        };
        Ok(q.order_by_asc(formulario_adopcion::Column::Id).all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<formulario_adopcion::Model>, ServiceError> {
        Ok(formulario_adopcion::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn exists_pending(&self, usuario_id: i64, animal_id: i64) -> Result<bool, ServiceError> {
        let n = formulario_adopcion::Entity::find()
            .filter(formulario_adopcion::Column::UsuarioId.eq(usuario_id))
            .filter(formulario_adopcion::Column::AnimalId.eq(animal_id))
            .filter(formulario_adopcion::Column::Estado.eq(Estado::Pendiente))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn create(&self, new: NewFormulario) -> Result<formulario_adopcion::Model, ServiceError> {
        let am = formulario_adopcion::ActiveModel {
            usuario_id: Set(new.usuario_id),
            animal_id: Set(new.animal_id),
            direccion: Set(new.direccion),
            tipo_vivienda: Set(new.tipo_vivienda),
            tiene_mallas_ventanas: Set(new.tiene_mallas_ventanas),
            vive_en_departamento: Set(new.vive_en_departamento),
            tiene_otros_animales: Set(new.tiene_otros_animales),
            motivo_adopcion: Set(new.motivo_adopcion),
            estado: Set(Estado::Pendiente),
            comentarios_admin: Set(None),
            fecha_creacion: Set(new.fecha_creacion),
            fecha_revision: Set(None),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| match e.sql_err() {
            // Partial unique index on (usuario_id, animal_id) WHERE estado = 'PENDIENTE'
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::rejected(SOLICITUD_PENDIENTE),
            _ => ServiceError::from(e),
        })
    }

    async fn review(
        &self,
        id: i64,
        estado: Estado,
        comentarios: Option<String>,
        fecha: DateTime<FixedOffset>,
    ) -> Result<Option<formulario_adopcion::Model>, ServiceError> {
        let Some(found) = formulario_adopcion::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: formulario_adopcion::ActiveModel = found.into();
        am.estado = Set(estado);
        am.comentarios_admin = Set(comentarios);
        am.fecha_revision = Set(Some(fecha));
        am.update(&self.db).await.map(Some).map_err(|e| match e.sql_err() {
            // Re-opening a form as PENDIENTE next to another pending one.
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::rejected(SOLICITUD_PENDIENTE),
            _ => ServiceError::from(e),
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = formulario_adopcion::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, skip_db};
    use migration::{FormulariosMigrator, MigratorTrait};

    fn form(usuario_id: i64) -> NewFormulario {
        NewFormulario {
            usuario_id,
            animal_id: 1,
            direccion: "Av. Siempre Viva 742".into(),
            tipo_vivienda: "Casa".into(),
            tiene_mallas_ventanas: true,
            vive_en_departamento: false,
            tiene_otros_animales: false,
            motivo_adopcion: Some("Compañía".into()),
            fecha_creacion: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn pending_pair_is_unique_until_reviewed() -> anyhow::Result<()> {
        if skip_db() {
            return Ok(());
        }
        let db = get_db().await?;
        FormulariosMigrator::up(&db, None).await?;
        let repo = SeaOrmFormRepository { db };
        let usuario_id = chrono::Utc::now().timestamp_micros();

        let first = repo.create(form(usuario_id)).await?;
        assert!(repo.exists_pending(usuario_id, 1).await?);
        assert_eq!(
            repo.create(form(usuario_id)).await.err(),
            Some(ServiceError::rejected(SOLICITUD_PENDIENTE))
        );

        let reviewed = repo
            .review(first.id, Estado::Rechazado, Some("No".into()), chrono::Utc::now().into())
            .await?
            .expect("reviewed");
        assert_eq!(reviewed.estado, Estado::Rechazado);
        assert!(reviewed.fecha_revision.is_some());

        let second = repo.create(form(usuario_id)).await?;
        assert!(repo.delete(first.id).await?);
        assert!(repo.delete(second.id).await?);
        Ok(())
    }
}
