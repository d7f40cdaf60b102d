use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use models::producto;

use crate::catalog::domain::{ProductoFields, ProductoFilter};
use crate::catalog::repository::ProductoRepository;
use crate::errors::ServiceError;

pub struct SeaOrmProductoRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ProductoRepository for SeaOrmProductoRepository {
    async fn list(&self, filter: ProductoFilter) -> Result<Vec<producto::Model>, ServiceError> {
        let mut q = producto::Entity::find();
        q = match filter {
            ProductoFilter::All => q,
            ProductoFilter::Categoria(c) => q.filter(producto::Column::Categoria.eq(c)),
            ProductoFilter::NombreContains(n) => q.filter(
                Expr::expr(Func::lower(Expr::col(producto::Column::Nombre)))
                    .like(format!("%{}%", n.to_lowercase())),
            ),
        };
        Ok(q.order_by_asc(producto::Column::Id).all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<producto::Model>, ServiceError> {
        Ok(producto::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(
        &self,
        f: ProductoFields,
        imagen: Option<Vec<u8>>,
    ) -> Result<producto::Model, ServiceError> {
        let am = producto::ActiveModel {
            nombre: Set(f.nombre),
            descripcion: Set(f.descripcion),
            precio: Set(f.precio),
            imagen: Set(imagen),
            categoria: Set(f.categoria),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn update(
        &self,
        id: i64,
        f: ProductoFields,
    ) -> Result<Option<producto::Model>, ServiceError> {
        let Some(found) = producto::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: producto::ActiveModel = found.into();
        am.nombre = Set(f.nombre);
        am.descripcion = Set(f.descripcion);
        am.categoria = Set(f.categoria);
        am.precio = Set(f.precio);
        Ok(Some(am.update(&self.db).await?))
    }

    async fn set_imagen(&self, id: i64, imagen: Vec<u8>) -> Result<bool, ServiceError> {
        let res = producto::Entity::update_many()
            .col_expr(producto::Column::Imagen, Expr::value(imagen))
            .filter(producto::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = producto::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(producto::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, skip_db};
    use migration::{CatalogoMigrator, MigratorTrait};

    #[tokio::test]
    async fn update_and_filter_by_category() -> anyhow::Result<()> {
        if skip_db() {
            return Ok(());
        }
        let db = get_db().await?;
        CatalogoMigrator::up(&db, None).await?;
        let repo = SeaOrmProductoRepository { db };
        let categoria = format!("Prueba{}", chrono::Utc::now().timestamp_micros());
        let fields = ProductoFields {
            nombre: "Hueso".into(),
            descripcion: "Hueso de goma".into(),
            categoria: categoria.clone(),
            precio: 1500.0,
        };
        let created = repo.create(fields.clone(), Some(vec![1, 2])).await?;
        let updated = repo
            .update(created.id, ProductoFields { precio: 2500.0, ..fields })
            .await?
            .expect("updated");
        assert_eq!(updated.precio, 2500.0);
        assert_eq!(updated.imagen, Some(vec![1, 2]));

        let listed = repo.list(ProductoFilter::Categoria(categoria)).await?;
        assert_eq!(listed.len(), 1);
        assert!(repo.delete(created.id).await?);
        Ok(())
    }
}
