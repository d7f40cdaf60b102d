use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use models::orden::Status;
use models::{item_orden, orden};

use crate::errors::ServiceError;
use crate::orders::domain::{CancelOutcome, NewItemOrden, NewOrden};
use crate::orders::repository::OrderRepository;

pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn list(&self, usuario_id: Option<i64>) -> Result<Vec<orden::Model>, ServiceError> {
        let mut q = orden::Entity::find();
        if let Some(u) = usuario_id {
            q = q.filter(orden::Column::UsuarioId.eq(u));
        }
        Ok(q.order_by_desc(orden::Column::CreatedAt)
            .order_by_desc(orden::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<orden::Model>, ServiceError> {
        Ok(orden::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn items(&self, orden_id: i64) -> Result<Vec<item_orden::Model>, ServiceError> {
        Ok(item_orden::Entity::find()
            .filter(item_orden::Column::OrdenId.eq(orden_id))
            .order_by_asc(item_orden::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn checkout(&self, new: NewOrden, items: Vec<NewItemOrden>) -> Result<orden::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let row = orden::ActiveModel {
            usuario_id: Set(new.usuario_id),
            total: Set(new.total),
            created_at: Set(new.created_at),
            status: Set(Status::Completada),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let lines = items.into_iter().map(|i| item_orden::ActiveModel {
            orden_id: Set(row.id),
            producto_id: Set(i.producto_id),
            producto_nombre: Set(i.producto_nombre),
            producto_precio: Set(i.producto_precio),
            cantidad: Set(i.cantidad),
            image_url: Set(i.image_url),
            ..Default::default()
        });
        item_orden::Entity::insert_many(lines).exec(&txn).await?;
        txn.commit().await?;
        Ok(row)
    }

    async fn cancel(&self, id: i64) -> Result<CancelOutcome, ServiceError> {
        let res = orden::Entity::update_many()
            .col_expr(orden::Column::Status, Expr::value(Status::Cancelada))
            .filter(orden::Column::Id.eq(id))
            .filter(orden::Column::Status.ne(Status::Cancelada))
            .exec(&self.db)
            .await?;
        Ok(match orden::Entity::find_by_id(id).one(&self.db).await? {
            None => CancelOutcome::Missing,
            Some(row) if res.rows_affected > 0 => CancelOutcome::Cancelled(row),
            Some(_) => CancelOutcome::AlreadyCancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, skip_db};
    use migration::{MigratorTrait, OrdenesMigrator};

    fn line(producto_id: i64) -> NewItemOrden {
        NewItemOrden {
            producto_id,
            producto_nombre: format!("Producto {producto_id}"),
            producto_precio: 4990.0,
            cantidad: 2,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn checkout_writes_lines_and_cancels_once() -> anyhow::Result<()> {
        if skip_db() {
            return Ok(());
        }
        let db = get_db().await?;
        OrdenesMigrator::up(&db, None).await?;
        let repo = SeaOrmOrderRepository { db };
        let usuario_id = chrono::Utc::now().timestamp_micros();

        let orden = repo
            .checkout(
                NewOrden { usuario_id, total: 19960.0, created_at: chrono::Utc::now().into() },
                vec![line(1), line(2)],
            )
            .await?;
        assert_eq!(orden.status, Status::Completada);
        assert_eq!(repo.items(orden.id).await?.len(), 2);
        assert_eq!(repo.list(Some(usuario_id)).await?.len(), 1);

        assert!(matches!(repo.cancel(orden.id).await?, CancelOutcome::Cancelled(o) if o.status == Status::Cancelada));
        assert_eq!(repo.cancel(orden.id).await?, CancelOutcome::AlreadyCancelled);
        assert_eq!(repo.cancel(-1).await?, CancelOutcome::Missing);
        Ok(())
    }

    #[tokio::test]
    async fn failed_line_rolls_back_the_order() -> anyhow::Result<()> {
        if skip_db() {
            return Ok(());
        }
        let db = get_db().await?;
        OrdenesMigrator::up(&db, None).await?;
        let repo = SeaOrmOrderRepository { db };
        let usuario_id = chrono::Utc::now().timestamp_micros();

        // producto_nombre is varchar(150)
        let too_long = NewItemOrden { producto_nombre: "x".repeat(200), ..line(2) };
        let res = repo
            .checkout(
                NewOrden { usuario_id, total: 9980.0, created_at: chrono::Utc::now().into() },
                vec![line(1), too_long],
            )
            .await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
        assert!(repo.list(Some(usuario_id)).await?.is_empty());
        Ok(())
    }
}
