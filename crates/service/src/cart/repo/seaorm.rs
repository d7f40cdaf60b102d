use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use models::item_carrito;

use crate::cart::domain::NewCartLine;
use crate::cart::repository::CartRepository;
use crate::errors::ServiceError;

pub struct SeaOrmCartRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl CartRepository for SeaOrmCartRepository {
    async fn list_by_usuario(&self, usuario_id: i64) -> Result<Vec<item_carrito::Model>, ServiceError> {
        Ok(item_carrito::Entity::find()
            .filter(item_carrito::Column::UsuarioId.eq(usuario_id))
            .order_by_asc(item_carrito::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn upsert_add(&self, line: NewCartLine) -> Result<item_carrito::Model, ServiceError> {
        let cantidad = line.cantidad;
        let am = item_carrito::ActiveModel {
            usuario_id: Set(line.usuario_id),
            producto_id: Set(line.producto_id),
            producto_nombre: Set(line.producto_nombre),
            producto_precio: Set(line.producto_precio),
            cantidad: Set(line.cantidad),
            image_url: Set(line.image_url),
            ..Default::default()
        };
        // INSERT .. ON CONFLICT (usuario_id, producto_id) DO UPDATE SET cantidad = cantidad + $n
        let row = item_carrito::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([item_carrito::Column::UsuarioId, item_carrito::Column::ProductoId])
                    .value(
                        item_carrito::Column::Cantidad,
                        Expr::col((item_carrito::Entity, item_carrito::Column::Cantidad)).add(cantidad),
                    )
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;
        Ok(row)
    }

    async fn set_cantidad(&self, id: i64, cantidad: i32) -> Result<Option<item_carrito::Model>, ServiceError> {
        let Some(found) = item_carrito::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: item_carrito::ActiveModel = found.into();
        am.cantidad = Set(cantidad);
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = item_carrito::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_by_usuario(&self, usuario_id: i64) -> Result<u64, ServiceError> {
        let res = item_carrito::Entity::delete_many()
            .filter(item_carrito::Column::UsuarioId.eq(usuario_id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }
}
