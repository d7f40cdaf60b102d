//! Create `item_carrito` table.
//! One row per (usuario, producto); repeated adds upsert against the unique index.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemCarrito::Table)
                    .if_not_exists()
                    .col(big_integer(ItemCarrito::Id).auto_increment().primary_key())
                    .col(big_integer(ItemCarrito::UsuarioId).not_null())
                    .col(big_integer(ItemCarrito::ProductoId).not_null())
                    .col(string_len(ItemCarrito::ProductoNombre, 150).not_null())
                    .col(double(ItemCarrito::ProductoPrecio).not_null())
                    .col(integer(ItemCarrito::Cantidad).not_null())
                    .col(ColumnDef::new(ItemCarrito::ImageUrl).string_len(512).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_item_carrito_usuario_producto")
                    .table(ItemCarrito::Table)
                    .col(ItemCarrito::UsuarioId)
                    .col(ItemCarrito::ProductoId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ItemCarrito::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ItemCarrito {
    Table,
    Id,
    UsuarioId,
    ProductoId,
    ProductoNombre,
    ProductoPrecio,
    Cantidad,
    ImageUrl,
}
