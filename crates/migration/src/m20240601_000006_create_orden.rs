//! Create `orden` and `item_orden` tables. Items cascade with their order.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orden::Table)
                    .if_not_exists()
                    .col(big_integer(Orden::Id).auto_increment().primary_key())
                    .col(big_integer(Orden::UsuarioId).not_null())
                    .col(double(Orden::Total).not_null())
                    .col(timestamp_with_time_zone(Orden::CreatedAt).not_null())
                    .col(string_len(Orden::Status, 20).not_null().default("Completada"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ItemOrden::Table)
                    .if_not_exists()
                    .col(big_integer(ItemOrden::Id).auto_increment().primary_key())
                    .col(big_integer(ItemOrden::OrdenId).not_null())
                    .col(big_integer(ItemOrden::ProductoId).not_null())
                    .col(string_len(ItemOrden::ProductoNombre, 150).not_null())
                    .col(double(ItemOrden::ProductoPrecio).not_null())
                    .col(integer(ItemOrden::Cantidad).not_null())
                    .col(ColumnDef::new(ItemOrden::ImageUrl).string_len(512).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_orden_orden")
                            .from(ItemOrden::Table, ItemOrden::OrdenId)
                            .to(Orden::Table, Orden::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orden_usuario")
                    .table(Orden::Table)
                    .col(Orden::UsuarioId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ItemOrden::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Orden::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Orden { Table, Id, UsuarioId, Total, CreatedAt, Status }

#[derive(DeriveIden)]
enum ItemOrden {
    Table,
    Id,
    OrdenId,
    ProductoId,
    ProductoNombre,
    ProductoPrecio,
    Cantidad,
    ImageUrl,
}
