//! Create `producto` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Producto::Table)
                    .if_not_exists()
                    .col(big_integer(Producto::Id).auto_increment().primary_key())
                    .col(string_len(Producto::Nombre, 150).not_null())
                    .col(text(Producto::Descripcion).not_null())
                    .col(double(Producto::Precio).not_null())
                    .col(ColumnDef::new(Producto::Imagen).blob().null())
                    .col(string_len(Producto::Categoria, 100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_producto_categoria")
                    .table(Producto::Table)
                    .col(Producto::Categoria)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Producto::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Producto { Table, Id, Nombre, Descripcion, Precio, Imagen, Categoria }
