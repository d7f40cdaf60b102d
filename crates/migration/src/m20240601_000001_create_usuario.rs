//! Create `usuario` table. Email and phone are unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuario::Table)
                    .if_not_exists()
                    .col(big_integer(Usuario::Id).auto_increment().primary_key())
                    .col(string_len(Usuario::Nombre, 100).not_null())
                    .col(string_len(Usuario::Email, 255).unique_key().not_null())
                    .col(string_len(Usuario::Telefono, 20).unique_key().not_null())
                    .col(string_len(Usuario::Password, 255).not_null())
                    .col(boolean(Usuario::IsAdmin).not_null().default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Usuario::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Usuario { Table, Id, Nombre, Email, Telefono, Password, IsAdmin }
