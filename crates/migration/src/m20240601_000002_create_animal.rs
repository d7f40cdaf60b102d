//! Create `animal` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Animal::Table)
                    .if_not_exists()
                    .col(big_integer(Animal::Id).auto_increment().primary_key())
                    .col(string_len(Animal::Nombre, 100).not_null())
                    .col(string_len(Animal::Especie, 50).not_null())
                    .col(string_len(Animal::Raza, 100).not_null())
                    .col(string_len(Animal::Edad, 50).not_null())
                    .col(text(Animal::Descripcion).not_null())
                    .col(ColumnDef::new(Animal::Imagen).blob().null())
                    .col(boolean(Animal::IsAdoptado).not_null().default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_animal_especie")
                    .table(Animal::Table)
                    .col(Animal::Especie)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Animal::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Animal { Table, Id, Nombre, Especie, Raza, Edad, Descripcion, Imagen, IsAdoptado }
