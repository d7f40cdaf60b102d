//! Create `formulario_adopcion` table.
//! A partial unique index keeps at most one PENDIENTE form per (usuario, animal).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormularioAdopcion::Table)
                    .if_not_exists()
                    .col(big_integer(FormularioAdopcion::Id).auto_increment().primary_key())
                    .col(big_integer(FormularioAdopcion::UsuarioId).not_null())
                    .col(big_integer(FormularioAdopcion::AnimalId).not_null())
                    .col(string_len(FormularioAdopcion::Direccion, 255).not_null())
                    .col(string_len(FormularioAdopcion::TipoVivienda, 100).not_null())
                    .col(boolean(FormularioAdopcion::TieneMallasVentanas).not_null())
                    .col(boolean(FormularioAdopcion::ViveEnDepartamento).not_null())
                    .col(boolean(FormularioAdopcion::TieneOtrosAnimales).not_null())
                    .col(ColumnDef::new(FormularioAdopcion::MotivoAdopcion).text().null())
                    .col(string_len(FormularioAdopcion::Estado, 20).not_null().default("PENDIENTE"))
                    .col(ColumnDef::new(FormularioAdopcion::ComentariosAdmin).text().null())
                    .col(timestamp_with_time_zone(FormularioAdopcion::FechaCreacion).not_null())
                    .col(
                        ColumnDef::new(FormularioAdopcion::FechaRevision)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_formulario_usuario")
                    .table(FormularioAdopcion::Table)
                    .col(FormularioAdopcion::UsuarioId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_formulario_animal")
                    .table(FormularioAdopcion::Table)
                    .col(FormularioAdopcion::AnimalId)
                    .to_owned(),
            )
            .await?;

        // Index builder has no WHERE clause support for postgres partial indexes.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uniq_formulario_pendiente \
                 ON formulario_adopcion (usuario_id, animal_id) \
                 WHERE estado = 'PENDIENTE'",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormularioAdopcion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FormularioAdopcion {
    Table,
    Id,
    UsuarioId,
    AnimalId,
    Direccion,
    TipoVivienda,
    TieneMallasVentanas,
    ViveEnDepartamento,
    TieneOtrosAnimales,
    MotivoAdopcion,
    Estado,
    ComentariosAdmin,
    FechaCreacion,
    FechaRevision,
}
