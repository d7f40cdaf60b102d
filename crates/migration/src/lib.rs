//! One migrator per service store. Each service owns its tables and runs
//! only its own migrator at startup. Every migrator tracks its history in
//! its own table so several services can share one database.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_usuario;
mod m20240601_000002_create_animal;
mod m20240601_000003_create_producto;
mod m20240601_000004_create_item_carrito;
mod m20240601_000005_create_formulario_adopcion;
mod m20240601_000006_create_orden;

pub struct UsuariosMigrator;

#[async_trait::async_trait]
impl MigratorTrait for UsuariosMigrator {
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_usuarios").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000001_create_usuario::Migration)]
    }
}

pub struct AnimalesMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AnimalesMigrator {
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_animales").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000002_create_animal::Migration)]
    }
}

pub struct CatalogoMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CatalogoMigrator {
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_catalogo").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000003_create_producto::Migration)]
    }
}

pub struct CarritoMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CarritoMigrator {
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_carrito").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000004_create_item_carrito::Migration)]
    }
}

pub struct FormulariosMigrator;

#[async_trait::async_trait]
impl MigratorTrait for FormulariosMigrator {
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_formularios").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000005_create_formulario_adopcion::Migration)]
    }
}

pub struct OrdenesMigrator;

#[async_trait::async_trait]
impl MigratorTrait for OrdenesMigrator {
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_ordenes").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000006_create_orden::Migration)]
    }
}
