//! Programmatic schema migrations, mirrored by the entities in
//! `crate::entities`. The `search_vector` columns and their GIN indexes are
//! Postgres-only; other backends simply skip them and rely on the LIKE
//! search fallback.

use sea_orm_migration::prelude::*;

mod m20240821_000001_create_users_table;
mod m20240905_000002_add_search_vector_to_users;
mod m20240911_000003_create_pets_table;
mod m20240916_000004_create_clients_table;
mod m20240919_000005_create_foster_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240821_000001_create_users_table::Migration),
            Box::new(m20240905_000002_add_search_vector_to_users::Migration),
            Box::new(m20240911_000003_create_pets_table::Migration),
            Box::new(m20240916_000004_create_clients_table::Migration),
            Box::new(m20240919_000005_create_foster_table::Migration),
        ]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("migrations_list").into_iden()
    }
}
