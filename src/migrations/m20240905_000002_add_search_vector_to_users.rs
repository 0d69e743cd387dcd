use sea_orm::{ConnectionTrait, DbBackend};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();
        db.execute_unprepared(
            r"
            ALTER TABLE auth_users
                ADD search_vector tsvector GENERATED ALWAYS AS (
                    to_tsvector('simple', coalesce(email, '')) || ' ' ||
                    to_tsvector('simple', coalesce(name, '')) || ' ' ||
                    to_tsvector('simple', coalesce(address, '')) || ' ' ||
                    to_tsvector('simple', coalesce(phone, ''))
                ) STORED;",
        )
        .await?;
        db.execute_unprepared("CREATE INDEX idx_search ON auth_users USING GIN(search_vector);")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE auth_users DROP COLUMN search_vector;")
            .await?;

        Ok(())
    }
}
