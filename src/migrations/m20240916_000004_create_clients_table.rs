use sea_orm::{ConnectionTrait, DbBackend};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::UserId).big_integer())
                    .col(ColumnDef::new(Clients::Description).string_len(100))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clients_user_id")
                            .from(Clients::Table, Clients::UserId)
                            .to(AuthUsers::Table, AuthUsers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        if manager.get_database_backend() == DbBackend::Postgres {
            let db = manager.get_connection();
            db.execute_unprepared(
                r"
                ALTER TABLE clients
                    ADD search_vector tsvector GENERATED ALWAYS AS (
                        to_tsvector('simple', coalesce(user_id::text, '')) || ' ' ||
                        to_tsvector('simple', coalesce(description, ''))
                    ) STORED;",
            )
            .await?;
            db.execute_unprepared(
                "CREATE INDEX idx_clients_search ON clients USING GIN(search_vector);",
            )
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    UserId,
    Description,
}

#[derive(DeriveIden)]
enum AuthUsers {
    #[sea_orm(iden = "auth_users")]
    Table,
    Id,
}
