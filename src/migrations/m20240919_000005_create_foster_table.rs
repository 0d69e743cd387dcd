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
                    .table(Foster::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Foster::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Foster::UserId).big_integer())
                    .col(ColumnDef::new(Foster::Description).string_len(100))
                    .col(ColumnDef::new(Foster::PetId).big_integer().not_null())
                    .col(ColumnDef::new(Foster::StartDate).date().not_null())
                    .col(ColumnDef::new(Foster::EndDate).date())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_foster_user_id")
                            .from(Foster::Table, Foster::UserId)
                            .to(AuthUsers::Table, AuthUsers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_foster_pet_id")
                            .from(Foster::Table, Foster::PetId)
                            .to(Pets::Table, Pets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        if manager.get_database_backend() == DbBackend::Postgres {
            let db = manager.get_connection();
            db.execute_unprepared(
                r"
                ALTER TABLE foster
                    ADD search_vector tsvector GENERATED ALWAYS AS (
                        to_tsvector('simple', coalesce(description, ''))
                    ) STORED;",
            )
            .await?;
            db.execute_unprepared(
                "CREATE INDEX idx_foster_search ON foster USING GIN(search_vector);",
            )
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Foster::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Foster {
    Table,
    Id,
    UserId,
    Description,
    PetId,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
enum AuthUsers {
    #[sea_orm(iden = "auth_users")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Pets {
    Table,
    Id,
}
