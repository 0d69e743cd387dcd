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
                    .table(Pets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pets::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Pets::Species).string_len(50))
                    .col(ColumnDef::new(Pets::Gender).string_len(5))
                    .col(ColumnDef::new(Pets::Age).float())
                    .col(ColumnDef::new(Pets::Description).string_len(100))
                    .to_owned(),
            )
            .await?;

        if manager.get_database_backend() == DbBackend::Postgres {
            let db = manager.get_connection();
            db.execute_unprepared(
                r"
                ALTER TABLE pets
                    ADD search_vector tsvector GENERATED ALWAYS AS (
                        to_tsvector('simple', coalesce(name, '')) || ' ' ||
                        to_tsvector('simple', coalesce(species, '')) || ' ' ||
                        to_tsvector('simple', coalesce(gender, '')) || ' ' ||
                        to_tsvector('simple', coalesce(age::text, '')) || ' ' ||
                        to_tsvector('simple', coalesce(description, ''))
                    ) STORED;",
            )
            .await?;
            db.execute_unprepared("CREATE INDEX idx_pet_search ON pets USING GIN(search_vector);")
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pets {
    Table,
    Id,
    Name,
    Species,
    Gender,
    Age,
    Description,
}
