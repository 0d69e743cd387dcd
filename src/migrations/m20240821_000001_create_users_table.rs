use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthUsers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuthUsers::Email).string_len(50).not_null())
                    .col(
                        ColumnDef::new(AuthUsers::Password)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AuthUsers::Name).string_len(50))
                    .col(ColumnDef::new(AuthUsers::Address).string_len(100))
                    .col(ColumnDef::new(AuthUsers::Phone).string_len(30))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthUsers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuthUsers {
    #[sea_orm(iden = "auth_users")]
    Table,
    Id,
    Email,
    Password,
    Name,
    Address,
    Phone,
}
