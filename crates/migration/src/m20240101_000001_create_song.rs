//! Create `song` table.
//!
//! `id` and `created_at` are generated by the database so that an insert
//! returning the row yields the stored values.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Song::Table)
                    .if_not_exists()
                    .col(uuid(Song::Id).primary_key().default(Expr::cust("gen_random_uuid()")))
                    .col(string_len(Song::GroupName, 255).not_null())
                    .col(string_len(Song::SongName, 255).not_null())
                    .col(text(Song::Text).not_null().default(""))
                    .col(
                        timestamp_with_time_zone(Song::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(string_len(Song::ReleaseDate, 64).not_null().default(""))
                    .col(string_len(Song::Link, 1024).not_null().default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Song::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Song {
    Table,
    Id,
    GroupName,
    SongName,
    Text,
    CreatedAt,
    ReleaseDate,
    Link,
}
