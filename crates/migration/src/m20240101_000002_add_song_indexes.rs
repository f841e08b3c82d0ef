use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_song::Song;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // (song_name, group_name) is the lookup key; duplicates are allowed
        manager
            .create_index(
                Index::create()
                    .name("idx_song_name_group")
                    .table(Song::Table)
                    .col(Song::SongName)
                    .col(Song::GroupName)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_song_name_group").table(Song::Table).to_owned())
            .await
    }
}
