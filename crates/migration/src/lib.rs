//! Migrator for the song catalog schema.
//! Indexes are applied after the tables they reference.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_song;
mod m20240101_000002_add_song_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_song::Migration),
            Box::new(m20240101_000002_add_song_indexes::Migration),
        ]
    }
}
