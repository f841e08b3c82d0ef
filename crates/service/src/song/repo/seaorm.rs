use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use tracing::debug;

use models::song::{self, Column, Entity as SongEntity};

use crate::song::domain::{FilterParams, NewSong, Song, SongDetail, UpdateSong};
use crate::song::errors::RepositoryError;
use crate::song::repository::SongRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmSongRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSongRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl SongRepository for SeaOrmSongRepository {
    async fn save_song(&self, s: NewSong) -> Result<Song, RepositoryError> {
        let created = song::create(&self.db, &s.group, &s.song, &s.text, &s.release_date, &s.link).await?;
        Ok(created.into())
    }

    async fn delete_by_song_name_and_group(&self, song_name: &str, group: &str) -> Result<(), RepositoryError> {
        let res = SongEntity::delete_many()
            .filter(song::by_name_and_group(song_name, group))
            .exec(&self.db)
            .await?;
        debug!(rows_affected = res.rows_affected, "delete song");
        if res.rows_affected == 0 {
            return Err(RepositoryError::NoRows);
        }
        Ok(())
    }

    async fn update_song(&self, req: UpdateSong) -> Result<(), RepositoryError> {
        let res = SongEntity::update_many()
            .col_expr(Column::GroupName, Expr::value(req.new_group))
            .col_expr(Column::SongName, Expr::value(req.new_song_name))
            .col_expr(Column::Text, Expr::value(req.new_text))
            .col_expr(Column::ReleaseDate, Expr::value(req.new_release_date))
            .col_expr(Column::Link, Expr::value(req.new_link))
            .filter(song::by_name_and_group(&req.old_song_name, &req.old_group))
            .exec(&self.db)
            .await?;
        debug!(rows_affected = res.rows_affected, "update song");
        if res.rows_affected == 0 {
            return Err(RepositoryError::NoRows);
        }
        Ok(())
    }

    async fn find_songs(&self, params: &FilterParams) -> Result<Vec<Song>, RepositoryError> {
        let mut finder = SongEntity::find();
        if !params.group.is_empty() { finder = finder.filter(Column::GroupName.contains(params.group.as_str())); }
        if !params.song.is_empty() { finder = finder.filter(Column::SongName.contains(params.song.as_str())); }
        if !params.text.is_empty() { finder = finder.filter(Column::Text.contains(params.text.as_str())); }
        if !params.release_date.is_empty() { finder = finder.filter(Column::ReleaseDate.lt(params.release_date.as_str())); }
        let rows = finder
            .limit(params.page.limit)
            .offset(params.page.offset)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Song::from).collect())
    }

    async fn get_song_text_by_name_and_group(&self, song_name: &str, group: &str) -> Result<String, RepositoryError> {
        SongEntity::find()
            .select_only()
            .column(Column::Text)
            .filter(song::by_name_and_group(song_name, group))
            .into_tuple::<String>()
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NoRows)
    }

    async fn get_song_info(&self, group: &str, song_name: &str) -> Result<SongDetail, RepositoryError> {
        let row = SongEntity::find()
            .select_only()
            .columns([Column::ReleaseDate, Column::Text, Column::Link])
            .filter(song::by_name_and_group(song_name, group))
            .into_tuple::<(String, String, String)>()
            .one(&self.db)
            .await?;
        let (release_date, text, link) = row.ok_or(RepositoryError::NoRows)?;
        Ok(SongDetail { release_date, text, link })
    }
}
