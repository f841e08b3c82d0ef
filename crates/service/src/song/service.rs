use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{FilterParams, NewSong, Song, SongDetail, SongText, UpdateSong};
use super::errors::SongError;
use super::repository::SongRepository;
use super::verses::split_verses;
use crate::pagination::Pagination;

/// Song business service independent of web framework.
///
/// Translates the repository's "no rows" signal into [`SongError::NotFound`];
/// every other repository failure surfaces as [`SongError::Internal`].
pub struct SongService<R: SongRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: SongRepository + ?Sized> SongService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Store a new song as given; the store assigns `id` and `created_at`.
    ///
    /// # Examples
    /// ```
    /// use service::song::{domain::NewSong, repository::mock::MockSongRepository, SongService};
    /// use std::sync::Arc;
    /// let svc = SongService::new(Arc::new(MockSongRepository::default()));
    /// let input = NewSong { group: "Muse".into(), song: "Supermassive Black Hole".into(), ..Default::default() };
    /// let song = tokio_test::block_on(svc.add_song(input)).unwrap();
    /// assert_eq!(song.group_name, "Muse");
    /// ```
    #[instrument(skip(self, input), fields(group = %input.group, song = %input.song))]
    pub async fn add_song(&self, input: NewSong) -> Result<Song, SongError> {
        let song = self.repo.save_song(input).await?;
        info!(id = %song.id, "song_added");
        Ok(song)
    }

    #[instrument(skip(self))]
    pub async fn delete_song_by_name_and_group(&self, song_name: &str, group: &str) -> Result<(), SongError> {
        self.repo
            .delete_by_song_name_and_group(song_name, group)
            .await
            .map_err(|e| log_failure(e.into(), "delete"))?;
        info!("song_deleted");
        Ok(())
    }

    /// Rewrite all five mutable fields of the song matching the old name and group.
    #[instrument(skip(self, req), fields(old_song_name = %req.old_song_name, old_group = %req.old_group))]
    pub async fn update_song(&self, req: UpdateSong) -> Result<(), SongError> {
        self.repo
            .update_song(req)
            .await
            .map_err(|e| log_failure(e.into(), "update"))?;
        info!("song_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_songs(&self, params: &FilterParams) -> Result<Vec<Song>, SongError> {
        Ok(self.repo.find_songs(params).await?)
    }

    /// One page of verses plus the total verse count.
    ///
    /// An offset past the last verse yields an empty page, not an error.
    #[instrument(skip(self))]
    pub async fn get_song_text(&self, song_name: &str, group: &str, page: Pagination) -> Result<SongText, SongError> {
        let text = self
            .repo
            .get_song_text_by_name_and_group(song_name, group)
            .await
            .map_err(|e| log_failure(e.into(), "get_text"))?;

        let verses = split_verses(&text);
        let total = verses.len();
        let verses: Vec<String> = verses[page.window(total)].iter().map(|v| v.to_string()).collect();

        info!(returned = verses.len(), total, "song_text_page");
        Ok(SongText {
            song_name: song_name.to_string(),
            group: group.to_string(),
            verses,
            limit: page.limit,
            offset: page.offset,
            total,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_song_info(&self, group: &str, song_name: &str) -> Result<SongDetail, SongError> {
        Ok(self.repo.get_song_info(group, song_name).await?)
    }
}

fn log_failure(e: SongError, op: &'static str) -> SongError {
    match &e {
        SongError::NotFound => info!(op, "song_not_found"),
        SongError::Internal(msg) => warn!(op, error = %msg, code = e.code(), "song_operation_failed"),
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::repository::mock::MockSongRepository;

    async fn service_with(texts: &[(&str, &str, &str)]) -> (Arc<MockSongRepository>, SongService<MockSongRepository>) {
        let repo = Arc::new(MockSongRepository::default());
        let svc = SongService::new(Arc::clone(&repo));
        for (group, song, text) in texts {
            let input = NewSong { group: group.to_string(), song: song.to_string(), text: text.to_string(), ..Default::default() };
            svc.add_song(input).await.unwrap();
        }
        (repo, svc)
    }

    const ABCD: &str = "a\\n\\nb\\n\\nc\\n\\nd";

    #[tokio::test]
    async fn add_then_info_returns_same_fields() {
        let (_, svc) = service_with(&[]).await;
        svc.add_song(NewSong {
            group: "Muse".into(),
            song: "Uprising".into(),
            text: "They will not force us".into(),
            release_date: "07.09.2009".into(),
            link: "https://example.com/uprising".into(),
        })
        .await
        .unwrap();

        let info = svc.get_song_info("Muse", "Uprising").await.unwrap();
        assert_eq!(info.release_date, "07.09.2009");
        assert_eq!(info.text, "They will not force us");
        assert_eq!(info.link, "https://example.com/uprising");
    }

    #[tokio::test]
    async fn delete_missing_song_is_not_found() {
        let (_, svc) = service_with(&[]).await;
        let err = svc.delete_song_by_name_and_group("Nope", "Nobody").await.unwrap_err();
        assert!(matches!(err, SongError::NotFound));
    }

    #[tokio::test]
    async fn delete_existing_song_removes_it() {
        let (repo, svc) = service_with(&[("Muse", "Uprising", "")]).await;
        svc.delete_song_by_name_and_group("Uprising", "Muse").await.unwrap();
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn update_missing_song_is_not_found() {
        let (_, svc) = service_with(&[]).await;
        let req = UpdateSong { old_song_name: "Nope".into(), old_group: "Nobody".into(), ..Default::default() };
        assert!(matches!(svc.update_song(req).await, Err(SongError::NotFound)));
    }

    #[tokio::test]
    async fn update_replaces_all_mutable_fields() {
        let (repo, svc) = service_with(&[("Muse", "Uprising", "old text")]).await;
        let before = repo.snapshot()[0].clone();
        svc.update_song(UpdateSong {
            old_song_name: "Uprising".into(),
            old_group: "Muse".into(),
            new_group: "MUSE".into(),
            new_song_name: "Uprising (Live)".into(),
            new_text: "new text".into(),
            new_release_date: "2010-01-01".into(),
            new_link: "https://example.com/live".into(),
        })
        .await
        .unwrap();

        let after = repo.snapshot()[0].clone();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.group_name, "MUSE");
        assert_eq!(after.song_name, "Uprising (Live)");
        assert_eq!(after.text, "new text");
        assert_eq!(after.release_date, "2010-01-01");
        assert_eq!(after.link, "https://example.com/live");
    }

    #[tokio::test]
    async fn song_text_pages_verses() {
        let (_, svc) = service_with(&[("G", "S", ABCD)]).await;
        let page = svc.get_song_text("S", "G", Pagination::new(2, 1)).await.unwrap();
        assert_eq!(page.verses, vec!["b", "c"]);
        assert_eq!(page.total, 4);
        assert_eq!(page.limit, 2);
        assert_eq!(page.offset, 1);
    }

    #[tokio::test]
    async fn song_text_offset_past_end_is_empty() {
        let (_, svc) = service_with(&[("G", "S", ABCD)]).await;
        let page = svc.get_song_text("S", "G", Pagination::new(2, 10)).await.unwrap();
        assert!(page.verses.is_empty());
        assert_eq!(page.total, 4);
        assert_eq!(page.offset, 10);
    }

    #[tokio::test]
    async fn song_text_missing_song_is_not_found() {
        let (_, svc) = service_with(&[]).await;
        let err = svc.get_song_text("S", "G", Pagination::new(5, 0)).await.unwrap_err();
        assert!(matches!(err, SongError::NotFound));
    }

    #[tokio::test]
    async fn get_songs_filters_release_date_strictly() {
        let (repo, svc) = service_with(&[]).await;
        for (name, date) in [("old", "1999-12-31"), ("edge", "2000-01-01"), ("new", "2005-06-01")] {
            svc.add_song(NewSong { group: "G".into(), song: name.into(), release_date: date.into(), ..Default::default() })
                .await
                .unwrap();
        }
        assert_eq!(repo.snapshot().len(), 3);

        let params = FilterParams {
            group: String::new(),
            song: String::new(),
            text: String::new(),
            release_date: "2000-01-01".into(),
            page: Pagination::new(10, 0),
        };
        let songs = svc.get_songs(&params).await.unwrap();
        let names: Vec<_> = songs.iter().map(|s| s.song_name.as_str()).collect();
        assert_eq!(names, vec!["old"]);

        let all = FilterParams { release_date: String::new(), ..params };
        assert_eq!(svc.get_songs(&all).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn repository_failure_is_internal() {
        let (repo, svc) = service_with(&[("G", "S", "x")]).await;
        repo.set_failing(true);
        assert!(matches!(svc.delete_song_by_name_and_group("S", "G").await, Err(SongError::Internal(_))));
        assert!(matches!(svc.get_song_text("S", "G", Pagination::new(1, 0)).await, Err(SongError::Internal(_))));
        assert!(matches!(svc.get_song_info("G", "S").await, Err(SongError::Internal(_))));
    }
}
