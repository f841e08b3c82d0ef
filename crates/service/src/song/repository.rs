use async_trait::async_trait;

use super::domain::{FilterParams, NewSong, Song, SongDetail, UpdateSong};
use super::errors::RepositoryError;

/// Repository abstraction for song persistence.
///
/// Every method is a single statement. Lookups and mutations that match no row
/// return [`RepositoryError::NoRows`].
#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn save_song(&self, song: NewSong) -> Result<Song, RepositoryError>;
    async fn delete_by_song_name_and_group(&self, song_name: &str, group: &str) -> Result<(), RepositoryError>;
    async fn update_song(&self, req: UpdateSong) -> Result<(), RepositoryError>;
    /// No ordering guarantee.
    async fn find_songs(&self, params: &FilterParams) -> Result<Vec<Song>, RepositoryError>;
    async fn get_song_text_by_name_and_group(&self, song_name: &str, group: &str) -> Result<String, RepositoryError>;
    async fn get_song_info(&self, group: &str, song_name: &str) -> Result<SongDetail, RepositoryError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;
    use uuid::Uuid;

    /// Keeps rows in insertion order and applies the same filter semantics as
    /// the SQL repository. `set_failing(true)` makes every call fail with a
    /// database error.
    #[derive(Default)]
    pub struct MockSongRepository {
        songs: Mutex<Vec<Song>>,
        failing: AtomicBool,
    }

    impl MockSongRepository {
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn snapshot(&self) -> Vec<Song> {
            self.rows().map(|rows| rows.clone()).unwrap_or_default()
        }

        fn rows(&self) -> Result<MutexGuard<'_, Vec<Song>>, RepositoryError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(RepositoryError::Db("mock database unavailable".into()));
            }
            self.songs.lock().map_err(|_| RepositoryError::Db("mock lock poisoned".into()))
        }
    }

    fn matches_key(s: &Song, song_name: &str, group: &str) -> bool {
        s.song_name == song_name && s.group_name == group
    }

    fn matches_filter(s: &Song, p: &FilterParams) -> bool {
        (p.group.is_empty() || s.group_name.contains(&p.group))
            && (p.song.is_empty() || s.song_name.contains(&p.song))
            && (p.text.is_empty() || s.text.contains(&p.text))
            && (p.release_date.is_empty() || s.release_date.as_str() < p.release_date.as_str())
    }

    #[async_trait]
    impl SongRepository for MockSongRepository {
        async fn save_song(&self, song: NewSong) -> Result<Song, RepositoryError> {
            let mut rows = self.rows()?;
            let saved = Song {
                id: Uuid::new_v4(),
                group_name: song.group,
                song_name: song.song,
                text: song.text,
                created_at: Utc::now().fixed_offset(),
                release_date: song.release_date,
                link: song.link,
            };
            rows.push(saved.clone());
            Ok(saved)
        }

        async fn delete_by_song_name_and_group(&self, song_name: &str, group: &str) -> Result<(), RepositoryError> {
            let mut rows = self.rows()?;
            let before = rows.len();
            rows.retain(|s| !matches_key(s, song_name, group));
            if rows.len() == before {
                return Err(RepositoryError::NoRows);
            }
            Ok(())
        }

        async fn update_song(&self, req: UpdateSong) -> Result<(), RepositoryError> {
            let mut rows = self.rows()?;
            let mut affected = 0;
            for s in rows.iter_mut().filter(|s| matches_key(s, &req.old_song_name, &req.old_group)) {
                s.group_name = req.new_group.clone();
                s.song_name = req.new_song_name.clone();
                s.text = req.new_text.clone();
                s.release_date = req.new_release_date.clone();
                s.link = req.new_link.clone();
                affected += 1;
            }
            if affected == 0 {
                return Err(RepositoryError::NoRows);
            }
            Ok(())
        }

        async fn find_songs(&self, params: &FilterParams) -> Result<Vec<Song>, RepositoryError> {
            let rows = self.rows()?;
            let offset = usize::try_from(params.page.offset).unwrap_or(usize::MAX);
            let limit = usize::try_from(params.page.limit).unwrap_or(usize::MAX);
            Ok(rows
                .iter()
                .filter(|s| matches_filter(s, params))
                .skip(offset)
                .take(limit)
                .cloned()
                .collect())
        }

        async fn get_song_text_by_name_and_group(&self, song_name: &str, group: &str) -> Result<String, RepositoryError> {
            let rows = self.rows()?;
            rows.iter()
                .find(|s| matches_key(s, song_name, group))
                .map(|s| s.text.clone())
                .ok_or(RepositoryError::NoRows)
        }

        async fn get_song_info(&self, group: &str, song_name: &str) -> Result<SongDetail, RepositoryError> {
            let rows = self.rows()?;
            rows.iter()
                .find(|s| matches_key(s, song_name, group))
                .map(|s| SongDetail { release_date: s.release_date.clone(), text: s.text.clone(), link: s.link.clone() })
                .ok_or(RepositoryError::NoRows)
        }
    }
}
