use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pagination::Pagination;

/// Catalog entry as exposed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: Uuid,
    pub group_name: String,
    pub song_name: String,
    pub text: String,
    pub created_at: DateTime<FixedOffset>,
    pub release_date: String,
    pub link: String,
}

impl From<models::song::Model> for Song {
    fn from(m: models::song::Model) -> Self {
        Self {
            id: m.id,
            group_name: m.group_name,
            song_name: m.song_name,
            text: m.text,
            created_at: m.created_at,
            release_date: m.release_date,
            link: m.link,
        }
    }
}

/// Input for adding a song. Missing fields are empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSong {
    pub group: String,
    pub song: String,
    pub text: String,
    pub release_date: String,
    pub link: String,
}

/// Full rewrite of the song addressed by `old_song_name` + `old_group`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSong {
    pub old_song_name: String,
    pub old_group: String,
    pub new_group: String,
    pub new_song_name: String,
    pub new_text: String,
    pub new_release_date: String,
    pub new_link: String,
}

/// Listing filter. Empty strings leave a field unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    /// substring of the group name
    pub group: String,
    /// substring of the song name
    pub song: String,
    /// substring of the lyrics
    pub text: String,
    /// exclusive upper bound on `release_date` (string comparison)
    pub release_date: String,
    pub page: Pagination,
}

/// One page of verses of a song's lyrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongText {
    pub song_name: String,
    pub group: String,
    pub verses: Vec<String>,
    pub limit: u64,
    pub offset: u64,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetail {
    pub release_date: String,
    pub text: String,
    pub link: String,
}
