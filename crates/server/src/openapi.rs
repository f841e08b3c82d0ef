use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String, pub status: u16 }

#[derive(ToSchema)]
pub struct SongDoc {
    #[schema(format = "uuid")]
    pub id: String,
    pub group_name: String,
    pub song_name: String,
    pub text: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    pub release_date: String,
    pub link: String,
}

#[derive(ToSchema)]
pub struct SongDetailDoc { pub release_date: String, pub text: String, pub link: String }

#[derive(ToSchema)]
pub struct SongTextDoc {
    pub song_name: String,
    pub group: String,
    pub verses: Vec<String>,
    pub limit: u64,
    pub offset: u64,
    pub total: u64,
}

#[derive(ToSchema)]
pub struct AddSongRequestDoc {
    pub group: String,
    pub song: String,
    pub text: String,
    pub release_date: String,
    pub link: String,
}

#[derive(ToSchema)]
pub struct UpdateSongRequestDoc {
    pub old_song_name: String,
    pub old_group: String,
    pub new_group: String,
    pub new_song_name: String,
    pub new_text: String,
    pub new_release_date: String,
    pub new_link: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Song library", description = "Catalog of songs with filtering and verse pagination"),
    paths(
        crate::routes::health,
        crate::routes::songs::list,
        crate::routes::songs::info,
        crate::routes::songs::add,
        crate::routes::songs::remove,
        crate::routes::songs::update,
        crate::routes::songs::text,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            SongDoc,
            SongDetailDoc,
            SongTextDoc,
            AddSongRequestDoc,
            UpdateSongRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "songs")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_song_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in ["/health", "/songs", "/songs/info", "/songs/add", "/songs/delete", "/songs/update", "/songs/text"] {
            assert!(paths.contains(&p), "missing {p}");
        }
    }
}
