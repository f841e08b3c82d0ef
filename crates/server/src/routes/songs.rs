use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{Method, StatusCode, Uri},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use service::pagination::Pagination;
use service::song::domain::{FilterParams, NewSong, Song, SongDetail, SongText, UpdateSong};
use tracing::{debug, info, warn};
use utoipa::IntoParams;

use crate::{errors::ApiError, response::MessageResponse, state::ServerState};

const MISSING_NAME_AND_GROUP: &str = "Missing query parameter: song_name, group";

/// Raw query string pairs in order; a repeated key keeps its first value.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    fn first(&self, key: &str) -> Option<String> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }
}

type RawQuery = Result<Query<QueryPairs>, QueryRejection>;

/// Decode a JSON body regardless of its Content-Type header.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Substring of the group name
    pub group: Option<String>,
    /// Substring of the song name
    pub song: Option<String>,
    /// Substring of the lyrics
    pub text: Option<String>,
    /// Only songs released strictly before this value
    pub release_date: Option<String>,
    /// Songs per page (default 10)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// Songs to skip (default 0)
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
}

#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SongKeyQuery {
    pub song_name: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TextQuery {
    pub song_name: Option<String>,
    pub group: Option<String>,
    /// Verses per page (default 5)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// Verses to skip (default 0)
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
}

impl From<QueryPairs> for ListQuery {
    fn from(q: QueryPairs) -> Self {
        Self {
            group: q.first("group"),
            song: q.first("song"),
            text: q.first("text"),
            release_date: q.first("release_date"),
            limit: q.first("limit"),
            offset: q.first("offset"),
        }
    }
}

impl From<QueryPairs> for SongKeyQuery {
    fn from(q: QueryPairs) -> Self {
        Self { song_name: q.first("song_name"), group: q.first("group") }
    }
}

impl From<QueryPairs> for TextQuery {
    fn from(q: QueryPairs) -> Self {
        Self {
            song_name: q.first("song_name"),
            group: q.first("group"),
            limit: q.first("limit"),
            offset: q.first("offset"),
        }
    }
}

/// Both halves of the natural key, non-empty, or 400.
fn require_key(song_name: Option<String>, group: Option<String>) -> Result<(String, String), ApiError> {
    match (song_name.filter(|s| !s.is_empty()), group.filter(|g| !g.is_empty())) {
        (Some(song_name), Some(group)) => Ok((song_name, group)),
        _ => {
            warn!("{}", MISSING_NAME_AND_GROUP);
            Err(ApiError::BadRequest(MISSING_NAME_AND_GROUP.into()))
        }
    }
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    warn!(%method, path = %uri.path(), "method not allowed");
    ApiError::MethodNotAllowed
}

#[utoipa::path(
    get, path = "/songs", tag = "songs",
    params(ListQuery),
    responses(
        (status = 200, description = "Songs matching the filter", body = [crate::openapi::SongDoc]),
        (status = 400, description = "Invalid query string", body = crate::openapi::MessageDoc),
        (status = 405, description = "Method not allowed", body = crate::openapi::MessageDoc),
        (status = 500, description = "Failed to fetch songs", body = crate::openapi::MessageDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: RawQuery,
) -> Result<Json<Vec<Song>>, ApiError> {
    let q = ListQuery::from(query?.0);
    let params = FilterParams {
        group: q.group.unwrap_or_default(),
        song: q.song.unwrap_or_default(),
        text: q.text.unwrap_or_default(),
        release_date: q.release_date.unwrap_or_default(),
        page: Pagination::from_query(q.limit.as_deref(), q.offset.as_deref(), state.api.default_song_limit),
    };
    debug!(?params, "filter and pagination params");

    let songs = state
        .songs
        .get_songs(&params)
        .await
        .map_err(|e| ApiError::failed(e, "Failed to fetch songs"))?;
    info!(count = songs.len(), "list songs");
    Ok(Json(songs))
}

#[utoipa::path(
    get, path = "/songs/info", tag = "songs",
    params(SongKeyQuery),
    responses(
        (status = 200, description = "Release date, text and link", body = crate::openapi::SongDetailDoc),
        (status = 400, description = "Missing query parameters", body = crate::openapi::MessageDoc),
        (status = 404, description = "Song not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Failed to fetch song info", body = crate::openapi::MessageDoc)
    )
)]
pub async fn info(
    State(state): State<ServerState>,
    query: RawQuery,
) -> Result<Json<SongDetail>, ApiError> {
    let q = SongKeyQuery::from(query?.0);
    let (song_name, group) = require_key(q.song_name, q.group)?;

    let detail = state
        .songs
        .get_song_info(&group, &song_name)
        .await
        .map_err(|e| ApiError::from_song(e, "Song not found", "Failed to fetch song info"))?;
    Ok(Json(detail))
}

#[utoipa::path(
    post, path = "/songs/add", tag = "songs",
    request_body = crate::openapi::AddSongRequestDoc,
    responses(
        (status = 201, description = "Song added successfully", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid request body", body = crate::openapi::MessageDoc),
        (status = 500, description = "Failed to save song to database", body = crate::openapi::MessageDoc)
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<MessageResponse, ApiError> {
    let input: NewSong = decode_body(&body)?;
    debug!(?input, "add song request");

    state
        .songs
        .add_song(input)
        .await
        .map_err(|e| ApiError::failed(e, "Failed to save song to database"))?;
    Ok(MessageResponse::new(StatusCode::CREATED, "Song added successfully"))
}

#[utoipa::path(
    delete, path = "/songs/delete", tag = "songs",
    params(SongKeyQuery),
    responses(
        (status = 200, description = "Song deleted successfully", body = crate::openapi::MessageDoc),
        (status = 400, description = "Missing query parameters", body = crate::openapi::MessageDoc),
        (status = 404, description = "Song not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Failed to delete song", body = crate::openapi::MessageDoc)
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    query: RawQuery,
) -> Result<MessageResponse, ApiError> {
    let q = SongKeyQuery::from(query?.0);
    let (song_name, group) = require_key(q.song_name, q.group)?;

    state
        .songs
        .delete_song_by_name_and_group(&song_name, &group)
        .await
        .map_err(|e| ApiError::from_song(e, "Song not found", "Failed to delete song"))?;
    Ok(MessageResponse::new(StatusCode::OK, "Song deleted successfully"))
}

#[utoipa::path(
    put, path = "/songs/update", tag = "songs",
    request_body = crate::openapi::UpdateSongRequestDoc,
    responses(
        (status = 200, description = "Song updated successfully", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid request body", body = crate::openapi::MessageDoc),
        (status = 404, description = "Song not found for update", body = crate::openapi::MessageDoc),
        (status = 500, description = "Failed to update song", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<MessageResponse, ApiError> {
    let req: UpdateSong = decode_body(&body)?;
    debug!(?req, "update song request");

    state
        .songs
        .update_song(req)
        .await
        .map_err(|e| ApiError::from_song(e, "Song not found for update", "Failed to update song"))?;
    Ok(MessageResponse::new(StatusCode::OK, "Song updated successfully"))
}

#[utoipa::path(
    get, path = "/songs/text", tag = "songs",
    params(TextQuery),
    responses(
        (status = 200, description = "One page of verses", body = crate::openapi::SongTextDoc),
        (status = 400, description = "Missing query parameters", body = crate::openapi::MessageDoc),
        (status = 404, description = "Song not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Failed to fetch song text", body = crate::openapi::MessageDoc)
    )
)]
pub async fn text(
    State(state): State<ServerState>,
    query: RawQuery,
) -> Result<Json<SongText>, ApiError> {
    let q = TextQuery::from(query?.0);
    let (song_name, group) = require_key(q.song_name, q.group)?;
    let page = Pagination::from_query(q.limit.as_deref(), q.offset.as_deref(), state.api.default_verse_limit);

    let text = state
        .songs
        .get_song_text(&song_name, &group, page)
        .await
        .map_err(|e| ApiError::from_song(e, "Song not found", "Failed to fetch song text"))?;
    Ok(Json(text))
}
