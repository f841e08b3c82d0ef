use axum::{
    http::Uri,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod songs;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn not_found(uri: Uri) -> ApiError {
    warn!(path = %uri.path(), "no route");
    ApiError::NotFound("Not found")
}

/// Build the full application router: song routes, health, and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Each route answers other methods with the JSON 405 envelope.
    // GET routes also serve HEAD unless it is claimed explicitly.
    let song_routes = Router::new()
        .route("/songs", get(songs::list).head(songs::method_not_allowed).fallback(songs::method_not_allowed))
        .route("/songs/info", get(songs::info).head(songs::method_not_allowed).fallback(songs::method_not_allowed))
        .route("/songs/add", post(songs::add).fallback(songs::method_not_allowed))
        .route("/songs/delete", delete(songs::remove).fallback(songs::method_not_allowed))
        .route("/songs/update", put(songs::update).fallback(songs::method_not_allowed))
        .route("/songs/text", get(songs::text).head(songs::method_not_allowed).fallback(songs::method_not_allowed));

    Router::new()
        .route("/health", get(health))
        .merge(song_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
