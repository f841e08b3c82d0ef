use std::sync::Arc;

use configs::ApiConfig;
use service::song::{repository::SongRepository, SongService};

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub songs: Arc<SongService<dyn SongRepository>>,
    pub api: ApiConfig,
}

impl ServerState {
    pub fn new(repo: Arc<dyn SongRepository>, api: ApiConfig) -> Self {
        Self { songs: Arc::new(SongService::new(repo)), api }
    }
}
