//! Song catalog module: three-layer architecture (domain, repository, service).
//!
//! Handlers in the server crate only talk to [`SongService`]; persistence stays
//! behind [`repository::SongRepository`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod service;
pub mod verses;

pub use errors::{RepositoryError, SongError};
pub use service::SongService;
