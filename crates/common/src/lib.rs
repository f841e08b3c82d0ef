//! Shared building blocks for the song library workspace.

pub mod types;
pub mod utils;
