//! Service layer for the song catalog.
//! - Separates business logic from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod pagination;
pub mod song;
#[cfg(test)]
pub mod test_support;
