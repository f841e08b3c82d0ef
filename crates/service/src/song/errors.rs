use thiserror::Error;

/// Persistence failures, with "nothing matched" kept apart from real errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no rows matched")]
    NoRows,
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for RepositoryError {
    fn from(e: sea_orm::DbErr) -> Self {
        RepositoryError::Db(e.to_string())
    }
}

impl From<models::errors::ModelError> for RepositoryError {
    fn from(e: models::errors::ModelError) -> Self {
        RepositoryError::Db(e.to_string())
    }
}

/// Business errors for song workflows
#[derive(Debug, Error)]
pub enum SongError {
    #[error("song not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl SongError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            SongError::NotFound => 2001,
            SongError::Internal(_) => 2100,
        }
    }
}

impl From<RepositoryError> for SongError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NoRows => SongError::NotFound,
            RepositoryError::Db(msg) => SongError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rows_maps_to_not_found() {
        assert!(matches!(SongError::from(RepositoryError::NoRows), SongError::NotFound));
    }

    #[test]
    fn db_error_keeps_detail() {
        let e = SongError::from(RepositoryError::Db("connection reset".into()));
        match e {
            SongError::Internal(msg) => assert_eq!(msg, "connection reset"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
