use serde::{Deserialize, Serialize};

/// Liveness payload returned by `GET /health`.
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
