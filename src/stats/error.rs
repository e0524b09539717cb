use std::io;

/// Failures at the persistence seam.
///
/// Only storage reads and writes can fail. The store itself logs these and
/// keeps running on its in-memory copy.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(String),
}
