use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("directory file not found: {0}")]
    DirectoryNotFound(std::path::PathBuf),

    #[error("kindergarten not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A submission the backend did not accept.
///
/// The `Display` text is what the user sees; the detail is for logs only.
#[derive(Debug, Error)]
#[error("submission failed, please retry")]
pub struct SubmissionError {
    pub detail: String,
}

impl SubmissionError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
