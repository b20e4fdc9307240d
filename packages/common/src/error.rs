use thiserror::Error;

/// Errors raised while decoding a content tree
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Content must be a sequence of nodes")]
    NotASequence,
}
