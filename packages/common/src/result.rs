use crate::error::ContentError;

/// Result alias for content decoding
pub type ContentResult<T> = Result<T, ContentError>;
