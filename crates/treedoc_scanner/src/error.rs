use thiserror::Error;

use crate::Bookmark;

/// A failure raised by the scanner itself, carrying the cursor position at
/// the point of failure. Parsers layered on top wrap this in their own error
/// types for structural failures.
#[derive(Debug, Error)]
#[error("{message} ({at})")]
pub struct ScanError {
    pub message: String,
    pub at: Bookmark,
}

pub type ScanResult<T> = Result<T, ScanError>;
