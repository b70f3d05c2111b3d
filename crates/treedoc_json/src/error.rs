use thiserror::Error;

use treedoc_scanner::{Bookmark, ScanError};

/// Structural failures of the extended-JSON grammar. All of these are fatal
/// to the current parse and propagate unchanged to the entry point; the
/// grammar leniencies (colonless keys, mixed separators, comments) are
/// resolved silently and never reported.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reached end of input while `{closing}` was still expected ({at})")]
    UnterminatedStructure { closing: char, at: Bookmark },
    #[error("map key `{key}` is not followed by a `:` or a value ({at})")]
    MissingKeySeparator { key: String, at: Bookmark },
    #[error("nesting exceeds the configured depth limit of {limit} ({at})")]
    DepthLimitExceeded { limit: usize, at: Bookmark },
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl ParseError {
    /// The source position at the point of failure.
    pub fn position(&self) -> Bookmark {
        match self {
            ParseError::UnterminatedStructure { at, .. } => *at,
            ParseError::MissingKeySeparator { at, .. } => *at,
            ParseError::DepthLimitExceeded { at, .. } => *at,
            ParseError::Scan(scan) => scan.at,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
