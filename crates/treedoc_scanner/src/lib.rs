mod error;
mod escape;
mod scanner;

pub use error::{ScanError, ScanResult};
pub use escape::dialect_escape_sequence;
pub use scanner::{Bookmark, Scanner, SourceText};
