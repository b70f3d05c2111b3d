use thiserror::Error;

use treedoc_scanner::ScanError;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

pub type CsvResult<T> = Result<T, CsvError>;
