use std::io;

/// Failures while reading or writing bin and polygon files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("duplicate bin id {0:?}")]
    DuplicateBinId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
