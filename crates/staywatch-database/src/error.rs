//! Store-level errors.

use thiserror::Error;

use staywatch_core::error::{AppError, ErrorKind};

/// Errors raised by notification stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The MongoDB driver reported a failure.
    #[error("MongoDB driver error: {0}")]
    Driver(#[from] mongodb::error::Error),
    /// A seed file could not be read.
    #[error("Failed to read seed file '{path}': {source}")]
    SeedIo {
        /// Path of the seed file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A seed file did not contain a JSON array of documents.
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        AppError::with_source(ErrorKind::Database, message, err)
    }
}
