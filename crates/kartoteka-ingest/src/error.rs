//! Ingest-layer errors.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("folder not found: {path}")]
    FolderNotFound { path: PathBuf },

    #[error("cannot read folder {path}: {source}")]
    FolderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
