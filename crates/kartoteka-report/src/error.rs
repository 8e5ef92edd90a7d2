//! Report-layer errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot write CSV report: {0}")]
    Csv(#[from] csv::Error),
}
