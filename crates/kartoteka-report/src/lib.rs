//! Result sinks for the kartoteka analyzer: the printable statistics
//! block and per-result CSV exports.

pub mod csv;
pub mod error;
pub mod text;

pub use error::{ReportError, Result};
pub use text::format_statistics;
