//! Input layer for the kartoteka analyzer: folder discovery, CSV-backed
//! sheet grids, and the given-name dictionary.

pub mod csv_grid;
pub mod discovery;
pub mod error;
pub mod names;

pub use csv_grid::CsvGridSource;
pub use discovery::discover_record_files;
pub use error::{IngestError, Result};
pub use names::load_name_dictionary;
