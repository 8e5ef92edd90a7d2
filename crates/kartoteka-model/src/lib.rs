//! Shared data model for the kartoteka analyzer: typed sheet grids,
//! extracted person and marriage records, run options and issues.

pub mod cell;
pub mod error;
pub mod issue;
pub mod names;
pub mod options;
pub mod person;

pub use cell::{CellValue, Grid, NamedGrid};
pub use error::{KartotekaError, Result};
pub use issue::{Issue, IssueSeverity};
pub use names::NameDictionary;
pub use options::AnalysisOptions;
pub use person::{CoupleKind, Gender, Jubilee, MarriageInfo, MarriageRecord, PersonRecord};
