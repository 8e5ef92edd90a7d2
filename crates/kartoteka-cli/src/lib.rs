//! CLI library components for the kartoteka analyzer.

pub mod analysis;
pub mod logging;
