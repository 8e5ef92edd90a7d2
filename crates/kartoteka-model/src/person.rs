//! Extracted demographic records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender code as used by the parish name dictionary.
///
/// The dictionary maps given names to `"M"` (male) or `"K"` (female);
/// the engine never infers gender any other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "K")]
    Female,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "K",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "M" => Ok(Self::Male),
            "K" => Ok(Self::Female),
            other => Err(format!("unknown gender code: {other:?}")),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One person accepted during extraction.
///
/// Created once per accepted sheet row; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Given name as read from the sheet.
    pub given_name: String,
    /// Diacritic-folded, lower-cased lookup key for the given name.
    pub given_name_key: String,
    pub surname: String,
    /// Current address (family-size bucketing key).
    pub address: String,
    /// Prior address, when the sheet records one.
    pub old_address: String,
    /// Age in whole years. Sentinel births carry the median-substituted
    /// value; `median_assigned` records that substitution.
    pub age: i64,
    pub median_assigned: bool,
    pub gender: Gender,
    /// Sheet the row came from.
    pub sheet: String,
    /// File the sheet came from.
    pub file: String,
}

/// Principal-couple marriage facts recovered from one sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarriageInfo {
    pub husband: Option<String>,
    pub wife: Option<String>,
    /// ISO `YYYY-MM-DD`, when a date cell survived normalization.
    pub marriage_date: Option<String>,
}

/// Couple category for jubilees and in-range marriage listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoupleKind {
    /// The sheet's principal couple.
    Spouses,
    /// The couple labeled as grandparents.
    Grandparents,
}

impl CoupleKind {
    /// Category tag as printed in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Spouses => "MAŁŻONKOWIE",
            Self::Grandparents => "DZIADKOWIE",
        }
    }
}

impl fmt::Display for CoupleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A marriage whose year falls inside the configured range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarriageRecord {
    pub surname: String,
    pub husband: String,
    pub wife: String,
    /// ISO marriage date.
    pub date: String,
    pub year: i32,
    pub address: String,
    pub old_address: String,
    pub kind: CoupleKind,
    pub file: String,
}

/// An upcoming wedding anniversary within the lookahead window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jubilee {
    /// Elapsed years; always one of the fixed milestone set.
    pub years: i32,
    /// This year's anniversary, ISO.
    pub date: String,
    /// Days from the reference date to the anniversary; never negative.
    pub days_until: i64,
    pub surname: String,
    pub husband: String,
    pub wife: String,
    pub old_address: String,
    pub kind: CoupleKind,
}
