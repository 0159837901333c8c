//! Tempo day colors and the upstream color normalizer
//!
//! EDF Tempo assigns every calendar day one of three colors (blue, white,
//! red) with a distinct price per color and daily period. The upstream API
//! reports the color both as a French textual label and as a numeric code;
//! this module is the single chokepoint that maps either representation to
//! the canonical [`TempoColor`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical Tempo day color.
///
/// `Unknown` is both an explicit upstream state (e.g. tomorrow's color
/// before the daily publication) and the local fallback for unrecognized
/// or missing data. It is never used to mean "not yet loaded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TempoColor {
    Blue,
    White,
    Red,
    Unknown,
}

impl TempoColor {
    /// Map an upstream French color label to a color.
    ///
    /// Case-insensitive; anything unrecognized (including the empty
    /// string) maps to `Unknown`. Total, never fails.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "bleu" => Self::Blue,
            "blanc" => Self::White,
            "rouge" => Self::Red,
            _ => Self::Unknown,
        }
    }

    /// Map an upstream numeric color code to a color.
    ///
    /// 1 is blue, 2 is white, 3 is red; any other code maps to `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Blue,
            2 => Self::White,
            3 => Self::Red,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "BLUE",
            Self::White => "WHITE",
            Self::Red => "RED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Which single-day record to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhichDay {
    Today,
    Tomorrow,
}

impl WhichDay {
    /// Upstream path segment for this day.
    pub fn as_path(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        }
    }
}

/// One day's realized or forecast tariff color. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub color: TempoColor,
}
