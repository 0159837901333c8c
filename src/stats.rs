//! Annual quota usage statistics
//!
//! Tempo allots a fixed number of days per color per season (September
//! through August): 300 blue, 43 white, 22 red. Upstream reports how many
//! of each have been consumed and how many remain; the totals here are
//! always the fixed quotas, never whatever upstream claims.

use serde::Serialize;

/// Fixed annual day quotas per color.
pub const BLUE_DAYS_PER_YEAR: u32 = 300;
pub const WHITE_DAYS_PER_YEAR: u32 = 43;
pub const RED_DAYS_PER_YEAR: u32 = 22;

/// Used/remaining/total triple for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorUsage {
    pub used: u32,
    pub remaining: u32,
    pub total: u32,
}

/// Year-to-date quota usage for the current Tempo season.
///
/// `used + remaining` is upstream-reported and not reconciled locally; it
/// may drift from `total` around the daily publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageStats {
    /// Upstream label for the billing period, e.g. "2025-2026".
    pub period: String,
    pub blue: ColorUsage,
    pub white: ColorUsage,
    pub red: ColorUsage,
}

/// Raw per-color counters as reported by the stats endpoint.
#[derive(Debug, Clone)]
pub struct RawUsage {
    pub period: String,
    pub blue_used: u32,
    pub blue_remaining: u32,
    pub white_used: u32,
    pub white_remaining: u32,
    pub red_used: u32,
    pub red_remaining: u32,
}

/// Map upstream counters into [`UsageStats`]. Pure and total: counters are
/// copied verbatim, totals are substituted with the fixed quotas.
pub fn map_stats(raw: &RawUsage) -> UsageStats {
    UsageStats {
        period: raw.period.clone(),
        blue: ColorUsage {
            used: raw.blue_used,
            remaining: raw.blue_remaining,
            total: BLUE_DAYS_PER_YEAR,
        },
        white: ColorUsage {
            used: raw.white_used,
            remaining: raw.white_remaining,
            total: WHITE_DAYS_PER_YEAR,
        },
        red: ColorUsage {
            used: raw.red_used,
            remaining: raw.red_remaining,
            total: RED_DAYS_PER_YEAR,
        },
    }
}
