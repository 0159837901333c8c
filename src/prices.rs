//! Tariff prices and fixed reference plans
//!
//! The six Tempo unit prices (color x daily period) come from upstream and
//! change once per regulated pricing period. The two flat-rate reference
//! plans (Base, HC/HP) are process-wide constants taken from the current
//! EDF "tarif bleu" grid; they are compared against, never fetched.

use chrono::NaiveDate;
use serde::Serialize;

use crate::tempo::TempoColor;

/// Flat Base option unit price, EUR/kWh TTC (6 kVA).
pub const BLUE_BASE_PRICE: f64 = 0.194;
/// HC/HP option peak-hours unit price, EUR/kWh TTC.
pub const BLUE_HP_PRICE: f64 = 0.2081;
/// HC/HP option off-peak-hours unit price, EUR/kWh TTC.
pub const BLUE_HC_PRICE: f64 = 0.1579;

/// Peak window 06:00-22:00, off-peak 22:00-06:00.
pub const PEAK_START_HOUR: u32 = 6;
pub const PEAK_END_HOUR: u32 = 22;

/// The six Tempo unit prices plus the start of the pricing period they
/// apply from. Values are EUR/kWh with 4 decimal digits of display
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TariffPrices {
    pub blue_peak: f64,
    pub blue_off_peak: f64,
    pub white_peak: f64,
    pub white_off_peak: f64,
    pub red_peak: f64,
    pub red_off_peak: f64,
    pub period_start: NaiveDate,
}

impl TariffPrices {
    /// Peak-hours unit price for a color; `None` for `Unknown`.
    pub fn peak(&self, color: TempoColor) -> Option<f64> {
        match color {
            TempoColor::Blue => Some(self.blue_peak),
            TempoColor::White => Some(self.white_peak),
            TempoColor::Red => Some(self.red_peak),
            TempoColor::Unknown => None,
        }
    }

    /// Off-peak-hours unit price for a color; `None` for `Unknown`.
    pub fn off_peak(&self, color: TempoColor) -> Option<f64> {
        match color {
            TempoColor::Blue => Some(self.blue_off_peak),
            TempoColor::White => Some(self.white_off_peak),
            TempoColor::Red => Some(self.red_off_peak),
            TempoColor::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices() -> TariffPrices {
        TariffPrices {
            blue_peak: 0.1609,
            blue_off_peak: 0.1296,
            white_peak: 0.1894,
            white_off_peak: 0.1486,
            red_peak: 0.7562,
            red_off_peak: 0.1568,
            period_start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        }
    }

    #[test]
    fn per_color_lookup() {
        let p = prices();
        assert_eq!(p.peak(TempoColor::Red), Some(0.7562));
        assert_eq!(p.off_peak(TempoColor::Blue), Some(0.1296));
        assert_eq!(p.peak(TempoColor::Unknown), None);
        assert_eq!(p.off_peak(TempoColor::Unknown), None);
    }
}
