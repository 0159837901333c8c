//! Plan comparison engine
//!
//! Pure price arithmetic shared by every comparison view: weighted daily
//! averages over the fixed 16h-peak/8h-off-peak split, percentage deltas
//! against a reference price, and cheapest-option selection for a given
//! consumption. No I/O, no state; every function is referentially
//! transparent.
//!
//! Rounding helpers are display-only. All comparison math runs on the
//! full-precision inputs and never consumes a rounded value.

use serde::Serialize;

use crate::prices::{BLUE_BASE_PRICE, BLUE_HC_PRICE, BLUE_HP_PRICE, TariffPrices};
use crate::tempo::TempoColor;

/// Hours billed at the peak rate in one day.
pub const PEAK_HOURS_PER_DAY: f64 = 16.0;
/// Hours billed at the off-peak rate in one day.
pub const OFF_PEAK_HOURS_PER_DAY: f64 = 8.0;

/// A plan candidate: a label and its unit price for the scenario at hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanQuote {
    pub label: String,
    pub unit_price: f64,
}

impl PlanQuote {
    pub fn new<S: Into<String>>(label: S, unit_price: f64) -> Self {
        Self {
            label: label.into(),
            unit_price,
        }
    }
}

/// A plan candidate annotated with its cost for a given consumption.
/// Derived on every input change, never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub label: String,
    pub unit_price: f64,
    pub cost: f64,
    pub is_cheapest: bool,
}

/// Average price of one day split into 16 peak hours and 8 off-peak hours.
///
/// The real HC window varies by contract; the fixed split is a deliberate
/// simplification applied uniformly to every plan being compared.
pub fn weighted_daily_average(peak_price: f64, off_peak_price: f64) -> f64 {
    (peak_price * PEAK_HOURS_PER_DAY + off_peak_price * OFF_PEAK_HOURS_PER_DAY)
        / (PEAK_HOURS_PER_DAY + OFF_PEAK_HOURS_PER_DAY)
}

/// Percentage difference of `value` against `reference`.
///
/// Negative means cheaper than the reference, positive more expensive.
/// The reference must be positive; every reference price in this system is
/// a positive constant, so this is asserted in debug builds rather than
/// checked at runtime.
pub fn percent_delta(value: f64, reference: f64) -> f64 {
    debug_assert!(reference > 0.0, "percent_delta requires a positive reference");
    (value - reference) / reference * 100.0
}

/// Annotate each candidate with its cost for `consumption` and flag every
/// candidate whose cost equals the minimum. Ties are all flagged; there is
/// no arbitrary tie-break.
pub fn cheapest_of(candidates: &[PlanQuote], consumption: f64) -> Vec<ComparisonResult> {
    let costs: Vec<f64> = candidates
        .iter()
        .map(|c| c.unit_price * consumption)
        .collect();
    let min_cost = costs.iter().copied().fold(f64::INFINITY, f64::min);
    candidates
        .iter()
        .zip(costs)
        .map(|(candidate, cost)| ComparisonResult {
            label: candidate.label.clone(),
            unit_price: candidate.unit_price,
            cost,
            is_cheapest: cost == min_cost,
        })
        .collect()
}

/// Weighted daily average for a Tempo day of the given color; `None` for
/// `Unknown` days, which have no price.
pub fn tempo_weighted(prices: &TariffPrices, color: TempoColor) -> Option<f64> {
    Some(weighted_daily_average(
        prices.peak(color)?,
        prices.off_peak(color)?,
    ))
}

/// Weighted daily average of the flat HC/HP reference plan.
pub fn hchp_weighted() -> f64 {
    weighted_daily_average(BLUE_HP_PRICE, BLUE_HC_PRICE)
}

/// The three plan candidates for a day of the given Tempo color: Tempo at
/// that color's weighted price, flat Base, and the HC/HP plan. `None` when
/// the color is `Unknown`.
pub fn plan_quotes(prices: &TariffPrices, color: TempoColor) -> Option<Vec<PlanQuote>> {
    Some(vec![
        PlanQuote::new("TEMPO", tempo_weighted(prices, color)?),
        PlanQuote::new("BASE", BLUE_BASE_PRICE),
        PlanQuote::new("HCHP", hchp_weighted()),
    ])
}

/// Format a unit price for display: fixed 4 decimals.
pub fn format_price(value: f64) -> String {
    format!("{:.4}", value)
}

/// Format a percentage for display: fixed 1 decimal.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value)
}
