//! Dashboard data orchestration
//!
//! Pulls the independent upstream sources together for the UI: the four
//! snapshot fetches (today, tomorrow, stats, prices) run jointly with
//! per-source failure isolation, and calendar months load separately with
//! supersession handling so stale month navigations never overwrite newer
//! ones.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Europe::Paris;
use serde::Serialize;

use crate::calendar::{self, CalendarDay};
use crate::client::{CurrentRate, TempoClient};
use crate::error::Result;
use crate::logging::{StructuredLogger, get_logger};
use crate::prices::TariffPrices;
use crate::stats::UsageStats;
use crate::tempo::{DayRecord, WhichDay};

/// The upstream operations the dashboard needs. `TempoClient` is the real
/// implementation; tests substitute failing or slow sources.
#[async_trait]
pub trait TempoSource: Send + Sync {
    async fn fetch_day(&self, which: WhichDay) -> Result<DayRecord>;
    async fn fetch_stats(&self) -> Result<UsageStats>;
    async fn fetch_prices(&self) -> Result<TariffPrices>;
    async fn fetch_now(&self) -> Result<CurrentRate>;
    async fn fetch_days(&self, dates: &[NaiveDate]) -> Result<Vec<DayRecord>>;
}

#[async_trait]
impl TempoSource for TempoClient {
    async fn fetch_day(&self, which: WhichDay) -> Result<DayRecord> {
        TempoClient::fetch_day(self, which).await
    }

    async fn fetch_stats(&self) -> Result<UsageStats> {
        TempoClient::fetch_stats(self).await
    }

    async fn fetch_prices(&self) -> Result<TariffPrices> {
        TempoClient::fetch_prices(self).await
    }

    async fn fetch_now(&self) -> Result<CurrentRate> {
        TempoClient::fetch_now(self).await
    }

    async fn fetch_days(&self, dates: &[NaiveDate]) -> Result<Vec<DayRecord>> {
        TempoClient::fetch_days(self, dates).await
    }
}

/// One fetch-compute-render cycle's worth of dashboard data. A `None` slot
/// means that source was unavailable this cycle; the UI renders a
/// placeholder for it while the others display normally.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub today: Option<DayRecord>,
    pub tomorrow: Option<DayRecord>,
    pub stats: Option<UsageStats>,
    pub prices: Option<TariffPrices>,
}

/// Aggregates upstream data for the dashboard views.
pub struct Dashboard {
    source: Arc<dyn TempoSource>,
    month_generation: AtomicU64,
    logger: StructuredLogger,
}

impl Dashboard {
    pub fn new(source: Arc<dyn TempoSource>) -> Self {
        Self {
            source,
            month_generation: AtomicU64::new(0),
            logger: get_logger("dashboard"),
        }
    }

    /// Fetch the four snapshot sources concurrently.
    ///
    /// Each source fails independently: an upstream error logs a warning
    /// and leaves that slot `None` without cancelling or blocking the
    /// siblings.
    pub async fn snapshot(&self) -> Snapshot {
        let (today, tomorrow, stats, prices) = tokio::join!(
            self.source.fetch_day(WhichDay::Today),
            self.source.fetch_day(WhichDay::Tomorrow),
            self.source.fetch_stats(),
            self.source.fetch_prices(),
        );
        Snapshot {
            today: self.unwrap_or_log("today", today),
            tomorrow: self.unwrap_or_log("tomorrow", tomorrow),
            stats: self.unwrap_or_log("stats", stats),
            prices: self.unwrap_or_log("prices", prices),
        }
    }

    fn unwrap_or_log<T>(&self, source: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.logger.warn(&format!("{} unavailable: {}", source, e));
                None
            }
        }
    }

    /// Load a full calendar month (`month0` is 0-based).
    ///
    /// Always yields a complete month: days missing from the batch response
    /// are `Unknown`, and a failed batch degrades to all-`Unknown` rather
    /// than surfacing an error. Returns `Ok(None)` when a newer month load
    /// was started before this one resolved; the stale result must be
    /// discarded, not rendered. The only `Err` is an invalid (year, month)
    /// argument.
    pub async fn load_month(&self, year: i32, month0: u32) -> Result<Option<Vec<CalendarDay>>> {
        let dates = calendar::month_dates(year, month0)?;
        let token = self.month_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let fetched = self.source.fetch_days(&dates).await;

        if self.month_generation.load(Ordering::SeqCst) != token {
            self.logger.debug(&format!(
                "discarding superseded month load {}-{:02}",
                year,
                month0 + 1
            ));
            return Ok(None);
        }

        let month = match fetched {
            Ok(records) => calendar::assemble_month(year, month0, &records)?,
            Err(e) => {
                self.logger.warn(&format!(
                    "month batch failed, degrading to unknown: {}",
                    e
                ));
                calendar::degraded_month(year, month0)?
            }
        };
        Ok(Some(month))
    }

    /// Current spot rate; surfaces the upstream error to the caller.
    pub async fn now(&self) -> Result<CurrentRate> {
        self.source.fetch_now().await
    }

    /// Live Tempo prices only; surfaces the upstream error to the caller.
    pub async fn prices(&self) -> Result<TariffPrices> {
        self.source.fetch_prices().await
    }
}

/// The current (year, 0-based month) in France, where Tempo days are
/// defined.
pub fn current_month() -> (i32, u32) {
    let now = Utc::now().with_timezone(&Paris).date_naive();
    (now.year(), now.month0())
}
