use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use tempodash::calendar::days_in_month;
use tempodash::client::CurrentRate;
use tempodash::dashboard::{Dashboard, TempoSource};
use tempodash::error::{Result, TempoError};
use tempodash::prices::TariffPrices;
use tempodash::stats::{RawUsage, map_stats};
use tempodash::tempo::{DayRecord, TempoColor, WhichDay};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_prices() -> TariffPrices {
    TariffPrices {
        blue_peak: 0.1609,
        blue_off_peak: 0.1296,
        white_peak: 0.1894,
        white_off_peak: 0.1486,
        red_peak: 0.7562,
        red_off_peak: 0.1568,
        period_start: date(2026, 2, 1),
    }
}

/// Mock source with per-operation failure switches and a gate that can hold
/// the batch endpoint open until the test releases it.
#[derive(Default)]
struct MockSource {
    fail_today: AtomicBool,
    fail_tomorrow: AtomicBool,
    fail_stats: AtomicBool,
    fail_prices: AtomicBool,
    fail_days: AtomicBool,
    gate_january_batch: Option<Arc<Notify>>,
}

#[async_trait]
impl TempoSource for MockSource {
    async fn fetch_day(&self, which: WhichDay) -> Result<DayRecord> {
        let (failing, date, color) = match which {
            WhichDay::Today => (&self.fail_today, date(2026, 2, 14), TempoColor::White),
            WhichDay::Tomorrow => (&self.fail_tomorrow, date(2026, 2, 15), TempoColor::Red),
        };
        if failing.load(Ordering::SeqCst) {
            return Err(TempoError::upstream("day endpoint down"));
        }
        Ok(DayRecord { date, color })
    }

    async fn fetch_stats(&self) -> Result<tempodash::stats::UsageStats> {
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(TempoError::upstream("stats endpoint down"));
        }
        Ok(map_stats(&RawUsage {
            period: "2025-2026".to_string(),
            blue_used: 120,
            blue_remaining: 180,
            white_used: 17,
            white_remaining: 26,
            red_used: 9,
            red_remaining: 13,
        }))
    }

    async fn fetch_prices(&self) -> Result<TariffPrices> {
        if self.fail_prices.load(Ordering::SeqCst) {
            return Err(TempoError::upstream("tarifs endpoint down"));
        }
        Ok(sample_prices())
    }

    async fn fetch_now(&self) -> Result<CurrentRate> {
        Err(TempoError::upstream("now endpoint down"))
    }

    async fn fetch_days(&self, dates: &[NaiveDate]) -> Result<Vec<DayRecord>> {
        if let Some(gate) = &self.gate_january_batch
            && dates.first().is_some_and(|d| *d == date(2026, 1, 1))
        {
            gate.notified().await;
        }
        if self.fail_days.load(Ordering::SeqCst) {
            return Err(TempoError::upstream("batch endpoint down"));
        }
        // Answer only the odd days, with a blue color code
        Ok(dates
            .iter()
            .filter(|d| chrono::Datelike::day(*d) % 2 == 1)
            .map(|d| DayRecord {
                date: *d,
                color: TempoColor::Blue,
            })
            .collect())
    }
}

#[tokio::test]
async fn snapshot_populates_every_slot_when_all_sources_succeed() {
    let dashboard = Dashboard::new(Arc::new(MockSource::default()));
    let snapshot = dashboard.snapshot().await;
    assert_eq!(snapshot.today.unwrap().color, TempoColor::White);
    assert_eq!(snapshot.tomorrow.unwrap().color, TempoColor::Red);
    assert_eq!(snapshot.stats.unwrap().blue.total, 300);
    assert!(snapshot.prices.is_some());
}

#[tokio::test]
async fn one_failing_source_does_not_block_the_others() {
    let source = MockSource::default();
    source.fail_stats.store(true, Ordering::SeqCst);
    let dashboard = Dashboard::new(Arc::new(source));
    let snapshot = dashboard.snapshot().await;
    assert!(snapshot.stats.is_none());
    assert!(snapshot.today.is_some());
    assert!(snapshot.tomorrow.is_some());
    assert!(snapshot.prices.is_some());
}

#[tokio::test]
async fn all_sources_failing_yields_an_empty_snapshot() {
    let source = MockSource::default();
    source.fail_today.store(true, Ordering::SeqCst);
    source.fail_tomorrow.store(true, Ordering::SeqCst);
    source.fail_stats.store(true, Ordering::SeqCst);
    source.fail_prices.store(true, Ordering::SeqCst);
    let dashboard = Dashboard::new(Arc::new(source));
    let snapshot = dashboard.snapshot().await;
    assert!(snapshot.today.is_none());
    assert!(snapshot.tomorrow.is_none());
    assert!(snapshot.stats.is_none());
    assert!(snapshot.prices.is_none());
}

#[tokio::test]
async fn month_load_fills_missing_days_with_unknown() {
    // April 2026: 30 days, mock answers odd days only
    let dashboard = Dashboard::new(Arc::new(MockSource::default()));
    let days = dashboard.load_month(2026, 3).await.unwrap().unwrap();
    assert_eq!(days.len(), 30);
    for cell in &days {
        if cell.day % 2 == 1 {
            assert_eq!(cell.color, TempoColor::Blue);
        } else {
            assert_eq!(cell.color, TempoColor::Unknown);
        }
    }
}

#[tokio::test]
async fn month_load_degrades_to_all_unknown_on_batch_failure() {
    let source = MockSource::default();
    source.fail_days.store(true, Ordering::SeqCst);
    let dashboard = Dashboard::new(Arc::new(source));
    // Leap February
    let days = dashboard.load_month(2028, 1).await.unwrap().unwrap();
    assert_eq!(days.len() as u32, days_in_month(2028, 1).unwrap());
    assert_eq!(days.len(), 29);
    assert!(days.iter().all(|c| c.color == TempoColor::Unknown));
}

#[tokio::test]
async fn month_load_rejects_invalid_month() {
    let dashboard = Dashboard::new(Arc::new(MockSource::default()));
    let err = dashboard.load_month(2026, 12).await.unwrap_err();
    assert!(matches!(err, TempoError::Validation { .. }));
}

#[tokio::test]
async fn superseded_month_load_is_discarded() {
    let gate = Arc::new(Notify::new());
    let source = MockSource {
        gate_january_batch: Some(gate.clone()),
        ..MockSource::default()
    };
    let dashboard = Arc::new(Dashboard::new(Arc::new(source)));

    // Start loading January; the mock holds the batch open.
    let stale = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.load_month(2026, 0).await })
    };
    // Current-thread test runtime: yielding runs the spawned task up to
    // the gate, so January holds the older generation token.
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }

    // Navigate to February before January resolves.
    let fresh = dashboard.load_month(2026, 1).await.unwrap();
    assert!(fresh.is_some());
    assert_eq!(fresh.unwrap().len(), 28);

    // Release January; its result must be discarded as superseded.
    gate.notify_one();
    let stale = stale.await.unwrap().unwrap();
    assert!(stale.is_none());
}
