//! HTTP client for the api-couleur-tempo upstream
//!
//! Transport layer only: one method per upstream endpoint, returning
//! normalized domain values. Any network failure, non-2xx status, or
//! unparseable body surfaces as an upstream error; retry policy belongs to
//! the caller. Calendar reconstruction and failure degradation live in the
//! dashboard layer, not here.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::UpstreamConfig;
use crate::error::{Result, TempoError};
use crate::logging::{StructuredLogger, get_logger};
use crate::prices::TariffPrices;
use crate::stats::{RawUsage, UsageStats, map_stats};
use crate::tempo::{DayRecord, TempoColor, WhichDay};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Spot rate for the current hour, from the `/now` endpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CurrentRate {
    pub color: TempoColor,
    /// Upstream daily-period code (off-peak/peak), passed through verbatim.
    pub period_code: i64,
    /// Unit price currently in effect, EUR/kWh.
    pub rate: f64,
    /// Upstream human-readable tariff label.
    pub label: String,
}

// Wire structs mirror the upstream French JSON field names.

#[derive(Debug, Deserialize)]
struct RawTempoDay {
    #[serde(rename = "dateJour")]
    date: String,
    #[serde(rename = "codeJour")]
    code: i64,
    #[serde(rename = "libCouleur", default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct RawStats {
    periode: String,
    #[serde(rename = "joursBleusConsommes")]
    blue_used: u32,
    #[serde(rename = "joursBlancsConsommes")]
    white_used: u32,
    #[serde(rename = "joursRougesConsommes")]
    red_used: u32,
    #[serde(rename = "joursBleusRestants")]
    blue_remaining: u32,
    #[serde(rename = "joursBlancsRestants")]
    white_remaining: u32,
    #[serde(rename = "joursRougesRestants")]
    red_remaining: u32,
}

#[derive(Debug, Deserialize)]
struct RawTariffs {
    #[serde(rename = "bleuHC")]
    blue_off_peak: f64,
    #[serde(rename = "bleuHP")]
    blue_peak: f64,
    #[serde(rename = "blancHC")]
    white_off_peak: f64,
    #[serde(rename = "blancHP")]
    white_peak: f64,
    #[serde(rename = "rougeHC")]
    red_off_peak: f64,
    #[serde(rename = "rougeHP")]
    red_peak: f64,
    #[serde(rename = "dateDebut")]
    period_start: String,
}

#[derive(Debug, Deserialize)]
struct RawNow {
    #[serde(rename = "codeCouleur")]
    color_code: i64,
    #[serde(rename = "codeHoraire")]
    period_code: i64,
    #[serde(rename = "tarifKwh")]
    rate: f64,
    #[serde(rename = "libTarif", default)]
    label: String,
}

/// Client for the api-couleur-tempo HTTP API
pub struct TempoClient {
    http: reqwest::Client,
    base_url: String,
    logger: StructuredLogger,
}

impl TempoClient {
    /// Build a client from upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            logger: get_logger("client"),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            self.logger
                .warn(&format!("GET {} failed with status {}", path, status));
            return Err(TempoError::upstream(format!(
                "GET {} returned HTTP status {}",
                path, status
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| TempoError::upstream(format!("GET {} body decode failed: {}", path, e)))
    }

    fn parse_date(raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|e| TempoError::upstream(format!("bad upstream date {:?}: {}", raw, e)))
    }

    /// Fetch today's or tomorrow's day record.
    ///
    /// The color comes from the textual label; tomorrow is routinely
    /// "unknown" before the daily publication around 11:00.
    pub async fn fetch_day(&self, which: WhichDay) -> Result<DayRecord> {
        let raw: RawTempoDay = self
            .get_json(&format!("jourTempo/{}", which.as_path()), &[])
            .await?;
        Ok(DayRecord {
            date: Self::parse_date(&raw.date)?,
            color: TempoColor::from_label(&raw.label),
        })
    }

    /// Fetch year-to-date quota usage, with fixed totals substituted.
    pub async fn fetch_stats(&self) -> Result<UsageStats> {
        let raw: RawStats = self.get_json("stats", &[]).await?;
        Ok(map_stats(&RawUsage {
            period: raw.periode,
            blue_used: raw.blue_used,
            blue_remaining: raw.blue_remaining,
            white_used: raw.white_used,
            white_remaining: raw.white_remaining,
            red_used: raw.red_used,
            red_remaining: raw.red_remaining,
        }))
    }

    /// Fetch the six Tempo unit prices and their period start date.
    pub async fn fetch_prices(&self) -> Result<TariffPrices> {
        let raw: RawTariffs = self.get_json("tarifs", &[]).await?;
        Ok(TariffPrices {
            blue_peak: raw.blue_peak,
            blue_off_peak: raw.blue_off_peak,
            white_peak: raw.white_peak,
            white_off_peak: raw.white_off_peak,
            red_peak: raw.red_peak,
            red_off_peak: raw.red_off_peak,
            period_start: Self::parse_date(&raw.period_start)?,
        })
    }

    /// Fetch the rate in effect right now.
    pub async fn fetch_now(&self) -> Result<CurrentRate> {
        let raw: RawNow = self.get_json("now", &[]).await?;
        Ok(CurrentRate {
            color: TempoColor::from_code(raw.color_code),
            period_code: raw.period_code,
            rate: raw.rate,
            label: raw.label,
        })
    }

    /// Fetch day records for an arbitrary set of dates in one batch call.
    ///
    /// Dates absent from the response are simply not returned; records with
    /// unparseable dates are dropped with a warning. Colors come from the
    /// numeric code here, matching the batch endpoint's contract.
    pub async fn fetch_days(&self, dates: &[NaiveDate]) -> Result<Vec<DayRecord>> {
        let query: Vec<(&str, String)> = dates
            .iter()
            .map(|d| ("dateJour[]", d.format(DATE_FORMAT).to_string()))
            .collect();
        let raw: Vec<RawTempoDay> = self.get_json("joursTempo", &query).await?;
        let records = raw
            .into_iter()
            .filter_map(|day| match Self::parse_date(&day.date) {
                Ok(date) => Some(DayRecord {
                    date,
                    color: TempoColor::from_code(day.code),
                }),
                Err(e) => {
                    self.logger.warn(&format!("dropping batch record: {}", e));
                    None
                }
            })
            .collect();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_structs_decode_upstream_json() {
        let day: RawTempoDay = serde_json::from_str(
            r#"{"dateJour":"2026-02-14","codeJour":2,"libCouleur":"Blanc"}"#,
        )
        .unwrap();
        assert_eq!(day.code, 2);
        assert_eq!(TempoColor::from_label(&day.label), TempoColor::White);
        assert_eq!(
            TempoClient::parse_date(&day.date).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
        );

        let tariffs: RawTariffs = serde_json::from_str(
            r#"{"bleuHC":0.1296,"bleuHP":0.1609,"blancHC":0.1486,"blancHP":0.1894,
                "rougeHC":0.1568,"rougeHP":0.7562,"dateDebut":"2026-02-01"}"#,
        )
        .unwrap();
        assert!((tariffs.red_peak - 0.7562).abs() < 1e-12);

        let now: RawNow = serde_json::from_str(
            r#"{"codeCouleur":3,"codeHoraire":2,"tarifKwh":0.7562,"libTarif":"Rouge HP"}"#,
        )
        .unwrap();
        assert_eq!(TempoColor::from_code(now.color_code), TempoColor::Red);
    }

    #[test]
    fn bad_upstream_date_is_an_upstream_error() {
        let err = TempoClient::parse_date("14/02/2026").unwrap_err();
        assert!(err.is_upstream());
    }

    #[test]
    fn stats_wire_struct_decodes() {
        let raw: RawStats = serde_json::from_str(
            r#"{"periode":"2025-2026","joursBleusConsommes":120,"joursBlancsConsommes":17,
                "joursRougesConsommes":9,"joursBleusRestants":180,"joursBlancsRestants":26,
                "joursRougesRestants":13}"#,
        )
        .unwrap();
        assert_eq!(raw.blue_used, 120);
        assert_eq!(raw.red_remaining, 13);
    }
}
