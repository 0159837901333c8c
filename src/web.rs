//! Axum-based HTTP API serving the dashboard UI
//!
//! Thin boundary between the engine and the mobile client: every endpoint
//! returns the engine's value objects as JSON. Upstream unavailability maps
//! to 502 so the client can render its placeholder state; it is never a
//! server crash.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::compare::{cheapest_of, plan_quotes};
use crate::dashboard::Dashboard;
use crate::error::TempoError;
use crate::tempo::TempoColor;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

fn error_response(err: &TempoError) -> Response {
    let status = match err {
        TempoError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        TempoError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn version() -> impl IntoResponse {
    Json(serde_json::json!({ "version": env!("APP_VERSION") }))
}

/// Joint snapshot of the four independent sources; failed sources are null.
async fn dashboard_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.snapshot().await)
}

/// Full month of day colors. `month` in the path is human 1-based; the
/// engine's 0-based index is derived here. A superseded load (a newer month
/// was requested meanwhile) answers 204 and the client keeps waiting for
/// the newer response.
async fn calendar_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    if !(1..=12).contains(&month) {
        return error_response(&TempoError::validation(
            "month",
            &format!("month {} out of range 1..=12", month),
        ));
    }
    let month0 = month - 1;
    match state.dashboard.load_month(year, month0).await {
        Ok(Some(days)) => {
            let offset = crate::calendar::first_weekday_offset(year, month0).unwrap_or(0);
            Json(serde_json::json!({
                "year": year,
                "month": month,
                "first_weekday_offset": offset,
                "days": days,
            }))
            .into_response()
        }
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

#[derive(Deserialize)]
struct CompareQuery {
    /// Consumption to price, in kWh.
    consumption: f64,
    /// Tempo day color the comparison assumes; defaults to blue.
    color: Option<String>,
}

/// Cost comparison of the three plans for a given consumption and day
/// color. Uses live Tempo prices; ties are all flagged cheapest.
async fn compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Response {
    if !query.consumption.is_finite() || query.consumption < 0.0 {
        return error_response(&TempoError::validation(
            "consumption",
            "consumption must be a non-negative number",
        ));
    }
    let color = query
        .color
        .as_deref()
        .map(parse_color)
        .unwrap_or(TempoColor::Blue);
    if color == TempoColor::Unknown {
        return error_response(&TempoError::validation(
            "color",
            "color must be one of BLUE, WHITE, RED",
        ));
    }
    let prices = match state.dashboard.prices().await {
        Ok(prices) => prices,
        Err(e) => return error_response(&e),
    };
    match plan_quotes(&prices, color) {
        Some(quotes) => Json(cheapest_of(&quotes, query.consumption)).into_response(),
        None => error_response(&TempoError::upstream("no prices for requested color")),
    }
}

fn parse_color(raw: &str) -> TempoColor {
    match raw.to_uppercase().as_str() {
        "BLUE" => TempoColor::Blue,
        "WHITE" => TempoColor::White,
        "RED" => TempoColor::Red,
        _ => TempoColor::Unknown,
    }
}

/// Spot rate currently in effect.
async fn now(State(state): State<AppState>) -> Response {
    match state.dashboard.now().await {
        Ok(rate) => Json(rate).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Build the API router for the given dashboard.
pub fn router(dashboard: Arc<Dashboard>) -> Router {
    let state = AppState { dashboard };
    Router::new()
        .route("/api/health", get(health))
        .route("/api/version", get(version))
        .route("/api/dashboard", get(dashboard_snapshot))
        .route("/api/calendar/{year}/{month}", get(calendar_month))
        .route("/api/compare", get(compare))
        .route("/api/now", get(now))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve the API until the process stops.
pub async fn serve(dashboard: Arc<Dashboard>, host: &str, port: u16) -> crate::error::Result<()> {
    let router = router(dashboard);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| TempoError::web(format!("invalid bind address: {}", e)))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TempoError::web(format!("bind failed: {}", e)))?;
    tracing::info!("API listening on {}", addr);
    axum::serve(listener, router)
        .await
        .map_err(|e| TempoError::web(e.to_string()))
}
