use axum::{extract::Query, http::StatusCode, Json};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use contracts::dashboards::d100_returns_summary::{ReturnMetrics, ReturnStatusCounts};

use crate::dashboards::d100_returns_summary::service;

/// Period bounds for the metrics query. Both are optional and accept
/// either an RFC 3339 timestamp or a bare date.
#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/d100/returns_summary/status_counts
pub async fn get_status_counts() -> Result<Json<ReturnStatusCounts>, StatusCode> {
    match service::get_status_counts().await {
        Ok(counts) => Ok(Json(counts)),
        Err(e) => {
            tracing::error!("Failed to get return status counts: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d100/returns_summary?start=2025-01-01&end=2025-01-31
pub async fn get_metrics(
    Query(query): Query<MetricsQuery>,
) -> Result<Json<ReturnMetrics>, StatusCode> {
    let start = match query.start.as_deref() {
        Some(raw) => Some(parse_period_bound(raw, false).ok_or(StatusCode::BAD_REQUEST)?),
        None => None,
    };
    let end = match query.end.as_deref() {
        Some(raw) => Some(parse_period_bound(raw, true).ok_or(StatusCode::BAD_REQUEST)?),
        None => None,
    };

    match service::get_metrics(start, end).await {
        Ok(metrics) => {
            tracing::info!(
                "Returns summary: {} returns between {} and {}",
                metrics.totals.return_count,
                metrics.period.start,
                metrics.period.end
            );
            Ok(Json(metrics))
        }
        Err(e) => {
            tracing::error!("Failed to compute return metrics: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// A bare date expands to the start or end of that day in UTC.
fn parse_period_bound(raw: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let naive = if end_of_day {
        date.and_hms_opt(23, 59, 59)?
    } else {
        date.and_hms_opt(0, 0, 0)?
    };
    Some(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period_bound_accepts_rfc3339() {
        let parsed = parse_period_bound("2025-03-10T12:30:00Z", false).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-03-10T12:30:00+00:00");
    }

    #[test]
    fn test_parse_period_bound_expands_bare_dates() {
        let start = parse_period_bound("2025-03-10", false).unwrap();
        let end = parse_period_bound("2025-03-10", true).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-03-10T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-03-10T23:59:59+00:00");
    }

    #[test]
    fn test_parse_period_bound_rejects_garbage() {
        assert!(parse_period_bound("last-tuesday", false).is_none());
    }
}
