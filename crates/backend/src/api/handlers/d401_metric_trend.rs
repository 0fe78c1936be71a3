use axum::{http::StatusCode, Json};
use contracts::dashboards::d401_metric_trend::{TrendRequest, TrendResponse};

use crate::dashboards::d401_metric_trend::service;

/// POST /api/d401/trend
pub async fn get_trend(
    Json(request): Json<TrendRequest>,
) -> Result<Json<TrendResponse>, (StatusCode, String)> {
    tracing::info!(
        "D401 Trend: {} periods up to {}, metric {}",
        request.periods,
        request.end_period,
        request.metric.id()
    );

    service::get_trend(request)
        .await
        .map(|response| {
            tracing::info!(
                "D401 Trend: Returning {} series over {} periods",
                response.series.len(),
                response.periods.len()
            );
            Json(response)
        })
        .map_err(|e| {
            tracing::error!("D401 Trend: Failed to build trend: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string())
        })
}
