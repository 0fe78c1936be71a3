use axum::{http::StatusCode, Json};
use contracts::dashboards::d400_period_comparison::{ComparisonQuery, ComparisonResponse};
use contracts::shared::analytics::PeriodsResponse;

use crate::dashboards::d400_period_comparison::service;

/// POST /api/d400/comparison
pub async fn get_comparison(
    Json(query): Json<ComparisonQuery>,
) -> Result<Json<ComparisonResponse>, (StatusCode, String)> {
    tracing::info!(
        "D400 Dashboard: comparing {} (window {}) by {:?}, metric {}",
        query.selected_period,
        query.window,
        query.group_by,
        query.metric.id()
    );

    match service::get_comparison(query).await {
        Ok(response) => {
            tracing::info!(
                "D400 Dashboard: Returning {} rows (previous {:?}, year ago {:?})",
                response.rows.len(),
                response.previous_period.map(|p| p.to_string()),
                response.yoy_period.map(|p| p.to_string())
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D400 Dashboard: Failed to build comparison: {}", e);
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

/// GET /api/periods
pub async fn get_available_periods() -> Result<Json<PeriodsResponse>, (StatusCode, String)> {
    match service::get_available_periods().await {
        Ok(periods) => {
            tracing::info!(
                "D400 Dashboard: Returning {} available periods",
                periods.periods.len()
            );
            Ok(Json(periods))
        }
        Err(e) => {
            tracing::error!("D400 Dashboard: Failed to get periods: {}", e);
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
