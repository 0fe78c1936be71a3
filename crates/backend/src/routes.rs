use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // PERIODS
        // ========================================
        .route(
            "/api/periods",
            get(handlers::d400_period_comparison::get_available_periods),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        // D400 Period comparison
        .route(
            "/api/d400/comparison",
            post(handlers::d400_period_comparison::get_comparison),
        )
        // D401 Metric trend
        .route(
            "/api/d401/trend",
            post(handlers::d401_metric_trend::get_trend),
        )
        // ========================================
        // INDICATORS
        // ========================================
        .route(
            "/api/indicators/compute",
            post(handlers::indicators::compute_indicators),
        )
        .route(
            "/api/indicators/meta",
            get(handlers::indicators::get_indicator_catalog),
        )
}
