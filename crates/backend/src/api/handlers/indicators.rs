use axum::{http::StatusCode, Json};
use contracts::shared::indicators::*;

use crate::shared::data::record_store;
use crate::shared::indicators::{metadata, registry::IndicatorRegistry};

/// POST /api/indicators/compute
///
/// Batch-computes a set of indicators for the given context (period, filters).
pub async fn compute_indicators(
    Json(req): Json<ComputeIndicatorsRequest>,
) -> Result<Json<ComputeIndicatorsResponse>, (StatusCode, String)> {
    tracing::info!(
        "Indicators: computing {} indicators for period {} (window {})",
        req.indicator_ids.len(),
        req.context.selected_period,
        req.context.window,
    );

    let snapshot = record_store::get_snapshot().map_err(|e| {
        tracing::error!("Indicators: data unavailable: {}", e);
        (StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    let registry = IndicatorRegistry::new();
    let values = registry.compute(
        &req.indicator_ids,
        &req.context,
        &snapshot.records,
        &snapshot.index,
    );

    tracing::info!("Indicators: returning {} values", values.len());
    Ok(Json(ComputeIndicatorsResponse { values }))
}

/// GET /api/indicators/meta
///
/// Returns the full catalogue of available indicators and sets.
pub async fn get_indicator_catalog() -> Json<IndicatorCatalogResponse> {
    Json(metadata::build_catalog())
}
