// Dashboard handlers (d400-d401)
pub mod d400_period_comparison;
pub mod d401_metric_trend;

pub mod indicators;
