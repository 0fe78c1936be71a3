use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::period::Period;

/// One flat row of the sales / advertising feed.
///
/// Sales feeds fill `revenue` and `orders`; advertising feeds additionally
/// carry `spend` together with either `sales` or `roas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub period: Period,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub store: String,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub orders: Option<f64>,
    #[serde(default)]
    pub spend: Option<f64>,
    #[serde(default)]
    pub sales: Option<f64>,
    #[serde(default)]
    pub roas: Option<f64>,
    #[serde(default)]
    pub avg_cost_per_order: Option<f64>,
}

impl RawRecord {
    /// Sales-only row.
    pub fn sales(
        period: Period,
        region: &str,
        platform: &str,
        store: &str,
        revenue: f64,
        orders: f64,
    ) -> Self {
        Self {
            period,
            region: region.to_string(),
            platform: platform.to_string(),
            store: store.to_string(),
            revenue: Some(revenue),
            orders: Some(orders),
            spend: None,
            sales: None,
            roas: None,
            avg_cost_per_order: None,
        }
    }

    /// True when the row carries advertising data.
    pub fn has_ad_data(&self) -> bool {
        self.spend.is_some() || self.sales.is_some() || self.roas.is_some()
    }
}

/// Response of the periods endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodsResponse {
    /// Distinct periods, oldest first
    pub periods: Vec<Period>,
    pub latest: Option<Period>,
    pub record_count: usize,
    /// When the feed snapshot was fetched
    pub loaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_json() {
        let json = r#"{"period": "2025-10-01", "region": "BC", "revenue": 1200.5}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.period.to_string(), "2025-10");
        assert_eq!(record.region, "BC");
        assert_eq!(record.platform, "");
        assert_eq!(record.revenue, Some(1200.5));
        assert_eq!(record.orders, None);
        assert!(!record.has_ad_data());
    }

    #[test]
    fn test_ad_record_detection() {
        let json = r#"{"period": "2025-10", "store": "S1", "spend": 50.0, "roas": 4.0}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert!(record.has_ad_data());
    }
}
