use anyhow::Result;
use chrono::{DateTime, Utc};
use contracts::shared::analytics::{PeriodsResponse, RawRecord};
use once_cell::sync::OnceCell;

use super::sources::{
    CsvFileSource, FetchError, HttpJsonSource, JsonFileSource, RecordSource,
};
use crate::shared::analytics::PeriodIndex;
use crate::shared::config::{Config, SourceConfig};

/// Immutable in-memory copy of the feed shared by every request.
#[derive(Debug)]
pub struct RecordSnapshot {
    pub records: Vec<RawRecord>,
    pub index: PeriodIndex,
    pub loaded_at: DateTime<Utc>,
}

impl RecordSnapshot {
    pub fn new(records: Vec<RawRecord>) -> Self {
        let index = PeriodIndex::from_records(&records);
        Self {
            records,
            index,
            loaded_at: Utc::now(),
        }
    }

    /// Periods present in the snapshot, oldest first, with load metadata.
    pub fn periods_response(&self) -> PeriodsResponse {
        PeriodsResponse {
            periods: self.index.periods().to_vec(),
            latest: self.index.latest(),
            record_count: self.records.len(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Either the loaded snapshot or the message of the failed fetch.
static SNAPSHOT: OnceCell<std::result::Result<RecordSnapshot, String>> = OnceCell::new();

/// Build the configured sources, in config order.
pub fn build_sources(config: &Config) -> Vec<Box<dyn RecordSource>> {
    config
        .sources
        .iter()
        .map(|source| -> Box<dyn RecordSource> {
            match source {
                SourceConfig::Csv { path } => Box::new(CsvFileSource {
                    path: config.resolve_path(path),
                }),
                SourceConfig::Json { path } => Box::new(JsonFileSource {
                    path: config.resolve_path(path),
                }),
                SourceConfig::Http { url } => Box::new(HttpJsonSource::new(url.clone())),
            }
        })
        .collect()
}

/// Fetch every source once and concatenate the rows.
///
/// The first failing source aborts the load; partial data is never used.
pub async fn load_all(sources: &[Box<dyn RecordSource>]) -> std::result::Result<Vec<RawRecord>, FetchError> {
    let mut records = Vec::new();
    for source in sources {
        let started = std::time::Instant::now();
        let mut fetched = source.fetch().await?;
        tracing::info!(
            "Loaded {} rows from {} in {}ms",
            fetched.len(),
            source.describe(),
            started.elapsed().as_millis()
        );
        records.append(&mut fetched);
    }
    Ok(records)
}

/// Load the snapshot. Called once at startup; a failed fetch is stored and
/// reported by every subsequent request instead of aborting the server.
pub async fn initialize(sources: &[Box<dyn RecordSource>]) {
    let state = match load_all(sources).await {
        Ok(records) => {
            let snapshot = RecordSnapshot::new(records);
            tracing::info!(
                "Record store ready: {} rows, {} periods ({:?} .. {:?})",
                snapshot.records.len(),
                snapshot.index.len(),
                snapshot.index.periods().first(),
                snapshot.index.latest()
            );
            Ok(snapshot)
        }
        Err(e) => {
            tracing::error!("Record store: data fetch failed: {}", e);
            Err(e.to_string())
        }
    };

    if SNAPSHOT.set(state).is_err() {
        tracing::warn!("Record store already initialized, ignoring reload");
    }
}

pub fn get_snapshot() -> Result<&'static RecordSnapshot> {
    match SNAPSHOT.get() {
        Some(Ok(snapshot)) => Ok(snapshot),
        Some(Err(message)) => Err(anyhow::anyhow!("data fetch failed: {}", message)),
        None => Err(anyhow::anyhow!("record store is not initialized")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::shared::analytics::Period;

    struct StaticSource(Vec<RawRecord>);

    #[async_trait]
    impl RecordSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> std::result::Result<Vec<RawRecord>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RecordSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        async fn fetch(&self) -> std::result::Result<Vec<RawRecord>, FetchError> {
            Err(FetchError::Json(
                serde_json::from_str::<Vec<RawRecord>>("oops").unwrap_err(),
            ))
        }
    }

    fn rec(period: &str) -> RawRecord {
        RawRecord::sales(Period::parse(period).unwrap(), "BC", "Uber", "S1", 1.0, 1.0)
    }

    #[tokio::test]
    async fn test_load_all_concatenates() {
        let sources: Vec<Box<dyn RecordSource>> = vec![
            Box::new(StaticSource(vec![rec("2025-09")])),
            Box::new(StaticSource(vec![rec("2025-10"), rec("2025-10")])),
        ];
        let records = load_all(&sources).await.unwrap();
        assert_eq!(records.len(), 3);

        let snapshot = RecordSnapshot::new(records);
        assert_eq!(snapshot.index.len(), 2);
    }

    #[test]
    fn test_periods_response() {
        let before = Utc::now();
        let snapshot = RecordSnapshot::new(vec![rec("2025-10"), rec("2025-09"), rec("2025-10")]);
        let response = snapshot.periods_response();

        assert_eq!(
            response.periods,
            vec![Period::parse("2025-09").unwrap(), Period::parse("2025-10").unwrap()]
        );
        assert_eq!(response.latest, Some(Period::parse("2025-10").unwrap()));
        assert_eq!(response.record_count, 3);
        assert_eq!(response.loaded_at, snapshot.loaded_at);
        assert!(response.loaded_at >= before);
    }

    #[tokio::test]
    async fn test_load_all_fails_without_partial_data() {
        let sources: Vec<Box<dyn RecordSource>> = vec![
            Box::new(StaticSource(vec![rec("2025-09")])),
            Box::new(FailingSource),
        ];
        let err = load_all(&sources).await.unwrap_err();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
