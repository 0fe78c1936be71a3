use async_trait::async_trait;
use contracts::shared::analytics::{Period, RawRecord};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Ошибки загрузки исходных строк
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Injected provider of the raw sales / advertising feed.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short description for logs, e.g. `csv:data/sales.csv`
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError>;
}

// ---------------------------------------------------------------------------
// CSV file
// ---------------------------------------------------------------------------

/// CSV row as it appears in the file. Unparsable numbers become `None`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    period: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    platform: String,
    #[serde(default)]
    store: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    revenue: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    orders: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    spend: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    sales: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    roas: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    avg_cost_per_order: Option<f64>,
}

/// Parse a CSV feed with a header row.
///
/// Rows whose period cannot be read are skipped with a warning; they cannot
/// be placed on the time axis.
pub fn parse_csv(csv_text: &str) -> Result<Vec<RawRecord>, FetchError> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let period = match Period::parse(&row.period) {
            Ok(p) => p,
            Err(e) => {
                // +2: header line and 1-based numbering
                tracing::warn!("CSV line {}: {}, row skipped", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        records.push(RawRecord {
            period,
            region: row.region,
            platform: row.platform,
            store: row.store,
            revenue: row.revenue,
            orders: row.orders,
            spend: row.spend,
            sales: row.sales,
            roas: row.roas,
            avg_cost_per_order: row.avg_cost_per_order,
        });
    }

    if skipped > 0 {
        tracing::warn!("CSV feed: {} rows skipped, {} loaded", skipped, records.len());
    }

    Ok(records)
}

pub struct CsvFileSource {
    pub path: PathBuf,
}

#[async_trait]
impl RecordSource for CsvFileSource {
    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        let text = read_file(&self.path).await?;
        parse_csv(&text)
    }
}

// ---------------------------------------------------------------------------
// JSON file / HTTP
// ---------------------------------------------------------------------------

/// Parse a JSON array of records.
pub fn parse_json(json_text: &str) -> Result<Vec<RawRecord>, FetchError> {
    Ok(serde_json::from_str(json_text)?)
}

pub struct JsonFileSource {
    pub path: PathBuf,
}

#[async_trait]
impl RecordSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        let text = read_file(&self.path).await?;
        parse_json(&text)
    }
}

/// Single GET returning a JSON array of records. No retries.
pub struct HttpJsonSource {
    pub url: String,
    client: reqwest::Client,
}

impl HttpJsonSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RecordSource for HttpJsonSource {
    fn describe(&self) -> String {
        format!("http:{}", self.url)
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        let records = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<RawRecord>>()
            .await?;
        Ok(records)
    }
}

async fn read_file(path: &Path) -> Result<String, FetchError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })
}
