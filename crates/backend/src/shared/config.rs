use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    /// Directory relative source paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// One feed of raw records. Several sources are concatenated.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    Csv { path: String },
    Json { path: String },
    Http { url: String },
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3000

[[sources]]
kind = "csv"
path = "data/sales.csv"
"#;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "SALES_KPI_CONFIG";

impl Config {
    pub fn parse(contents: &str, base_dir: PathBuf) -> anyhow::Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.base_dir = base_dir;
        Ok(config)
    }

    /// Absolute paths are kept, relative ones are joined to `base_dir`.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        candidates.push(PathBuf::from(explicit));
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(PathBuf::from("config.toml"));
    candidates
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. `SALES_KPI_CONFIG` environment variable
/// 2. Next to the executable
/// 3. Current working directory
/// 4. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    for path in candidate_paths() {
        if !path.exists() {
            tracing::debug!("config.toml not found at: {}", path.display());
            continue;
        }

        tracing::info!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(&path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        return Config::parse(&contents, base_dir);
    }

    tracing::info!("Using default embedded configuration");
    Config::parse(DEFAULT_CONFIG, std::env::current_dir()?)
}
