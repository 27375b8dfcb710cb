use anyhow::{Context, Result};
use reqwest::Url;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/describe";
pub const DEFAULT_FIELD: &str = "image";
pub const DEFAULT_LOG_FILTER: &str = "image_analyzer=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub endpoint: Url,
    pub field: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    pub filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let endpoint = env::var("ANALYZER_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            analyzer: AnalyzerConfig {
                endpoint: parse_endpoint(&endpoint)?,
                field: env::var("ANALYZER_FIELD")
                    .ok()
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
            },
            logging: LoggingConfig {
                log_dir: env::var("IMAGE_ANALYZER_LOG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_log_dir()),
                filter: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            },
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, endpoint: Option<&str>, field: Option<&str>) -> Result<Self> {
        if let Some(endpoint) = endpoint {
            self.analyzer.endpoint = parse_endpoint(endpoint)?;
        }
        if let Some(field) = field {
            if field.trim().is_empty() {
                anyhow::bail!("multipart field name must not be empty");
            }
            self.analyzer.field = field.to_string();
        }
        Ok(self)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            field: DEFAULT_FIELD.to_string(),
        }
    }
}

pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid analyzer endpoint: {}", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!("unsupported endpoint scheme {:?} in {}", other, raw),
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("image-analyzer")
}
