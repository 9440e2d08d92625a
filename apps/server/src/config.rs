//! Static configuration.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults ([`Config::default`])
//! 2. A YAML file (`config.yaml` in the working directory, or the `--config` path)
//! 3. Environment variables such as `MARQUEE__ELASTICSEARCH__URL` or
//!    `MARQUEE__SERVER__CORS_ORIGINS=https://a.example,https://b.example`
//!
//! A `.env` file is loaded into the environment first when present.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

const ENV_PREFIX: &str = "MARQUEE";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub elasticsearch: ElasticsearchConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty disables CORS headers entirely.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchConfig {
    pub url: String,
    pub timeout_seconds: u64,
    /// Deepest document reachable with offset pagination (`from + size`).
    pub max_result_window: u64,
    pub indices: IndicesConfig,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            timeout_seconds: 5,
            max_result_window: 10_000,
            indices: IndicesConfig::default(),
        }
    }
}

impl ElasticsearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicesConfig {
    pub films: String,
    pub genres: String,
    pub persons: String,
}

impl Default for IndicesConfig {
    fn default() -> Self {
        Self {
            films: "movies".to_string(),
            genres: "genres".to_string(),
            persons: "persons".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Maximum number of cached responses.
    pub capacity: usize,
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 1024,
            ttl_seconds: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,

    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of `daily`, `hourly`, `minutely`, `never`.
    pub file_rotation: String,

    pub opentelemetry_enabled: bool,
    pub otlp_endpoint: String,
    pub otlp_timeout_seconds: u64,
    pub trace_sample_ratio: f64,

    pub service_name: String,
    pub service_version: Option<String>,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "marquee".to_string(),
            file_rotation: "daily".to_string(),
            opentelemetry_enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            otlp_timeout_seconds: 10,
            trace_sample_ratio: 1.0,
            service_name: "marquee".to_string(),
            service_version: None,
            deployment_environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from `config.yaml` if present, then the environment.
    ///
    /// A missing explicit file is an error.
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        // A missing .env is normal outside local development.
        let _ = dotenvy::dotenv();

        let file_source = match path {
            Some(path) => {
                let name = path
                    .to_str()
                    .with_context(|| format!("config path {} is not UTF-8", path.display()))?;
                config::File::with_name(name).required(true)
            }
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(
                config::Config::try_from(&Config::default())
                    .context("serialize default configuration")?,
            )
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()
            .context("build configuration")?;

        settings
            .try_deserialize()
            .context("deserialize configuration")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.host.trim().is_empty() {
            return Err("server.host must not be empty".to_string());
        }

        url::Url::parse(&self.elasticsearch.url)
            .map_err(|e| format!("elasticsearch.url is not a valid URL: {e}"))?;
        if self.elasticsearch.timeout_seconds == 0 {
            return Err("elasticsearch.timeout_seconds must be greater than 0".to_string());
        }
        if self.elasticsearch.max_result_window == 0 {
            return Err("elasticsearch.max_result_window must be greater than 0".to_string());
        }
        let indices = &self.elasticsearch.indices;
        for (name, value) in [
            ("films", &indices.films),
            ("genres", &indices.genres),
            ("persons", &indices.persons),
        ] {
            if value.trim().is_empty() {
                return Err(format!("elasticsearch.indices.{name} must not be empty"));
            }
        }

        if self.cache.enabled && self.cache.capacity == 0 {
            return Err("cache.capacity must be greater than 0 when the cache is enabled".to_string());
        }

        if !matches!(
            self.logging.file_rotation.as_str(),
            "daily" | "hourly" | "minutely" | "never"
        ) {
            return Err(format!(
                "logging.file_rotation must be one of daily, hourly, minutely, never (got '{}')",
                self.logging.file_rotation
            ));
        }
        if !(0.0..=1.0).contains(&self.logging.trace_sample_ratio) {
            return Err("logging.trace_sample_ratio must be between 0.0 and 1.0".to_string());
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "invalid listen address {}:{}",
                    self.server.host, self.server.port
                )
            })
    }
}
