//! Configuration loading and resolution
//!
//! Bootstrap configuration for the batch binaries comes from an optional
//! TOML file. Individual values resolve in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is never an error; a malformed one is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "FOLIO_CONFIG";

/// Environment variable carrying the database connection string
pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TomlConfig {
    /// Database connection string (e.g. `sqlite:///var/lib/folio/folio.db`)
    pub database_url: Option<String>,

    /// Folder holding the default database and artifact
    pub data_dir: Option<PathBuf>,

    pub logging: LoggingConfig,

    /// Raw catalog exports, read in order
    pub sources: Vec<SourceConfig>,

    /// Cleaned JSON artifact shared between the clean and seed stages
    pub artifact_path: Option<PathBuf>,

    pub pricing: PricingConfig,
    pub seed: SeedConfig,
    pub reviews: ReviewConfig,
    pub covers: CoverConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// One delimited input file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    pub path: PathBuf,
    /// `"pipe"` or `"comma"`
    pub format: String,
}

/// Price synthesis for records without a usable price column
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// `"uniform"` or `"by_category"`
    pub policy: String,
    pub min: f64,
    pub max: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            policy: "uniform".to_string(),
            min: 10.0,
            max: 50.0,
        }
    }
}

/// Seed stage tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub batch_size: usize,
    pub batch_delay_ms: u64,
    /// Remove existing reviews, cart items and books before inserting
    pub clear_existing: bool,
    pub publisher: String,
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_delay_ms: 50,
            clear_existing: true,
            publisher: "Solson Publications".to_string(),
            rng_seed: None,
        }
    }
}

/// Review generation tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub user_pool_size: usize,
    pub min_reviews: usize,
    pub max_reviews: usize,
    pub verified_probability: f64,
    pub progress_every: usize,
    pub rng_seed: Option<u64>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            user_pool_size: 2000,
            min_reviews: 200,
            max_reviews: 1500,
            verified_probability: 0.7,
            progress_every: 50,
            rng_seed: None,
        }
    }
}

/// Optional cover-image lookup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub requests_per_second: u32,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            requests_per_second: 1,
        }
    }
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load a TOML file; the file must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve and load the config file, falling back to defaults
    ///
    /// An explicitly named file (CLI or env) must exist. Platform locations
    /// are only used when present.
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_path {
            return Self::load(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::load(Path::new(&path));
            }
        }

        match default_config_file() {
            Some(path) => Self::load(&path),
            None => {
                debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Data folder: TOML value or the platform default
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Artifact path: TOML value or `{data_dir}/books_cleaned.json`
    pub fn artifact_path(&self) -> PathBuf {
        self.artifact_path
            .clone()
            .unwrap_or_else(|| self.data_dir().join("books_cleaned.json"))
    }

    /// Resolve the database URL (CLI → ENV → TOML → default)
    pub fn database_url(&self, cli_arg: Option<&str>) -> String {
        if let Some(url) = cli_arg.filter(|u| !u.trim().is_empty()) {
            return url.to_string();
        }

        if let Ok(url) = std::env::var(DATABASE_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                return url;
            }
        }

        if let Some(url) = self.database_url.as_ref().filter(|u| !u.trim().is_empty()) {
            return url.clone();
        }

        format!("sqlite://{}", self.data_dir().join("folio.db").display())
    }
}

/// First existing platform config file, if any
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("folio").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/folio/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default data folder
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("folio"))
        .unwrap_or_else(|| PathBuf::from("./folio_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert!(config.database_url.is_none());
        assert!(config.sources.is_empty());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.seed.batch_size, 10);
        assert_eq!(config.seed.batch_delay_ms, 50);
        assert!(config.seed.clear_existing);
        assert_eq!(config.reviews.user_pool_size, 2000);
        assert_eq!(config.reviews.min_reviews, 200);
        assert_eq!(config.reviews.max_reviews, 1500);
        assert!(!config.covers.enabled);
        assert_eq!(config.pricing.policy, "uniform");
    }

    #[test]
    fn test_full_document() {
        let config = TomlConfig::from_toml_str(
            r#"
            database_url = "sqlite:///tmp/shop.db"
            artifact_path = "/tmp/cleaned.json"

            [logging]
            level = "debug"

            [[sources]]
            path = "books_us.csv"
            format = "comma"

            [[sources]]
            path = "books_us (1).csv"
            format = "pipe"

            [pricing]
            policy = "by_category"

            [reviews]
            user_pool_size = 500
            rng_seed = 7

            [covers]
            enabled = true
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[1].format, "pipe");
        assert_eq!(config.pricing.policy, "by_category");
        assert_eq!(config.pricing.min, 10.0);
        assert_eq!(config.reviews.user_pool_size, 500);
        assert_eq!(config.reviews.max_reviews, 1500);
        assert_eq!(config.reviews.rng_seed, Some(7));
        assert_eq!(config.covers.api_key.as_deref(), Some("abc"));
        assert_eq!(config.artifact_path(), PathBuf::from("/tmp/cleaned.json"));
    }

    #[test]
    fn test_malformed_document_is_config_error() {
        let err = TomlConfig::from_toml_str("sources = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_artifact_lives_in_data_dir() {
        let config = TomlConfig {
            data_dir: Some(PathBuf::from("/srv/folio")),
            ..Default::default()
        };
        assert_eq!(
            config.artifact_path(),
            PathBuf::from("/srv/folio/books_cleaned.json")
        );
    }
}
