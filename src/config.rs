use crate::error::Result;
use crate::manager::FilterManagerConfig;
use crate::search::{InMemoryRepository, RepositoryMap, SearchRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Environment variable prefix, e.g. `FILTER_MANAGER__SERVER__HTTP_PORT=9000`
pub const ENV_PREFIX: &str = "FILTER_MANAGER";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Document repositories, keyed by the name managers refer to
    #[serde(default)]
    pub repositories: HashMap<String, RepositoryConfig>,

    /// Managers and filters
    #[serde(default)]
    pub filter_manager: FilterManagerConfig,
}

impl Config {
    /// Load configuration from the embedded defaults, an optional file and the
    /// environment, in that order of precedence (lowest first)
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.yaml"),
                config::FileFormat::Yaml,
            ));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let config = builder
            // Override with environment variables (prefix: FILTER_MANAGER_)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Open every configured repository
    pub fn repositories(&self) -> Result<RepositoryMap> {
        let mut repositories: RepositoryMap = HashMap::with_capacity(self.repositories.len());

        for (name, repository) in &self.repositories {
            let store = match &repository.documents {
                Some(path) => InMemoryRepository::from_json_file(path)?,
                None => InMemoryRepository::new(),
            };
            tracing::info!(repository = %name, documents = store.len(), "Repository loaded");

            let store: Arc<dyn SearchRepository> = Arc::new(store);
            repositories.insert(name.clone(), store);
        }

        Ok(repositories)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// JSON file holding an array of documents. Empty repository when unset.
    pub documents: Option<PathBuf>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        assert_eq!(default_http_port(), 8080);
        assert_eq!(default_log_level(), "info");
        assert_eq!(ServerConfig::default().bind_address(), "0.0.0.0:8080");
        assert!(!ObservabilityConfig::default().json_logs);
    }

    #[test]
    fn test_embedded_defaults_load() {
        let config = Config::load(None).unwrap();
        assert!(config.filter_manager.managers.is_empty());
        assert!(config.repositories.is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::load(Some("does/not/exist.yaml")).is_err());
    }

    #[test]
    fn test_repository_without_documents_is_empty() {
        let mut config = Config::load(None).unwrap();
        config
            .repositories
            .insert("default".to_string(), RepositoryConfig::default());

        let repositories = config.repositories().unwrap();
        assert!(repositories.contains_key("default"));
    }
}
