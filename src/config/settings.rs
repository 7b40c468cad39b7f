//! Settings structures for shopsearch configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub engine: EngineSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            engine: EngineSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    ///
    /// Server knobs use the SHOPSEARCH_* prefix; cluster connection
    /// variables keep the OPENSEARCH_* names used by deployments.
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SHOPSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SHOPSEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("OPENSEARCH_ENDPOINT") {
            self.engine.endpoint = val;
        }
        if let Ok(val) = std::env::var("OPENSEARCH_USER") {
            self.engine.username = Some(val);
        }
        if let Ok(val) = std::env::var("OPENSEARCH_PASS") {
            self.engine.password = Some(val);
        }
        if let Ok(val) = std::env::var("OPENSEARCH_INDEX_PRODUCTS") {
            self.engine.product_index = val;
        }
        if let Ok(val) = std::env::var("OPENSEARCH_INDEX_VOCAB") {
            self.engine.vocab_index = val;
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Connection settings for the OpenSearch cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Cluster URL
    pub endpoint: String,
    /// Basic auth user; no auth header is sent when unset
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
    /// Index holding product documents
    pub product_index: String,
    /// Index holding the completion vocabulary
    pub vocab_index: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:9200".to_string(),
            username: None,
            password: None,
            product_index: "products".to_string(),
            vocab_index: "vocab".to_string(),
            request_timeout: 5.0,
            pool_maxsize: 20,
            verify_ssl: true,
        }
    }
}
