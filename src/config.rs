use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::calculator;
use crate::error::ConfigError;

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_total() -> i64 {
    1
}
fn default_target() -> f64 {
    80.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker threads; actix picks one per core when unset.
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

/// Values the form starts out with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefaults {
    #[serde(default)]
    pub attended: i64,
    #[serde(default = "default_total")]
    pub total: i64,
    #[serde(default = "default_target")]
    pub target: f64,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            attended: 0,
            total: default_total(),
            target: default_target(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub form: FormDefaults,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads `path` if given, otherwise falls back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        workers: Option<usize>,
    ) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        if workers.is_some() {
            self.server.workers = workers;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.workers == Some(0) {
            return Err(ConfigError::Invalid(
                "server.workers must be at least 1".to_string(),
            ));
        }

        let errors = calculator::validate(self.form.attended, self.form.total, self.form.target);
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "form defaults: {}",
                errors.join(" ")
            )));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
