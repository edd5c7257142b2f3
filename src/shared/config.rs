//! Client configuration module
//!
//! Configuration for the chat client: server endpoints, the history page
//! size, and the session token slot. Values can come from the builder or
//! from a TOML file.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default HTTP server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
/// Default push channel URL
const DEFAULT_SOCKET_URL: &str = "ws://127.0.0.1:3001";
/// Default history page size
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    server_url: String,
    socket_url: String,
    page_size: u32,
    token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            socket_url: DEFAULT_SOCKET_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            token: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ClientConfigBuilder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(raw)?;
        let mut builder = Self::builder();
        if let Some(url) = file.server_url {
            builder = builder.server_url(url);
        }
        if let Some(url) = file.socket_url {
            builder = builder.socket_url(url);
        }
        if let Some(size) = file.page_size {
            builder = builder.page_size(size);
        }
        builder.build()
    }

    /// Set the session token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the session token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn socket_url(&self) -> &str {
        &self.socket_url
    }

    /// History page size used by the conversation engine
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// On-disk configuration file shape
#[derive(Debug, Deserialize)]
struct ConfigFile {
    server_url: Option<String>,
    socket_url: Option<String>,
    page_size: Option<u32>,
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    server_url: Option<String>,
    socket_url: Option<String>,
    page_size: Option<u32>,
}

impl ClientConfigBuilder {
    /// Set the HTTP server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the push channel URL
    pub fn socket_url(mut self, url: impl Into<String>) -> Self {
        self.socket_url = Some(url.into());
        self
    }

    /// Set the history page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        if self.page_size == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                message: "page size must be greater than zero".to_string(),
            });
        }
        let defaults = ClientConfig::default();
        Ok(ClientConfig {
            server_url: self
                .server_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            socket_url: self.socket_url.unwrap_or(defaults.socket_url),
            page_size: self.page_size.unwrap_or(defaults.page_size),
            token: None,
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}
