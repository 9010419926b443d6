//! Configuration types for VIP Go
//!
//! Every section is optional in the TOML file; missing values fall back to
//! the defaults below. Command-line flags are merged on top by the binary.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

/// Root configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Machine-token authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Remote files API configuration, read by `vipgo-files` consumers.
    /// Checked by [`FilesConfig::validate`] when a client is built.
    #[serde(default)]
    pub files: FilesConfig,
    /// Sites served by the `sites` endpoint
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

impl Config {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a configuration file.
    ///
    /// A missing file yields the default configuration; a file that exists
    /// but does not parse is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check the sections the gateway itself uses
    pub fn validate(&self) -> Result<()> {
        if self.auth.secret.as_deref() == Some("") {
            return Err(Error::configuration("auth.secret must not be empty"));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the REST API
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Machine-token authentication configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to derive tokens. Usually supplied through the
    /// environment instead of the file.
    #[serde(default)]
    pub secret: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Remote files API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Base URL of the files service
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Site identifier sent with every request
    #[serde(default)]
    pub site_id: String,
    /// Access token sent with every request
    #[serde(default)]
    pub access_token: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Local directory that uploads are addressed under
    #[serde(default = "default_uploads_basedir")]
    pub uploads_basedir: String,
    /// Local content directory (parent of `uploads`)
    #[serde(default = "default_content_dir")]
    pub content_dir: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            site_id: String::new(),
            access_token: String::new(),
            timeout_secs: default_timeout_secs(),
            uploads_basedir: default_uploads_basedir(),
            content_dir: default_content_dir(),
        }
    }
}

impl fmt::Debug for FilesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilesConfig")
            .field("api_base", &self.api_base)
            .field("site_id", &self.site_id)
            .field("access_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("uploads_basedir", &self.uploads_basedir)
            .field("content_dir", &self.content_dir)
            .finish()
    }
}

impl FilesConfig {
    /// Check invariants that serde defaults cannot express
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::configuration("files.timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

fn default_api_base() -> String {
    "https://files.vipv2.net".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_uploads_basedir() -> String {
    "/var/www/wp-content/uploads".to_string()
}

fn default_content_dir() -> String {
    "/var/www/wp-content".to_string()
}

/// A site listed by the `sites` endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub id: u64,
    pub domain_name: String,
}
