//! Configuration for the Printful client
//!
//! The client itself takes explicit constructor parameters. This module is
//! the host-side layer that gathers them from files and the environment,
//! and publishes the bundled template into a host config directory.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};

/// Default Printful API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.printful.com/";

/// File name of the published template
pub const TEMPLATE_FILE_NAME: &str = "printful.toml";

/// Bundled configuration template
pub const TEMPLATE: &str = include_str!("../../config/printful.toml");

/// Printful client settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with PRINTFUL_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/printful.toml
    ///
    /// The directory defaults to `config` and can be moved with
    /// `PRINTFUL_CONFIG_PATH`.
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("PRINTFUL_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));
        Self::load_from(&config_dir)
    }

    /// Load configuration rooted at an explicit directory
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(config_dir, Environment::with_prefix("PRINTFUL"))
    }

    /// Values stay strings until deserialized, so an all-digit
    /// `PRINTFUL_API_KEY` keeps its exact text while `PRINTFUL_TIMEOUT_SECS`
    /// still parses into its numeric field.
    fn load_with_env(config_dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api_key", "")?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS as i64)?
            .add_source(File::from(config_dir.join(TEMPLATE_FILE_NAME)).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(environment);

        builder.build()?.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// Copy the bundled template into `config_dir`
///
/// An existing file is left untouched unless `force` is set.
pub fn publish_template(config_dir: &Path, force: bool) -> io::Result<PathBuf> {
    let target = config_dir.join(TEMPLATE_FILE_NAME);
    if target.exists() && !force {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", target.display()),
        ));
    }

    fs::create_dir_all(config_dir)?;
    fs::write(&target, TEMPLATE)?;
    info!(path = %target.display(), "Published Printful config template");

    Ok(target)
}
