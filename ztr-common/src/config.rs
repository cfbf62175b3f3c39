//! Configuration loading and store credential resolution
//!
//! Store credentials resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`ZTR_STORE_URL`/`ZTR_STORE_KEY`, then the
//!    Supabase names `SUPABASE_URL`/`SUPABASE_ANON_KEY`)
//! 3. TOML config file
//!
//! There is no compiled default: a missing URL or key is a configuration error.

use crate::grading::{GradeBand, GradeTable};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STORE_URL_ENV: &str = "ZTR_STORE_URL";
pub const STORE_KEY_ENV: &str = "ZTR_STORE_KEY";
pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Contents of `config.toml`
///
/// ```toml
/// store_url = "https://project.supabase.co"
/// store_key = "..."
///
/// [[grade_bands]]
/// min_percentage = 80.0
/// grade = "A"
/// message = "Excellent performance!"
/// show_confetti = true
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TomlConfig {
    pub store_url: Option<String>,
    pub store_key: Option<String>,
    #[serde(default)]
    pub grade_bands: Vec<GradeBand>,
}

/// Resolved store credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
}

impl TomlConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Load the config file
    ///
    /// An explicit path must exist. Without one, the platform config
    /// locations are searched and a missing file yields an empty config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        match default_config_file() {
            Some(path) => {
                debug!("Loading config file {}", path.display());
                Self::from_file(&path)
            }
            None => {
                debug!("No config file found, using command line and environment only");
                Ok(Self::default())
            }
        }
    }

    /// Resolve store URL and key by priority order
    pub fn resolve_store(&self, cli_url: Option<&str>, cli_key: Option<&str>) -> Result<StoreConfig> {
        let url = pick(
            cli_url,
            &[STORE_URL_ENV, SUPABASE_URL_ENV],
            self.store_url.as_deref(),
        )
        .ok_or_else(|| {
            Error::Config(format!(
                "Store URL not configured (use --store-url, {} or store_url in config.toml)",
                STORE_URL_ENV
            ))
        })?;

        let api_key = pick(
            cli_key,
            &[STORE_KEY_ENV, SUPABASE_KEY_ENV],
            self.store_key.as_deref(),
        )
        .ok_or_else(|| {
            Error::Config(format!(
                "Store key not configured (use --store-key, {} or store_key in config.toml)",
                STORE_KEY_ENV
            ))
        })?;

        Ok(StoreConfig { url, api_key })
    }

    /// Grade table from `[[grade_bands]]`, or the standard table when absent
    pub fn grade_table(&self) -> Result<GradeTable> {
        if self.grade_bands.is_empty() {
            return Ok(GradeTable::default());
        }

        GradeTable::new(self.grade_bands.clone())
            .map_err(|e| Error::Config(format!("Invalid grade_bands: {}", e)))
    }
}

/// First non-empty value among CLI argument, environment variables, config file
fn pick(cli: Option<&str>, env_vars: &[&str], file: Option<&str>) -> Option<String> {
    let non_empty = |value: &str| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    cli.and_then(non_empty)
        .or_else(|| {
            env_vars
                .iter()
                .find_map(|name| std::env::var(name).ok().and_then(|v| non_empty(&v)))
        })
        .or_else(|| file.and_then(non_empty))
}

/// Locate `config.toml` in the platform config locations
///
/// Tries `<config_dir>/ztr/config.toml` first, then `/etc/ztr/config.toml` on Linux.
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("ztr").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/ztr/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
