//! Studio settings read from `config.json` under the user's config directory.

use crate::session::SessionOpts;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "cardstyle";
const APP_CONFIG_FILE: &str = "config.json";

/// Settings shared by every editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Pixel size of one layout unit.
    pub unit_px: f64,
    /// Upper bound on a background-generation request.
    pub generation_timeout_secs: u64,
    /// HTTP endpoint of the background generator, if any.
    pub generation_endpoint: Option<String>,
    /// Directory of extra `*.json` templates.
    pub templates_dir: Option<PathBuf>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            unit_px: 16.0,
            generation_timeout_secs: 60,
            generation_endpoint: None,
            templates_dir: None,
        }
    }
}

impl StudioConfig {
    /// Session options derived from these settings.
    pub fn session_opts(&self) -> SessionOpts {
        SessionOpts {
            unit_px: self.unit_px,
            generation_timeout: Duration::from_secs(self.generation_timeout_secs),
        }
    }

    // Out-of-range values fall back field by field.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.unit_px.is_finite() && self.unit_px > 0.0) {
            tracing::warn!(unit_px = self.unit_px, "invalid unit_px in config.json; using default");
            self.unit_px = defaults.unit_px;
        }
        if self.generation_timeout_secs == 0 {
            tracing::warn!("generation_timeout_secs must be positive; using default");
            self.generation_timeout_secs = defaults.generation_timeout_secs;
        }
        self
    }
}

/// Load settings from `$XDG_CONFIG_HOME/cardstyle/config.json` (or `~/.config/...`).
///
/// A missing or unreadable file yields the defaults.
pub fn load_studio_config() -> StudioConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_studio_config_with(xdg_config_home.as_deref(), home.as_deref())
}

pub(crate) fn load_studio_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> StudioConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return StudioConfig::default(),
    };
    load_studio_config_from(&path)
}

/// Load settings from an explicit file.
pub fn load_studio_config_from(path: &Path) -> StudioConfig {
    if !path.exists() {
        return StudioConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str::<StudioConfig>(&contents)
            .map(StudioConfig::sanitized)
            .unwrap_or_else(|err| {
                tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
                StudioConfig::default()
            }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            StudioConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
