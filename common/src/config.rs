//! Configuration parsing – reads a KEY=VALUE file (`timetable.conf`).
//!
//! The web server and the CLI load the same file; each ignores fields it
//! does not need.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calendar::ViewMode;
use crate::permissions::Role;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // ── backend ──────────────────────────────────────────────────────
    /// Origin of the school REST backend, e.g. `http://localhost:5000`.
    pub api_base_url: String,
    /// Bearer token for the CLI.  The browser keeps its own in local storage.
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,

    // ── calendar ─────────────────────────────────────────────────────
    pub role: Role,
    pub show_weekends: bool,
    pub default_view: ViewMode,
    /// Class preselected by the CLI when none is given on the command line.
    pub default_class: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: "http://localhost:5000".into(),
            auth_token: None,
            request_timeout_secs: 30,
            role: Role::Student,
            show_weekends: false,
            default_view: ViewMode::Week,
            default_class: None,
        }
    }
}

impl Config {
    /// Default config path.
    pub fn default_path() -> &'static str {
        "/etc/timetable/timetable.conf"
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Subset handed to the browser.  Never includes the token.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_base_url: self.api_base_url.clone(),
            role: self.role,
            show_weekends: self.show_weekends,
            default_view: self.default_view,
        }
    }
}

/// Settings the web front end needs at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub role: Role,
    pub show_weekends: bool,
    pub default_view: ViewMode,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Config::default().client_settings()
    }
}

/// Parse a `KEY=VALUE` configuration file.
///
/// Lines starting with `#` are comments.  Values may be optionally
/// double-quoted.  Unknown keys are silently ignored.
pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config: {}", path.display()))?;
    let config = from_str(&text);
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to defaults.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load(path)
    } else {
        warn!("Config {} not found – using defaults", path.display());
        Ok(Config::default())
    }
}

/// Build a config from `KEY=VALUE` text.
pub fn from_str(text: &str) -> Config {
    let map = parse_conf(text);
    let defaults = Config::default();

    let get = |key: &str| -> Option<String> { map.get(key).cloned().filter(|v| !v.is_empty()) };
    let get_bool = |key: &str, default: bool| -> bool {
        get(key)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
            .unwrap_or(default)
    };

    let role = match get("ROLE").map(|r| r.parse::<Role>()) {
        Some(Ok(role)) => role,
        Some(Err(e)) => {
            warn!("{e} – falling back to {}", defaults.role);
            defaults.role
        }
        None => defaults.role,
    };
    let default_view = match get("DEFAULT_VIEW").map(|v| v.parse::<ViewMode>()) {
        Some(Ok(view)) => view,
        Some(Err(e)) => {
            warn!("{e} – falling back to {}", defaults.default_view);
            defaults.default_view
        }
        None => defaults.default_view,
    };

    Config {
        api_base_url: get("API_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url),
        auth_token: get("AUTH_TOKEN"),
        request_timeout_secs: get("REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs),
        role,
        show_weekends: get_bool("SHOW_WEEKENDS", defaults.show_weekends),
        default_view,
        default_class: get("DEFAULT_CLASS"),
    }
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
fn parse_conf(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            map.insert(key.to_string(), val.to_string());
        }
    }
    map
}

// ─── tests ───────────────────────────────────────────────────────────────
