//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.flipbook/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Mode;
use crate::core::pager::{DEFAULT_BUTTON_COUNT, Templates};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FlipbookConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigator: NavigatorConfig,
    #[serde(default)]
    pub pager: PagerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_mode: Option<Mode>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigatorConfig {
    pub transition_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PagerConfig {
    pub button_count: Option<u32>,
    pub page_query: Option<String>,
    #[serde(default)]
    pub templates: TemplateConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub number: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TRANSITION_MS: u64 = 1000;
pub const DEFAULT_PAGE_QUERY: &str = "page";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub mode: Mode,
    pub transition: Duration,
    pub button_count: u32,
    /// Empty disables page persistence.
    pub page_query: String,
    pub templates: Templates,
    /// Page requested on the command line, if any.
    pub start_page: Option<u32>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<Mode>,
    pub page: Option<u32>,
    pub button_count: Option<u32>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.flipbook/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".flipbook").join("config.toml"))
}

/// Load config from `~/.flipbook/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FlipbookConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FlipbookConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FlipbookConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<FlipbookConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(FlipbookConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FlipbookConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Flipbook Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_mode = "deck"              # "deck" or "pages"

# [navigator]
# transition_ms = 1000               # Length of one section transition

# [pager]
# button_count = 10                  # Numbered buttons shown at once
# page_query = "page"                # Key the current page is saved under; "" disables

# [pager.templates]
# number = "%page%"
# prev = "‹ Prev"
# next = "Next ›"
# first = "« First"
# last = "Last »"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FlipbookConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Mode: CLI → env → config → default
    let mode = cli
        .mode
        .or_else(|| env_parse("FLIPBOOK_MODE"))
        .or(config.general.default_mode)
        .unwrap_or_default();

    // Button count: CLI → env → config → default
    let button_count = cli
        .button_count
        .or_else(|| env_parse("FLIPBOOK_BUTTON_COUNT"))
        .or(config.pager.button_count)
        .unwrap_or(DEFAULT_BUTTON_COUNT);

    // Page query key: env → config → default
    let page_query = std::env::var("FLIPBOOK_PAGE_QUERY")
        .ok()
        .or_else(|| config.pager.page_query.clone())
        .unwrap_or_else(|| DEFAULT_PAGE_QUERY.to_string());

    // Transition length: env → config → default
    let transition_ms = env_parse("FLIPBOOK_TRANSITION_MS")
        .or(config.navigator.transition_ms)
        .unwrap_or(DEFAULT_TRANSITION_MS);

    ResolvedConfig {
        mode,
        transition: Duration::from_millis(transition_ms),
        button_count,
        page_query,
        templates: resolve_templates(&config.pager.templates),
        start_page: cli.page,
    }
}

/// Any template left unset falls back to the built-in label.
fn resolve_templates(config: &TemplateConfig) -> Templates {
    let defaults = Templates::default();
    let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);
    Templates {
        number: pick(&config.number, defaults.number),
        prev: pick(&config.prev, defaults.prev),
        next: pick(&config.next, defaults.next),
        first: pick(&config.first, defaults.first),
        last: pick(&config.last, defaults.last),
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}={:?}", name, raw);
            None
        }
    }
}
