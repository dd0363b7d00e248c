//! Settings for the module console, layered from two JSON files and the
//! environment.
//!
//! Precedence, lowest first:
//! 1. Built-in defaults
//! 2. Global file (`~/.config/module-console/module-console.json`)
//! 3. Local file (`./module-console.json`)
//! 4. Environment variables
//!
//! Files are merged as JSON values before a single typed deserialize, so a
//! local file only needs the keys it changes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use console_async::config::CONSOLE_DEFAULT_BASE;
use console_async::types::ModuleId;
use console_async::ConsoleConfig;
use module_selection::{DEFAULT_LOAD_TIMEOUT, DEFAULT_SEQUENCE, Preselection, SequenceMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::merge::merge_patch;

pub const LOCAL_FILE: &str = "module-console.json";
pub const GLOBAL_DIR: &str = "module-console";
pub const GLOBAL_FILE: &str = "module-console.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConsoleSettings {
    pub api: ApiSettings,
    pub modules: ModuleSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Console root, e.g. `https://console.example.com`
    pub base_url: String,
    /// Catalog load timeout
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: CONSOLE_DEFAULT_BASE.to_string(),
            timeout_secs: DEFAULT_LOAD_TIMEOUT.as_secs(),
        }
    }
}

impl ApiSettings {
    pub const fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSettings {
    /// Display position per module id; lower sorts first
    pub sequences: BTreeMap<ModuleId, u32>,
    /// Position of modules missing from `sequences`
    pub fallback_sequence: u32,
    /// Comma-separated ids checked on every catalog load
    pub preselected: String,
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            sequences: BTreeMap::new(),
            fallback_sequence: DEFAULT_SEQUENCE,
            preselected: String::new(),
        }
    }
}

impl ModuleSettings {
    pub fn sequence_map(&self) -> SequenceMap {
        self.sequences
            .iter()
            .map(|(&id, &seq)| (id, seq))
            .collect::<SequenceMap>()
            .with_fallback(self.fallback_sequence)
    }

    pub fn preselection(&self) -> Preselection {
        Preselection::parse(&self.preselected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter used when neither `-v` nor `RUST_LOG` is given
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl ModuleConsoleSettings {
    /// Client configuration pointed at the configured console.
    /// The API key is read from `CONSOLE_API_KEY` only.
    pub fn console_config(&self) -> ConsoleConfig {
        ConsoleConfig::new().with_api_base(self.api.base_url.trim_end_matches('/'))
    }
}

/// A problem worth reporting that does not stop the console from running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsWarning {
    pub path: &'static str,
    pub message: String,
}

impl fmt::Display for SettingsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone)]
pub struct SettingsPaths {
    pub global: PathBuf,
    pub local: PathBuf,
}

#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: ModuleConsoleSettings,
    pub warnings: Vec<SettingsWarning>,
    pub paths: SettingsPaths,
}

pub fn global_settings_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config dir")?;
    Ok(base.join(GLOBAL_DIR).join(GLOBAL_FILE))
}

pub fn local_settings_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_FILE)
}

/// Loads settings for a console started in `local_dir`.
pub fn load_merged(local_dir: &Path) -> Result<LoadedSettings> {
    load_layers(global_settings_path()?, local_settings_path(local_dir))
}

fn load_layers(global: PathBuf, local: PathBuf) -> Result<LoadedSettings> {
    let merged = merge_patch(read_json_object_or_empty(&global)?, read_json_object_or_empty(&local)?);
    let mut settings: ModuleConsoleSettings =
        serde_json::from_value(merged).context("Failed to deserialize merged module-console settings")?;

    let mut warnings = apply_env_overrides(&mut settings);
    warnings.extend(validate(&settings));

    Ok(LoadedSettings {
        settings,
        warnings,
        paths: SettingsPaths { global, local },
    })
}

fn apply_env_overrides(settings: &mut ModuleConsoleSettings) -> Vec<SettingsWarning> {
    let mut warnings = vec![];

    if let Some(v) = env_trimmed("CONSOLE_BASE_URL") {
        settings.api.base_url = v;
    }
    if let Some(v) = env_trimmed("MODULE_CONSOLE_TIMEOUT_SECS") {
        match v.parse() {
            Ok(secs) => settings.api.timeout_secs = secs,
            Err(_) => warnings.push(SettingsWarning {
                path: "MODULE_CONSOLE_TIMEOUT_SECS",
                message: format!("not a number of seconds: '{v}', keeping {}", settings.api.timeout_secs),
            }),
        }
    }
    if let Some(v) = env_trimmed("MODULE_CONSOLE_PRESELECTED") {
        settings.modules.preselected = v;
    }
    if let Some(v) = env_trimmed("MODULE_CONSOLE_LOG_LEVEL") {
        settings.logging.level = v;
    }

    warnings
}

/// Advisory checks; none of these prevent loading.
pub fn validate(settings: &ModuleConsoleSettings) -> Vec<SettingsWarning> {
    let mut warnings = vec![];

    let base = settings.api.base_url.trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        warnings.push(SettingsWarning {
            path: "api.base_url",
            message: format!("expected an http(s) URL, got '{base}'"),
        });
    }
    if settings.api.timeout_secs == 0 {
        warnings.push(SettingsWarning {
            path: "api.timeout_secs",
            message: "0 makes every catalog load time out".to_string(),
        });
    }
    if settings.modules.sequences.contains_key(&0) {
        warnings.push(SettingsWarning {
            path: "modules.sequences",
            message: "module id 0 never appears in a catalog".to_string(),
        });
    }
    let raw = &settings.modules.preselected;
    if !raw.trim().is_empty() && settings.modules.preselection().is_empty() {
        warnings.push(SettingsWarning {
            path: "modules.preselected",
            message: format!("no usable module ids in '{raw}'"),
        });
    }

    warnings
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_json_object_or_empty(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    if !value.is_object() {
        anyhow::bail!("Settings root must be a JSON object: {}", path.display());
    }
    Ok(value)
}
