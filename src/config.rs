//! Configuration for the command watcher.
//!
//! Layered configuration:
//! - Default values
//! - TOML configuration file (`.cmdwatch/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the caller)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `CMDWATCH_` and use double
//! underscores to separate nested levels:
//! - `CMDWATCH_COMMAND_FILE=cmd.txt` sets `command_file`
//! - `CMDWATCH_WATCH__SETTLE_MS=50` sets `watch.settle_ms`
//! - `CMDWATCH_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory holding the settings file.
pub const CONFIG_DIR: &str = ".cmdwatch";

/// Settings file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "settings.toml";

const ENV_PREFIX: &str = "CMDWATCH_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// The watched command file
    #[serde(default = "default_command_file")]
    pub command_file: PathBuf,

    /// Directory outside of which no command may read or write.
    /// Defaults to the process working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_root: Option<PathBuf>,

    /// Change detection tuning
    #[serde(default)]
    pub watch: WatchConfig,

    /// Log filter levels
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WatchConfig {
    /// Quiet period before a burst of change events is acted on
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Bound of the change notification channel; overflow is dropped
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for everything
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `"cmdwatch::watcher" = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 {
    1
}
fn default_command_file() -> PathBuf {
    PathBuf::from("command.txt")
}
fn default_settle_ms() -> u64 {
    100
}
fn default_channel_capacity() -> usize {
    64
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            command_file: default_command_file(),
            sandbox_root: None,
            watch: WatchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().replace("__", ".").into())
}

impl Settings {
    /// Load configuration from all sources.
    ///
    /// The settings file is searched upward from the current directory.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honouring env overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(env_provider())
            .extract()
            .map_err(Box::new)
    }

    /// Find the settings file by looking for the config directory
    /// from the current directory up to the filesystem root.
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(CONFIG_FILE))
    }

    /// The sandbox root, falling back to the process working directory.
    pub fn sandbox_root(&self) -> std::io::Result<PathBuf> {
        match &self.sandbox_root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file in the current directory.
    pub fn init_config_file(force: bool) -> anyhow::Result<PathBuf> {
        let config_path = PathBuf::from(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite",
                config_path.display()
            );
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}
