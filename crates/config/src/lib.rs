pub mod schema;
pub mod watcher;

pub use schema::{Settings, DEFAULT_GRAPHIC_COLOR, DEFAULT_TIME_LINE};
pub use watcher::ConfigWatcher;

use monitor_core::{MonitorError, Result};
use std::path::{Path, PathBuf};

/// File name of the widget's settings inside the config directory.
pub const SETTINGS_FILE: &str = "cpu_monitor.toml";

/// Load settings from a TOML file.  Returns `Settings::default()` if the file
/// doesn't exist so the widget always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Settings file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(Settings::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| MonitorError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let settings: Settings =
        toml::from_str(&raw).map_err(|e| MonitorError::Config(format!("TOML parse error: {e}")))?;
    settings.validate()?;
    Ok(settings)
}

/// Config directory for the widget, honouring `$XDG_CONFIG_HOME`.
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cpu-monitor")
}

/// Resolve a settings file name against [`config_dir`].
pub fn path_for(file: &str) -> PathBuf {
    config_dir().join(file)
}

/// Return the default settings path.
pub fn default_path() -> PathBuf {
    path_for(SETTINGS_FILE)
}
