use monitor_core::{MonitorError, Result};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// Default number of samples kept on screen.
pub const DEFAULT_TIME_LINE: usize = 200;

/// Default fill colour of the usage graph.
pub const DEFAULT_GRAPHIC_COLOR: &str = "#347aeb";

/// Widget settings parsed from `cpu_monitor.toml`.
///
/// ```toml
/// TimeLine     = 120
/// GraphicColor = "#a6e3a1"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Settings {
    /// Maximum number of samples retained before the oldest is evicted.
    /// Whole-number floats such as `200.0` are accepted.
    #[serde(deserialize_with = "whole_count")]
    pub time_line: usize,
    /// Hex colour of the filled usage area.
    pub graphic_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_line:     DEFAULT_TIME_LINE,
            graphic_color: DEFAULT_GRAPHIC_COLOR.to_string(),
        }
    }
}

impl Settings {
    /// Reject settings the sampler cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.time_line == 0 {
            return Err(MonitorError::Config("TimeLine must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Int(u64),
    Float(f64),
}

fn whole_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    match Count::deserialize(deserializer)? {
        Count::Int(n) => usize::try_from(n).map_err(D::Error::custom),
        Count::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 => Ok(f as usize),
        Count::Float(f) => Err(D::Error::custom(format!(
            "TimeLine must be a non-negative whole number, got {f}"
        ))),
    }
}
