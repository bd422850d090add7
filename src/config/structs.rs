//! Configuration struct definitions.

use serde::Deserialize;

/// Settings every sink shares.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum log level; unknown names fall back to `info`.
    pub level: String,
    /// Seconds between background flushes; 0 selects 30.
    pub flush_interval_secs: u64,
    /// Idle records and buffers kept for reuse.
    pub backlog: usize,
    /// `text` or `json`.
    pub encoder: String,
    /// chrono strftime pattern for the `time` key.
    pub time_format: String,
    /// Text encoder key/value separator.
    pub separator: String,
    pub prefix: String,
    /// `minimal` (quotes only) or `full`.
    pub json_escape: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            flush_interval_secs: 30,
            backlog: 100,
            encoder: "text".to_string(),
            time_format: crate::encoder::DEFAULT_TIME_FORMAT.to_string(),
            separator: "=".to_string(),
            prefix: String::new(),
            json_escape: "minimal".to_string(),
        }
    }
}

/// Console sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Rotating file sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enabled: bool,
    /// `single` or `multi`.
    pub mode: String,
    /// Lowest level with its own file in multi mode; unset means `general.level`.
    pub level: Option<String>,
    /// Log directory; `~` is expanded.
    pub dir: String,
    /// Write buffer per file in bytes.
    pub buffer_size: usize,
    /// Days to keep rotated files; `<= 0` keeps everything.
    pub retention_days: i64,
    /// `cumulative` or `exclusive`.
    pub routing: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: "multi".to_string(),
            level: None,
            dir: "logs".to_string(),
            buffer_size: 40 * 1024,
            retention_days: 14,
            routing: "cumulative".to_string(),
        }
    }
}
