//! Logger construction from a loaded [`Config`].

use super::{DEFAULT_FLUSH_INTERVAL, Logger, LoggerBuilder};
use crate::config::{Config, EncoderKind};
use crate::encoder::{JsonEncoder, TextEncoder};
use crate::internal;
use std::time::Duration;

impl Logger {
    /// Loads the default config file and builds a logger from it.
    ///
    /// # Errors
    /// Config loading errors, or the file sink failing to open.
    pub fn from_default_config() -> Result<Self, crate::Error> {
        let config = Config::load()?;
        Self::from_config(&config)
    }

    /// Builds a logger with the configured encoder and sinks.
    ///
    /// # Errors
    /// The log directory cannot be created or today's file cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        internal::debug("LOGGER", "Building logger from config");
        let level = config.parse_level();
        internal::debug("LOGGER", &format!("Log level: {level}"));

        let interval = match config.general.flush_interval_secs {
            0 => DEFAULT_FLUSH_INTERVAL,
            secs => Duration::from_secs(secs),
        };
        let mut builder = LoggerBuilder::new()
            .level(level)
            .flush_interval(interval)
            .backlog(config.general.backlog)
            .prefix(config.general.prefix.as_str());

        let general = &config.general;
        builder = match config.parse_encoder() {
            EncoderKind::Text => {
                builder.encoder(TextEncoder::new(&general.time_format, &general.separator))
            }
            EncoderKind::Json => builder.encoder(
                JsonEncoder::new(&general.time_format).escape(config.parse_json_escape()),
            ),
        };

        let mut outputs: Vec<&str> = Vec::new();
        if config.console.enabled {
            builder = builder.console();
            outputs.push("console");
        }
        if config.file.enabled {
            builder = Self::configure_file(builder, config)?;
            outputs.push("file");
        }

        if outputs.is_empty() {
            internal::warn("LOGGER", "No outputs enabled");
        } else {
            internal::debug("LOGGER", &format!("Outputs enabled: [{}]", outputs.join(", ")));
        }
        Ok(builder.build())
    }

    fn configure_file(builder: LoggerBuilder, config: &Config) -> Result<LoggerBuilder, crate::Error> {
        let file = &config.file;
        internal::debug(
            "FILE",
            &format!("dir={}, mode={}, retention={}d", file.dir, file.mode, file.retention_days),
        );
        builder
            .file()
            .mode(config.parse_file_mode())
            .level(config.parse_file_level())
            .routing(config.parse_routing())
            .dir(file.dir.as_str())
            .buffer_size(file.buffer_size)
            .retention_days(file.retention_days)
            .done()
    }
}
