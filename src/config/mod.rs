//! TOML configuration loading.
//!
//! Values are kept as strings for TOML ergonomics; the `parse_*` helpers
//! convert them to the typed settings the builder takes, falling back to the
//! default on anything unrecognised.

mod structs;

pub use structs::{ConsoleConfig, FileConfig, GeneralConfig};

use crate::encoder::JsonEscape;
use crate::internal;
use crate::level::Level;
use crate::logger::FileMode;
use crate::output::Routing;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "cascadelog.toml";

/// Which record layout to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderKind {
    #[default]
    Text,
    Json,
}

/// An empty file yields a working console logger: every section is `#[serde(default)]`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl Config {
    /// Loads `cascadelog.toml` from the platform config directory. A missing
    /// file is not an error.
    ///
    /// # Errors
    /// No config directory on this platform, unreadable file, or invalid TOML.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let path = Self::config_path()?;
        let config = Self::load_from(&path)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Loads from an explicit path; a missing file yields the defaults.
    ///
    /// # Errors
    /// Unreadable file or invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// # Errors
    /// Invalid TOML or a value of the wrong type.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// `<config dir>/cascadelog/cascadelog.toml` (XDG on Linux).
    ///
    /// # Errors
    /// The platform has no notion of a home directory.
    pub fn config_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "cascadelog")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    #[must_use]
    pub fn parse_level(&self) -> Level {
        Level::parse(&self.general.level)
    }

    /// Minimum level of the multi-file writer.
    #[must_use]
    pub fn parse_file_level(&self) -> Level {
        self.file
            .level
            .as_deref()
            .map_or_else(|| self.parse_level(), Level::parse)
    }

    #[must_use]
    pub fn parse_encoder(&self) -> EncoderKind {
        match self.general.encoder.trim().to_lowercase().as_str() {
            "json" => EncoderKind::Json,
            _ => EncoderKind::Text,
        }
    }

    #[must_use]
    pub fn parse_json_escape(&self) -> JsonEscape {
        match self.general.json_escape.trim().to_lowercase().as_str() {
            "full" => JsonEscape::Full,
            _ => JsonEscape::Minimal,
        }
    }

    #[must_use]
    pub fn parse_file_mode(&self) -> FileMode {
        match self.file.mode.trim().to_lowercase().as_str() {
            "single" => FileMode::Single,
            _ => FileMode::Multi,
        }
    }

    #[must_use]
    pub fn parse_routing(&self) -> Routing {
        match self.file.routing.trim().to_lowercase().as_str() {
            "exclusive" => Routing::Exclusive,
            _ => Routing::Cumulative,
        }
    }
}
