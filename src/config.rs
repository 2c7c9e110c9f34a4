// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of canvas-mermaid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Conversion settings.
//!
//! A [`ConversionConfig`] is a plain value handed to every conversion call. It can be loaded from
//! a TOML file and then overridden field by field (the CLI does this with its flags).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Config file looked up in the working directory when no explicit path is given.
pub const LOCAL_CONFIG_FILENAME: &str = "canvas-mermaid.toml";

/// Flowchart direction, emitted verbatim after the `flowchart` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    TopToBottom,
    BottomToTop,
    RightToLeft,
    LeftToRight,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
            Self::RightToLeft => "RL",
            Self::LeftToRight => "LR",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid flowchart direction: {0:?} (expected TB/TD/BT/RL/LR)")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Self::TopToBottom),
            "BT" => Ok(Self::BottomToTop),
            "RL" => Ok(Self::RightToLeft),
            "LR" => Ok(Self::LeftToRight),
            _ => Err(ParseDirectionError(s.to_owned())),
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    pub direction: Direction,
    /// Emit `style`/`linkStyle` statements for nodes and edges with color or stroke overrides.
    pub enable_styling: bool,
    /// Mark file-backed nodes with the `internal-link` class.
    pub enable_internal_links: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            direction: Direction::TopToBottom,
            enable_styling: true,
            enable_internal_links: true,
        }
    }
}

impl ConversionConfig {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_styling(mut self, enabled: bool) -> Self {
        self.enable_styling = enabled;
        self
    }

    pub fn with_internal_links(mut self, enabled: bool) -> Self {
        self.enable_internal_links = enabled;
        self
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration file: {0:?}")]
    MissingFile(PathBuf),

    #[error("cannot read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse configuration file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads the conversion config.
///
/// Search order: the explicit path (which must exist), then [`LOCAL_CONFIG_FILENAME`] in the
/// working directory, then built-in defaults.
pub fn load_config(explicit_path: Option<&Path>) -> Result<ConversionConfig, ConfigError> {
    if let Some(path) = explicit_path {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local = Path::new(LOCAL_CONFIG_FILENAME);
    if local.is_file() {
        info!(path = local.display().to_string(); "Loading configuration from local path");
        return load_config_file(local);
    }

    debug!("No configuration file found, using default configuration");
    Ok(ConversionConfig::default())
}

pub fn load_config_file(path: &Path) -> Result<ConversionConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(content: &str) -> Result<ConversionConfig, String> {
    toml::from_str(content).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{load_config_file, parse_config, ConfigError, ConversionConfig, Direction};

    #[test]
    fn defaults_match_plugin_defaults() {
        let config = ConversionConfig::default();
        assert_eq!(config.direction, Direction::TopToBottom);
        assert!(config.enable_styling);
        assert!(config.enable_internal_links);
    }

    #[test]
    fn direction_parses_aliases_case_insensitively() {
        assert_eq!("td".parse::<Direction>(), Ok(Direction::TopToBottom));
        assert_eq!("TB".parse::<Direction>(), Ok(Direction::TopToBottom));
        assert_eq!(" lr ".parse::<Direction>(), Ok(Direction::LeftToRight));
        assert_eq!("Rl".parse::<Direction>(), Ok(Direction::RightToLeft));
        assert_eq!("bt".parse::<Direction>(), Ok(Direction::BottomToTop));
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config = parse_config("direction = \"LR\"\n").expect("parse");
        assert_eq!(
            config,
            ConversionConfig::default().with_direction(Direction::LeftToRight)
        );

        let config = parse_config("enable_styling = false\n").expect("parse");
        assert!(!config.enable_styling);
        assert!(config.enable_internal_links);
    }

    #[test]
    fn invalid_toml_values_are_rejected() {
        let err = parse_config("direction = \"sideways\"\n").expect_err("bad direction");
        assert!(err.contains("sideways"), "{err}");

        assert!(parse_config("colour = \"red\"\n").is_err());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = ConversionConfig::default()
            .with_direction(Direction::BottomToTop)
            .with_internal_links(false);
        let text = toml::to_string(&config).expect("serialize");
        assert!(text.contains("direction = \"BT\""), "{text}");
        assert_eq!(parse_config(&text).expect("parse"), config);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_config_file(Path::new("/definitely/not/here.toml")).expect_err("missing");
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }
}
