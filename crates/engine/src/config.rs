// VODB - Visual Object Debugger
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Engine configuration
//!
//! Settings are read from `~/.vodb.toml` by default. Every field is optional
//! in the file; missing fields take their default value.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::RenderOptions;

/// Errors raised while loading or saving the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be determined
    #[error("unable to determine home directory")]
    NoHomeDir,
    /// Reading or writing the file failed
    #[error("failed to access config file {path:?}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
    /// The configuration could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value is out of range
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Configuration of the changelog engine and its panels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of changelog entries kept per panel; unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<usize>,
    /// Layout options sent to the renderer
    pub render: RenderOptions,
}

impl EngineConfig {
    /// Bound the history kept per panel
    pub fn with_max_history(mut self, max_history: Option<usize>) -> Self {
        self.max_history = max_history;
        self
    }

    /// Set the preferred distance between rendered nodes
    pub fn with_node_distance(mut self, node_distance: u32) -> Self {
        self.render.node_distance = node_distance;
        self
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == Some(0) {
            return Err(ConfigError::Invalid {
                field: "max_history",
                reason: "history must keep at least one entry".to_string(),
            });
        }
        Ok(())
    }

    /// Get the config file path (~/.vodb.toml)
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".vodb.toml"))
    }

    /// Load configuration from the default path, creating it if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!("Config file not found, creating default at {:?}", config_path);
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load and validate configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        let config: Self = toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;

        fs::write(path, content)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        debug!("Saved configuration to {:?}", path);
        Ok(())
    }
}
