// Copyright 2025 AgentReplay (https://github.com/agentreplay)
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

//! Configuration for loading and aggregating a power series
//!
//! Everything has a default matching the meter export layout, so an empty
//! TOML file is a valid configuration:
//!
//! ```toml
//! [source]
//! timestamp_column = "base"
//! delimiter = ","
//!
//! [source.channels]
//! HC = "P Atteinte:HC"
//! HP = "P Atteinte:HP"
//!
//! [aggregation]
//! week_start = "monday"
//! default_frequency = "daily"
//! ```

use crate::error::{LoadcurveError, Result};
use crate::frequency::ResamplingFrequency;
use crate::observation::{CHANNEL_HC, CHANNEL_HP};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "LOADCURVE_CONFIG";

/// Default timestamp column of the meter export
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "base";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadcurveConfig {
    pub source: SourceConfig,
    pub aggregation: AggregationConfig,
}

impl LoadcurveConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LoadcurveConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.source.channels.is_empty() {
            return Err(LoadcurveError::Config(
                "at least one channel must be configured".to_string(),
            ));
        }
        if !self.source.delimiter.is_ascii() {
            return Err(LoadcurveError::Config(format!(
                "delimiter {:?} is not a single ASCII character",
                self.source.delimiter
            )));
        }
        self.aggregation.week_start()?;
        Ok(())
    }
}

/// Where observations come from and how their fields are named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Column holding the day-first timestamp
    pub timestamp_column: String,

    /// Field delimiter
    pub delimiter: char,

    /// Channel name -> source column header
    pub channels: BTreeMap<String, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        let mut channels = BTreeMap::new();
        channels.insert(CHANNEL_HC.to_string(), "P Atteinte:HC".to_string());
        channels.insert(CHANNEL_HP.to_string(), "P Atteinte:HP".to_string());
        Self {
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            delimiter: ',',
            channels,
        }
    }
}

impl SourceConfig {
    /// Names of the configured channels, in sorted order
    pub fn channel_names(&self) -> Vec<String> {
        self.channels.keys().cloned().collect()
    }
}

/// Aggregation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// First day of a weekly bucket (`"monday"`, `"sun"`, ...)
    pub week_start: String,

    /// Frequency used when the caller does not pick one
    pub default_frequency: ResamplingFrequency,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            week_start: "monday".to_string(),
            default_frequency: ResamplingFrequency::Daily,
        }
    }
}

impl AggregationConfig {
    /// Config with weeks starting on the given day
    pub fn with_week_start(week_start: Weekday) -> Self {
        Self {
            week_start: week_start.to_string(),
            ..Self::default()
        }
    }

    /// Parsed week start
    pub fn week_start(&self) -> Result<Weekday> {
        self.week_start.trim().parse::<Weekday>().map_err(|_| {
            LoadcurveError::Config(format!("invalid week_start {:?}", self.week_start))
        })
    }
}
