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

//! Timestamped power readings

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Off-peak power channel
pub const CHANNEL_HC: &str = "HC";

/// Peak power channel
pub const CHANNEL_HP: &str = "HP";

/// Channels every store requires unless told otherwise
pub const DEFAULT_CHANNELS: [&str; 2] = [CHANNEL_HC, CHANNEL_HP];

/// A single timestamped set of channel readings.
///
/// A NaN value means the meter produced no reading for that channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub values: BTreeMap<String, f64>,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, values: BTreeMap<String, f64>) -> Self {
        Self { timestamp, values }
    }

    /// Build from `(channel, value)` pairs
    pub fn from_pairs<'a, I>(timestamp: NaiveDateTime, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let values = pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        Self { timestamp, values }
    }

    /// Reading for `channel`, or `None` when absent or NaN
    pub fn value(&self, channel: &str) -> Option<f64> {
        self.values.get(channel).copied().filter(|v| !v.is_nan())
    }
}
