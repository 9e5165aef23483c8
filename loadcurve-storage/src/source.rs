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

//! Data source boundary

use loadcurve_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An unparsed record as delivered by a data source.
///
/// The timestamp is still text in day-first form; channel values are
/// already numeric, with NaN for a missing reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub timestamp: String,
    pub channels: BTreeMap<String, f64>,
}

impl RawRecord {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            channels: BTreeMap::new(),
        }
    }

    /// Builder-style channel setter
    pub fn with_channel(mut self, name: impl Into<String>, value: f64) -> Self {
        self.channels.insert(name.into(), value);
        self
    }
}

/// Anything that can yield a bounded batch of raw records
pub trait DataSource {
    fn records(&self) -> Result<Vec<RawRecord>>;
}

/// Records already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<RawRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl DataSource for MemorySource {
    fn records(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}
