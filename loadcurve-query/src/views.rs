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

//! Summary views returned by the aggregator
//!
//! Undefined statistics serialize as `null`; renderers must draw them as
//! gaps, not zeros.

use loadcurve_core::{
    AggregateRecord, Bucket, CalendarCycle, CalendarGroupKey, DistributionSummary,
    ResamplingFrequency,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-channel mean of one bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledBucket {
    pub bucket: Bucket,
    pub means: BTreeMap<String, Option<f64>>,
}

/// Per-channel mean, min and max of one bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadBucket {
    pub bucket: Bucket,
    pub channels: BTreeMap<String, AggregateRecord>,
}

impl SpreadBucket {
    /// Project down to means only
    pub fn to_means(&self) -> ResampledBucket {
        ResampledBucket {
            bucket: self.bucket,
            means: self
                .channels
                .iter()
                .map(|(name, record)| (name.clone(), record.mean))
                .collect(),
        }
    }
}

/// Statistics of one channel within a calendar group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    #[serde(flatten)]
    pub record: AggregateRecord,
    pub distribution: Option<DistributionSummary>,
}

/// Statistics for every key of a calendar cycle.
///
/// Always holds every key of the cycle (24 hours or 12 months), including
/// keys without observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarProfile {
    pub cycle: CalendarCycle,
    pub groups: BTreeMap<u32, BTreeMap<String, GroupStats>>,
}

impl CalendarProfile {
    /// Per-channel stats for `key`
    pub fn get(&self, key: CalendarGroupKey) -> Option<&BTreeMap<String, GroupStats>> {
        if key.cycle() != self.cycle {
            return None;
        }
        self.groups.get(&key.value())
    }

    /// Stats of `channel` under numeric key `key`
    pub fn channel(&self, key: u32, channel: &str) -> Option<&GroupStats> {
        self.groups.get(&key).and_then(|g| g.get(channel))
    }

    pub fn key_count(&self) -> usize {
        self.groups.len()
    }
}

/// All four summary views for one frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Frequency of `resampled` and `spread` only
    pub frequency: ResamplingFrequency,
    pub resampled: Vec<ResampledBucket>,
    pub spread: Vec<SpreadBucket>,
    pub hour_of_day: CalendarProfile,
    pub month_of_year: CalendarProfile,
}
