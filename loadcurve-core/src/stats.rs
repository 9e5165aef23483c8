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

//! Per-channel summary statistics
//!
//! Missing readings (NaN) never reach the accumulators: they are skipped
//! before counting, so they affect neither numerator nor denominator.
//! Statistics that cannot be computed are `None`, never zero or NaN.
//!
//! - `count == 0`: mean, min, max and std_dev are `None`
//! - `count == 1`: std_dev is `None` (sample deviation needs two values)

use serde::{Deserialize, Serialize};

/// Statistical summary of one channel over a bucket or calendar group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    /// Number of valid (non-NaN) values
    pub count: u64,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Sample standard deviation (N-1 denominator)
    pub std_dev: Option<f64>,
}

impl AggregateRecord {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Quartiles of a group, as drawn by a box plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl DistributionSummary {
    /// Quartiles of `values` using linear interpolation between closest
    /// ranks. `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Some(Self {
            q1: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            q3: quantile_sorted(&sorted, 0.75)?,
        })
    }
}

/// Linear-interpolated quantile of an ascending slice; `None` when empty
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some((sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)).min(sorted[hi]))
}

/// Running statistics for a single channel
#[derive(Debug, Clone, Default)]
pub struct ChannelAccumulator {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
    // Welford state for the variance
    running_mean: f64,
    m2: f64,
}

impl ChannelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reading; NaN is ignored
    pub fn push(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.count += 1;
        if self.count == 1 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;

        let delta = value - self.running_mean;
        self.running_mean += delta / self.count as f64;
        self.m2 += delta * (value - self.running_mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn finish(&self) -> AggregateRecord {
        if self.count == 0 {
            return AggregateRecord::default();
        }
        // Clamp absorbs rounding in sum / count
        let mean = (self.sum / self.count as f64).clamp(self.min, self.max);
        // Undefined below two values, or when the variance overflows f64
        let variance = self.m2 / self.count.saturating_sub(1) as f64;
        let std_dev = if self.count >= 2 && variance.is_finite() {
            Some(variance.max(0.0).sqrt())
        } else {
            None
        };
        AggregateRecord {
            count: self.count,
            mean: Some(mean),
            min: Some(self.min),
            max: Some(self.max),
            std_dev,
        }
    }
}

/// Accumulator that also keeps values for quartiles
#[derive(Debug, Clone, Default)]
pub struct SampleAccumulator {
    stats: ChannelAccumulator,
    values: Vec<f64>,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.stats.push(value);
        self.values.push(value);
    }

    pub fn finish(&self) -> (AggregateRecord, Option<DistributionSummary>) {
        (
            self.stats.finish(),
            DistributionSummary::from_values(&self.values),
        )
    }
}
