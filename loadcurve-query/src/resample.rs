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

//! Fixed-width resampling
//!
//! Buckets start at the floor of the first observation and continue without
//! gaps until one contains the last observation. Empty buckets are emitted
//! with undefined statistics to keep the time axis regular.

use crate::aggregator::Aggregator;
use crate::views::{ResampledBucket, SpreadBucket};
use loadcurve_core::{Bucket, ChannelAccumulator, ResamplingFrequency, Result};
use loadcurve_storage::TimeSeriesStore;
use tracing::debug;

impl Aggregator {
    /// Contiguous buckets covering the store's time range
    pub fn buckets(
        &self,
        store: &TimeSeriesStore,
        frequency: ResamplingFrequency,
    ) -> Result<Vec<Bucket>> {
        let (first, last) = store.range()?;
        let mut buckets = Vec::new();
        let mut start = frequency.floor(first, self.week_start)?;
        loop {
            let end = frequency.advance(start)?;
            buckets.push(Bucket { start, end });
            if end > last {
                return Ok(buckets);
            }
            start = end;
        }
    }

    /// Mean of each channel per bucket
    pub fn resample(
        &self,
        store: &TimeSeriesStore,
        frequency: ResamplingFrequency,
    ) -> Result<Vec<ResampledBucket>> {
        Ok(self
            .resample_with_spread(store, frequency)?
            .iter()
            .map(SpreadBucket::to_means)
            .collect())
    }

    /// Mean, min and max of each channel per bucket
    pub fn resample_with_spread(
        &self,
        store: &TimeSeriesStore,
        frequency: ResamplingFrequency,
    ) -> Result<Vec<SpreadBucket>> {
        let buckets = self.buckets(store, frequency)?;
        let channels = store.channels();
        let mut observations = store.observations().peekable();
        let mut rows = Vec::with_capacity(buckets.len());

        for bucket in buckets {
            let mut accumulators = vec![ChannelAccumulator::new(); channels.len()];
            while let Some(obs) = observations.next_if(|o| o.timestamp < bucket.end) {
                for (acc, channel) in accumulators.iter_mut().zip(channels) {
                    if let Some(value) = obs.values.get(channel) {
                        acc.push(*value);
                    }
                }
            }
            rows.push(SpreadBucket {
                bucket,
                channels: channels
                    .iter()
                    .cloned()
                    .zip(accumulators.iter().map(ChannelAccumulator::finish))
                    .collect(),
            });
        }

        debug!(frequency = %frequency, buckets = rows.len(), "Resampled store");
        Ok(rows)
    }
}
