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

//! Time Series Store
//!
//! Immutable, timestamp-ordered collection of observations. A store is built
//! once from a data source and never mutated afterwards, so it can be shared
//! freely between readers.
//!
//! # Ordering
//!
//! Observations are sorted by ascending timestamp with a stable sort:
//! observations sharing a timestamp keep their input order, and duplicates
//! are all retained.

use crate::source::{DataSource, RawRecord};
use chrono::NaiveDateTime;
use loadcurve_core::{parse_day_first, LoadcurveError, Observation, Result, DEFAULT_CHANNELS};
use std::collections::BTreeMap;
use tracing::debug;

/// Parsed, ordered power series
#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    observations: Vec<Observation>,
    channels: Vec<String>,
    fingerprint: blake3::Hash,
}

impl TimeSeriesStore {
    /// Load records requiring the default `HC` and `HP` channels
    pub fn load<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::load_with_channels(records, &DEFAULT_CHANNELS)
    }

    /// Load records requiring every channel in `channels`.
    ///
    /// Channels outside `channels` are dropped. Any unparseable timestamp,
    /// missing channel or infinite value aborts the whole load.
    pub fn load_with_channels<I, S>(records: I, channels: &[S]) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
        S: AsRef<str>,
    {
        let channels: Vec<String> = channels.iter().map(|c| c.as_ref().to_string()).collect();
        let mut observations = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let timestamp = parse_day_first(&record.timestamp).map_err(|source| {
                LoadcurveError::InvalidTimestamp {
                    record: index,
                    source,
                }
            })?;

            let values = required_values(index, &record.channels, &channels)?;
            observations.push(Observation::new(timestamp, values));
        }

        Ok(Self::from_parts(observations, channels))
    }

    /// Pull every record from `source` and load it
    pub fn from_source<S: AsRef<str>>(source: &dyn DataSource, channels: &[S]) -> Result<Self> {
        let records = source.records()?;
        Self::load_with_channels(records, channels)
    }

    /// Build from already parsed observations
    pub fn from_observations<S: AsRef<str>>(
        observations: Vec<Observation>,
        channels: &[S],
    ) -> Result<Self> {
        let channels: Vec<String> = channels.iter().map(|c| c.as_ref().to_string()).collect();
        let observations = observations
            .into_iter()
            .enumerate()
            .map(|(index, obs)| {
                let values = required_values(index, &obs.values, &channels)?;
                Ok(Observation::new(obs.timestamp, values))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parts(observations, channels))
    }

    fn from_parts(mut observations: Vec<Observation>, channels: Vec<String>) -> Self {
        // Stable: equal timestamps keep input order
        observations.sort_by_key(|obs| obs.timestamp);
        let fingerprint = fingerprint(&observations, &channels);

        debug!(
            observations = observations.len(),
            channels = ?channels,
            "Loaded time series store"
        );

        Self {
            observations,
            channels,
            fingerprint,
        }
    }

    /// Observations in ascending timestamp order.
    ///
    /// Each call starts a fresh pass over the data.
    pub fn observations(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Observations with `start <= timestamp < end`
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> &[Observation] {
        let lo = self.observations.partition_point(|o| o.timestamp < start);
        let hi = self.observations.partition_point(|o| o.timestamp < end);
        &self.observations[lo..hi.max(lo)]
    }

    /// First and last timestamps
    pub fn range(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => Ok((first.timestamp, last.timestamp)),
            _ => Err(LoadcurveError::EmptyStore),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Channel names in load order
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Content hash of channels, timestamps and values.
    ///
    /// Two stores loaded from identical data share a fingerprint, and any
    /// change to the data yields a different one.
    pub fn fingerprint(&self) -> blake3::Hash {
        self.fingerprint
    }
}

/// Keep exactly `channels` from `values`, rejecting absent or infinite readings
fn required_values(
    index: usize,
    values: &BTreeMap<String, f64>,
    channels: &[String],
) -> Result<BTreeMap<String, f64>> {
    let mut selected = BTreeMap::new();
    for channel in channels {
        let value = *values
            .get(channel)
            .ok_or_else(|| LoadcurveError::MissingChannel {
                record: index,
                channel: channel.clone(),
            })?;
        if value.is_infinite() {
            return Err(LoadcurveError::InvalidValue {
                record: index,
                channel: channel.clone(),
                value: value.to_string(),
            });
        }
        selected.insert(channel.clone(), value);
    }
    Ok(selected)
}

fn fingerprint(observations: &[Observation], channels: &[String]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    for channel in channels {
        hasher.update(&(channel.len() as u64).to_le_bytes());
        hasher.update(channel.as_bytes());
    }
    for obs in observations {
        let ts = obs.timestamp.and_utc();
        hasher.update(&ts.timestamp().to_le_bytes());
        hasher.update(&ts.timestamp_subsec_nanos().to_le_bytes());
        for channel in channels {
            let value = obs.values.get(channel).copied().unwrap_or(f64::NAN);
            // Canonical NaN so every missing reading hashes alike
            let bits = if value.is_nan() {
                f64::NAN.to_bits()
            } else {
                value.to_bits()
            };
            hasher.update(&bits.to_le_bytes());
        }
    }
    hasher.finalize()
}
