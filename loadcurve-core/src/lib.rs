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

//! Loadcurve Core
//!
//! Fundamental data structures for power-measurement series: observations,
//! day-first timestamps, resampling frequencies, calendar keys and summary
//! statistics.

pub mod calendar;
pub mod config;
pub mod error;
pub mod frequency;
pub mod observation;
pub mod stats;
pub mod timestamp;

pub use calendar::{CalendarCycle, CalendarGroupKey};
pub use config::{
    AggregationConfig, LoadcurveConfig, SourceConfig, CONFIG_ENV_VAR, DEFAULT_TIMESTAMP_COLUMN,
};
pub use error::{LoadcurveError, Result, TimestampError};
pub use frequency::{Bucket, ResamplingFrequency};
pub use observation::{Observation, CHANNEL_HC, CHANNEL_HP, DEFAULT_CHANNELS};
pub use stats::{
    AggregateRecord, ChannelAccumulator, DistributionSummary, SampleAccumulator,
};
pub use timestamp::parse_day_first;
