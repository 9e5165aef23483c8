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

//! Loadcurve Query Engine
//!
//! Turns a [`loadcurve_storage::TimeSeriesStore`] into the four summary
//! views of a load-curve dashboard:
//!
//! - fixed-width resampling (mean per bucket)
//! - resampling with spread (mean, min and max per bucket)
//! - hour-of-day profile across all days
//! - month-of-year profile across all years
//!
//! ## Usage
//!
//! ```rust,ignore
//! use loadcurve_core::ResamplingFrequency;
//! use loadcurve_query::Aggregator;
//!
//! let aggregator = Aggregator::new();
//! let daily = aggregator.resample(&store, ResamplingFrequency::Daily)?;
//! let hours = aggregator.group_by_hour_of_day(&store)?;
//! ```

pub mod aggregator;
pub mod cache;
mod calendar;
mod resample;
pub mod views;

pub use aggregator::Aggregator;
pub use cache::{CacheStats, DashboardCache};
pub use views::{CalendarProfile, Dashboard, GroupStats, ResampledBucket, SpreadBucket};
