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

//! Aggregator
//!
//! Computes summary views from a [`TimeSeriesStore`]. Every operation is a
//! pure function of the store: nothing is cached or mutated, so repeated
//! calls return identical results and callers may run views in parallel.
//!
//! The resampling path lives in `resample.rs`, the calendar grouping path in
//! `calendar.rs`.

use crate::views::Dashboard;
use chrono::Weekday;
use loadcurve_core::{AggregationConfig, ResamplingFrequency, Result};
use loadcurve_storage::TimeSeriesStore;
use tracing::info;

/// Summary view engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    pub(crate) week_start: Weekday,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Aggregator with Monday-start weeks
    pub fn new() -> Self {
        Self {
            week_start: Weekday::Mon,
        }
    }

    pub fn with_week_start(week_start: Weekday) -> Self {
        Self { week_start }
    }

    pub fn from_config(config: &AggregationConfig) -> Result<Self> {
        Ok(Self::with_week_start(config.week_start()?))
    }

    /// First day of weekly buckets
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Compute all four views.
    ///
    /// **`frequency` only affects `resampled` and `spread`.** The hour-of-day
    /// and month-of-year profiles are computed over the whole history and
    /// come out the same for every frequency; they take the parameter here
    /// only so one call can feed every panel.
    pub fn dashboard(
        &self,
        store: &TimeSeriesStore,
        frequency: ResamplingFrequency,
    ) -> Result<Dashboard> {
        let spread = self.resample_with_spread(store, frequency)?;
        let resampled = spread.iter().map(|row| row.to_means()).collect();
        let hour_of_day = self.group_by_hour_of_day(store)?;
        let month_of_year = self.group_by_month_of_year(store)?;

        info!(
            frequency = %frequency,
            buckets = spread.len(),
            observations = store.len(),
            "Computed dashboard"
        );

        Ok(Dashboard {
            frequency,
            resampled,
            spread,
            hour_of_day,
            month_of_year,
        })
    }
}
