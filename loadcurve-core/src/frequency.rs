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

//! Resampling frequencies and the buckets they produce
//!
//! Every frequency follows the wall calendar rather than a fixed duration:
//!
//! | Frequency | Bucket                                             |
//! |-----------|----------------------------------------------------|
//! | Hourly    | `[hh:00, hh+1:00)`                                 |
//! | Daily     | `[day 00:00, next day 00:00)`                      |
//! | Weekly    | `[week start 00:00, +7 days)`, Monday by default   |
//! | Monthly   | `[1st 00:00, 1st of next month 00:00)`             |
//!
//! A Monday-start weekly bucket spans the same instants as a "week ending
//! Sunday" bin; buckets here are always labelled by their start.

use crate::error::{LoadcurveError, Result};
use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket width selector
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResamplingFrequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ResamplingFrequency {
    pub const ALL: [ResamplingFrequency; 4] = [
        ResamplingFrequency::Hourly,
        ResamplingFrequency::Daily,
        ResamplingFrequency::Weekly,
        ResamplingFrequency::Monthly,
    ];

    /// Start of the bucket containing `ts`
    pub fn floor(self, ts: NaiveDateTime, week_start: Weekday) -> Result<NaiveDateTime> {
        let date = ts.date();
        let start = match self {
            ResamplingFrequency::Hourly => date.and_hms_opt(ts.hour(), 0, 0),
            ResamplingFrequency::Daily => date.and_hms_opt(0, 0, 0),
            ResamplingFrequency::Weekly => {
                let back = (7 + date.weekday().num_days_from_monday()
                    - week_start.num_days_from_monday())
                    % 7;
                date.checked_sub_days(Days::new(u64::from(back)))
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            }
            ResamplingFrequency::Monthly => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            }
        };
        start.ok_or(LoadcurveError::BoundaryOutOfRange(ts))
    }

    /// Start of the bucket following the one starting at `start`
    pub fn advance(self, start: NaiveDateTime) -> Result<NaiveDateTime> {
        let next = match self {
            ResamplingFrequency::Hourly => start.checked_add_signed(Duration::hours(1)),
            ResamplingFrequency::Daily => start.checked_add_days(Days::new(1)),
            ResamplingFrequency::Weekly => start.checked_add_days(Days::new(7)),
            ResamplingFrequency::Monthly => start.checked_add_months(Months::new(1)),
        };
        next.ok_or(LoadcurveError::BoundaryOutOfRange(start))
    }

    /// Bucket containing `ts`
    pub fn bucket_of(self, ts: NaiveDateTime, week_start: Weekday) -> Result<Bucket> {
        let start = self.floor(ts, week_start)?;
        let end = self.advance(start)?;
        Ok(Bucket { start, end })
    }

    /// Short label matching the usual resampling aliases
    pub fn alias(self) -> &'static str {
        match self {
            ResamplingFrequency::Hourly => "H",
            ResamplingFrequency::Daily => "D",
            ResamplingFrequency::Weekly => "W",
            ResamplingFrequency::Monthly => "M",
        }
    }
}

impl fmt::Display for ResamplingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResamplingFrequency::Hourly => "hourly",
            ResamplingFrequency::Daily => "daily",
            ResamplingFrequency::Weekly => "weekly",
            ResamplingFrequency::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for ResamplingFrequency {
    type Err = LoadcurveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hour" | "hourly" => Ok(ResamplingFrequency::Hourly),
            "d" | "day" | "daily" => Ok(ResamplingFrequency::Daily),
            "w" | "week" | "weekly" => Ok(ResamplingFrequency::Weekly),
            "m" | "month" | "monthly" => Ok(ResamplingFrequency::Monthly),
            _ => Err(LoadcurveError::InvalidFrequency(s.to_string())),
        }
    }
}

/// Half-open time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bucket {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Bucket {
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts < self.end
    }
}
