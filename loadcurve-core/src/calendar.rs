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

//! Calendar-cyclic grouping keys

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Which calendar cycle to group by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarCycle {
    HourOfDay,
    MonthOfYear,
}

impl CalendarCycle {
    /// Every key of the cycle, in ascending order
    pub fn keys(self) -> std::ops::RangeInclusive<u32> {
        match self {
            CalendarCycle::HourOfDay => 0..=23,
            CalendarCycle::MonthOfYear => 1..=12,
        }
    }

    pub fn key_count(self) -> usize {
        match self {
            CalendarCycle::HourOfDay => 24,
            CalendarCycle::MonthOfYear => 12,
        }
    }

    /// Key of `ts` within this cycle.
    ///
    /// Months are not disambiguated by year: every January maps to 1.
    pub fn key_of(self, ts: NaiveDateTime) -> CalendarGroupKey {
        match self {
            CalendarCycle::HourOfDay => CalendarGroupKey::HourOfDay(ts.hour()),
            CalendarCycle::MonthOfYear => CalendarGroupKey::MonthOfYear(ts.month()),
        }
    }
}

/// Hour of day in `0..=23` or month of year in `1..=12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarGroupKey {
    HourOfDay(u32),
    MonthOfYear(u32),
}

impl CalendarGroupKey {
    pub fn hour(hour: u32) -> Option<Self> {
        (hour <= 23).then_some(CalendarGroupKey::HourOfDay(hour))
    }

    pub fn month(month: u32) -> Option<Self> {
        (1..=12)
            .contains(&month)
            .then_some(CalendarGroupKey::MonthOfYear(month))
    }

    /// Numeric key within its cycle
    pub fn value(self) -> u32 {
        match self {
            CalendarGroupKey::HourOfDay(h) => h,
            CalendarGroupKey::MonthOfYear(m) => m,
        }
    }

    pub fn cycle(self) -> CalendarCycle {
        match self {
            CalendarGroupKey::HourOfDay(_) => CalendarCycle::HourOfDay,
            CalendarGroupKey::MonthOfYear(_) => CalendarCycle::MonthOfYear,
        }
    }
}
