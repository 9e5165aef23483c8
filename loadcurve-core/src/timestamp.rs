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

//! Day-first timestamp parsing
//!
//! Meter exports write dates as `DD/MM/YYYY HH:MM`. The day always precedes
//! the month, so `05/03/2024` is the 5th of March. Year-first dates
//! (`YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD`) are also accepted because a
//! leading four-digit year cannot be mistaken for a day.
//!
//! Timestamps are naive wall-clock values: no timezone conversion happens
//! here or anywhere downstream.

use crate::error::TimestampError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Day-first date layouts
const DAY_FIRST_LAYOUTS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Year-first date layouts
const YEAR_FIRST_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Time-of-day layouts, most specific first
const TIME_LAYOUTS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Parse a day-first timestamp.
///
/// A date without a time of day maps to midnight.
pub fn parse_day_first(input: &str) -> Result<NaiveDateTime, TimestampError> {
    let text = input.trim();
    let (date_part, time_part) = match text.find(|c: char| c == ' ' || c == 'T') {
        Some(idx) => (&text[..idx], Some(text[idx + 1..].trim())),
        None => (text, None),
    };

    if is_numeric_triplet(date_part) && !has_four_digit_year(date_part) {
        return Err(TimestampError::Ambiguous(input.to_string()));
    }

    let date = parse_date(date_part)
        .ok_or_else(|| TimestampError::Unrecognized(input.to_string()))?;

    let time = match time_part {
        None => NaiveTime::MIN,
        Some(t) => {
            parse_time(t).ok_or_else(|| TimestampError::Unrecognized(input.to_string()))?
        }
    };

    Ok(date.and_time(time))
}

fn parse_date(date_part: &str) -> Option<NaiveDate> {
    let fields: Vec<&str> = date_part.split(&['/', '-', '.']).collect();
    // Year-first only when the leading field is the four-digit year
    if fields.first().map_or(false, |f| f.len() == 4) {
        return parse_with(date_part, YEAR_FIRST_LAYOUTS);
    }
    parse_with(date_part, DAY_FIRST_LAYOUTS)
}

fn parse_with(date_part: &str, layouts: &[&str]) -> Option<NaiveDate> {
    layouts
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(date_part, layout).ok())
}

fn parse_time(time_part: &str) -> Option<NaiveTime> {
    TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveTime::parse_from_str(time_part, layout).ok())
}

fn is_numeric_triplet(date_part: &str) -> bool {
    let fields: Vec<&str> = date_part.split(&['/', '-', '.']).collect();
    fields.len() == 3
        && fields
            .iter()
            .all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
}

fn has_four_digit_year(date_part: &str) -> bool {
    let fields: Vec<&str> = date_part.split(&['/', '-', '.']).collect();
    match fields.as_slice() {
        [first, _, last] => first.len() == 4 || last.len() == 4,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_day_precedes_month() {
        let ts = parse_day_first("05/03/2024 10:00").unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 3);
        assert_eq!(ts.day(), 5);
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn test_day_above_twelve() {
        let ts = parse_day_first("31/12/2023 23:59:30").unwrap();
        assert_eq!((ts.day(), ts.month(), ts.second()), (31, 12, 30));
    }

    #[test]
    fn test_alternate_separators() {
        let slash = parse_day_first("05/03/2024 10:00").unwrap();
        assert_eq!(parse_day_first("05-03-2024 10:00").unwrap(), slash);
        assert_eq!(parse_day_first("05.03.2024 10:00").unwrap(), slash);
        assert_eq!(parse_day_first("5/3/2024 10:00").unwrap(), slash);
    }

    #[test]
    fn test_date_only_is_midnight() {
        let ts = parse_day_first("05/03/2024").unwrap();
        assert_eq!(ts.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_fractional_seconds() {
        let ts = parse_day_first("05/03/2024 10:00:01.250").unwrap();
        assert_eq!(ts.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_year_first_separators() {
        let dash = parse_day_first("2024-03-05 10:00").unwrap();
        assert_eq!(parse_day_first("2024/03/05 10:00").unwrap(), dash);
        assert_eq!(parse_day_first("2024.03.05 10:00").unwrap(), dash);
        assert_eq!((dash.day(), dash.month()), (5, 3));
    }

    #[test]
    fn test_iso_year_first() {
        let ts = parse_day_first("2024-03-05T10:00").unwrap();
        assert_eq!((ts.day(), ts.month()), (5, 3));
        assert_eq!(parse_day_first("2024-03-05 10:00:00").unwrap(), ts);
    }

    #[test]
    fn test_two_digit_year_is_ambiguous() {
        assert_eq!(
            parse_day_first("05/03/24 10:00"),
            Err(TimestampError::Ambiguous("05/03/24 10:00".to_string()))
        );
    }

    #[test]
    fn test_unrecognized() {
        assert!(matches!(
            parse_day_first("yesterday"),
            Err(TimestampError::Unrecognized(_))
        ));
        assert!(matches!(
            parse_day_first("32/01/2024"),
            Err(TimestampError::Unrecognized(_))
        ));
        assert!(matches!(
            parse_day_first("05/13/2024"),
            Err(TimestampError::Unrecognized(_))
        ));
        assert!(matches!(
            parse_day_first("05/03/2024 25:00"),
            Err(TimestampError::Unrecognized(_))
        ));
        assert!(matches!(
            parse_day_first(""),
            Err(TimestampError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_surrounding_whitespace() {
        let ts = parse_day_first("  05/03/2024 10:00  ").unwrap();
        assert_eq!(ts.day(), 5);
    }
}
