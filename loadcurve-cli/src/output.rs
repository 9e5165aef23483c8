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

//! Text and JSON rendering of the summary views
//!
//! Undefined statistics print as `-` in text mode and `null` in JSON.

use anyhow::Result;
use chrono::NaiveDateTime;
use loadcurve_core::CalendarCycle;
use loadcurve_query::{CalendarProfile, Dashboard, ResampledBucket, SpreadBucket};
use loadcurve_storage::TimeSeriesStore;
use serde::Serialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize)]
struct StoreSummary<'a> {
    observations: usize,
    channels: &'a [String],
    first: Option<NaiveDateTime>,
    last: Option<NaiveDateTime>,
    fingerprint: String,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    }
}

fn header(first: &str, columns: impl IntoIterator<Item = String>) {
    let mut line = format!("{:<18}", first);
    for column in columns {
        line.push_str(&format!(" {:>12}", column));
    }
    println!("{}", line);
}

pub fn summary(store: &TimeSeriesStore, json: bool) -> Result<()> {
    let range = store.range().ok();
    let summary = StoreSummary {
        observations: store.len(),
        channels: store.channels(),
        first: range.map(|(first, _)| first),
        last: range.map(|(_, last)| last),
        fingerprint: store.fingerprint().to_hex().to_string(),
    };

    if json {
        return print_json(&summary);
    }

    println!("Observations: {}", summary.observations);
    println!("Channels:     {}", summary.channels.join(", "));
    match range {
        Some((first, last)) => println!(
            "Range:        {} .. {}",
            first.format(TIME_FORMAT),
            last.format(TIME_FORMAT)
        ),
        None => println!("Range:        -"),
    }
    println!("Fingerprint:  {}", summary.fingerprint);
    Ok(())
}

pub fn resampled(rows: &[ResampledBucket], channels: &[String], json: bool) -> Result<()> {
    if json {
        return print_json(&rows);
    }

    header("bucket", channels.iter().cloned());
    for row in rows {
        let mut line = format!("{:<18}", row.bucket.start.format(TIME_FORMAT).to_string());
        for channel in channels {
            let mean = row.means.get(channel).copied().flatten();
            line.push_str(&format!(" {:>12}", cell(mean)));
        }
        println!("{}", line);
    }
    Ok(())
}

pub fn spread(rows: &[SpreadBucket], channels: &[String], json: bool) -> Result<()> {
    if json {
        return print_json(&rows);
    }

    header(
        "bucket",
        channels
            .iter()
            .flat_map(|c| [format!("{c} mean"), format!("{c} min"), format!("{c} max")]),
    );
    for row in rows {
        let mut line = format!("{:<18}", row.bucket.start.format(TIME_FORMAT).to_string());
        for channel in channels {
            let record = row.channels.get(channel).copied().unwrap_or_default();
            for value in [record.mean, record.min, record.max] {
                line.push_str(&format!(" {:>12}", cell(value)));
            }
        }
        println!("{}", line);
    }
    Ok(())
}

pub fn profile(profile: &CalendarProfile, channels: &[String], json: bool) -> Result<()> {
    if json {
        return print_json(profile);
    }

    let key_label = match profile.cycle {
        CalendarCycle::HourOfDay => "hour",
        CalendarCycle::MonthOfYear => "month",
    };
    for channel in channels {
        println!("{}", channel);
        header(
            key_label,
            ["count", "mean", "std", "min", "q1", "median", "q3", "max"]
                .into_iter()
                .map(String::from),
        );
        for (key, group) in &profile.groups {
            let Some(stats) = group.get(channel) else {
                continue;
            };
            let record = stats.record;
            let dist = stats.distribution;
            let mut line = format!("{:<18} {:>12}", key, record.count);
            for value in [
                record.mean,
                record.std_dev,
                record.min,
                dist.map(|d| d.q1),
                dist.map(|d| d.median),
                dist.map(|d| d.q3),
                record.max,
            ] {
                line.push_str(&format!(" {:>12}", cell(value)));
            }
            println!("{}", line);
        }
        println!();
    }
    Ok(())
}

pub fn dashboard(dashboard: &Dashboard, channels: &[String], json: bool) -> Result<()> {
    if json {
        return print_json(dashboard);
    }

    println!(
        "== Resampled ({}, {}) ==",
        dashboard.frequency,
        dashboard.frequency.alias()
    );
    resampled(&dashboard.resampled, channels, false)?;
    println!();
    println!(
        "== Spread ({}, {}) ==",
        dashboard.frequency,
        dashboard.frequency.alias()
    );
    spread(&dashboard.spread, channels, false)?;
    println!();
    println!("== Hour of day ==");
    profile(&dashboard.hour_of_day, channels, false)?;
    println!("== Month of year ==");
    profile(&dashboard.month_of_year, channels, false)?;
    Ok(())
}
