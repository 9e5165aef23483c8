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

//! CSV data source
//!
//! Reads a delimited meter export with a header row. Column names come from
//! [`SourceConfig`]: one timestamp column plus one column per channel. Other
//! columns are ignored. An empty cell is a missing reading (NaN).

use crate::source::{DataSource, RawRecord};
use loadcurve_core::{LoadcurveError, Result, SourceConfig};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads raw records from a CSV file
pub struct CsvSource {
    path: PathBuf,
    config: SourceConfig,
}

impl CsvSource {
    pub fn new<P: AsRef<Path>>(path: P, config: SourceConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse CSV text from any reader
    pub fn read_records<R: Read>(reader: R, config: &SourceConfig) -> Result<Vec<RawRecord>> {
        let delimiter = u8::try_from(config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                LoadcurveError::Config(format!(
                    "delimiter {:?} is not a single ASCII character",
                    config.delimiter
                ))
            })?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadcurveError::MissingColumn {
                    column: name.to_string(),
                })
        };

        let ts_idx = column(config.timestamp_column.as_str())?;
        let channel_idx = config
            .channels
            .iter()
            .map(|(channel, header)| Ok((channel.clone(), column(header.as_str())?)))
            .collect::<Result<Vec<(String, usize)>>>()?;

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row.map_err(csv_error)?;
            let mut channels = BTreeMap::new();
            for (channel, idx) in &channel_idx {
                let cell = row.get(*idx).unwrap_or("");
                channels.insert(channel.clone(), parse_cell(cell, index, channel)?);
            }
            records.push(RawRecord {
                timestamp: row.get(ts_idx).unwrap_or("").to_string(),
                channels,
            });
        }

        debug!(records = records.len(), "Read CSV records");
        Ok(records)
    }
}

impl DataSource for CsvSource {
    fn records(&self) -> Result<Vec<RawRecord>> {
        let file = std::fs::File::open(&self.path)?;
        debug!(path = %self.path.display(), "Reading CSV source");
        Self::read_records(file, &self.config)
    }
}

fn parse_cell(cell: &str, record: usize, channel: &str) -> Result<f64> {
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .map_err(|_| LoadcurveError::InvalidValue {
            record,
            channel: channel.to_string(),
            value: cell.to_string(),
        })
}

fn csv_error(e: csv::Error) -> LoadcurveError {
    LoadcurveError::Csv(e.to_string())
}
