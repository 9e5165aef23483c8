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

//! Integration tests for loading a store from CSV files

use chrono::{Datelike, Timelike};
use loadcurve_core::{LoadcurveError, SourceConfig};
use loadcurve_storage::{CsvSource, DataSource, TimeSeriesStore};
use std::io::Write;

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Day-first timestamps load in chronological order
#[test]
fn test_load_meter_export() {
    let file = write_csv(
        "base,P Atteinte:HC,P Atteinte:HP\n\
         12/03/2024 01:00,4.0,1.0\n\
         05/03/2024 10:00,12.5,3.0\n\
         05/03/2024 11:00,,4.0\n",
    );
    let config = SourceConfig::default();
    let source = CsvSource::new(file.path(), config.clone());
    let store = TimeSeriesStore::from_source(&source, &config.channel_names()).unwrap();

    assert_eq!(store.len(), 3);
    let (first, last) = store.range().unwrap();
    assert_eq!((first.day(), first.month(), first.hour()), (5, 3, 10));
    assert_eq!((last.day(), last.month(), last.hour()), (12, 3, 1));

    let second = store.observations().nth(1).unwrap();
    assert_eq!(second.value("HC"), None);
    assert_eq!(second.value("HP"), Some(4.0));
}

/// A bad timestamp anywhere aborts the load
#[test]
fn test_bad_timestamp_aborts_load() {
    let file = write_csv(
        "base,P Atteinte:HC,P Atteinte:HP\n\
         05/03/2024 10:00,1.0,1.0\n\
         2024/99/99,1.0,1.0\n",
    );
    let config = SourceConfig::default();
    let source = CsvSource::new(file.path(), config.clone());
    let err = TimeSeriesStore::from_source(&source, &config.channel_names()).unwrap_err();
    assert!(err.is_parse_error());
}

/// Header-only file yields an empty store
#[test]
fn test_header_only_file() {
    let file = write_csv("base,P Atteinte:HC,P Atteinte:HP\n");
    let config = SourceConfig::default();
    let source = CsvSource::new(file.path(), config.clone());
    let store = TimeSeriesStore::from_source(&source, &config.channel_names()).unwrap();
    assert!(store.is_empty());
    assert!(matches!(store.range(), Err(LoadcurveError::EmptyStore)));
}

/// Missing file surfaces as an IO error
#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvSource::new(dir.path().join("absent.csv"), SourceConfig::default());
    let err = source.records().unwrap_err();
    assert!(matches!(err, LoadcurveError::Io(_)));
}
