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

//! Loadcurve error types

use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type for loadcurve operations
pub type Result<T> = std::result::Result<T, LoadcurveError>;

/// Why a timestamp string was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// No accepted layout matched
    #[error("unrecognized timestamp {0:?}")]
    Unrecognized(String),

    /// Year is not four digits, so day/month/year order cannot be trusted
    #[error("ambiguous timestamp {0:?}: year must have four digits")]
    Ambiguous(String),
}

/// Errors that can occur while loading or aggregating a series
#[derive(Debug, Error)]
pub enum LoadcurveError {
    /// Timestamp could not be parsed
    #[error("Invalid timestamp in record {record}: {source}")]
    InvalidTimestamp {
        record: usize,
        #[source]
        source: TimestampError,
    },

    /// Record lacks a required channel
    #[error("Record {record} is missing channel {channel:?}")]
    MissingChannel { record: usize, channel: String },

    /// Source has no column for a required field
    #[error("Missing column {column:?}")]
    MissingColumn { column: String },

    /// Channel value is not a real number
    #[error("Invalid value {value:?} for channel {channel:?} in record {record}")]
    InvalidValue {
        record: usize,
        channel: String,
        value: String,
    },

    /// Malformed delimited input
    #[error("CSV error: {0}")]
    Csv(String),

    /// Aggregation requested on a store without observations
    #[error("Time series store is empty")]
    EmptyStore,

    /// Bucket boundary fell outside the representable date range
    #[error("Bucket boundary out of range near {0}")]
    BoundaryOutOfRange(NaiveDateTime),

    /// Unknown resampling frequency
    #[error("Invalid resampling frequency: {0:?}")]
    InvalidFrequency(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadcurveError {
    /// Whether this error means the input data could not be parsed.
    ///
    /// Every variant for which this returns `true` aborts a load without
    /// producing a partial store.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            LoadcurveError::InvalidTimestamp { .. }
                | LoadcurveError::MissingChannel { .. }
                | LoadcurveError::MissingColumn { .. }
                | LoadcurveError::InvalidValue { .. }
                | LoadcurveError::Csv(_)
        )
    }
}

impl From<toml::de::Error> for LoadcurveError {
    fn from(e: toml::de::Error) -> Self {
        LoadcurveError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_classification() {
        let err = LoadcurveError::MissingChannel {
            record: 3,
            channel: "HP".to_string(),
        };
        assert!(err.is_parse_error());
        assert!(!LoadcurveError::EmptyStore.is_parse_error());
        assert!(!LoadcurveError::Config("bad".into()).is_parse_error());
    }

    #[test]
    fn test_timestamp_error_message() {
        let err = LoadcurveError::InvalidTimestamp {
            record: 7,
            source: TimestampError::Ambiguous("05/03/24".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("record 7"));
        assert!(msg.contains("four digits"));
    }
}
