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

//! Loadcurve Storage Layer
//!
//! Holds the parsed power series and the sources it is loaded from.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use loadcurve_core::{LoadcurveConfig, DEFAULT_CHANNELS};
//! use loadcurve_storage::{CsvSource, TimeSeriesStore};
//!
//! let config = LoadcurveConfig::default();
//! let source = CsvSource::new("comb.csv", config.source.clone());
//! let store = TimeSeriesStore::from_source(&source, &config.source.channel_names())?;
//! ```

pub mod csv_source;
pub mod source;
pub mod store;

pub use csv_source::CsvSource;
pub use source::{DataSource, MemorySource, RawRecord};
pub use store::TimeSeriesStore;
