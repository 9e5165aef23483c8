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

//! Calendar-cyclic grouping
//!
//! Groups the whole history by hour of day or month of year, using the naive
//! wall-clock time stored on each observation. These views do not depend on
//! any resampling frequency.

use crate::aggregator::Aggregator;
use crate::views::{CalendarProfile, GroupStats};
use loadcurve_core::{CalendarCycle, LoadcurveError, Result, SampleAccumulator};
use loadcurve_storage::TimeSeriesStore;
use std::collections::BTreeMap;
use tracing::debug;

impl Aggregator {
    /// Statistics per hour of day (0..=23) across all days
    pub fn group_by_hour_of_day(&self, store: &TimeSeriesStore) -> Result<CalendarProfile> {
        group_by_cycle(store, CalendarCycle::HourOfDay)
    }

    /// Statistics per month of year (1..=12), merging all years
    pub fn group_by_month_of_year(&self, store: &TimeSeriesStore) -> Result<CalendarProfile> {
        group_by_cycle(store, CalendarCycle::MonthOfYear)
    }
}

fn group_by_cycle(store: &TimeSeriesStore, cycle: CalendarCycle) -> Result<CalendarProfile> {
    if store.is_empty() {
        return Err(LoadcurveError::EmptyStore);
    }

    let channels = store.channels();
    let mut groups: BTreeMap<u32, Vec<SampleAccumulator>> = cycle
        .keys()
        .map(|key| (key, vec![SampleAccumulator::new(); channels.len()]))
        .collect();

    for obs in store.observations() {
        let key = cycle.key_of(obs.timestamp).value();
        if let Some(accumulators) = groups.get_mut(&key) {
            for (acc, channel) in accumulators.iter_mut().zip(channels) {
                if let Some(value) = obs.values.get(channel) {
                    acc.push(*value);
                }
            }
        }
    }

    let groups: BTreeMap<u32, BTreeMap<String, GroupStats>> = groups
        .into_iter()
        .map(|(key, accumulators)| {
            let stats: BTreeMap<String, GroupStats> = channels
                .iter()
                .cloned()
                .zip(accumulators.iter().map(|acc| {
                    let (record, distribution) = acc.finish();
                    GroupStats {
                        record,
                        distribution,
                    }
                }))
                .collect();
            (key, stats)
        })
        .collect();

    debug!(cycle = ?cycle, observations = store.len(), "Grouped store by calendar cycle");
    Ok(CalendarProfile { cycle, groups })
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadcurve_core::CalendarGroupKey;
    use loadcurve_storage::RawRecord;

    fn record(ts: &str, hc: f64, hp: f64) -> RawRecord {
        RawRecord::new(ts).with_channel("HC", hc).with_channel("HP", hp)
    }

    #[test]
    fn test_single_nan_observation() {
        let store = TimeSeriesStore::load(vec![record("2024-03-10T05:00", f64::NAN, 3.0)]).unwrap();
        let profile = Aggregator::new().group_by_hour_of_day(&store).unwrap();

        assert_eq!(profile.key_count(), 24);
        let hc = profile.channel(5, "HC").unwrap();
        assert_eq!(hc.record.count, 0);
        assert_eq!(hc.record.mean, None);
        assert_eq!(hc.record.std_dev, None);
        assert!(hc.distribution.is_none());

        let hp = profile.channel(5, "HP").unwrap();
        assert_eq!(hp.record.count, 1);
        assert_eq!(hp.record.mean, Some(3.0));
        assert_eq!(hp.record.std_dev, None);
    }

    #[test]
    fn test_every_hour_present() {
        let store = TimeSeriesStore::load(vec![record("01/01/2024 13:00", 1.0, 1.0)]).unwrap();
        let profile = Aggregator::new().group_by_hour_of_day(&store).unwrap();
        assert_eq!(profile.groups.keys().copied().collect::<Vec<_>>(), (0..24).collect::<Vec<_>>());
        for hour in (0..24).filter(|h| *h != 13) {
            assert_eq!(profile.channel(hour, "HC").unwrap().record.count, 0);
        }
    }

    #[test]
    fn test_hours_merge_across_days() {
        let store = TimeSeriesStore::load(vec![
            record("01/01/2024 08:00", 2.0, 0.0),
            record("02/01/2024 08:30", 4.0, 0.0),
            record("15/06/2024 08:59", 6.0, 0.0),
            record("15/06/2024 09:00", 100.0, 0.0),
        ])
        .unwrap();
        let profile = Aggregator::new().group_by_hour_of_day(&store).unwrap();
        let hc = profile.channel(8, "HC").unwrap();
        assert_eq!(hc.record.count, 3);
        assert_eq!(hc.record.mean, Some(4.0));
        assert_eq!(hc.record.std_dev, Some(2.0));
        assert_eq!(hc.distribution.map(|d| d.median), Some(4.0));
        assert_eq!(profile.channel(9, "HC").unwrap().record.count, 1);
    }

    #[test]
    fn test_months_merge_across_years() {
        let store = TimeSeriesStore::load(vec![
            record("10/01/2023 00:00", 1.0, 1.0),
            record("10/01/2024 00:00", 3.0, 1.0),
            record("10/07/2024 00:00", 7.0, 1.0),
        ])
        .unwrap();
        let profile = Aggregator::new().group_by_month_of_year(&store).unwrap();
        assert_eq!(profile.key_count(), 12);
        assert_eq!(profile.groups.keys().next(), Some(&1));
        assert_eq!(profile.groups.keys().last(), Some(&12));

        let january = profile.get(CalendarGroupKey::MonthOfYear(1)).unwrap();
        assert_eq!(january["HC"].record.count, 2);
        assert_eq!(january["HC"].record.mean, Some(2.0));
        assert_eq!(profile.channel(7, "HC").unwrap().record.mean, Some(7.0));
        assert_eq!(profile.channel(3, "HC").unwrap().record.mean, None);
    }

    #[test]
    fn test_get_rejects_other_cycle() {
        let store = TimeSeriesStore::load(vec![record("10/01/2023 00:00", 1.0, 1.0)]).unwrap();
        let profile = Aggregator::new().group_by_month_of_year(&store).unwrap();
        assert!(profile.get(CalendarGroupKey::HourOfDay(1)).is_none());
    }

    #[test]
    fn test_empty_store() {
        let store = TimeSeriesStore::load(Vec::new()).unwrap();
        let agg = Aggregator::new();
        assert!(matches!(agg.group_by_hour_of_day(&store), Err(LoadcurveError::EmptyStore)));
        assert!(matches!(agg.group_by_month_of_year(&store), Err(LoadcurveError::EmptyStore)));
    }
}
