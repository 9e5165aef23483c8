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

//! Property tests for the aggregator views

use chrono::{Duration, NaiveDate, NaiveDateTime};
use loadcurve_core::{LoadcurveError, Observation, ResamplingFrequency, DEFAULT_CHANNELS};
use loadcurve_query::Aggregator;
use loadcurve_storage::TimeSeriesStore;
use proptest::prelude::*;

/// Minutes covered by generated timestamps (a little over a year)
const SPAN_MINUTES: i64 = 400 * 24 * 60;

fn origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 11, 20)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Integer readings keep sums exact; `None` is a missing reading
fn arb_reading() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => (-500i32..5000).prop_map(f64::from),
        1 => Just(f64::NAN),
    ]
}

fn arb_observation() -> impl Strategy<Value = Observation> {
    (0..SPAN_MINUTES, arb_reading(), arb_reading()).prop_map(|(minutes, hc, hp)| {
        Observation::from_pairs(
            origin() + Duration::minutes(minutes),
            [(DEFAULT_CHANNELS[0], hc), (DEFAULT_CHANNELS[1], hp)],
        )
    })
}

fn arb_observations() -> impl Strategy<Value = Vec<Observation>> {
    prop::collection::vec(arb_observation(), 1..80)
}

fn arb_frequency() -> impl Strategy<Value = ResamplingFrequency> {
    prop::sample::select(ResamplingFrequency::ALL.to_vec())
}

fn store_of(observations: Vec<Observation>) -> TimeSeriesStore {
    TimeSeriesStore::from_observations(observations, &DEFAULT_CHANNELS).unwrap()
}

fn defined_readings(store: &TimeSeriesStore, channel: &str) -> u64 {
    store
        .observations()
        .filter(|obs| obs.value(channel).is_some())
        .count() as u64
}

proptest! {
    /// Buckets tile the store's range without gaps or overlap
    #[test]
    fn test_buckets_are_contiguous(observations in arb_observations(), freq in arb_frequency()) {
        let store = store_of(observations);
        let (first, last) = store.range().unwrap();
        let buckets = Aggregator::new().buckets(&store, freq).unwrap();

        prop_assert!(!buckets.is_empty());
        prop_assert!(buckets[0].contains(first));
        prop_assert!(buckets[buckets.len() - 1].contains(last));
        for bucket in &buckets {
            prop_assert!(bucket.start < bucket.end);
        }
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }

    /// Every defined reading lands in exactly one bucket
    #[test]
    fn test_spread_counts_every_reading(observations in arb_observations(), freq in arb_frequency()) {
        let store = store_of(observations);
        let rows = Aggregator::new().resample_with_spread(&store, freq).unwrap();

        for channel in DEFAULT_CHANNELS {
            let counted: u64 = rows.iter().map(|row| row.channels[channel].count).sum();
            prop_assert_eq!(counted, defined_readings(&store, channel));
        }
    }

    /// Spread bounds the mean, and empty buckets are wholly undefined
    #[test]
    fn test_spread_bounds_mean(observations in arb_observations(), freq in arb_frequency()) {
        let store = store_of(observations);
        let rows = Aggregator::new().resample_with_spread(&store, freq).unwrap();

        for row in &rows {
            for record in row.channels.values() {
                match (record.min, record.mean, record.max) {
                    (Some(min), Some(mean), Some(max)) => {
                        prop_assert!(record.count > 0);
                        prop_assert!(min <= mean && mean <= max);
                    }
                    (None, None, None) => prop_assert_eq!(record.count, 0),
                    other => prop_assert!(false, "partially defined record {:?}", other),
                }
            }
        }
    }

    /// Plain resampling and spread agree on buckets and means
    #[test]
    fn test_resample_matches_spread(observations in arb_observations(), freq in arb_frequency()) {
        let store = store_of(observations);
        let agg = Aggregator::new();
        let means = agg.resample(&store, freq).unwrap();
        let spread = agg.resample_with_spread(&store, freq).unwrap();

        prop_assert_eq!(means.len(), spread.len());
        for (m, s) in means.iter().zip(&spread) {
            prop_assert_eq!(m.bucket, s.bucket);
            for channel in DEFAULT_CHANNELS {
                prop_assert_eq!(m.means[channel], s.channels[channel].mean);
            }
        }
    }

    /// Input order does not change the views
    #[test]
    fn test_input_order_irrelevant(observations in arb_observations(), freq in arb_frequency()) {
        let mut reversed = observations.clone();
        reversed.reverse();
        let agg = Aggregator::new();

        let a = agg.resample(&store_of(observations), freq).unwrap();
        let b = agg.resample(&store_of(reversed), freq).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Calendar profiles always cover the full cycle and every reading
    #[test]
    fn test_calendar_profiles_complete(observations in arb_observations()) {
        let store = store_of(observations);
        let agg = Aggregator::new();
        let hours = agg.group_by_hour_of_day(&store).unwrap();
        let months = agg.group_by_month_of_year(&store).unwrap();

        prop_assert_eq!(hours.groups.keys().copied().collect::<Vec<_>>(), (0..24).collect::<Vec<u32>>());
        prop_assert_eq!(months.groups.keys().copied().collect::<Vec<_>>(), (1..=12).collect::<Vec<u32>>());

        for channel in DEFAULT_CHANNELS {
            let expected = defined_readings(&store, channel);
            for profile in [&hours, &months] {
                let mut total = 0;
                for group in profile.groups.values() {
                    let stats = &group[channel];
                    total += stats.record.count;
                    prop_assert_eq!(stats.record.std_dev.is_some(), stats.record.count >= 2);
                    prop_assert_eq!(stats.distribution.is_some(), stats.record.count >= 1);
                    if let Some(d) = stats.distribution {
                        prop_assert!(d.q1 <= d.median && d.median <= d.q3);
                    }
                }
                prop_assert_eq!(total, expected);
            }
        }
    }

    /// Repeated calls return identical results
    #[test]
    fn test_views_are_idempotent(observations in arb_observations(), freq in arb_frequency()) {
        let store = store_of(observations);
        let agg = Aggregator::new();
        prop_assert_eq!(agg.dashboard(&store, freq).unwrap(), agg.dashboard(&store, freq).unwrap());
    }
}

#[test]
fn test_empty_store_rejected_by_every_view() {
    let store = TimeSeriesStore::from_observations(Vec::new(), &DEFAULT_CHANNELS).unwrap();
    let agg = Aggregator::new();
    for freq in ResamplingFrequency::ALL {
        assert!(matches!(agg.resample(&store, freq), Err(LoadcurveError::EmptyStore)));
        assert!(matches!(
            agg.resample_with_spread(&store, freq),
            Err(LoadcurveError::EmptyStore)
        ));
    }
    assert!(matches!(agg.group_by_hour_of_day(&store), Err(LoadcurveError::EmptyStore)));
    assert!(matches!(agg.group_by_month_of_year(&store), Err(LoadcurveError::EmptyStore)));
}

#[test]
fn test_views_serialize_undefined_as_null() {
    let store = store_of(vec![Observation::from_pairs(
        origin(),
        [(DEFAULT_CHANNELS[0], f64::NAN), (DEFAULT_CHANNELS[1], 2.0)],
    )]);
    let rows = Aggregator::new()
        .resample(&store, ResamplingFrequency::Daily)
        .unwrap();
    let json = serde_json::to_value(&rows).unwrap();
    assert!(json[0]["means"][DEFAULT_CHANNELS[0]].is_null());
    assert_eq!(json[0]["means"][DEFAULT_CHANNELS[1]], 2.0);
}
