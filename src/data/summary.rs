//! Read-only projections of the working set: headline metrics and the
//! tallies behind each chart.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Timelike;

use super::model::FlightView;

/// The four headline counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryMetrics {
    pub total_flights: usize,
    pub departure_airports: usize,
    pub arrival_airports: usize,
    pub airlines: usize,
}

impl SummaryMetrics {
    pub fn compute(view: &FlightView<'_>) -> Self {
        let mut airlines = BTreeSet::new();
        let mut departures = BTreeSet::new();
        let mut arrivals = BTreeSet::new();

        for r in view.records() {
            airlines.extend(r.airline.as_deref());
            departures.extend(r.departure_airport.as_deref());
            arrivals.extend(r.arrival_airport.as_deref());
        }

        SummaryMetrics {
            total_flights: view.len(),
            departure_airports: departures.len(),
            arrival_airports: arrivals.len(),
            airlines: airlines.len(),
        }
    }
}

/// Flights per departure hour. Hours with no flights are absent.
pub fn hourly_counts(view: &FlightView<'_>) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for r in view.records() {
        *counts.entry(r.departure_time.hour()).or_insert(0) += 1;
    }
    counts
}

/// Occurrences of each non-missing value, most frequent first. Equal counts
/// keep the order in which the values first appear.
pub fn value_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut position: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for v in values.into_iter().flatten() {
        match position.get(v) {
            Some(&p) => counts[p].1 += 1,
            None => {
                position.insert(v, counts.len());
                counts.push((v.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-appearance order among ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Departures per airport, most frequent first.
pub fn departure_counts(view: &FlightView<'_>) -> Vec<(String, usize)> {
    value_counts(view.records().map(|r| r.departure_airport.as_deref()))
}

/// The `n` busiest departure airports.
pub fn top_departures(view: &FlightView<'_>, n: usize) -> Vec<(String, usize)> {
    let mut counts = departure_counts(view);
    counts.truncate(n);
    counts
}

/// One slice of the status breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusShare {
    pub status: String,
    pub count: usize,
    /// Share of flights with a known status, in `0.0..=1.0`.
    pub fraction: f64,
}

/// Flights per status as proportions of the flights that have one.
pub fn status_distribution(view: &FlightView<'_>) -> Vec<StatusShare> {
    let counts = value_counts(view.records().map(|r| r.status.as_deref()));
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    counts
        .into_iter()
        .map(|(status, count)| StatusShare {
            status,
            count,
            fraction: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::data::model::{FlightRecord, FlightTable};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    fn sample() -> FlightTable {
        FlightTable::from_records(vec![
            FlightRecord::new(Some("1"), Some("Delta"), at(6), Some("ATL"), Some("JFK"), Some("active")),
            FlightRecord::new(Some("2"), Some("Delta"), at(6), Some("JFK"), Some("ATL"), Some("landed")),
            FlightRecord::new(Some("3"), None, at(9), Some("ATL"), Some("LAX"), Some("active")),
            FlightRecord::new(Some("4"), Some("United"), at(22), Some("ORD"), None, None),
            FlightRecord::new(Some("5"), Some("United"), at(9), Some("JFK"), Some("JFK"), Some("active")),
        ])
    }

    #[test]
    fn metrics_count_distinct_known_values() {
        let table = sample();
        let metrics = SummaryMetrics::compute(&table.view(&table.all_indices()));
        assert_eq!(
            metrics,
            SummaryMetrics {
                total_flights: 5,
                departure_airports: 3,
                arrival_airports: 3,
                airlines: 2,
            }
        );

        let none: [usize; 0] = [];
        assert_eq!(SummaryMetrics::compute(&table.view(&none)), SummaryMetrics::default());
    }

    #[test]
    fn hourly_counts_skip_empty_hours() {
        let table = sample();
        let counts = hourly_counts(&table.view(&table.all_indices()));
        assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![(6, 2), (9, 2), (22, 1)]);
    }

    #[test]
    fn departure_counts_break_ties_by_first_appearance() {
        let table = sample();
        let counts = departure_counts(&table.view(&table.all_indices()));
        assert_eq!(
            counts,
            vec![("ATL".to_string(), 2), ("JFK".to_string(), 2), ("ORD".to_string(), 1)]
        );
        assert_eq!(top_departures(&table.view(&table.all_indices()), 1), vec![("ATL".to_string(), 2)]);
    }

    #[test]
    fn status_shares_cover_known_statuses() {
        let table = sample();
        let idx = [0, 1, 3];
        let shares = status_distribution(&table.view(&idx));
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].status, "active");
        assert!((shares[0].fraction - 0.5).abs() < 1e-9);
        assert!((shares.iter().map(|s| s.fraction).sum::<f64>() - 1.0).abs() < 1e-9);
    }
}
