//! Properties of the filter pipeline, exercised through the public API on a
//! small but varied flight table.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use flight_dashboard::data::export::to_csv_bytes;
use flight_dashboard::data::filter::{apply_filters, DateRange, FilterCriteria};
use flight_dashboard::data::loader::read_csv;
use flight_dashboard::data::model::FlightTable;
use flight_dashboard::data::summary::SummaryMetrics;

const FLIGHTS: &str = "\
Flight Number,Airline,Departure Time,Departure Airport,Arrival Airport,Status
AA100,American Airlines,2024-01-01T06:10:00+00:00,JFK,LAX,landed
aa101,American Airlines,2024-01-02T08:00:00+00:00,LAX,JFK,active
DL200,Delta Air Lines,2024-01-02T08:45:00+00:00,ATL,JFK,active
DL201,Delta Air Lines,2024-01-02T23:00:00+00:00,JFK,ATL,scheduled
UA300,United Airlines,2024-01-03T12:00:00+00:00,SFO,ORD,cancelled
,United Airlines,2024-01-03T13:00:00+00:00,ORD,SFO,active
BA9,,2024-01-04T19:30:00+00:00,LHR,JFK,active
AA102,American Airlines,2024-01-04T21:00:00+00:00,JFK,,
";

fn table() -> FlightTable {
    read_csv(FLIGHTS.as_bytes()).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// A spread of single predicates and combinations of them.
fn criteria_cases() -> Vec<FilterCriteria> {
    let search = FilterCriteria {
        search: "aa".to_string(),
        ..Default::default()
    };
    let airline = FilterCriteria {
        airline: Some("Delta Air Lines".to_string()),
        ..Default::default()
    };
    let airports = FilterCriteria {
        airports: set(&["JFK", "ATL"]),
        ..Default::default()
    };
    let statuses = FilterCriteria {
        statuses: set(&["active"]),
        ..Default::default()
    };
    let dates = FilterCriteria {
        date_range: DateRange::from_selection(&[date(2), date(3)]),
        ..Default::default()
    };
    let combined = FilterCriteria {
        search: "1".to_string(),
        airports: set(&["JFK", "LAX"]),
        statuses: set(&["active", "landed"]),
        date_range: DateRange::from_selection(&[date(1), date(2)]),
        ..Default::default()
    };
    vec![
        FilterCriteria::default(),
        search,
        airline,
        airports,
        statuses,
        dates,
        combined,
    ]
}

#[test]
fn result_is_an_ordered_subset_of_the_base_table() {
    let table = table();
    for criteria in criteria_cases() {
        let outcome = apply_filters(&table, &criteria);
        assert!(outcome.indices.len() <= table.len());
        assert!(outcome.indices.windows(2).all(|w| w[0] < w[1]));
        assert!(outcome.indices.iter().all(|&i| i < table.len()));
    }
}

#[test]
fn filtering_twice_changes_nothing() {
    let table = table();
    for criteria in criteria_cases() {
        let once = table.select(&apply_filters(&table, &criteria).indices);
        let twice = once.select(&apply_filters(&once, &criteria).indices);
        assert_eq!(once, twice);
    }
}

#[test]
fn predicates_compose_in_either_order() {
    let table = table();
    let a = FilterCriteria {
        airports: set(&["JFK", "LAX", "ATL"]),
        ..Default::default()
    };
    let b = FilterCriteria {
        date_range: DateRange::from_selection(&[date(2), date(4)]),
        search: "a".to_string(),
        ..Default::default()
    };
    let both = FilterCriteria {
        airports: a.airports.clone(),
        date_range: b.date_range,
        search: b.search.clone(),
        ..Default::default()
    };

    let a_then_b = {
        let t = table.select(&apply_filters(&table, &a).indices);
        t.select(&apply_filters(&t, &b).indices)
    };
    let b_then_a = {
        let t = table.select(&apply_filters(&table, &b).indices);
        t.select(&apply_filters(&t, &a).indices)
    };
    let together = table.select(&apply_filters(&table, &both).indices);

    assert_eq!(a_then_b, together);
    assert_eq!(b_then_a, together);
    assert_eq!(together.len(), 2);
}

#[test]
fn combined_criteria_pick_expected_flights() {
    let table = table();
    let criteria = criteria_cases().pop().unwrap();
    let outcome = apply_filters(&table, &criteria);
    let numbers: Vec<_> = outcome
        .indices
        .iter()
        .map(|&i| table.records[i].flight_number.as_deref().unwrap())
        .collect();
    assert_eq!(numbers, ["AA100", "aa101"]);
}

#[test]
fn filtered_view_feeds_metrics_and_export() {
    let table = table();
    let criteria = FilterCriteria {
        airline: Some("American Airlines".to_string()),
        ..Default::default()
    };
    let outcome = apply_filters(&table, &criteria);
    let view = table.view(&outcome.indices);

    let metrics = SummaryMetrics::compute(&view);
    assert_eq!(metrics.total_flights, 3);
    assert_eq!(metrics.airlines, 1);
    assert_eq!(metrics.departure_airports, 2);
    assert_eq!(metrics.arrival_airports, 2);

    let csv = String::from_utf8(to_csv_bytes(&view).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.lines().last().unwrap().starts_with("AA102,American Airlines,"));
}
