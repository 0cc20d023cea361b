use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use super::model::{FlightRecord, FlightTable};

/// Sentinel shown first in the airline selector; selecting it lifts the
/// airline restriction.
pub const ALL_AIRLINES: &str = "All";

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Inclusive range over the calendar date of the departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range from a date-picker selection. Anything other than exactly two
    /// dates yields `None`, which disables the date filter.
    pub fn from_selection(dates: &[NaiveDate]) -> Option<Self> {
        match dates {
            [start, end] => Some(DateRange {
                start: *start,
                end: *end,
            }),
            _ => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The user's current selections. Every field left at its default places
/// no restriction on the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the flight number; empty = inactive.
    pub search: String,
    /// Exact airline; `None` is "All".
    pub airline: Option<String>,
    /// Departure airports to keep; empty = any.
    pub airports: BTreeSet<String>,
    /// Statuses to keep; empty = any.
    pub statuses: BTreeSet<String>,
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    /// Map a selector choice onto the airline field.
    pub fn set_airline_choice(&mut self, choice: &str) {
        self.airline = (choice != ALL_AIRLINES).then(|| choice.to_string());
    }

    /// The active predicates, in the order they narrow the working set.
    pub fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut active = Vec::new();
        if let Some(airline) = &self.airline {
            active.push(Predicate::Airline(airline));
        }
        if !self.search.is_empty() {
            active.push(Predicate::Search(self.search.to_lowercase()));
        }
        if !self.airports.is_empty() {
            active.push(Predicate::DepartureAirport(&self.airports));
        }
        if !self.statuses.is_empty() {
            active.push(Predicate::Status(&self.statuses));
        }
        if let Some(range) = self.date_range {
            active.push(Predicate::DepartureDate(range));
        }
        active
    }

    /// Drop airport and status selections that are no longer offered.
    pub fn retain_offered(&mut self, options: &SidebarOptions) {
        self.airports.retain(|a| options.airports.contains(a));
        self.statuses.retain(|s| options.statuses.contains(s));
    }
}

/// A single row-level test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<'a> {
    Airline(&'a str),
    /// Holds the lowercased needle.
    Search(String),
    DepartureAirport(&'a BTreeSet<String>),
    Status(&'a BTreeSet<String>),
    DepartureDate(DateRange),
}

impl Predicate<'_> {
    pub fn matches(&self, record: &FlightRecord) -> bool {
        match self {
            Predicate::Airline(airline) => record.airline.as_deref() == Some(*airline),
            Predicate::Search(needle) => record
                .flight_number
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(needle.as_str())),
            Predicate::DepartureAirport(set) => record
                .departure_airport
                .as_ref()
                .is_some_and(|a| set.contains(a)),
            Predicate::Status(set) => record.status.as_ref().is_some_and(|s| set.contains(s)),
            Predicate::DepartureDate(range) => range.contains(record.departure_date()),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Non-fatal message raised when the flight-number search finds nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNotice {
    pub search: String,
}

impl fmt::Display for SearchNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No flights found matching '{}'", self.search)
    }
}

/// Result of running the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Indices into the base table, ascending.
    pub indices: Vec<usize>,
    pub notice: Option<SearchNotice>,
}

/// Return indices of flights that pass every active predicate.
///
/// Each predicate narrows the working set in turn. They are independent
/// row tests, so the order only matters for the search notice, which is
/// raised when the set is empty right after the search is applied.
pub fn apply_filters(table: &FlightTable, criteria: &FilterCriteria) -> FilterOutcome {
    let mut indices: Vec<usize> = (0..table.len()).collect();
    let mut notice = None;

    for predicate in criteria.predicates() {
        indices.retain(|&i| predicate.matches(&table.records[i]));

        if matches!(predicate, Predicate::Search(_)) && indices.is_empty() {
            log::warn!("no flights match search '{}'", criteria.search);
            notice = Some(SearchNotice {
                search: criteria.search.clone(),
            });
        }
    }

    FilterOutcome { indices, notice }
}

// ---------------------------------------------------------------------------
// Sidebar options
// ---------------------------------------------------------------------------

/// Values offered by the sidebar selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarOptions {
    /// Every airline in the table, sorted. The UI prepends [`ALL_AIRLINES`].
    pub airlines: Vec<String>,
    /// Departure airports of the airline-restricted table, sorted.
    pub airports: Vec<String>,
    /// Statuses of the airline-restricted table, sorted.
    pub statuses: Vec<String>,
    /// `[min, max]` departure date of the airline-restricted table.
    pub default_dates: Vec<NaiveDate>,
}

impl SidebarOptions {
    pub fn build(table: &FlightTable, airline: Option<&str>) -> Self {
        let airlines = table.distinct(|r| r.airline.as_ref());

        let restricted: Vec<usize> = match airline {
            Some(a) => {
                let only = Predicate::Airline(a);
                (0..table.len())
                    .filter(|&i| only.matches(&table.records[i]))
                    .collect()
            }
            None => (0..table.len()).collect(),
        };
        let view = table.view(&restricted);

        let airports: BTreeSet<String> = view
            .records()
            .filter_map(|r| r.departure_airport.clone())
            .collect();
        let statuses: BTreeSet<String> = view.records().filter_map(|r| r.status.clone()).collect();
        let default_dates = view
            .date_bounds()
            .map(|(lo, hi)| vec![lo, hi])
            .unwrap_or_default();

        SidebarOptions {
            airlines: airlines.into_iter().collect(),
            airports: airports.into_iter().collect(),
            statuses: statuses.into_iter().collect(),
            default_dates,
        }
    }
}
