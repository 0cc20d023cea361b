use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use super::error::DataError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const FLIGHT_NUMBER: &str = "Flight Number";
pub const AIRLINE: &str = "Airline";
pub const DEPARTURE_TIME: &str = "Departure Time";
pub const DEPARTURE_AIRPORT: &str = "Departure Airport";
pub const ARRIVAL_AIRPORT: &str = "Arrival Airport";
pub const STATUS: &str = "Status";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    FLIGHT_NUMBER,
    AIRLINE,
    DEPARTURE_TIME,
    DEPARTURE_AIRPORT,
    ARRIVAL_AIRPORT,
    STATUS,
];

// ---------------------------------------------------------------------------
// FlightRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single flight (one row of the source table).
///
/// The typed fields are what the dashboard filters and aggregates on;
/// `cells` keeps the raw text of every input column so exports reproduce
/// the original column set.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub flight_number: Option<String>,
    pub airline: Option<String>,
    pub departure_time: NaiveDateTime,
    pub departure_airport: Option<String>,
    pub arrival_airport: Option<String>,
    pub status: Option<String>,
    /// Raw cells aligned with [`FlightTable::columns`]. `None` is an empty cell.
    pub cells: Vec<Option<String>>,
}

impl FlightRecord {
    /// Build a record whose raw cells follow [`REQUIRED_COLUMNS`].
    pub fn new(
        flight_number: Option<&str>,
        airline: Option<&str>,
        departure_time: NaiveDateTime,
        departure_airport: Option<&str>,
        arrival_airport: Option<&str>,
        status: Option<&str>,
    ) -> Self {
        let owned = |v: Option<&str>| v.map(str::to_string);
        let cells = vec![
            owned(flight_number),
            owned(airline),
            Some(departure_time.format("%Y-%m-%d %H:%M:%S").to_string()),
            owned(departure_airport),
            owned(arrival_airport),
            owned(status),
        ];
        FlightRecord {
            flight_number: owned(flight_number),
            airline: owned(airline),
            departure_time,
            departure_airport: owned(departure_airport),
            arrival_airport: owned(arrival_airport),
            status: owned(status),
            cells,
        }
    }

    /// Calendar date of the departure.
    pub fn departure_date(&self) -> NaiveDate {
        self.departure_time.date()
    }
}

// ---------------------------------------------------------------------------
// FlightTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Held immutably; filtered views are derived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightTable {
    /// Input header, in file order.
    pub columns: Vec<String>,
    pub records: Vec<FlightRecord>,
}

/// Positions of the required columns inside a header row.
struct ColumnIndex {
    flight_number: usize,
    airline: usize,
    departure_time: usize,
    departure_airport: usize,
    arrival_airport: usize,
    status: usize,
}

impl ColumnIndex {
    fn locate(columns: &[String]) -> Result<Self, DataError> {
        let find = |name: &'static str| {
            columns
                .iter()
                .position(|c| c.trim() == name)
                .ok_or(DataError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            flight_number: find(FLIGHT_NUMBER)?,
            airline: find(AIRLINE)?,
            departure_time: find(DEPARTURE_TIME)?,
            departure_airport: find(DEPARTURE_AIRPORT)?,
            arrival_airport: find(ARRIVAL_AIRPORT)?,
            status: find(STATUS)?,
        })
    }
}

impl FlightTable {
    /// Table over the [`REQUIRED_COLUMNS`] built from ready-made records.
    pub fn from_records(records: Vec<FlightRecord>) -> Self {
        FlightTable {
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
        }
    }

    /// Build a table from a header and raw rows of cells.
    ///
    /// Rows without a flight number are dropped. Every kept row must carry
    /// a parseable departure time.
    pub fn from_rows<I>(columns: Vec<String>, rows: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = Vec<Option<String>>>,
    {
        let idx = ColumnIndex::locate(&columns)?;
        let mut records = Vec::new();

        for (row_no, cells) in rows.into_iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(DataError::RowWidth {
                    row: row_no,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }

            let flight_number = cells[idx.flight_number].clone();
            if flight_number.is_none() {
                continue;
            }

            let raw_time = cells[idx.departure_time]
                .as_deref()
                .ok_or(DataError::MissingDepartureTime { row: row_no })?;
            let departure_time =
                parse_timestamp(raw_time).ok_or_else(|| DataError::InvalidDepartureTime {
                    row: row_no,
                    value: raw_time.to_string(),
                })?;

            records.push(FlightRecord {
                flight_number,
                airline: cells[idx.airline].clone(),
                departure_time,
                departure_airport: cells[idx.departure_airport].clone(),
                arrival_airport: cells[idx.arrival_airport].clone(),
                status: cells[idx.status].clone(),
                cells,
            });
        }

        Ok(FlightTable { columns, records })
    }

    /// Number of flights.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Derived copy holding only the rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> FlightTable {
        FlightTable {
            columns: self.columns.clone(),
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
        }
    }

    /// Index list covering every row, in table order.
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.records.len()).collect()
    }

    /// Borrowed view over the rows at `indices`.
    pub fn view<'a>(&'a self, indices: &'a [usize]) -> FlightView<'a> {
        FlightView {
            table: self,
            indices,
        }
    }

    /// Sorted distinct non-missing values of one field.
    pub fn distinct<F>(&self, field: F) -> BTreeSet<String>
    where
        F: Fn(&FlightRecord) -> Option<&String>,
    {
        self.records.iter().filter_map(|r| field(r).cloned()).collect()
    }
}

// ---------------------------------------------------------------------------
// FlightView – an ordered selection of rows
// ---------------------------------------------------------------------------

/// A read-only projection of a table through a list of row indices.
/// Metrics, charts and exports are computed over views.
#[derive(Debug, Clone, Copy)]
pub struct FlightView<'a> {
    table: &'a FlightTable,
    indices: &'a [usize],
}

impl<'a> FlightView<'a> {
    pub fn columns(&self) -> &'a [String] {
        &self.table.columns
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row at position `n` of the view.
    pub fn get(&self, n: usize) -> Option<&'a FlightRecord> {
        self.indices
            .get(n)
            .and_then(|&i| self.table.records.get(i))
    }

    /// Rows in view order. Indices past the end of the table are skipped.
    pub fn records(&self) -> impl Iterator<Item = &'a FlightRecord> + 'a {
        let records = &self.table.records;
        self.indices.iter().filter_map(move |&i| records.get(i))
    }

    /// Earliest and latest departure dates in the view.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.records()
            .map(FlightRecord::departure_date)
            .fold(None, |acc, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a departure timestamp.
///
/// Offset-carrying timestamps keep their wall-clock time in that offset,
/// so the date component is the local departure date.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
