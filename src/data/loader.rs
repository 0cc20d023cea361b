use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use chrono::DateTime;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{FlightTable, DEPARTURE_TIME};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a flight table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one flight per line (the cleaned export)
/// * `.json`    – `[{ "Flight Number": ..., "Airline": ..., ... }, ...]`
/// * `.parquet` – one column per field, any Arrow type castable to text
pub fn load_file(path: &Path) -> Result<FlightTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} flights with columns {:?} from {}",
        table.len(),
        table.columns,
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<FlightTable> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV text with a header row. Empty cells are missing values.
pub fn read_csv<R: Read>(input: R) -> Result<FlightTable> {
    let mut reader = csv::Reader::from_reader(input);
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(cell).collect::<Vec<_>>());
    }

    Ok(FlightTable::from_rows(columns, rows)?)
}

fn cell(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<FlightTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Flight Number": "AA100", "Airline": "American Airlines",
///     "Departure Time": "2024-01-02T08:00:00+00:00", ... },
///   ...
/// ]
/// ```
///
/// Numeric departure times are epoch milliseconds, the Pandas default.
pub fn parse_json(text: &str) -> Result<FlightTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(records.len());
    for rec in records {
        // Every element was checked to be an object above.
        let Some(obj) = rec.as_object() else { continue };
        let row: Vec<Option<String>> = columns
            .iter()
            .map(|col| {
                obj.get(col)
                    .and_then(|v| json_to_cell(v, col == DEPARTURE_TIME))
            })
            .collect();
        rows.push(row);
    }

    Ok(FlightTable::from_rows(columns, rows)?)
}

fn json_to_cell(val: &JsonValue, is_timestamp: bool) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => cell(s),
        JsonValue::Number(n) if is_timestamp => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string())
            .or_else(|| Some(n.to_string())),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the flight columns.
///
/// Every column is cast to text through Arrow, so timestamps, dictionary
/// strings and numbers all land in the same row-building path as CSV.
/// Timestamps with a named timezone come out as RFC 3339 in that zone.
fn load_parquet(path: &Path) -> Result<FlightTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let text_columns = batch
            .columns()
            .iter()
            .zip(&columns)
            .map(|(col, name)| {
                cast(col.as_ref(), &DataType::Utf8)
                    .with_context(|| format!("column '{name}' cannot be read as text"))
            })
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            let cells = text_columns
                .iter()
                .map(|col| {
                    if col.is_null(row) {
                        None
                    } else {
                        cell(col.as_string::<i32>().value(row))
                    }
                })
                .collect::<Vec<_>>();
            rows.push(cells);
        }
    }

    Ok(FlightTable::from_rows(columns, rows)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
Flight Number,Airline,Departure Time,Departure Airport,Arrival Airport,Status,Gate
AA100,American Airlines,2024-01-02 08:00:00,JFK,LAX,active,B4
,Delta Air Lines,2024-01-02 09:00:00,ATL,ORD,scheduled,
DL200,Delta Air Lines,2024-01-03T10:15:00+00:00,ATL,,landed,C1
";

    #[test]
    fn csv_keeps_extra_columns_and_drops_unnumbered_flights() {
        let table = read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.columns.len(), 7);
        assert_eq!(table.columns[6], "Gate");
        assert_eq!(table.len(), 2);

        let dl = &table.records[1];
        assert_eq!(dl.flight_number.as_deref(), Some("DL200"));
        assert_eq!(dl.arrival_airport, None);
        assert_eq!(dl.cells[6].as_deref(), Some("C1"));
    }

    #[test]
    fn csv_missing_column_fails() {
        let err = read_csv("Flight Number,Airline\nAA1,American\n".as_bytes()).unwrap_err();
        let data_err = err.downcast_ref::<DataError>().unwrap();
        assert!(matches!(data_err, DataError::MissingColumn(_)));
    }

    #[test]
    fn json_records_and_epoch_millis() {
        let text = r#"[
            {"Flight Number": "BA9", "Airline": "British Airways",
             "Departure Time": 1704182400000, "Departure Airport": "LHR",
             "Arrival Airport": "JFK", "Status": "active"},
            {"Flight Number": null, "Airline": "KLM",
             "Departure Time": "2024-01-02", "Departure Airport": "AMS",
             "Arrival Airport": null, "Status": "scheduled"}
        ]"#;
        let table = parse_json(text).unwrap();
        assert_eq!(table.len(), 1);
        let rec = &table.records[0];
        assert_eq!(
            rec.departure_time.format("%Y-%m-%d %H:%M").to_string(),
            "2024-01-02 08:00"
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("flights.xlsx")).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported file extension"));
    }

    mod parquet_input {
        use std::sync::Arc;

        use arrow::array::{
            ArrayRef, Date32Array, StringArray, TimestampMillisecondArray,
            TimestampNanosecondArray,
        };
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        use crate::data::loader::load_file;
        use crate::data::model::REQUIRED_COLUMNS;

        /// 2024-01-02T08:00:00Z
        const MILLIS: i64 = 1_704_182_400_000;

        /// Two flights, the second without a flight number, with the given
        /// departure time column.
        fn write_flights(departures: ArrayRef) -> tempfile::NamedTempFile {
            let text = |values: [Option<&str>; 2]| -> ArrayRef {
                Arc::new(StringArray::from(values.to_vec()))
            };
            let columns = vec![
                text([Some("AA100"), None]),
                text([Some("American Airlines"), Some("Delta Air Lines")]),
                departures,
                text([Some("JFK"), Some("ATL")]),
                text([Some("LAX"), None]),
                text([Some("active"), Some("scheduled")]),
            ];
            let fields: Vec<Field> = REQUIRED_COLUMNS
                .iter()
                .zip(&columns)
                .map(|(name, col)| Field::new(*name, col.data_type().clone(), true))
                .collect();
            let schema = Arc::new(Schema::new(fields));
            let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

            let file = tempfile::Builder::new()
                .suffix(".parquet")
                .tempfile()
                .unwrap();
            let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
            writer.write(&batch).unwrap();
            writer.close().unwrap();
            file
        }

        fn departure(file: &tempfile::NamedTempFile) -> String {
            let table = load_file(file.path()).unwrap();
            assert_eq!(table.len(), 1);
            assert_eq!(table.records[0].flight_number.as_deref(), Some("AA100"));
            assert_eq!(table.records[0].arrival_airport.as_deref(), Some("LAX"));
            table.records[0]
                .departure_time
                .format("%Y-%m-%d %H:%M")
                .to_string()
        }

        #[test]
        fn naive_millisecond_timestamps() {
            let file = write_flights(Arc::new(TimestampMillisecondArray::from(vec![
                MILLIS, MILLIS,
            ])));
            assert_eq!(departure(&file), "2024-01-02 08:00");
        }

        #[test]
        fn utc_nanosecond_timestamps() {
            let nanos = MILLIS * 1_000_000;
            let file = write_flights(Arc::new(
                TimestampNanosecondArray::from(vec![nanos, nanos]).with_timezone("UTC"),
            ));
            assert_eq!(departure(&file), "2024-01-02 08:00");
        }

        #[test]
        fn named_zone_keeps_local_wall_clock() {
            let file = write_flights(Arc::new(
                TimestampMillisecondArray::from(vec![MILLIS, MILLIS])
                    .with_timezone("America/New_York"),
            ));
            assert_eq!(departure(&file), "2024-01-02 03:00");
        }

        #[test]
        fn date_only_column_is_midnight() {
            // Days since the epoch for 2024-01-02.
            let file = write_flights(Arc::new(Date32Array::from(vec![19_724, 19_724])));
            assert_eq!(departure(&file), "2024-01-02 00:00");
        }
    }

    #[test]
    fn load_file_reads_csv_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }
}
