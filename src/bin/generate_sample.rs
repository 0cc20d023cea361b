use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::Parser;
use parquet::arrow::ArrowWriter;

use flight_dashboard::config::DEFAULT_DATA_FILE;
use flight_dashboard::data::model::REQUIRED_COLUMNS;

/// Write a synthetic flight dataset for trying out the dashboard
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Number of flights to generate
    #[arg(long, default_value_t = 500)]
    rows: usize,

    /// Seed for the deterministic generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output path; `.parquet` writes Parquet, anything else CSV
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    output: PathBuf,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const AIRLINES: [(&str, &str); 6] = [
    ("AA", "American Airlines"),
    ("DL", "Delta Air Lines"),
    ("UA", "United Airlines"),
    ("BA", "British Airways"),
    ("LH", "Lufthansa"),
    ("EK", "Emirates"),
];

const AIRPORTS: [&str; 12] = [
    "John F Kennedy International",
    "Los Angeles International",
    "Hartsfield-Jackson Atlanta International",
    "O'Hare International",
    "Heathrow",
    "Frankfurt International",
    "Dubai",
    "San Francisco International",
    "Dallas/Fort Worth International",
    "Denver International",
    "Charles De Gaulle",
    "Singapore Changi",
];

/// Weighted towards flights that are on their way or scheduled.
const STATUSES: [&str; 8] = [
    "scheduled", "scheduled", "active", "active", "active", "landed", "cancelled", "diverted",
];

struct SampleFlight {
    flight_number: Option<String>,
    airline: Option<String>,
    departure_time: NaiveDateTime,
    departure_airport: String,
    arrival_airport: Option<String>,
    status: String,
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<SampleFlight> {
    let start = NaiveDate::from_ymd_opt(2025, 4, 14)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    (0..rows)
        .map(|_| {
            let (code, airline) = *rng.pick(&AIRLINES);
            let departure = *rng.pick(&AIRPORTS);
            let mut arrival = *rng.pick(&AIRPORTS);
            while arrival == departure {
                arrival = *rng.pick(&AIRPORTS);
            }
            // Departures cluster around the morning and evening banks.
            let bank = if rng.chance(0.5) { 7 } else { 17 };
            let hour = (bank + rng.below(6) as i64 - 2).clamp(0, 23);
            let departure_time = start
                + Duration::days(rng.below(7) as i64)
                + Duration::hours(hour)
                + Duration::minutes(5 * rng.below(12) as i64);

            SampleFlight {
                flight_number: (!rng.chance(0.02))
                    .then(|| format!("{code}{}", 100 + rng.below(9000))),
                airline: (!rng.chance(0.03)).then(|| airline.to_string()),
                departure_time,
                departure_airport: departure.to_string(),
                arrival_airport: (!rng.chance(0.02)).then(|| arrival.to_string()),
                status: rng.pick(&STATUSES).to_string(),
            }
        })
        .collect()
}

fn write_csv(flights: &[SampleFlight], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record(REQUIRED_COLUMNS)?;
    for f in flights {
        writer.write_record([
            f.flight_number.as_deref().unwrap_or(""),
            f.airline.as_deref().unwrap_or(""),
            f.departure_time
                .format("%Y-%m-%dT%H:%M:%S+00:00")
                .to_string()
                .as_str(),
            f.departure_airport.as_str(),
            f.arrival_airport.as_deref().unwrap_or(""),
            f.status.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(flights: &[SampleFlight], path: &Path) -> Result<()> {
    let text = |values: Vec<Option<&str>>| -> ArrayRef { Arc::new(StringArray::from(values)) };

    let columns: Vec<ArrayRef> = vec![
        text(flights.iter().map(|f| f.flight_number.as_deref()).collect()),
        text(flights.iter().map(|f| f.airline.as_deref()).collect()),
        Arc::new(TimestampMillisecondArray::from(
            flights
                .iter()
                .map(|f| f.departure_time.and_utc().timestamp_millis())
                .collect::<Vec<_>>(),
        )),
        text(flights.iter().map(|f| Some(f.departure_airport.as_str())).collect()),
        text(flights.iter().map(|f| f.arrival_airport.as_deref()).collect()),
        text(flights.iter().map(|f| Some(f.status.as_str())).collect()),
    ];

    let fields: Vec<Field> = REQUIRED_COLUMNS
        .iter()
        .zip(&columns)
        .map(|(name, col)| Field::new(*name, col.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating Parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let flights = generate(args.rows, &mut rng);

    let is_parquet = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));

    if is_parquet {
        write_parquet(&flights, &args.output)?;
    } else {
        write_csv(&flights, &args.output)?;
    }

    println!(
        "Wrote {} flights to {}",
        flights.len(),
        args.output.display()
    );
    Ok(())
}
