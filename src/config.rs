use std::path::PathBuf;

use clap::Parser;

/// Dataset opened at startup when no path is given.
pub const DEFAULT_DATA_FILE: &str = "cleaned_flight_data.csv";

/// Number of airports in the "Top departure airports" chart.
pub const DEFAULT_TOP_N: usize = 10;

/// Interactive dashboard over a cleaned flight dataset
#[derive(Debug, Parser)]
#[command(name = "flight-dashboard")]
#[command(about = "Explore flight records: filter, summarize, chart and export")]
pub struct Args {
    /// Flight table to open (.csv, .json or .parquet)
    #[arg(default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// How many airports the top-departures chart shows
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,
}

/// Settings the running dashboard reads.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_file: PathBuf,
    pub top_n: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            top_n: DEFAULT_TOP_N,
            window_size: [1280.0, 900.0],
            min_window_size: [700.0, 500.0],
        }
    }
}

impl From<Args> for DashboardConfig {
    fn from(args: Args) -> Self {
        Self {
            data_file: args.data_file,
            top_n: args.top_n.max(1),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_the_cleaned_dataset() {
        let config = DashboardConfig::from(Args::parse_from(["flight-dashboard"]));
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_file, PathBuf::from("cleaned_flight_data.csv"));
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn arguments_override_defaults() {
        let args = Args::parse_from(["flight-dashboard", "flights.parquet", "--top-n", "0"]);
        let config = DashboardConfig::from(args);
        assert_eq!(config.data_file, PathBuf::from("flights.parquet"));
        assert_eq!(config.top_n, 1);
    }
}
