use thiserror::Error;

/// Failures while turning an input file into a [`FlightTable`](super::model::FlightTable).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: missing departure time")]
    MissingDepartureTime { row: usize },

    #[error("row {row}: '{value}' is not a valid departure time")]
    InvalidDepartureTime { row: usize, value: String },

    #[error("row {row}: expected {expected} cells, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}
