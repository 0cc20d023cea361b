use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::FlightView;

/// File name suggested by the download dialog.
pub const EXPORT_FILE_NAME: &str = "filtered_flight_data.csv";

/// Serialize a view as CSV: the input header, then one line per flight with
/// its raw cells. Missing values become empty fields.
pub fn write_csv<W: Write>(view: &FlightView<'_>, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(view.columns())
        .context("writing CSV header")?;

    for (row_no, record) in view.records().enumerate() {
        writer
            .write_record(record.cells.iter().map(|c| c.as_deref().unwrap_or("")))
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }

    writer.flush().context("flushing CSV output")?;
    Ok(())
}

/// The CSV bytes of a view, UTF-8 encoded.
pub fn to_csv_bytes(view: &FlightView<'_>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(view, &mut buf)?;
    Ok(buf)
}

/// Write a view to `path`, replacing any existing file.
pub fn save_csv(view: &FlightView<'_>, path: &Path) -> Result<()> {
    let bytes = to_csv_bytes(view)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} flights to {}", view.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    const SAMPLE: &str = "\
Flight Number,Airline,Departure Time,Departure Airport,Arrival Airport,Status,Terminal
AA100,American Airlines,2024-01-02 08:00:00,JFK,LAX,active,4
DL200,\"Delta, Inc\",2024-01-02 09:30:00,ATL,,scheduled,
UA300,United,2024-01-03 11:00:00,SFO,ORD,landed,2
";

    #[test]
    fn export_keeps_header_and_selected_rows() {
        let table = read_csv(SAMPLE.as_bytes()).unwrap();
        let idx = [1, 2];
        let bytes = to_csv_bytes(&table.view(&idx)).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Flight Number,Airline,Departure Time,Departure Airport,Arrival Airport,Status,Terminal"
        );
        assert_eq!(
            lines[1],
            "DL200,\"Delta, Inc\",2024-01-02 09:30:00,ATL,,scheduled,"
        );

        let reloaded = read_csv(text.as_bytes()).unwrap();
        assert_eq!(reloaded, table.select(&idx));
    }

    #[test]
    fn empty_view_exports_only_the_header() {
        let table = read_csv(SAMPLE.as_bytes()).unwrap();
        let none: [usize; 0] = [];
        let text = String::from_utf8(to_csv_bytes(&table.view(&none)).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn save_csv_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let table = read_csv(SAMPLE.as_bytes()).unwrap();

        save_csv(&table.view(&table.all_indices()), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Flight Number,"));
        assert_eq!(written.lines().count(), 4);
    }
}
