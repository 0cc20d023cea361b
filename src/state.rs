use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use flight_dashboard::config::DashboardConfig;
use flight_dashboard::data::export;
use flight_dashboard::data::filter::{
    apply_filters, DateRange, FilterCriteria, FilterOutcome, SidebarOptions,
};
use flight_dashboard::data::loader;
use flight_dashboard::data::model::{FlightTable, FlightView};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file is loaded).
    pub dataset: Option<FlightTable>,

    /// Where `dataset` came from.
    pub source: Option<PathBuf>,

    /// Sidebar selections. `date_range` is derived from `date_selection`.
    pub criteria: FilterCriteria,

    /// Dates currently picked in the date filter; only a pair filters.
    pub date_selection: Vec<NaiveDate>,

    /// Values the sidebar currently offers.
    pub options: SidebarOptions,

    /// Working set and search notice for the current selections (cached).
    pub outcome: FilterOutcome,

    /// Rows of the airline-restricted table, shown under "Show Raw Data".
    pub airline_rows: Vec<usize>,

    /// Bars in the top-departures chart.
    pub top_n: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            source: None,
            criteria: FilterCriteria::default(),
            date_selection: Vec::new(),
            options: SidebarOptions::default(),
            outcome: FilterOutcome::default(),
            airline_rows: Vec::new(),
            top_n: config.top_n,
            status_message: None,
        }
    }

    /// Load `path`, keeping the current table if that fails.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(table) => self.set_dataset(table, path.to_path_buf()),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded table and reset every filter.
    pub fn set_dataset(&mut self, table: FlightTable, source: PathBuf) {
        self.criteria = FilterCriteria::default();
        self.options = SidebarOptions::build(&table, None);
        self.date_selection = self.options.default_dates.clone();
        self.dataset = Some(table);
        self.source = Some(source);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the working set from the current selections.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.criteria.date_range = DateRange::from_selection(&self.date_selection);
        self.outcome = apply_filters(ds, &self.criteria);

        let airline_only = FilterCriteria {
            airline: self.criteria.airline.clone(),
            ..FilterCriteria::default()
        };
        self.airline_rows = apply_filters(ds, &airline_only).indices;
    }

    /// Change the airline selection. The airport, status and date controls
    /// are re-derived from the airline-restricted table.
    pub fn set_airline(&mut self, choice: &str) {
        self.criteria.set_airline_choice(choice);
        if let Some(ds) = &self.dataset {
            self.options = SidebarOptions::build(ds, self.criteria.airline.as_deref());
            self.criteria.retain_offered(&self.options);
            self.date_selection = self.options.default_dates.clone();
        }
        self.refilter();
    }

    /// Toggle one departure airport in the multi-select.
    pub fn toggle_airport(&mut self, airport: &str) {
        if !self.criteria.airports.remove(airport) {
            self.criteria.airports.insert(airport.to_string());
        }
        self.refilter();
    }

    /// Toggle one status in the multi-select.
    pub fn toggle_status(&mut self, status: &str) {
        if !self.criteria.statuses.remove(status) {
            self.criteria.statuses.insert(status.to_string());
        }
        self.refilter();
    }

    /// Remove the picked dates, which lifts the date filter.
    pub fn clear_dates(&mut self) {
        self.date_selection.clear();
        self.refilter();
    }

    /// Restore the full `[min, max]` date selection.
    pub fn reset_dates(&mut self) {
        self.date_selection = self.options.default_dates.clone();
        self.refilter();
    }

    /// The current working set.
    pub fn filtered_view(&self) -> Option<FlightView<'_>> {
        self.dataset.as_ref().map(|ds| ds.view(&self.outcome.indices))
    }

    /// The airline-restricted base table.
    pub fn raw_view(&self) -> Option<FlightView<'_>> {
        self.dataset.as_ref().map(|ds| ds.view(&self.airline_rows))
    }

    /// Write the working set to `path` as CSV.
    pub fn export_to(&mut self, path: &Path) {
        let Some(view) = self.filtered_view() else {
            self.status_message = Some("Nothing to export: no dataset loaded".to_string());
            return;
        };
        let result = export::save_csv(&view, path);
        match result {
            Ok(()) => {
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
