use std::path::Path;
use std::sync::Arc;

use crate::color::CategoryPalette;
use crate::config::DashboardConfig;
use crate::data::aggregate::{county_eligibility_breakdown, yearly_registration_counts};
use crate::data::filter::{filter_by_city_and_range, filter_by_minimum_range, lookup_by_make_model};
use crate::data::model::{
    CountyEligibilityMatrix, Dataset, MapMarker, RangeMatch, VehicleSummary, YearlyCount,
};

// ---------------------------------------------------------------------------
// Lookup result
// ---------------------------------------------------------------------------

/// Outcome of the make/model lookup. `NotTriggered` until Submit is pressed
/// for the first time, so an untouched form shows nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    NotTriggered,
    Found(VehicleSummary),
    NotFound,
}

impl LookupState {
    /// Text for the result block, `None` before the first submit.
    pub fn message(&self) -> Option<String> {
        match self {
            LookupState::NotTriggered => None,
            LookupState::Found(summary) => Some(summary.to_string()),
            LookupState::NotFound => Some("No matching records found".to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Inputs are only changed through the `set_*` / `submit_*` handlers, each of
/// which recomputes the views that depend on that input.
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub dataset: Option<Dataset>,

    // ---- inputs ----
    pub city: Option<String>,
    pub range_min: i64,
    pub range_max: i64,
    pub min_range: f64,
    pub make_input: String,
    pub model_input: String,
    pub submit_clicks: u32,

    // ---- derived views ----
    pub markers: Arc<[MapMarker]>,
    pub yearly_counts: Vec<YearlyCount>,
    pub table_rows: Vec<RangeMatch>,
    pub eligibility: CountyEligibilityMatrix,
    pub palette: CategoryPalette,
    pub lookup: LookupState,

    /// Map framing: `[lat, lon]` centre and half-span in degrees.
    pub map_center: [f64; 2],
    pub map_span_degrees: f64,
    pub row_limit: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            city: None,
            range_min: 0,
            range_max: 0,
            min_range: config.default_min_range,
            make_input: String::new(),
            model_input: String::new(),
            submit_clicks: 0,
            markers: Arc::from(Vec::new()),
            yearly_counts: Vec::new(),
            table_rows: Vec::new(),
            eligibility: CountyEligibilityMatrix::default(),
            palette: CategoryPalette::default(),
            lookup: LookupState::NotTriggered,
            map_center: config.map_center,
            map_span_degrees: config.map_span_degrees,
            row_limit: config.row_limit,
            status_message: None,
        }
    }

    /// Load a CSV and ingest it, or surface the error in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path, self.row_limit) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {} ({} cities)",
                    dataset.len(),
                    path.display(),
                    dataset.cities().len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset: reset inputs and rebuild every view.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        (self.range_min, self.range_max) = dataset.range_bounds().unwrap_or((0, 0));
        self.city = None;
        self.submit_clicks = 0;
        self.lookup = LookupState::NotTriggered;

        // Year and county views do not depend on any input.
        self.yearly_counts = yearly_registration_counts(&dataset);
        self.eligibility = county_eligibility_breakdown(&dataset);
        self.palette = CategoryPalette::new(&self.eligibility.categories);

        self.status_message = dataset
            .is_empty()
            .then(|| "No rows with a usable vehicle location".to_string());
        self.dataset = Some(dataset);
        self.refresh_map();
        self.refresh_table();
    }

    // ---- handlers ----

    pub fn set_city(&mut self, city: Option<String>) {
        self.city = city;
        self.refresh_map();
    }

    pub fn set_range(&mut self, min: i64, max: i64) {
        self.range_min = min;
        self.range_max = max;
        self.refresh_map();
    }

    pub fn set_min_range(&mut self, min_range: f64) {
        self.min_range = min_range;
        self.refresh_table();
    }

    /// Submit button: count the click and run the lookup with the current
    /// make/model text.
    pub fn submit_lookup(&mut self) {
        self.submit_clicks += 1;
        let Some(ds) = &self.dataset else {
            self.lookup = LookupState::NotFound;
            return;
        };
        self.lookup = match lookup_by_make_model(ds, &self.make_input, &self.model_input) {
            Some(summary) => LookupState::Found(summary),
            None => LookupState::NotFound,
        };
    }

    // ---- recomputation ----

    fn refresh_map(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let hits =
            filter_by_city_and_range(ds, self.city.as_deref(), self.range_min, self.range_max);
        self.markers = hits.into_iter().map(MapMarker::from).collect();
        log::debug!(
            "map: city={:?} range=[{}, {}] -> {} markers",
            self.city,
            self.range_min,
            self.range_max,
            self.markers.len()
        );
    }

    fn refresh_table(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.table_rows = filter_by_minimum_range(ds, self.min_range);
        log::debug!("table: range >= {} -> {} rows", self.min_range, self.table_rows.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{seattle_tacoma, vehicle};

    fn loaded() -> AppState {
        let mut state = AppState::new(&DashboardConfig::default());
        state.set_dataset(seattle_tacoma());
        state
    }

    #[test]
    fn new_dataset_shows_everything() {
        let state = loaded();
        assert_eq!((state.range_min, state.range_max), (50, 200));
        assert_eq!(state.markers.len(), 3);
        assert_eq!(state.table_rows.len(), 2);
        assert_eq!(state.yearly_counts.len(), 1);
        assert_eq!(state.eligibility.counties, ["King"]);
        assert_eq!(state.lookup, LookupState::NotTriggered);
        assert_eq!(state.lookup.message(), None);
    }

    #[test]
    fn city_and_range_handlers_refilter_markers() {
        let mut state = loaded();
        state.set_city(Some("Seattle".into()));
        assert_eq!(state.markers.len(), 2);

        state.set_range(0, 60);
        assert_eq!(state.markers.len(), 1);
        assert_eq!(state.markers[0].tooltip, "Seattle: 50 range");

        state.set_city(None);
        state.set_range(150, 250);
        assert_eq!(state.markers.len(), 1);
        assert_eq!(state.markers[0].tooltip, "Tacoma: 200 range");

        state.set_range(250, 150);
        assert!(state.markers.is_empty());
    }

    #[test]
    fn min_range_handler_refilters_table() {
        let mut state = loaded();
        state.set_min_range(0.0);
        assert_eq!(state.table_rows.len(), 3);
        state.set_min_range(201.0);
        assert!(state.table_rows.is_empty());
    }

    #[test]
    fn lookup_runs_only_on_submit() {
        let mut state = loaded();
        state.make_input = "tesla".into();
        state.model_input = "model 3".into();
        assert_eq!(state.lookup, LookupState::NotTriggered);

        state.submit_lookup();
        assert_eq!(state.submit_clicks, 1);
        assert!(matches!(state.lookup, LookupState::Found(_)));
        assert!(state.lookup.message().unwrap().starts_with("Electric Range: 100"));

        state.model_input = "model s".into();
        state.submit_lookup();
        assert_eq!(state.lookup, LookupState::NotFound);
        assert_eq!(state.lookup.message().as_deref(), Some("No matching records found"));
    }

    #[test]
    fn new_dataset_resets_inputs() {
        let mut state = loaded();
        state.set_city(Some("Tacoma".into()));
        state.submit_lookup();

        state.set_dataset(Dataset::from_records(vec![vehicle("Olympia", Some(30))]));
        assert_eq!(state.city, None);
        assert_eq!((state.range_min, state.range_max), (30, 30));
        assert_eq!(state.lookup, LookupState::NotTriggered);
        assert_eq!(state.markers.len(), 1);
    }

    #[test]
    fn empty_dataset_is_reported() {
        let mut state = loaded();
        state.set_dataset(Dataset::from_records(Vec::new()));
        assert_eq!(
            state.status_message.as_deref(),
            Some("No rows with a usable vehicle location")
        );
        assert!(state.markers.is_empty());
        assert!(state.table_rows.is_empty());

        state.set_dataset(seattle_tacoma());
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded();
        state.load_path(Path::new("/nonexistent/ev.csv"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(state.dataset.as_ref().map(Dataset::len), Some(3));
    }
}
