//! Application state — single-owner, main-thread only.
//!
//! Every user action runs a synchronous fetch-then-compute-then-render
//! cycle right here in the event loop; a slow fetch blocks the
//! interaction until it returns or errors, and every error degrades to a
//! status-bar warning. Nothing runs in the background.

use chrono::NaiveDate;
use fredlab_core::analysis::{align_and_correlate, CorrelationError, CorrelationResult};
use fredlab_core::data::{DataService, FredProvider, PopularList, SearchHit, SeriesProvider};
use fredlab_core::domain::{DateRange, SeriesSelection, TimeSeries};
use fredlab_core::session::{SessionState, Slot};

/// The facade the dashboard talks to. Boxed so tests can stub the provider.
pub type Service = DataService<Box<dyn SeriesProvider>>;

pub fn fred_service(api_key: impl Into<String>) -> Service {
    DataService::new(Box::new(FredProvider::new(api_key)))
}

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Search,
    Chart,
    Data,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Search => 0,
            Panel::Chart => 1,
            Panel::Data => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Search),
            1 => Some(Panel::Chart),
            2 => Some(Panel::Data),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Search => "Search",
            Panel::Chart => "Chart",
            Panel::Data => "Data",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Modal text-input overlays. Date editing runs as two stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ApiKey,
    Query(Slot),
    RangeStart,
    RangeEnd,
}

/// Per-slot search state: the query and its ranked hits.
#[derive(Debug, Default)]
pub struct SlotSearch {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

pub struct AppState {
    pub running: bool,
    pub active_panel: Panel,
    pub overlay: Overlay,
    pub input_buffer: String,
    pending_start: Option<NaiveDate>,

    pub session: SessionState,
    pub service: Service,
    pub popular: PopularList,

    pub active_slot: Slot,
    pub search1: SlotSearch,
    pub search2: SlotSearch,
    /// Cursor over the combined pick list: hits first, then popular.
    pub cursor: usize,

    pub series1: Option<TimeSeries>,
    pub series2: Option<TimeSeries>,
    pub correlation: Option<Result<CorrelationResult, CorrelationError>>,

    pub status: Option<(StatusLevel, String)>,
}

impl AppState {
    pub fn new(service: Service, has_api_key: bool) -> Self {
        let today = chrono::Local::now().date_naive();
        let mut session = SessionState::new();
        session.range = DateRange::new(Some(today - chrono::Duration::days(365)), Some(today));

        Self {
            running: true,
            active_panel: Panel::Search,
            overlay: if has_api_key {
                Overlay::None
            } else {
                Overlay::ApiKey
            },
            input_buffer: String::new(),
            pending_start: None,
            session,
            service,
            popular: PopularList::default_us(),
            active_slot: Slot::First,
            search1: SlotSearch::default(),
            search2: SlotSearch::default(),
            cursor: 0,
            series1: None,
            series2: None,
            correlation: None,
            status: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((StatusLevel::Info, message.into()));
    }

    pub fn set_warning(&mut self, message: impl Into<String>) {
        self.status = Some((StatusLevel::Warning, message.into()));
    }

    pub fn slot_search(&self, slot: Slot) -> &SlotSearch {
        match slot {
            Slot::First => &self.search1,
            Slot::Second => &self.search2,
        }
    }

    fn slot_search_mut(&mut self, slot: Slot) -> &mut SlotSearch {
        match slot {
            Slot::First => &mut self.search1,
            Slot::Second => &mut self.search2,
        }
    }

    /// Rows in the active pick list: the slot's hits, then the popular set.
    pub fn pick_list_len(&self) -> usize {
        self.slot_search(self.active_slot).hits.len() + self.popular.len()
    }

    pub fn toggle_slot(&mut self) {
        self.active_slot = match self.active_slot {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        };
        self.cursor = 0;
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.pick_list_len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    // ── Overlay lifecycle ───────────────────────────────────────────

    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
        self.input_buffer.clear();
    }

    pub fn cancel_overlay(&mut self) {
        self.overlay = Overlay::None;
        self.input_buffer.clear();
        self.pending_start = None;
    }

    /// Commit the text in the input buffer to whatever the overlay edits.
    pub fn submit_overlay(&mut self) {
        let text = self.input_buffer.trim().to_string();
        match self.overlay {
            Overlay::None => {}
            Overlay::ApiKey => {
                if text.is_empty() {
                    self.set_warning("An API key is required to reach FRED");
                    return;
                }
                self.service = fred_service(text);
                self.overlay = Overlay::None;
                self.input_buffer.clear();
                self.set_status("API key set");
            }
            Overlay::Query(slot) => {
                self.overlay = Overlay::None;
                self.input_buffer.clear();
                if !text.is_empty() {
                    self.run_search(slot, text);
                }
            }
            Overlay::RangeStart => match parse_optional_date(&text) {
                Ok(start) => {
                    self.pending_start = start;
                    self.overlay = Overlay::RangeEnd;
                    self.input_buffer.clear();
                }
                Err(msg) => self.set_warning(msg),
            },
            Overlay::RangeEnd => match parse_optional_date(&text) {
                Ok(end) => {
                    let range = DateRange::new(self.pending_start, end);
                    match range.validate(chrono::Local::now().date_naive()) {
                        Ok(()) => {
                            self.pending_start = None;
                            self.session.range = range;
                            self.overlay = Overlay::None;
                            self.input_buffer.clear();
                            self.set_status("Date range updated");
                            self.refresh();
                        }
                        Err(msg) => self.set_warning(msg),
                    }
                }
                Err(msg) => self.set_warning(msg),
            },
        }
    }

    // ── Actions (synchronous fetch → compute) ───────────────────────

    fn run_search(&mut self, slot: Slot, query: String) {
        match self.service.search(&query) {
            Ok(hits) if hits.is_empty() => {
                self.slot_search_mut(slot).hits.clear();
                self.set_warning(format!("No results for '{query}'"));
            }
            Ok(hits) => {
                let count = hits.len();
                let search = self.slot_search_mut(slot);
                search.query = query.clone();
                search.hits = hits;
                self.cursor = 0;
                self.set_status(format!("{count} result(s) for '{query}'"));
            }
            Err(e) => self.set_warning(format!("Search failed: {e}")),
        }
    }

    /// Select whatever the cursor points at into the active slot.
    pub fn select_cursor_item(&mut self) {
        let hits = &self.slot_search(self.active_slot).hits;
        let selection = if self.cursor < hits.len() {
            let hit = &hits[self.cursor];
            SeriesSelection::new(hit.id.clone(), hit.title.clone(), self.session.range)
        } else {
            match self.popular.get(self.cursor - hits.len()) {
                Some(indicator) => SeriesSelection::new(
                    indicator.id.clone(),
                    indicator.label.clone(),
                    self.session.range,
                ),
                None => return,
            }
        };

        let slot = self.active_slot;
        let id = selection.id.clone();
        self.session.select(slot, selection);
        self.set_status(format!("{} set to {id}", slot.label()));
        self.refresh();
    }

    /// Re-fetch both selected series and recompute the correlation.
    ///
    /// The one fetch-then-compute cycle everything funnels through.
    pub fn refresh(&mut self) {
        self.series1 = self.fetch_slot(Slot::First);
        self.series2 = self.fetch_slot(Slot::Second);
        self.recompute_correlation();
    }

    fn fetch_slot(&mut self, slot: Slot) -> Option<TimeSeries> {
        let selection = self.session.selection(slot)?.clone();
        match self.service.fetch(&selection.id, self.session.range) {
            Ok(series) => Some(series),
            Err(e) => {
                self.set_warning(format!("Could not fetch {}: {e}", selection.id));
                None
            }
        }
    }

    // ── Scale transitions (gated on both slots) ─────────────────────

    pub fn halve_scale(&mut self) {
        if self.session.halve_scale() {
            self.set_status(format!("Scale {}", self.session.scale));
            self.recompute_correlation();
        } else {
            self.set_warning("Select both indicators before adjusting scale");
        }
    }

    pub fn double_scale(&mut self) {
        if self.session.double_scale() {
            self.set_status(format!("Scale {}", self.session.scale));
            self.recompute_correlation();
        } else {
            self.set_warning("Select both indicators before adjusting scale");
        }
    }

    pub fn reset_scale(&mut self) {
        if self.session.reset_scale() {
            self.set_status("Scale reset to 1.00x");
            self.recompute_correlation();
        } else {
            self.set_warning("Select both indicators before adjusting scale");
        }
    }

    /// Scale changes need no re-fetch — the data is unchanged.
    fn recompute_correlation(&mut self) {
        self.correlation = match (&self.series1, &self.series2) {
            (Some(s1), Some(s2)) => {
                Some(align_and_correlate(s1, s2, self.session.scale.value()))
            }
            _ => None,
        };
    }
}

fn parse_optional_date(text: &str) -> Result<Option<NaiveDate>, String> {
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("invalid date '{text}' (expected YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fredlab_core::data::DataError;
    use fredlab_core::domain::Observation;

    /// Offline provider: canned observations, never touches the network.
    struct StubProvider;

    impl SeriesProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn search(&self, _query: &str) -> Result<Vec<SearchHit>, DataError> {
            Ok(Vec::new())
        }

        fn fetch(&self, series_id: &str, _range: DateRange) -> Result<TimeSeries, DataError> {
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            Ok(TimeSeries::new(
                series_id,
                (0..4)
                    .map(|i| {
                        Observation::new(
                            base + chrono::Duration::days(i),
                            Some(1.0 + i as f64),
                        )
                    })
                    .collect(),
            ))
        }
    }

    fn app() -> AppState {
        AppState::new(DataService::new(Box::new(StubProvider)), true)
    }

    #[test]
    fn panel_cycle_wraps() {
        assert_eq!(Panel::Search.next(), Panel::Chart);
        assert_eq!(Panel::Help.next(), Panel::Search);
        assert_eq!(Panel::Search.prev(), Panel::Help);
    }

    #[test]
    fn scale_keys_warn_until_both_slots_filled() {
        let mut app = app();
        app.halve_scale();

        assert_eq!(app.session.scale.value(), 1.0);
        assert!(matches!(app.status, Some((StatusLevel::Warning, _))));
    }

    #[test]
    fn cursor_stays_inside_pick_list() {
        let mut app = app();
        for _ in 0..50 {
            app.move_cursor_down();
        }
        assert_eq!(app.cursor, app.pick_list_len() - 1);

        for _ in 0..50 {
            app.move_cursor_up();
        }
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn selecting_popular_entries_fills_slots_and_correlates() {
        let mut app = app();

        // Cursor at 0 → "UNRATE" from the popular list into slot 1.
        app.select_cursor_item();
        assert_eq!(app.session.selection(Slot::First).unwrap().id, "UNRATE");
        assert!(app.series1.is_some());
        assert!(app.correlation.is_none());

        // Second slot → correlation appears (identical stub data → 1.0).
        app.toggle_slot();
        app.move_cursor_down();
        app.select_cursor_item();
        assert_eq!(app.session.selection(Slot::Second).unwrap().id, "GDPC1");

        let result = app.correlation.as_ref().unwrap().as_ref().unwrap();
        assert!((result.coefficient - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scale_adjustment_recomputes_without_refetch() {
        let mut app = app();
        app.select_cursor_item();
        app.toggle_slot();
        app.select_cursor_item();

        app.halve_scale();
        assert_eq!(app.session.scale.value(), 0.5);

        // Positive scaling leaves the coefficient where it was.
        let result = app.correlation.as_ref().unwrap().as_ref().unwrap();
        assert!((result.coefficient - 1.0).abs() < 1e-9);
    }

    #[test]
    fn range_overlay_rejects_inverted_dates() {
        let mut app = app();
        app.open_overlay(Overlay::RangeStart);
        app.input_buffer = "2024-06-01".into();
        app.submit_overlay();
        assert_eq!(app.overlay, Overlay::RangeEnd);

        app.input_buffer = "2024-01-01".into();
        app.submit_overlay();

        // Still in the overlay, warning shown, range unchanged.
        assert_eq!(app.overlay, Overlay::RangeEnd);
        assert!(matches!(app.status, Some((StatusLevel::Warning, _))));
    }
}
