// Dashboard controller: owns the record store, the view state, the selector
// cache and the local expansion flags. Every user action goes through
// `dispatch`, which is the only path that changes view state.
use crate::config::DashboardConfig;
use crate::error::LoadError;
use crate::loader;
use crate::selectors::{DashboardView, Selectors};
use crate::store::RecordStore;
use crate::types::{ChannelFilter, LoadReport, SortKey};
use crate::view_state::{self, next_sort, ViewIntent, ViewState};
use crate::views::ExpandedRegions;
use std::path::Path;

#[derive(Debug)]
pub struct Dashboard {
    store: RecordStore,
    view: ViewState,
    selectors: Selectors,
    expanded: ExpandedRegions,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            store: RecordStore::default(),
            view: ViewState::new(config.page_size),
            selectors: Selectors::default(),
            expanded: ExpandedRegions::default(),
        }
    }

    pub fn load_from(&mut self, path: &Path) -> Result<LoadReport, LoadError> {
        self.store.load(|| loader::load_dataset(path))
    }

    pub fn dispatch(&mut self, intent: ViewIntent) {
        let current = std::mem::take(&mut self.view);
        self.view = view_state::reduce(current, intent);
    }

    pub fn select_channel(&mut self, filter: ChannelFilter) {
        self.dispatch(ViewIntent::SetFilterChannel(filter));
    }

    /// Header click on `key`: flips direction when already active.
    pub fn click_sort(&mut self, key: SortKey) {
        let sort = next_sort(self.view.sort, key);
        self.dispatch(ViewIntent::SetSort(sort));
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.dispatch(ViewIntent::SetPage(page));
    }

    /// Previous/next respect the disabled state of the pagination control.
    pub fn next_page(&mut self) -> bool {
        let v = self.snapshot();
        if v.page >= v.total_pages {
            return false;
        }
        self.go_to_page(v.page + 1);
        true
    }

    pub fn prev_page(&mut self) -> bool {
        let page = self.view.page;
        if page <= 1 {
            return false;
        }
        self.go_to_page(page - 1);
        true
    }

    pub fn toggle_region(&mut self, region: &str) {
        self.expanded.toggle(region);
    }

    pub fn expanded(&self) -> &ExpandedRegions {
        &self.expanded
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn snapshot(&mut self) -> DashboardView {
        self.selectors.view(&self.store, &self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortDirection;
    use std::io::Write;
    use std::path::PathBuf;

    fn config(page_size: usize) -> DashboardConfig {
        DashboardConfig {
            data_path: PathBuf::from("unused.json"),
            page_size,
            export_dir: PathBuf::from("."),
            log_level: None,
        }
    }

    fn dataset() -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("should create temp file");
        let body = r#"[
            {"id":1,"channel":"A","region":"EU","spend":100,"impressions":1000,"conversions":10,"clicks":50},
            {"id":2,"channel":"B","region":"US","spend":50,"impressions":500,"conversions":5,"clicks":20},
            {"id":3,"channel":"A","region":"US","spend":30,"impressions":300,"conversions":3,"clicks":9}
        ]"#;
        f.write_all(body.as_bytes()).expect("should write dataset");
        f
    }

    #[test]
    fn end_to_end_flow() {
        let file = dataset();
        let mut app = Dashboard::new(&config(1));
        let report = app.load_from(file.path()).expect("load should succeed");
        assert_eq!(report.total_rows, 3);

        app.select_channel(ChannelFilter::parse("A"));
        app.click_sort(SortKey::Spend);
        app.click_sort(SortKey::Spend);
        let s = app.view_state().sort.expect("sort set");
        assert_eq!(s.direction, SortDirection::Desc);

        let v = app.snapshot();
        assert_eq!(v.totals.spend, 130.0);
        assert_eq!(v.paged.len(), 1);
        assert_eq!(v.paged[0].id, 1);

        assert!(app.next_page());
        assert_eq!(app.snapshot().paged[0].id, 3);
        assert!(!app.next_page());
        assert_eq!(app.view_state().page, 2);

        app.select_channel(ChannelFilter::All);
        assert_eq!(app.view_state().page, 1);
        assert!(!app.prev_page());
    }

    #[test]
    fn failed_load_keeps_dashboard_usable() {
        let mut app = Dashboard::new(&config(25));
        let dir = tempfile::tempdir().expect("should create temp dir");
        assert!(app.load_from(&dir.path().join("missing.json")).is_err());
        let v = app.snapshot();
        assert!(v.error.is_some());
        assert_eq!(v.total_rows, 0);
        assert_eq!(v.total_pages, 1);
    }

    #[test]
    fn far_page_renders_empty() {
        let file = dataset();
        let mut app = Dashboard::new(&config(2));
        app.load_from(file.path()).expect("load should succeed");
        app.go_to_page(50);
        let v = app.snapshot();
        assert!(v.paged.is_empty());
        assert!(v.regions.is_empty());
        assert_eq!(v.totals.spend, 180.0);
    }
}
