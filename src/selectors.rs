// Memoized selector chain over the record store and view state.
//
// Each stage is keyed on exactly the inputs it reads, so paging does not
// re-filter and re-sorting does not touch totals or the chart.
use crate::memo::Memo;
use crate::pipeline;
use crate::store::RecordStore;
use crate::types::{
    ChannelFilter, ChannelRecord, ChartPoint, MetricTotals, RegionGroup, SortState, Totals,
};
use crate::view_state::ViewState;
use std::rc::Rc;

type FilterKey = (u64, ChannelFilter);
type SortedKey = (FilterKey, Option<SortState>);
type PageKey = (SortedKey, usize, usize);

/// Everything the presentation layer is allowed to read for one render pass.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub loading: bool,
    pub error: Option<String>,
    pub filter_channel: ChannelFilter,
    pub sort: Option<SortState>,
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    pub paged: Rc<Vec<ChannelRecord>>,
    pub totals: Totals,
    pub page_totals: MetricTotals,
    pub regions: Rc<Vec<RegionGroup>>,
    pub channel_options: Rc<Vec<String>>,
    pub chart: Rc<Vec<ChartPoint>>,
}

#[derive(Debug)]
pub struct Selectors {
    filtered: Memo<FilterKey, Vec<ChannelRecord>>,
    sorted: Memo<SortedKey, Vec<ChannelRecord>>,
    paged: Memo<PageKey, Vec<ChannelRecord>>,
    totals: Memo<FilterKey, Totals>,
    page_totals: Memo<PageKey, MetricTotals>,
    regions: Memo<PageKey, Vec<RegionGroup>>,
    channel_options: Memo<u64, Vec<String>>,
    chart: Memo<FilterKey, Vec<ChartPoint>>,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            filtered: Memo::new("filtered"),
            sorted: Memo::new("sorted"),
            paged: Memo::new("paged"),
            totals: Memo::new("totals"),
            page_totals: Memo::new("page_totals"),
            regions: Memo::new("regions"),
            channel_options: Memo::new("channel_options"),
            chart: Memo::new("chart"),
        }
    }
}

impl Selectors {
    pub fn filtered(&mut self, store: &RecordStore, view: &ViewState) -> Rc<Vec<ChannelRecord>> {
        let key = (store.revision, view.filter_channel.clone());
        self.filtered
            .get_or_compute(key, || pipeline::filtered(&store.data, &view.filter_channel))
    }

    pub fn sorted(&mut self, store: &RecordStore, view: &ViewState) -> Rc<Vec<ChannelRecord>> {
        let rows = self.filtered(store, view);
        let key = ((store.revision, view.filter_channel.clone()), view.sort);
        self.sorted
            .get_or_compute(key, || pipeline::sorted(&rows, view.sort))
    }

    fn page_key(store: &RecordStore, view: &ViewState) -> PageKey {
        (
            ((store.revision, view.filter_channel.clone()), view.sort),
            view.page,
            view.page_size,
        )
    }

    pub fn paged(&mut self, store: &RecordStore, view: &ViewState) -> Rc<Vec<ChannelRecord>> {
        let rows = self.sorted(store, view);
        self.paged.get_or_compute(Self::page_key(store, view), || {
            pipeline::paged(&rows, view.page, view.page_size)
        })
    }

    pub fn totals(&mut self, store: &RecordStore, view: &ViewState) -> Totals {
        let rows = self.filtered(store, view);
        let key = (store.revision, view.filter_channel.clone());
        *self.totals.get_or_compute(key, || pipeline::totals(&rows))
    }

    pub fn page_totals(&mut self, store: &RecordStore, view: &ViewState) -> MetricTotals {
        let rows = self.paged(store, view);
        *self
            .page_totals
            .get_or_compute(Self::page_key(store, view), || pipeline::page_totals(&rows))
    }

    pub fn regions(&mut self, store: &RecordStore, view: &ViewState) -> Rc<Vec<RegionGroup>> {
        let rows = self.paged(store, view);
        self.regions
            .get_or_compute(Self::page_key(store, view), || pipeline::region_groups(&rows))
    }

    pub fn channel_options(&mut self, store: &RecordStore) -> Rc<Vec<String>> {
        self.channel_options
            .get_or_compute(store.revision, || pipeline::channel_options(&store.data))
    }

    pub fn chart(&mut self, store: &RecordStore, view: &ViewState) -> Rc<Vec<ChartPoint>> {
        let rows = self.filtered(store, view);
        let key = (store.revision, view.filter_channel.clone());
        self.chart
            .get_or_compute(key, || pipeline::chart_series(&rows))
    }

    /// Pull every derived value for one render pass from a consistent snapshot.
    pub fn view(&mut self, store: &RecordStore, view: &ViewState) -> DashboardView {
        let total_rows = self.sorted(store, view).len();
        DashboardView {
            loading: store.is_loading(),
            error: store.error.clone(),
            filter_channel: view.filter_channel.clone(),
            sort: view.sort,
            page: view.page,
            page_size: view.page_size,
            total_rows,
            total_pages: pipeline::total_pages(total_rows, view.page_size),
            paged: self.paged(store, view),
            totals: self.totals(store, view),
            page_totals: self.page_totals(store, view),
            regions: self.regions(store, view),
            channel_options: self.channel_options(store),
            chart: self.chart(store, view),
        }
    }

    #[cfg(test)]
    fn misses(&self) -> [u64; 5] {
        [
            self.filtered.misses(),
            self.sorted.misses(),
            self.paged.misses(),
            self.totals.misses(),
            self.chart.misses(),
        ]
    }
}
