// Derivation pipeline: pure functions from the raw records and view state
// to what the dashboard renders.
//
// filtered -> sorted -> paged, with totals and the chart series taken over
// the filtered set and region grouping taken over the current page only.
use crate::types::{
    ChannelFilter, ChannelGroup, ChannelRecord, ChartPoint, MetricTotals, RegionGroup, SortDirection,
    SortKey, SortState, Totals,
};
use crate::util::locale_cmp;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

pub const CHART_TOP_N: usize = 10;
pub const UNKNOWN_REGION: &str = "Unknown";

pub fn filtered(records: &[ChannelRecord], filter: &ChannelFilter) -> Vec<ChannelRecord> {
    match filter {
        ChannelFilter::All => records.to_vec(),
        ChannelFilter::Channel(c) => records.iter().filter(|r| &r.channel == c).cloned().collect(),
    }
}

fn compare_by(a: &ChannelRecord, b: &ChannelRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Channel => locale_cmp(&a.channel, &b.channel),
        SortKey::Region => locale_cmp(&a.region, &b.region),
        SortKey::Spend => a.spend.total_cmp(&b.spend),
        SortKey::Impressions => a.impressions.cmp(&b.impressions),
        SortKey::Conversions => a.conversions.cmp(&b.conversions),
        SortKey::Clicks => a.clicks.cmp(&b.clicks),
    }
}

/// Stable sort; ties keep their filtered order in both directions.
pub fn sorted(rows: &[ChannelRecord], sort: Option<SortState>) -> Vec<ChannelRecord> {
    let mut out = rows.to_vec();
    if let Some(SortState { key, direction }) = sort {
        out.sort_by(|a, b| {
            let ord = compare_by(a, b, key);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }
    out
}

/// Rows `[(page-1)*page_size, page*page_size)`; empty when out of range.
pub fn paged(rows: &[ChannelRecord], page: usize, page_size: usize) -> Vec<ChannelRecord> {
    let Some(start) = page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) else {
        return Vec::new();
    };
    if start >= rows.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(rows.len());
    rows[start..end].to_vec()
}

pub fn ctr(conversions: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        0.0
    } else {
        conversions as f64 / impressions as f64 * 100.0
    }
}

pub fn totals(filtered: &[ChannelRecord]) -> Totals {
    let mut t = Totals::default();
    for r in filtered {
        t.spend += r.spend;
        t.impressions += r.impressions;
        t.conversions += r.conversions;
    }
    t.ctr = ctr(t.conversions, t.impressions);
    t
}

/// Sum of every metric across the rows on one page.
pub fn page_totals(paged: &[ChannelRecord]) -> MetricTotals {
    let mut t = MetricTotals::default();
    for r in paged {
        t.add(r);
    }
    t
}

pub fn region_key(region: &str) -> &str {
    if region.is_empty() {
        UNKNOWN_REGION
    } else {
        region
    }
}

/// Group the page by region, then by channel inside each region.
/// Both levels keep first-seen order.
pub fn region_groups(paged: &[ChannelRecord]) -> Vec<RegionGroup> {
    let mut groups: Vec<RegionGroup> = Vec::new();
    let mut region_idx: HashMap<&str, usize> = HashMap::new();
    let mut channel_idx: Vec<HashMap<&str, usize>> = Vec::new();

    for r in paged {
        let region = region_key(&r.region);
        let gi = *region_idx.entry(region).or_insert_with(|| {
            groups.push(RegionGroup {
                region: region.to_string(),
                totals: MetricTotals::default(),
                channels: Vec::new(),
            });
            channel_idx.push(HashMap::new());
            groups.len() - 1
        });
        let group = &mut groups[gi];
        group.totals.add(r);

        let ci = *channel_idx[gi].entry(r.channel.as_str()).or_insert_with(|| {
            group.channels.push(ChannelGroup {
                channel: r.channel.clone(),
                totals: MetricTotals::default(),
            });
            group.channels.len() - 1
        });
        group.channels[ci].totals.add(r);
    }
    groups
}

/// Distinct channels across the whole dataset, ascending.
pub fn channel_options(records: &[ChannelRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = records.iter().map(|r| r.channel.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Per-channel spend/conversions over the filtered set, top spenders first.
pub fn chart_series(filtered: &[ChannelRecord]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = Vec::new();
    let mut idx: HashMap<&str, usize> = HashMap::new();
    for r in filtered {
        let i = *idx.entry(r.channel.as_str()).or_insert_with(|| {
            points.push(ChartPoint {
                channel: r.channel.clone(),
                spend: 0.0,
                conversions: 0,
            });
            points.len() - 1
        });
        points[i].spend += r.spend;
        points[i].conversions += r.conversions;
    }
    points.sort_by(|a, b| b.spend.total_cmp(&a.spend));
    points.truncate(CHART_TOP_N);
    points
}

pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_rows.div_ceil(page_size).max(1)
}
