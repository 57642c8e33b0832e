use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// One advertising-channel performance row as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: i64,
    pub channel: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region: String,
    pub spend: f64,
    pub impressions: u64,
    pub conversions: u64,
    pub clicks: u64,
}

// `"region": null` and an empty CSV cell both read as a missing region.
fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Channel,
    Region,
    Spend,
    Impressions,
    Conversions,
    Clicks,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Channel,
        SortKey::Region,
        SortKey::Spend,
        SortKey::Impressions,
        SortKey::Conversions,
        SortKey::Clicks,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Channel => "Channel",
            SortKey::Region => "Region",
            SortKey::Spend => "Spend",
            SortKey::Impressions => "Impressions",
            SortKey::Conversions => "Conversions",
            SortKey::Clicks => "Clicks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Channel filter selected in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelFilter {
    All,
    Channel(String),
}

impl Serialize for ChannelFilter {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl ChannelFilter {
    /// `"all"` selects every channel; anything else is an exact channel name.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            ChannelFilter::All
        } else {
            ChannelFilter::Channel(value.to_string())
        }
    }
}

impl fmt::Display for ChannelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelFilter::All => f.write_str("all"),
            ChannelFilter::Channel(c) => f.write_str(c),
        }
    }
}

/// Aggregate totals over the filtered set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub spend: f64,
    pub impressions: u64,
    pub conversions: u64,
    pub ctr: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricTotals {
    pub spend: f64,
    pub impressions: u64,
    pub conversions: u64,
    pub clicks: u64,
}

impl MetricTotals {
    pub fn add(&mut self, r: &ChannelRecord) {
        self.spend += r.spend;
        self.impressions += r.impressions;
        self.conversions += r.conversions;
        self.clicks += r.clicks;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelGroup {
    pub channel: String,
    pub totals: MetricTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionGroup {
    pub region: String,
    pub totals: MetricTotals,
    pub channels: Vec<ChannelGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub channel: String,
    pub spend: f64,
    pub conversions: u64,
}

/// Dataset load status. `Idle` covers both "never loaded" and "done".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub channels: usize,
    pub loaded_at: DateTime<Local>,
}

/// One line of the contribution table as printed to the terminal.
#[derive(Debug, Tabled, Clone)]
pub struct ContributionRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Spend")]
    pub spend: String,
    #[tabled(rename = "Impressions")]
    pub impressions: String,
    #[tabled(rename = "Conversions")]
    pub conversions: String,
    #[tabled(rename = "Clicks")]
    pub clicks: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct TotalsRow {
    #[tabled(rename = "Total Spend")]
    pub spend: String,
    #[tabled(rename = "Conversions")]
    pub conversions: String,
    #[tabled(rename = "CTR")]
    pub ctr: String,
}

/// Value labels shown under the performance chart.
#[derive(Debug, Tabled, Clone)]
pub struct ChartRow {
    #[tabled(rename = "Channel")]
    pub channel: String,
    #[tabled(rename = "Spend")]
    pub spend: String,
    #[tabled(rename = "Conversions")]
    pub conversions: String,
}

/// JSON summary written by the export command.
#[derive(Debug, Serialize)]
pub struct ViewSummary {
    pub filter_channel: ChannelFilter,
    pub sort: Option<SortState>,
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    pub totals: Totals,
    pub chart: Vec<ChartPoint>,
}
