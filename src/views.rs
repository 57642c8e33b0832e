// Terminal renderings of the dashboard panels.
//
// Views only read the `DashboardView` snapshot. Region expansion is the one
// piece of local UI state and lives in `ExpandedRegions`.
use crate::output::render_table;
use crate::selectors::DashboardView;
use crate::types::{
    ChartRow, ContributionRow, MetricTotals, SortDirection, SortKey, TotalsRow,
};
use crate::util::{axis_label, format_amount, format_int};
use std::collections::HashMap;

const BAR_WIDTH: usize = 40;

/// Collapsed/expanded flag per region name. Regions default to expanded and
/// the flags survive filter, sort and page changes.
#[derive(Debug, Default, Clone)]
pub struct ExpandedRegions {
    flags: HashMap<String, bool>,
}

impl ExpandedRegions {
    pub fn is_expanded(&self, region: &str) -> bool {
        self.flags.get(region).copied().unwrap_or(true)
    }

    pub fn toggle(&mut self, region: &str) {
        let next = !self.is_expanded(region);
        self.flags.insert(region.to_string(), next);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub total_pages: usize,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

pub fn pagination(view: &DashboardView) -> Pagination {
    Pagination {
        page: view.page,
        total_pages: view.total_pages,
        prev_disabled: view.page <= 1,
        next_disabled: view.page >= view.total_pages,
    }
}

pub fn sort_indicator(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    }
}

fn metric_row(category: String, t: &MetricTotals) -> ContributionRow {
    ContributionRow {
        category,
        spend: format_amount(t.spend),
        impressions: format_int(t.impressions),
        conversions: format_int(t.conversions),
        clicks: format_int(t.clicks),
    }
}

pub fn render_totals(view: &DashboardView) -> String {
    if view.loading {
        return "Loading totals...".to_string();
    }
    render_table(vec![TotalsRow {
        spend: format_amount(view.totals.spend),
        conversions: format_int(view.totals.conversions),
        ctr: format!("{:.2}%", view.totals.ctr),
    }])
}

pub fn contribution_rows(view: &DashboardView, expanded: &ExpandedRegions) -> Vec<ContributionRow> {
    let mut rows = Vec::new();
    for group in view.regions.iter() {
        let open = expanded.is_expanded(&group.region);
        let marker = if open { "▾" } else { "▸" };
        rows.push(metric_row(format!("{} {}", marker, group.region), &group.totals));
        if open {
            for ch in &group.channels {
                rows.push(metric_row(format!("  └ {}", ch.channel), &ch.totals));
            }
        }
    }
    if !rows.is_empty() {
        rows.push(metric_row("Total".to_string(), &view.page_totals));
    }
    rows
}

pub fn render_contribution(view: &DashboardView, expanded: &ExpandedRegions) -> String {
    let mut out = String::from("Contribution\n");
    out.push_str(&format!("Channel: {}\n", view.filter_channel));
    if let Some(sort) = view.sort {
        out.push_str(&format!("Sorted by: {} {}\n", sort.key.label(), sort_indicator(sort.direction)));
    }
    out.push('\n');
    if view.loading {
        out.push_str("Loading rows...\n");
    } else if view.regions.is_empty() {
        out.push_str("No data available\n");
    } else {
        out.push_str(&render_table(contribution_rows(view, expanded)));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&render_pagination(view));
    out
}

pub fn render_pagination(view: &DashboardView) -> String {
    let p = pagination(view);
    let prev = if p.prev_disabled { "( Previous )" } else { "[ Previous ]" };
    let next = if p.next_disabled { "( Next )" } else { "[ Next ]" };
    format!("{}  Page {} of {}  {}\n", prev, p.page, p.total_pages, next)
}

fn bar(value: f64, max: f64, glyph: char) -> String {
    let len = if max <= 0.0 {
        0
    } else {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    };
    std::iter::repeat(glyph).take(len.min(BAR_WIDTH)).collect()
}

pub fn render_chart(view: &DashboardView) -> String {
    let mut out = String::from("Performance Insights\n\n");
    if view.chart.is_empty() {
        out.push_str("No data to display\n");
        return out;
    }
    let max = view
        .chart
        .iter()
        .map(|p| p.spend.max(p.conversions as f64))
        .fold(0.0_f64, f64::max);
    let label_width = view.chart.iter().map(|p| p.channel.chars().count()).max().unwrap_or(0);

    for p in view.chart.iter() {
        out.push_str(&format!("{:>w$} █ {}\n", p.channel, bar(p.spend, max, '█'), w = label_width));
        out.push_str(&format!(
            "{:>w$} ▒ {}\n",
            "",
            bar(p.conversions as f64, max, '▒'),
            w = label_width
        ));
    }

    let ticks: Vec<String> = (0..=4).map(|i| axis_label(max * i as f64 / 4.0)).collect();
    out.push_str(&format!("{:>w$}   {}\n", "", ticks.join(" | "), w = label_width));
    out.push_str("█ Spend  ▒ Conversions\n\n");

    let rows: Vec<ChartRow> = view
        .chart
        .iter()
        .map(|p| ChartRow {
            channel: p.channel.clone(),
            spend: format_amount(p.spend),
            conversions: format_amount(p.conversions as f64),
        })
        .collect();
    out.push_str(&render_table(rows));
    out.push('\n');
    out
}

pub fn render_filter_options(view: &DashboardView) -> String {
    let mut out = String::from("[0] all (All channels)\n");
    for (i, ch) in view.channel_options.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", i + 1, ch));
    }
    out
}

pub fn render_sort_options(view: &DashboardView) -> String {
    let mut out = String::new();
    for (i, key) in SortKey::ALL.iter().enumerate() {
        let active = match view.sort {
            Some(s) if s.key == *key => format!(" {}", sort_indicator(s.direction)),
            _ => String::new(),
        };
        out.push_str(&format!("[{}] {}{}\n", i + 1, key.label(), active));
    }
    out
}

/// Full screen: error banner, totals, chart, contribution table.
pub fn render_dashboard(view: &DashboardView, expanded: &ExpandedRegions) -> String {
    let mut out = String::from("Marketing Dashboard\n\n");
    if let Some(err) = &view.error {
        out.push_str(&format!("Error: {}\n\n", err));
    }
    out.push_str(&render_totals(view));
    out.push_str("\n\n");
    out.push_str(&render_chart(view));
    out.push('\n');
    out.push_str(&render_contribution(view, expanded));
    out
}
