use crate::selectors::DashboardView;
use crate::types::ViewSummary;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

pub const PAGE_EXPORT_FILE: &str = "dashboard_page.csv";
pub const SUMMARY_EXPORT_FILE: &str = "dashboard_summary.json";

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Markdown-style table, or `(no rows)` when there is nothing to show.
pub fn render_table<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows).with(Style::markdown()).to_string()
}

pub fn summary(view: &DashboardView) -> ViewSummary {
    ViewSummary {
        filter_channel: view.filter_channel.clone(),
        sort: view.sort,
        page: view.page,
        page_size: view.page_size,
        total_rows: view.total_rows,
        total_pages: view.total_pages,
        totals: view.totals,
        chart: view.chart.to_vec(),
    }
}

/// Write the current page as CSV and the view summary as JSON into `dir`.
pub fn export_view(dir: &Path, view: &DashboardView) -> Result<(PathBuf, PathBuf), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    let page_path = dir.join(PAGE_EXPORT_FILE);
    let summary_path = dir.join(SUMMARY_EXPORT_FILE);
    write_csv(&page_path, view.paged.as_slice())?;
    write_json(&summary_path, &summary(view))?;
    info!(page = %page_path.display(), summary = %summary_path.display(), "view exported");
    Ok((page_path, summary_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Selectors;
    use crate::store::{LoadEvent, RecordStore};
    use crate::types::ChannelRecord;
    use crate::view_state::ViewState;

    fn sample_view() -> DashboardView {
        let mut store = RecordStore::default();
        store.apply(LoadEvent::Success(vec![
            ChannelRecord {
                id: 1,
                channel: "Search".into(),
                region: "EU".into(),
                spend: 1200.5,
                impressions: 1000,
                conversions: 50,
                clicks: 80,
            },
            ChannelRecord {
                id: 2,
                channel: "Social".into(),
                region: "US".into(),
                spend: 300.0,
                impressions: 0,
                conversions: 0,
                clicks: 4,
            },
        ]));
        Selectors::default().view(&store, &ViewState::default())
    }

    #[test]
    fn export_writes_page_and_summary() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let (page, summary) = export_view(dir.path(), &sample_view()).expect("export should succeed");

        let csv_text = std::fs::read_to_string(page).expect("page csv");
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next(),
            Some("id,channel,region,spend,impressions,conversions,clicks")
        );
        assert_eq!(lines.count(), 2);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(summary).expect("summary json"))
                .expect("summary should be valid json");
        assert_eq!(json["filter_channel"], "all");
        assert_eq!(json["sort"]["key"], "channel");
        assert_eq!(json["sort"]["direction"], "asc");
        assert_eq!(json["total_rows"], 2);
        assert_eq!(json["chart"][0]["channel"], "Search");
    }

    #[test]
    fn empty_table_placeholder() {
        let rows: Vec<crate::types::ChartRow> = Vec::new();
        assert_eq!(render_table(rows), "(no rows)");
    }
}
