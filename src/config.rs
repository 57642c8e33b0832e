use crate::view_state::DEFAULT_PAGE_SIZE;
use clap::Parser;
use std::path::PathBuf;

/// Interactive terminal dashboard for channel performance data.
#[derive(Debug, Parser)]
#[command(name = "channel_dashboard", version)]
pub struct Cli {
    /// Dataset to load (JSON array, or CSV when the extension is .csv)
    #[arg(long, default_value = "dataset.json")]
    pub data: PathBuf,

    /// Rows per page in the contribution table
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// Directory the export command writes into
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Log filter, e.g. `debug` or `channel_dashboard=trace` (falls back to RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("page size must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub page_size: usize,
    pub export_dir: PathBuf,
    pub log_level: Option<String>,
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_path: cli.data,
            page_size: cli.page_size,
            export_dir: cli.export_dir,
            log_level: cli.log_level,
        }
    }
}
