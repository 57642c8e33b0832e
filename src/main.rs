// Entry point and interactive menu loop.
//
// - Option [1] loads (or reloads) the dataset.
// - Options [2]-[7] change the filter, sort, page and region expansion.
// - Option [8] exports the current page and a JSON summary.
// The dashboard is redrawn after every action.
mod app;
mod config;
mod error;
mod loader;
mod memo;
mod output;
mod pipeline;
mod selectors;
mod store;
mod types;
mod util;
mod view_state;
mod views;

use app::Dashboard;
use clap::Parser;
use config::{Cli, DashboardConfig};
use std::io::{self, Write};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use types::{ChannelFilter, SortKey};

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(l) => EnvFilter::new(l),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read a single line of input after printing `prompt`.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn handle_load(app: &mut Dashboard, config: &DashboardConfig) {
    match app.load_from(&config.data_path) {
        Ok(report) => {
            println!(
                "Loaded {} rows across {} channels at {}.\n",
                util::format_int(report.total_rows),
                util::format_int(report.channels),
                report.loaded_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
        Err(e) => {
            // The store keeps the message; the dashboard shows it inline.
            error!(error = %e, "load failed");
        }
    }
}

fn handle_filter(app: &mut Dashboard) {
    let view = app.snapshot();
    print!("{}", views::render_filter_options(&view));
    let Some(choice) = read_line("Select channel: ") else { return };
    let filter = match choice.parse::<usize>() {
        Ok(0) => ChannelFilter::All,
        Ok(n) => match view.channel_options.get(n - 1) {
            Some(ch) => ChannelFilter::Channel(ch.clone()),
            None => {
                println!("Invalid choice.\n");
                return;
            }
        },
        Err(_) => ChannelFilter::parse(&choice),
    };
    app.select_channel(filter);
}

fn handle_sort(app: &mut Dashboard) {
    let view = app.snapshot();
    print!("{}", views::render_sort_options(&view));
    let Some(choice) = read_line("Sort by: ") else { return };
    match choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| SortKey::ALL.get(i)) {
        Some(key) => app.click_sort(*key),
        None => println!("Invalid choice.\n"),
    }
}

fn handle_go_to_page(app: &mut Dashboard) {
    let current = app.view_state().page;
    let Some(choice) = read_line(&format!("Page (currently {}): ", current)) else { return };
    match choice.parse::<usize>() {
        Ok(n) => app.go_to_page(n),
        Err(_) => println!("Invalid page number.\n"),
    }
}

fn handle_toggle_region(app: &mut Dashboard) {
    let view = app.snapshot();
    for (i, g) in view.regions.iter().enumerate() {
        let state = if app.expanded().is_expanded(&g.region) { "expanded" } else { "collapsed" };
        println!("[{}] {} ({})", i + 1, g.region, state);
    }
    let Some(choice) = read_line("Toggle region: ") else { return };
    match choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| view.regions.get(i)) {
        Some(g) => app.toggle_region(&g.region),
        None => println!("Invalid choice.\n"),
    }
}

fn handle_export(app: &mut Dashboard, config: &DashboardConfig) {
    let view = app.snapshot();
    match output::export_view(&config.export_dir, &view) {
        Ok((page, summary)) => {
            println!("Exported {} and {}.\n", page.display(), summary.display());
        }
        Err(e) => eprintln!("Write error: {}\n", e),
    }
}

fn main() {
    let config = DashboardConfig::from(Cli::parse());
    init_logging(config.log_level.as_deref());
    debug!(?config, "starting");

    let mut app = Dashboard::new(&config);
    handle_load(&mut app, &config);

    loop {
        let view = app.snapshot();
        println!("{}", views::render_dashboard(&view, app.expanded()));
        println!("[1] Reload dataset   [2] Filter channel   [3] Sort");
        println!("[4] Previous page    [5] Next page        [6] Go to page");
        println!("[7] Toggle region    [8] Export view      [0] Exit\n");
        let Some(choice) = read_line("Enter choice: ") else { break };
        match choice.as_str() {
            "1" => handle_load(&mut app, &config),
            "2" => handle_filter(&mut app),
            "3" => handle_sort(&mut app),
            "4" => {
                if !app.prev_page() {
                    println!("Already on the first page.\n");
                }
            }
            "5" => {
                if !app.next_page() {
                    println!("Already on the last page.\n");
                }
            }
            "6" => handle_go_to_page(&mut app),
            "7" => handle_toggle_region(&mut app),
            "8" => handle_export(&mut app, &config),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 0-8.\n"),
        }
    }
}
