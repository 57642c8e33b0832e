// Record store: the raw dataset plus its load status.
//
// Loading is modeled as a Start -> Success | Failure event pair applied
// through `reduce`, so a second load that resolves later simply overwrites
// whatever the first one stored.
use crate::error::LoadError;
use crate::types::{ChannelRecord, LoadReport, LoadStatus};
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub enum LoadEvent {
    Start,
    Success(Vec<ChannelRecord>),
    Failure(String),
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    pub data: Rc<Vec<ChannelRecord>>,
    pub status: LoadStatus,
    pub error: Option<String>,
    /// Bumped on every successful load; derived views key their caches on it.
    pub revision: u64,
    pub loaded_at: Option<DateTime<Local>>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            data: Rc::new(Vec::new()),
            status: LoadStatus::Idle,
            error: None,
            revision: 0,
            loaded_at: None,
        }
    }
}

impl RecordStore {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Run one full load cycle through `loader`.
    ///
    /// On failure the previous data stays in place and the error message is
    /// kept for display.
    pub fn load<F>(&mut self, loader: F) -> Result<LoadReport, LoadError>
    where
        F: FnOnce() -> Result<Vec<ChannelRecord>, LoadError>,
    {
        self.apply(LoadEvent::Start);
        match loader() {
            Ok(records) => {
                let channels: HashSet<&str> = records.iter().map(|r| r.channel.as_str()).collect();
                let channels = channels.len();
                let total_rows = records.len();
                self.apply(LoadEvent::Success(records));
                Ok(LoadReport {
                    total_rows,
                    channels,
                    loaded_at: self.loaded_at.unwrap_or_else(Local::now),
                })
            }
            Err(e) => {
                self.apply(LoadEvent::Failure(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn apply(&mut self, event: LoadEvent) {
        let current = std::mem::take(self);
        *self = reduce(current, event);
    }
}

pub fn reduce(mut store: RecordStore, event: LoadEvent) -> RecordStore {
    match event {
        LoadEvent::Start => {
            store.status = LoadStatus::Loading;
            store.error = None;
        }
        LoadEvent::Success(records) => {
            info!(rows = records.len(), "dataset loaded");
            store.status = LoadStatus::Idle;
            store.data = Rc::new(records);
            store.revision += 1;
            store.loaded_at = Some(Local::now());
        }
        LoadEvent::Failure(message) => {
            warn!(%message, "dataset load failed");
            store.status = LoadStatus::Idle;
            store.error = Some(message);
        }
    }
    store
}
