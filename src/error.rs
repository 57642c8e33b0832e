use std::io;
use thiserror::Error;

/// The dataset could not be read or parsed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse dataset {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse dataset {path} (row {row}): {source}")]
    Csv {
        path: String,
        row: usize,
        #[source]
        source: csv::Error,
    },
}
