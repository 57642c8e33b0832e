use crate::error::LoadError;
use crate::types::ChannelRecord;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Read the whole dataset in one batch.
///
/// JSON arrays are the primary format; a `.csv` extension switches to the
/// CSV reader with the same column names. Either the full set parses or
/// the load fails, nothing partial is returned.
pub fn load_dataset(path: &Path) -> Result<Vec<ChannelRecord>, LoadError> {
    let shown = path.display().to_string();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: shown.clone(),
        source,
    })?;

    let records = if is_csv {
        load_csv(file, &shown)?
    } else {
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
            path: shown.clone(),
            source,
        })?
    };
    debug!(path = %shown, rows = records.len(), csv = is_csv, "dataset parsed");
    Ok(records)
}

fn load_csv(file: File, path: &str) -> Result<Vec<ChannelRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<ChannelRecord>().enumerate() {
        let row = result.map_err(|source| LoadError::Csv {
            path: path.to_string(),
            row: idx + 1,
            source,
        })?;
        out.push(row);
    }
    Ok(out)
}
