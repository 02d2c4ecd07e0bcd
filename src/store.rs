//! Startup loading of the forum and timetable CSV files.
//!
//! Loading happens once, before any question is answered. A source that is
//! missing or malformed is handled according to [`LoadPolicy`]: by default it
//! becomes an empty collection (the service stays up and simply never
//! answers from that source); with `on_missing = "fail"` startup aborts.

use anyhow::Result;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use tds_assistant_core::dataset::{Collection, DatasetStore, LoadError};

use crate::config::{DataConfig, LoadPolicy};

/// Parses one CSV file into a [`Collection`].
pub fn load_collection(path: &Path) -> Result<Collection, LoadError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            LoadError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    Collection::from_csv_reader(&path.display().to_string(), file)
}

/// Columns the answer projections read from each collection.
pub const FORUM_COLUMNS: &[&str] = &["title", "excerpt", "slug"];
pub const TIMETABLE_COLUMNS: &[&str] = &["title", "instructor", "slot", "venue"];

/// Loads both collections, applying the configured load policy.
pub fn open_store(data: &DataConfig) -> Result<DatasetStore> {
    let forum = load_with_policy("forum", &data.forum, data.on_missing, FORUM_COLUMNS)?;
    let timetable = load_with_policy(
        "timetable",
        &data.timetable,
        data.on_missing,
        TIMETABLE_COLUMNS,
    )?;
    Ok(DatasetStore::new(forum, timetable))
}

/// Expected columns absent from `collection`.
pub fn missing_columns(collection: &Collection, expected: &[&'static str]) -> Vec<&'static str> {
    expected
        .iter()
        .copied()
        .filter(|c| !collection.has_column(c))
        .collect()
}

fn load_with_policy(
    name: &str,
    path: &Path,
    policy: LoadPolicy,
    expected: &[&'static str],
) -> Result<Collection> {
    match load_collection(path) {
        Ok(collection) => {
            let missing = missing_columns(&collection, expected);
            if !missing.is_empty() {
                // Answers from this source will use placeholders for these
                warn!(source = name, missing = ?missing, "collection lacks expected columns");
            }
            info!(
                source = name,
                path = %path.display(),
                rows = collection.len(),
                columns = collection.columns().len(),
                "loaded collection"
            );
            Ok(collection)
        }
        Err(e) => match policy {
            LoadPolicy::Empty => {
                warn!(source = name, error = %e, "load failed, serving empty collection");
                Ok(Collection::empty())
            }
            LoadPolicy::Fail => {
                Err(anyhow::Error::new(e).context(format!("Failed to load {} data", name)))
            }
        },
    }
}
