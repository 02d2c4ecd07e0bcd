use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{Config, LoadPolicy};
use crate::store::load_collection;

/// Load status of one configured data source.
#[derive(Debug, Clone)]
pub struct SourceStatus {
    pub name: &'static str,
    pub path: PathBuf,
    /// `None` when the file loaded; otherwise the load error.
    pub error: Option<String>,
    pub rows: usize,
    pub columns: Vec<String>,
}

impl SourceStatus {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// What `serve` and `ask` would do with this source under `policy`.
    pub fn label(&self, policy: LoadPolicy) -> &'static str {
        match (self.is_ok(), policy) {
            (true, _) => "OK",
            (false, LoadPolicy::Empty) => "EMPTY",
            (false, LoadPolicy::Fail) => "FAIL",
        }
    }
}

pub fn get_sources(config: &Config) -> Vec<SourceStatus> {
    vec![
        source_status("forum", &config.data.forum),
        source_status("timetable", &config.data.timetable),
    ]
}

fn source_status(name: &'static str, path: &Path) -> SourceStatus {
    match load_collection(path) {
        Ok(c) => SourceStatus {
            name,
            path: path.to_path_buf(),
            error: None,
            rows: c.len(),
            columns: c.columns().to_vec(),
        },
        Err(e) => SourceStatus {
            name,
            path: path.to_path_buf(),
            error: Some(e.to_string()),
            rows: 0,
            columns: Vec::new(),
        },
    }
}

pub fn list_sources(config: &Config) -> Result<()> {
    println!("{:<12} {:<8} {:>6}  PATH", "SOURCE", "STATUS", "ROWS");
    for s in get_sources(config) {
        let status = s.label(config.data.on_missing);
        println!(
            "{:<12} {:<8} {:>6}  {}",
            s.name,
            status,
            s.rows,
            s.path.display()
        );
        match &s.error {
            Some(err) => println!("{:<12} load failed: {}", "", err),
            None => println!("{:<12} columns: {}", "", s.columns.join(", ")),
        }
    }
    Ok(())
}
