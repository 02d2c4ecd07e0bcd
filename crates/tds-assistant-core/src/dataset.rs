//! Read-only tabular collections and the two-collection dataset store.
//!
//! A [`Collection`] is parsed once from CSV text and never mutated. The column
//! set is fixed by the header row and every row carries exactly one cell per
//! column. Empty cells are stored as `None` (null), and so are trailing
//! cells a short row leaves out. A row wider than the header is an error.
//!
//! This module performs no filesystem access itself; callers hand it any
//! [`std::io::Read`] and decide what to do when loading fails.

use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an external source into a [`Collection`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source does not exist.
    #[error("data source not found: {}", path.display())]
    Missing { path: PathBuf },

    /// The source exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV body could not be parsed (bad quoting, invalid UTF-8).
    #[error("malformed CSV in {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: csv::Error,
    },

    /// The source has no header row.
    #[error("{origin} has no header row")]
    NoHeader { origin: String },

    /// A row has more fields than the header.
    #[error("row {row} of {origin} has {found} fields, header has {expected}")]
    RaggedRow {
        origin: String,
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// An ordered, fixed-schema sequence of records from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Collection {
    /// A collection with no columns and no rows.
    ///
    /// Stands in for a source that failed to load; it never matches anything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses CSV with a header row.
    ///
    /// `origin` names the source in error messages (usually the file path).
    pub fn from_csv_reader<R: Read>(origin: &str, reader: R) -> Result<Self, LoadError> {
        let malformed = |source: csv::Error| LoadError::Malformed {
            origin: origin.to_string(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr
            .headers()
            .map_err(malformed)?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        if columns.is_empty() {
            return Err(LoadError::NoHeader {
                origin: origin.to_string(),
            });
        }

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record.map_err(malformed)?;
            if record.len() > columns.len() {
                return Err(LoadError::RaggedRow {
                    origin: origin.to_string(),
                    row: i,
                    found: record.len(),
                    expected: columns.len(),
                });
            }

            let mut cells: Vec<Option<String>> = record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            cells.resize(columns.len(), None);
            rows.push(cells);
        }

        Ok(Self { columns, rows })
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in source order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().enumerate().map(move |(index, cells)| Row {
            index,
            columns: &self.columns,
            cells,
        })
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            index,
            columns: &self.columns,
            cells,
        })
    }
}

/// A borrowed view of one record.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    index: usize,
    columns: &'a [String],
    cells: &'a [Option<String>],
}

impl<'a> Row<'a> {
    /// Zero-based position in the source.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of the named column, `None` if the column is absent or the
    /// cell is null.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let cells: &'a [Option<String>] = self.cells;
        let pos = self.columns.iter().position(|c| c == column)?;
        cells[pos].as_deref()
    }

    /// All `(column, value)` pairs in header order.
    pub fn values(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + 'a {
        let columns: &'a [String] = self.columns;
        let cells: &'a [Option<String>] = self.cells;
        columns
            .iter()
            .zip(cells.iter())
            .map(|(c, v)| (c.as_str(), v.as_deref()))
    }
}

/// The forum and timetable collections, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    forum: Collection,
    timetable: Collection,
}

impl DatasetStore {
    pub fn new(forum: Collection, timetable: Collection) -> Self {
        Self { forum, timetable }
    }

    pub fn forum(&self) -> &Collection {
        &self.forum
    }

    pub fn timetable(&self) -> &Collection {
        &self.timetable
    }
}
