//! # TDS Assistant Core
//!
//! Data model and matching algorithm for TDS Assistant: a read-only store of
//! two CSV collections (forum posts and a course timetable) and the
//! forum-then-timetable fallback matcher that turns a question into a single
//! [`models::Answer`].
//!
//! This crate does no filesystem, network, or async work. The application
//! crate decides where the CSV bytes come from and what to do when a source
//! fails to load.
//!
//! ```
//! use tds_assistant_core::dataset::{Collection, DatasetStore};
//! use tds_assistant_core::matcher::FallbackMatcher;
//!
//! let forum = Collection::from_csv_reader(
//!     "forum.csv",
//!     "title,excerpt,slug\nMidterm FAQ,Covers chapters 1-5,t/123\n".as_bytes(),
//! )
//! .unwrap();
//! let store = DatasetStore::new(forum, Collection::empty());
//!
//! let answer = FallbackMatcher::new(&store).answer("midterm");
//! assert_eq!(answer.answer, "Covers chapters 1-5");
//! ```

pub mod dataset;
pub mod matcher;
pub mod models;
