//! # TDS Assistant
//!
//! Answers course questions from two CSV datasets: a forum archive and a
//! course timetable. The forum is searched first (`title` and `excerpt`
//! only); the timetable is the fallback (every column). The first matching
//! row becomes the answer; otherwise a fixed "no matches" answer is returned.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌────────────────┐
//! │  CSV files   │──▶│   DatasetStore   │──▶│ FallbackMatcher│
//! │ forum / tt   │   │ (load once, r/o) │   │ forum → tt     │
//! └──────────────┘   └──────────────────┘   └───────┬────────┘
//!                                                   │
//!                              ┌────────────────────┤
//!                              ▼                    ▼
//!                         ┌──────────┐        ┌──────────┐
//!                         │   CLI    │        │   HTTP   │
//!                         │  (tds)   │        │ /api/    │
//!                         └──────────┘        └──────────┘
//! ```
//!
//! The matching algorithm and data model live in the `tds-assistant-core`
//! crate; this crate adds configuration, file loading, the CLI, and the
//! HTTP server.
//!
//! ## Quick Start
//!
//! ```bash
//! tds sources                       # check both CSV files load
//! tds ask "when is the midterm?"    # answer one question
//! tds serve                         # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`store`] | CSV loading and the missing-source policy |
//! | [`ask`] | The `handle` entry point and the `ask` command |
//! | [`sources`] | Data source status report |
//! | [`server`] | HTTP server |

pub mod ask;
pub mod config;
pub mod server;
pub mod sources;
pub mod store;
