//! Answer types returned by the matcher.
//!
//! Every request produces exactly one [`Answer`], whichever collection (if
//! any) supplied it. The serialized form is the JSON object
//! `{answer, source, title, links}` consumed by HTTP clients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which collection produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerSource {
    #[serde(rename = "Forum Discussion")]
    Forum,
    #[serde(rename = "Timetable")]
    Timetable,
    #[serde(rename = "No matches")]
    NoMatch,
}

impl AnswerSource {
    /// The wire tag for this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Forum => "Forum Discussion",
            AnswerSource::Timetable => "Timetable",
            AnswerSource::NoMatch => "No matches",
        }
    }
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hyperlink attached to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub text: String,
}

/// The uniform answer shape for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Human-readable answer text.
    pub answer: String,
    /// Collection the answer came from.
    pub source: AnswerSource,
    /// Title of the winning record, or a placeholder.
    pub title: String,
    /// Related links, possibly empty.
    pub links: Vec<Link>,
}
