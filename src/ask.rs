//! Question answering entry point.
//!
//! [`handle`] is the one operation the outer layers call: the `tds ask`
//! command and `POST /api/` both go through it.

use anyhow::Result;
use tracing::debug;

use tds_assistant_core::dataset::DatasetStore;
use tds_assistant_core::matcher::FallbackMatcher;
use tds_assistant_core::models::Answer;

use crate::config::Config;
use crate::store::open_store;

/// Answers one question against the loaded datasets.
pub fn handle(store: &DatasetStore, question: &str) -> Answer {
    let matched = FallbackMatcher::new(store).resolve(question);
    debug!(
        source = %matched.source(),
        row = ?matched.row_index(),
        "answered question"
    );
    matched.into_answer()
}

/// `tds ask`: load the datasets, answer once, print.
pub fn run_ask(config: &Config, question: &str, json: bool) -> Result<()> {
    let store = open_store(&config.data)?;
    let answer = handle(&store, question);

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        print!("{}", format_answer(&answer));
    }

    Ok(())
}

fn format_answer(answer: &Answer) -> String {
    let mut out = format!("[{}] {}\n", answer.source, answer.title);
    out.push_str(&format!("    {}\n", answer.answer.replace('\n', " ").trim()));
    for link in &answer.links {
        out.push_str(&format!("    {}: {}\n", link.text, link.url));
    }
    out
}
