//! Forum-then-timetable fallback matching.
//!
//! # Algorithm
//!
//! 1. Lowercase the query. No trimming or tokenizing.
//! 2. Scan the forum collection in source order. A row matches when its
//!    `title` or `excerpt` is non-null and contains the query
//!    (case-insensitively). The first matching row wins.
//! 3. Only if the forum has no winner, scan the timetable the same way, but
//!    testing *every* column of the row.
//! 4. Project the winner into an [`Answer`], or return the fixed no-match
//!    answer.
//!
//! Each request is a linear scan; the collections are small and static, so
//! nothing is indexed or cached between requests.

use crate::dataset::{Collection, DatasetStore, Row};
use crate::models::{Answer, AnswerSource, Link};

/// Forum columns examined by the match predicate.
pub const FORUM_SEARCH_COLUMNS: &[&str] = &["title", "excerpt"];

pub const NO_MATCH_ANSWER: &str = "Sorry, I couldn't find anything relevant...";
pub const NO_MATCH_TITLE: &str = "No Results";
pub const UNTITLED: &str = "Untitled";
pub const NO_DETAILS: &str = "No details available.";
pub const NOT_AVAILABLE: &str = "N/A";
pub const DISCUSSION_LINK_TEXT: &str = "See discussion";
pub const FALLBACK_URL: &str = "#";

/// Which columns of a collection the match predicate looks at.
#[derive(Debug, Clone, Copy)]
pub enum SearchScope<'s> {
    /// Only the named columns. Names missing from the collection never match.
    Columns(&'s [&'s str]),
    /// Every column the collection has.
    AllColumns,
}

/// The winning row of a request, tagged by the collection it came from.
#[derive(Debug, Clone, Copy)]
pub enum Match<'a> {
    Forum(Row<'a>),
    Timetable(Row<'a>),
    None,
}

impl Match<'_> {
    pub fn source(&self) -> AnswerSource {
        match self {
            Match::Forum(_) => AnswerSource::Forum,
            Match::Timetable(_) => AnswerSource::Timetable,
            Match::None => AnswerSource::NoMatch,
        }
    }

    /// Source-order index of the winning row, if any.
    pub fn row_index(&self) -> Option<usize> {
        match self {
            Match::Forum(row) | Match::Timetable(row) => Some(row.index()),
            Match::None => None,
        }
    }

    /// Projects the winner into the uniform answer shape.
    pub fn into_answer(self) -> Answer {
        match self {
            Match::Forum(row) => forum_answer(&row),
            Match::Timetable(row) => timetable_answer(&row),
            Match::None => no_match_answer(),
        }
    }
}

/// Lowercases a raw query. Whitespace is left as-is.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase()
}

/// Whether `row` matches an already-normalized query within `scope`.
pub fn row_matches(row: &Row<'_>, scope: SearchScope<'_>, needle: &str) -> bool {
    match scope {
        SearchScope::Columns(columns) => columns
            .iter()
            .any(|column| cell_contains(row.get(column), needle)),
        SearchScope::AllColumns => row.values().any(|(_, value)| cell_contains(value, needle)),
    }
}

fn cell_contains(value: Option<&str>, needle: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase().contains(needle))
}

/// First row in source order matching `needle` within `scope`.
pub fn find_first<'a>(
    collection: &'a Collection,
    scope: SearchScope<'_>,
    needle: &str,
) -> Option<Row<'a>> {
    collection.rows().find(|row| row_matches(row, scope, needle))
}

/// Answers questions against a [`DatasetStore`].
///
/// Holds only a shared borrow, so any number of matchers may run
/// concurrently over the same store.
#[derive(Debug, Clone, Copy)]
pub struct FallbackMatcher<'a> {
    store: &'a DatasetStore,
}

impl<'a> FallbackMatcher<'a> {
    pub fn new(store: &'a DatasetStore) -> Self {
        Self { store }
    }

    /// Finds the winning row for a raw query.
    ///
    /// The timetable is not scanned at all when the forum has a winner.
    pub fn resolve(&self, query: &str) -> Match<'a> {
        let needle = normalize_query(query);

        if let Some(row) = find_first(
            self.store.forum(),
            SearchScope::Columns(FORUM_SEARCH_COLUMNS),
            &needle,
        ) {
            return Match::Forum(row);
        }

        if let Some(row) = find_first(self.store.timetable(), SearchScope::AllColumns, &needle) {
            return Match::Timetable(row);
        }

        Match::None
    }

    /// Answers a raw query. Every input has an answer.
    pub fn answer(&self, query: &str) -> Answer {
        self.resolve(query).into_answer()
    }
}

/// Projection of a forum winner.
pub fn forum_answer(row: &Row<'_>) -> Answer {
    let title = row.get("title");
    Answer {
        answer: row
            .get("excerpt")
            .or(title)
            .unwrap_or(NO_DETAILS)
            .to_string(),
        source: AnswerSource::Forum,
        title: title.unwrap_or(UNTITLED).to_string(),
        links: vec![Link {
            url: row.get("slug").unwrap_or(FALLBACK_URL).to_string(),
            text: DISCUSSION_LINK_TEXT.to_string(),
        }],
    }
}

/// Projection of a timetable winner.
pub fn timetable_answer(row: &Row<'_>) -> Answer {
    let field = |name: &str| row.get(name).unwrap_or(NOT_AVAILABLE);
    Answer {
        answer: format!(
            "Course: {} | Instructor: {} | Time: {} | Venue: {}",
            field("title"),
            field("instructor"),
            field("slot"),
            field("venue"),
        ),
        source: AnswerSource::Timetable,
        title: row.get("title").unwrap_or(UNTITLED).to_string(),
        links: Vec::new(),
    }
}

/// The sentinel answer for a query no collection matched.
pub fn no_match_answer() -> Answer {
    Answer {
        answer: NO_MATCH_ANSWER.to_string(),
        source: AnswerSource::NoMatch,
        title: NO_MATCH_TITLE.to_string(),
        links: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(csv: &str) -> Collection {
        Collection::from_csv_reader("test.csv", csv.as_bytes()).unwrap()
    }

    fn sample_store() -> DatasetStore {
        DatasetStore::new(
            collection("title,excerpt,slug\nMidterm FAQ,Covers chapters 1-5,t/123\n"),
            collection("title,instructor,slot,venue\nData Viz,A. Rao,Mon 10am,Hall B\n"),
        )
    }

    #[test]
    fn test_forum_match() {
        let store = sample_store();
        let answer = FallbackMatcher::new(&store).answer("midterm");
        assert_eq!(
            answer,
            Answer {
                answer: "Covers chapters 1-5".to_string(),
                source: AnswerSource::Forum,
                title: "Midterm FAQ".to_string(),
                links: vec![Link {
                    url: "t/123".to_string(),
                    text: "See discussion".to_string(),
                }],
            }
        );
    }

    #[test]
    fn test_timetable_match() {
        let store = sample_store();
        let answer = FallbackMatcher::new(&store).answer("data viz");
        assert_eq!(
            answer.answer,
            "Course: Data Viz | Instructor: A. Rao | Time: Mon 10am | Venue: Hall B"
        );
        assert_eq!(answer.source, AnswerSource::Timetable);
        assert_eq!(answer.title, "Data Viz");
        assert!(answer.links.is_empty());
    }

    #[test]
    fn test_no_match() {
        let store = sample_store();
        let answer = FallbackMatcher::new(&store).answer("quantum");
        assert_eq!(answer, no_match_answer());
        assert_eq!(answer.answer, "Sorry, I couldn't find anything relevant...");
        assert_eq!(answer.title, "No Results");
        assert_eq!(answer.source, AnswerSource::NoMatch);
    }

    #[test]
    fn test_query_case_insensitive() {
        let store = sample_store();
        let matcher = FallbackMatcher::new(&store);
        assert_eq!(matcher.answer("MIDTERM FAQ").source, AnswerSource::Forum);
        assert_eq!(matcher.answer("hAlL b").source, AnswerSource::Timetable);
    }

    #[test]
    fn test_query_not_trimmed() {
        let store = sample_store();
        let matcher = FallbackMatcher::new(&store);
        // "Midterm" starts the title, so there is no leading space to match
        assert_eq!(matcher.answer(" midterm").source, AnswerSource::NoMatch);
        assert_eq!(matcher.answer("faq").source, AnswerSource::Forum);
    }

    #[test]
    fn test_first_forum_row_in_source_order_wins() {
        let store = DatasetStore::new(
            collection("title,excerpt,slug\nExam schedule,first,t/1\nExam prep,second,t/2\n"),
            Collection::empty(),
        );
        let answer = FallbackMatcher::new(&store).answer("exam");
        assert_eq!(answer.answer, "first");
        assert_eq!(answer.links[0].url, "t/1");
    }

    #[test]
    fn test_forum_wins_over_better_timetable_match() {
        let store = DatasetStore::new(
            collection("title,excerpt,slug\nGeneral,mentions data viz once,t/9\n"),
            collection("title,instructor,slot,venue\nData Viz,A. Rao,Mon 10am,Hall B\n"),
        );
        let m = FallbackMatcher::new(&store).resolve("data viz");
        assert!(matches!(m, Match::Forum(_)));
        assert_eq!(m.row_index(), Some(0));
    }

    #[test]
    fn test_forum_slug_is_not_searched() {
        let store = DatasetStore::new(
            collection("title,excerpt,slug\nWelcome,Hello all,secret-slug\n"),
            Collection::empty(),
        );
        assert_eq!(FallbackMatcher::new(&store).answer("secret").source, AnswerSource::NoMatch);
    }

    #[test]
    fn test_forum_other_columns_not_searched() {
        let store = DatasetStore::new(
            collection("title,excerpt,slug,author\nWelcome,Hello all,t/1,Rao\n"),
            collection("title,instructor,slot,venue\nData Viz,A. Rao,Mon 10am,Hall B\n"),
        );
        let answer = FallbackMatcher::new(&store).answer("rao");
        assert_eq!(answer.source, AnswerSource::Timetable);
    }

    #[test]
    fn test_timetable_searches_all_columns() {
        let store = DatasetStore::new(
            Collection::empty(),
            collection("course_id,title,instructor,slot,venue\nDS-101,Data Viz,A. Rao,Mon 10am,Hall B\n"),
        );
        let answer = FallbackMatcher::new(&store).answer("ds-101");
        assert_eq!(answer.source, AnswerSource::Timetable);
        assert_eq!(answer.title, "Data Viz");
    }

    #[test]
    fn test_forum_missing_excerpt_falls_back_to_title() {
        let store = DatasetStore::new(
            collection("title,excerpt,slug\nMidterm FAQ,,t/123\n"),
            Collection::empty(),
        );
        let answer = FallbackMatcher::new(&store).answer("midterm");
        assert_eq!(answer.answer, "Midterm FAQ");
    }

    #[test]
    fn test_forum_missing_slug_uses_fallback_url() {
        let store = DatasetStore::new(
            collection("title,excerpt,slug\nMidterm FAQ,Covers chapters 1-5,\n"),
            Collection::empty(),
        );
        let answer = FallbackMatcher::new(&store).answer("midterm");
        assert_eq!(
            answer.links,
            vec![Link {
                url: "#".to_string(),
                text: "See discussion".to_string(),
            }]
        );
    }

    #[test]
    fn test_forum_missing_title_uses_placeholder() {
        let store = DatasetStore::new(
            collection("title,excerpt\n,Covers chapters 1-5\n"),
            Collection::empty(),
        );
        let answer = FallbackMatcher::new(&store).answer("chapters");
        assert_eq!(answer.title, UNTITLED);
        assert_eq!(answer.answer, "Covers chapters 1-5");
        assert_eq!(answer.links[0].url, FALLBACK_URL);
    }

    #[test]
    fn test_timetable_missing_fields_use_placeholder() {
        let store = DatasetStore::new(
            Collection::empty(),
            collection("title,instructor,slot\nData Viz,,Mon 10am\n"),
        );
        let answer = FallbackMatcher::new(&store).answer("mon");
        assert_eq!(
            answer.answer,
            "Course: Data Viz | Instructor: N/A | Time: Mon 10am | Venue: N/A"
        );
    }

    #[test]
    fn test_timetable_missing_title_uses_placeholders() {
        let store = DatasetStore::new(
            Collection::empty(),
            collection("title,instructor,slot,venue\n,A. Rao,Mon 10am,Hall B\n"),
        );
        let answer = FallbackMatcher::new(&store).answer("hall b");
        assert_eq!(answer.source, AnswerSource::Timetable);
        assert_eq!(answer.title, "Untitled");
        assert_eq!(
            answer.answer,
            "Course: N/A | Instructor: A. Rao | Time: Mon 10am | Venue: Hall B"
        );
    }

    #[test]
    fn test_forum_short_row_still_answers() {
        let store = DatasetStore::new(
            collection("title,excerpt,slug\nMidterm FAQ,Covers chapters 1-5\nOther,x,t/2\n"),
            Collection::empty(),
        );
        let answer = FallbackMatcher::new(&store).answer("midterm");
        assert_eq!(answer.source, AnswerSource::Forum);
        assert_eq!(answer.answer, "Covers chapters 1-5");
        assert_eq!(answer.links[0].url, "#");
    }

    #[test]
    fn test_null_cells_never_match() {
        let store = DatasetStore::new(
            collection("title,excerpt,slug\n,,t/1\n"),
            collection("title,venue\n,\n"),
        );
        assert_eq!(FallbackMatcher::new(&store).answer("").source, AnswerSource::NoMatch);
    }

    #[test]
    fn test_empty_query_matches_first_non_null_row() {
        let store = sample_store();
        let answer = FallbackMatcher::new(&store).answer("");
        assert_eq!(answer.source, AnswerSource::Forum);
        assert_eq!(answer.title, "Midterm FAQ");
    }

    #[test]
    fn test_empty_collections_yield_no_match() {
        let store = DatasetStore::default();
        let matcher = FallbackMatcher::new(&store);
        assert_eq!(matcher.answer("").source, AnswerSource::NoMatch);
        assert_eq!(matcher.answer("midterm").source, AnswerSource::NoMatch);
    }

    #[test]
    fn test_answer_is_idempotent() {
        let store = sample_store();
        let matcher = FallbackMatcher::new(&store);
        for q in ["midterm", "data viz", "quantum", ""] {
            assert_eq!(matcher.answer(q), matcher.answer(q));
        }
    }

    #[test]
    fn test_unicode_lowercasing() {
        let store = DatasetStore::new(
            collection("title,excerpt,slug\nÜBUNG Woche 1,,t/5\n"),
            Collection::empty(),
        );
        assert_eq!(
            FallbackMatcher::new(&store).answer("übung").source,
            AnswerSource::Forum
        );
    }

    #[test]
    fn test_row_matches_scope_with_unknown_column() {
        let c = collection("title\nData Viz\n");
        let row = c.row(0).unwrap();
        assert!(!row_matches(&row, SearchScope::Columns(&["excerpt"]), "data"));
        assert!(row_matches(&row, SearchScope::Columns(&["excerpt", "title"]), "data"));
        assert!(row_matches(&row, SearchScope::AllColumns, "viz"));
    }

    #[test]
    fn test_answer_serializes_to_wire_shape() {
        let store = sample_store();
        let answer = FallbackMatcher::new(&store).answer("midterm");
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "answer": "Covers chapters 1-5",
                "source": "Forum Discussion",
                "title": "Midterm FAQ",
                "links": [{"url": "t/123", "text": "See discussion"}]
            })
        );

        let none = serde_json::to_value(no_match_answer()).unwrap();
        assert_eq!(none["source"], "No matches");
        assert_eq!(none["links"], serde_json::json!([]));
    }
}
