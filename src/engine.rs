//! Search and aggregation over a poem corpus.
//!
//! This is the main entry point for the library: build a [CorpusStore],
//! hand it to an [Engine], and ask for either the display projection of a
//! criteria query or the flat token stream that feeds the word-cloud
//! renderer.

use crate::corpus::{CorpusStore, PoemRecord};
use crate::criteria::SearchCriteria;
use crate::output::DisplayRecord;
use itertools::Itertools;
use log::debug;
use std::sync::Arc;

/// Placeholder returned when aggregation has nothing to aggregate, so the
/// cloud renderer always receives non-empty input.
pub const NO_DATA: &str = "データなし";

/// The filter-and-aggregate engine.
///
/// Holds a shared read-only corpus store. Queries never mutate the store,
/// so any number of them may run in parallel. A corpus refresh is a full
/// rebuild handed to [Engine::replace_store]; readers holding the old store
/// keep seeing it in full.
pub struct Engine {
    store: Arc<CorpusStore>,
}

impl Engine {
    pub fn new(store: Arc<CorpusStore>) -> Engine {
        Engine { store }
    }

    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    /// Swap in a freshly built store. Never edits the current one in place.
    pub fn replace_store(&mut self, store: Arc<CorpusStore>) {
        self.store = store;
    }

    /// Every record matching `criteria`, in corpus insertion order. Both
    /// projections go through this, so they always agree on the subset.
    pub fn matching(&self, criteria: &SearchCriteria) -> Vec<&PoemRecord> {
        let matched = self.store.select(|poem| criteria.matches(poem));
        debug!(
            target: "kugumo",
            "{}: {} of {} poems",
            criteria.pretty(),
            matched.len(),
            self.store.len()
        );
        matched
    }

    /// The display projection of every matching record. An empty match set
    /// yields an empty vector, not an error.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<DisplayRecord<'_>> {
        self.matching(criteria)
            .into_iter()
            .map(DisplayRecord::from)
            .collect_vec()
    }

    /// All matching records' tokens joined into one space-separated stream,
    /// [NO_DATA] when nothing matched or every match had an empty token
    /// sequence.
    pub fn aggregate_tokens(&self, criteria: &SearchCriteria) -> String {
        let words = self
            .matching(criteria)
            .into_iter()
            .flat_map(|poem| poem.tokens.iter().map(String::as_str))
            .collect_vec();
        if words.is_empty() {
            NO_DATA.to_owned()
        } else {
            words.join(" ")
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    fn two_poem_store() -> Arc<CorpusStore> {
        let store = CorpusStore::parse(
            r#"[
                {"句": "秋の空", "AIタグ": ["自然"], "データ元": "A", "場所": "京都", "tokens": ["秋", "空"]},
                {"句": "恋の歌", "AIタグ": ["恋愛"], "データ元": "B", "場所": "東京", "tokens": ["恋", "歌"]}
            ]"#,
        )
        .unwrap();
        Arc::new(store)
    }

    #[test]
    fn no_criteria_selects_all_in_order() {
        let engine = Engine::new(two_poem_store());
        let results = engine.search(&SearchCriteria::default());
        let texts = results.iter().map(|r| r.text).collect_vec();
        assert_eq!(texts, vec!["秋の空", "恋の歌"]);
    }

    #[test]
    fn location_selects_exactly_one() {
        let engine = Engine::new(two_poem_store());
        let c = SearchCriteria::from_parts(None, None, None, Some("京都"));
        let results = engine.search(&c);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "秋の空");
        assert_eq!(results[0].tags, ["自然".to_owned()]);
        assert_eq!(results[0].source, "A");
        assert_eq!(results[0].location, "京都");
    }

    #[test]
    fn keyword_selects_both_in_order() {
        let engine = Engine::new(two_poem_store());
        let c = SearchCriteria::from_parts(Some("の"), None, None, None);
        let texts = engine.search(&c).iter().map(|r| r.text).collect_vec();
        assert_eq!(texts, vec!["秋の空", "恋の歌"]);
    }

    #[test]
    fn tag_aggregation() {
        let engine = Engine::new(two_poem_store());
        let c = SearchCriteria::from_parts(None, Some("恋"), None, None);
        assert_eq!(engine.aggregate_tokens(&c), "恋 歌");
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let engine = Engine::new(two_poem_store());
        let c = SearchCriteria::from_parts(None, None, None, Some("大阪"));
        assert!(engine.search(&c).is_empty());
    }

    #[test]
    fn aggregate_no_match_returns_sentinel() {
        let engine = Engine::new(two_poem_store());
        let c = SearchCriteria::from_parts(None, None, None, Some("大阪"));
        assert_eq!(engine.aggregate_tokens(&c), NO_DATA);
    }

    #[test]
    fn aggregate_all_empty_tokens_returns_sentinel() {
        let store = CorpusStore::parse(r#"[{"句": "花", "場所": "奈良"}]"#).unwrap();
        let engine = Engine::new(Arc::new(store));
        assert_eq!(engine.aggregate_tokens(&SearchCriteria::default()), NO_DATA);
    }

    #[test]
    fn aggregate_skips_empty_token_sequences() {
        let store = CorpusStore::parse(
            r#"[
                {"句": "a", "tokens": ["春", "風"]},
                {"句": "b"},
                {"句": "c", "tokens": ["夏"]}
            ]"#,
        )
        .unwrap();
        let engine = Engine::new(Arc::new(store));
        assert_eq!(engine.aggregate_tokens(&SearchCriteria::default()), "春 風 夏");
    }

    #[test]
    fn projections_agree_on_the_subset() {
        let engine = Engine::new(two_poem_store());
        let criteria = [
            SearchCriteria::default(),
            SearchCriteria::from_parts(Some("の"), None, None, None),
            SearchCriteria::from_parts(None, Some("恋"), None, None),
            SearchCriteria::from_parts(None, None, Some("A"), None),
            SearchCriteria::from_parts(None, None, None, Some("東京")),
            SearchCriteria::from_parts(None, None, None, Some("大阪")),
        ];
        for c in &criteria {
            let matched = engine.matching(c);
            assert_eq!(engine.search(c).len(), matched.len());
            let expected = matched
                .iter()
                .flat_map(|p| p.tokens.iter().map(String::as_str))
                .collect_vec();
            let expected = if expected.is_empty() {
                NO_DATA.to_owned()
            } else {
                expected.join(" ")
            };
            assert_eq!(engine.aggregate_tokens(c), expected);
        }
    }

    #[test]
    fn queries_are_idempotent() {
        let engine = Engine::new(two_poem_store());
        let c = SearchCriteria::from_parts(Some("の"), None, None, None);
        assert_eq!(engine.search(&c), engine.search(&c));
        assert_eq!(engine.aggregate_tokens(&c), engine.aggregate_tokens(&c));
    }

    #[test]
    fn replace_store_swaps_wholesale() {
        let old = two_poem_store();
        let mut engine = Engine::new(old.clone());
        let reader = Engine::new(old);
        let rebuilt = CorpusStore::parse(r#"[{"句": "冬の朝", "tokens": ["冬", "朝"]}]"#).unwrap();
        engine.replace_store(Arc::new(rebuilt));
        assert_eq!(engine.store().len(), 1);
        assert_eq!(engine.aggregate_tokens(&SearchCriteria::default()), "冬 朝");
        // A reader that still holds the old store sees it in full.
        assert_eq!(reader.store().len(), 2);
        assert_eq!(
            reader.aggregate_tokens(&SearchCriteria::default()),
            "秋 空 恋 歌"
        );
    }

    #[test]
    fn concurrent_queries_agree() {
        let engine = Engine::new(two_poem_store());
        let c = SearchCriteria::from_parts(Some("の"), None, None, None);
        thread::scope(|scope| {
            let a = scope.spawn(|| engine.search(&c).len());
            let b = scope.spawn(|| engine.aggregate_tokens(&c));
            assert_eq!(a.join().unwrap(), 2);
            assert_eq!(b.join().unwrap(), "秋 空 恋 歌");
        });
    }
}
