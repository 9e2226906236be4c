//! The corpus store: the full set of poem records, immutable once built.

use crate::errors::{ingestion_error, Result};
use crate::information;
use crate::input::IPoem;
use itertools::Itertools;
use std::fs;

/// One poem, normalized and ready for querying. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoemRecord {
    /// Assigned at ingestion in file order, starting from 1; never reused
    /// within a store.
    pub id: u32,
    pub text: String,
    /// Free-text provenance label, searched by substring.
    pub source: String,
    /// Categorical geographic label, searched by exact match.
    pub location: String,
    /// Demographic label; carried for reporting, never filtered on.
    pub age: String,
    /// Topical labels in ingestion order; duplicates allowed.
    pub tags: Vec<String>,
    /// `tags` in its serialized form. Tag filtering is substring containment
    /// over this string, so it is computed once here and never at query time.
    pub tags_json: String,
    /// Word sequence derived from `text` at ingestion, stopwords removed;
    /// may be empty. Never recomputed at query time.
    pub tokens: Vec<String>,
}

impl PoemRecord {
    fn new(id: u32, poem: IPoem) -> PoemRecord {
        let tags = poem.tags.into_vec();
        let tags_json = serde_json::to_string(&tags).expect("string lists serialize");
        PoemRecord {
            id,
            text: poem.text,
            source: poem.source,
            location: poem.location,
            age: poem.age,
            tags,
            tags_json,
            tokens: poem.tokens.into_vec(),
        }
    }
}

/// The full set of poems available for querying.
///
/// Built once from the ingestion source and read-only afterwards. A refresh
/// is a full rebuild from source followed by a swap of the store reference,
/// never an in-place edit.
#[derive(Debug, PartialEq, Eq)]
pub struct CorpusStore {
    poems: Vec<PoemRecord>,
}

impl CorpusStore {
    /// Build the store from an ingestion file.
    pub fn load(path: &str) -> Result<CorpusStore> {
        let data = fs::read_to_string(path)
            .map_err(|e| ingestion_error(format!("cannot read {path}: {e}")))?;
        let store = CorpusStore::parse(&data)?;
        information::statistics(&store);
        Ok(store)
    }

    /// Parse the content of an ingestion file and build the store.
    pub fn parse(data: &str) -> Result<CorpusStore> {
        let poems: Vec<IPoem> = serde_json::from_str(data)
            .map_err(|e| ingestion_error(format!("expected an array of poem objects: {e}")))?;
        Ok(CorpusStore::from_poems(poems))
    }

    /// Normalize raw poems and assign ids in file order.
    pub fn from_poems(poems: Vec<IPoem>) -> CorpusStore {
        let poems = poems
            .into_iter()
            .enumerate()
            .map(|(i, poem)| PoemRecord::new(i as u32 + 1, poem))
            .collect_vec();
        CorpusStore { poems }
    }

    /// Every record satisfying `predicate`, in insertion order.
    pub fn select<P>(&self, predicate: P) -> Vec<&PoemRecord>
    where
        P: Fn(&PoemRecord) -> bool,
    {
        self.poems.iter().filter(|poem| predicate(poem)).collect_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoemRecord> {
        self.poems.iter()
    }

    pub fn len(&self) -> usize {
        self.poems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poems.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::IngestionError;
    use crate::input::{TagField, TokenField};

    fn poem(text: &str, location: &str, tags: &[&str], tokens: &[&str]) -> IPoem {
        IPoem {
            text: text.to_owned(),
            source: String::new(),
            location: location.to_owned(),
            age: String::new(),
            tags: TagField::Many(tags.iter().map(|&t| t.to_owned()).collect()),
            tokens: TokenField::Words(tokens.iter().map(|&t| t.to_owned()).collect()),
        }
    }

    #[test]
    fn ids_follow_file_order() {
        let store = CorpusStore::from_poems(vec![
            poem("秋の空", "京都", &["自然"], &["秋", "空"]),
            poem("恋の歌", "東京", &["恋愛"], &["恋", "歌"]),
        ]);
        let ids = store.iter().map(|p| p.id).collect_vec();
        assert_eq!(ids, vec![1, 2]);
        let texts = store.iter().map(|p| p.text.as_str()).collect_vec();
        assert_eq!(texts, vec!["秋の空", "恋の歌"]);
    }

    #[test]
    fn tags_json_is_precomputed() {
        let store = CorpusStore::from_poems(vec![poem("花", "", &["恋愛", "自然"], &[])]);
        let record = store.iter().next().unwrap();
        assert_eq!(record.tags_json, r#"["恋愛","自然"]"#);
    }

    #[test]
    fn lone_string_tag_normalized() {
        let raw: IPoem = serde_json::from_str(r#"{"句": "花", "AIタグ": "自然"}"#).unwrap();
        let store = CorpusStore::from_poems(vec![raw]);
        let record = store.iter().next().unwrap();
        assert_eq!(record.tags, vec!["自然"]);
        assert_eq!(record.tags_json, r#"["自然"]"#);
    }

    #[test]
    fn select_preserves_insertion_order() {
        let store = CorpusStore::from_poems(vec![
            poem("a", "京都", &[], &[]),
            poem("b", "東京", &[], &[]),
            poem("c", "京都", &[], &[]),
        ]);
        let texts = store
            .select(|p| p.location == "京都")
            .iter()
            .map(|p| p.text.as_str())
            .collect_vec();
        assert_eq!(texts, vec!["a", "c"]);
        assert_eq!(store.select(|_| true).len(), 3);
        assert!(store.select(|_| false).is_empty());
    }

    #[test]
    fn parse_array() {
        let store = CorpusStore::parse(r#"[{"句": "秋の空"}, {"句": "恋の歌"}]"#).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn parse_is_idempotent() {
        let data = r#"[{"句": "秋の空", "AIタグ": "自然", "tokens": "秋 空"}]"#;
        let a = CorpusStore::parse(data).unwrap();
        let b = CorpusStore::parse(data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_rejects_non_array() {
        let e = CorpusStore::parse(r#"{"句": "花"}"#).unwrap_err();
        assert!(e.downcast_ref::<IngestionError>().is_some());
    }

    #[test]
    fn parse_rejects_non_string_field() {
        let e = CorpusStore::parse(r#"[{"句": 5}]"#).unwrap_err();
        assert!(e.downcast_ref::<IngestionError>().is_some());
    }

    #[test]
    fn load_missing_file() {
        let e = CorpusStore::load("does-not-exist.json").unwrap_err();
        assert!(e.downcast_ref::<IngestionError>().is_some());
    }

    #[test]
    fn empty_corpus_is_valid() {
        let store = CorpusStore::parse("[]").unwrap();
        assert!(store.is_empty());
    }
}
