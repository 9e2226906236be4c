use crate::corpus::{CorpusStore, PoemRecord};
use itertools::Itertools;
use log::info;
use std::collections::HashMap;

fn field_counts<'a, F>(poems: &[&'a PoemRecord], field: F) -> Vec<(&'a str, usize)>
where
    F: Fn(&'a PoemRecord) -> &'a str,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for poem in poems {
        let value = field(poem);
        // An empty string is a missing field, not a value.
        if !value.is_empty() {
            *counts.entry(value).or_default() += 1;
        }
    }
    counts.into_iter().sorted().collect_vec()
}

/// Poems per distinct location, sorted by location.
pub fn location_counts<'a>(poems: &[&'a PoemRecord]) -> Vec<(&'a str, usize)> {
    field_counts(poems, |p| &p.location)
}

/// Poems per distinct source, sorted by source.
pub fn source_counts<'a>(poems: &[&'a PoemRecord]) -> Vec<(&'a str, usize)> {
    field_counts(poems, |p| &p.source)
}

/// Poems per distinct age label, sorted by label.
pub fn age_counts<'a>(poems: &[&'a PoemRecord]) -> Vec<(&'a str, usize)> {
    field_counts(poems, |p| &p.age)
}

/// Poems per distinct tag, sorted by tag. A poem counts once per tag even
/// if its tag list repeats the value.
pub fn tag_counts<'a>(poems: &[&'a PoemRecord]) -> Vec<(&'a str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for poem in poems {
        for tag in poem.tags.iter().unique() {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    counts.into_iter().sorted().collect_vec()
}

/// Occurrences of each distinct token, sorted by token.
pub fn token_counts<'a>(poems: &[&'a PoemRecord]) -> Vec<(&'a str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for poem in poems {
        for token in &poem.tokens {
            *counts.entry(token.as_str()).or_default() += 1;
        }
    }
    counts.into_iter().sorted().collect_vec()
}

fn explain_counts(counts: &[(&str, usize)]) -> String {
    counts.iter().map(|(value, n)| format!("{value} ({n})")).join(", ")
}

/// Log a summary of a freshly built store.
pub fn statistics(store: &CorpusStore) {
    let poems = store.iter().collect_vec();
    let tokens: usize = poems.iter().map(|p| p.tokens.len()).sum();
    info!(
        target: "kugumo",
        "corpus: {} poems, {} tokens, {} distinct tokens",
        store.len(),
        tokens,
        token_counts(&poems).len()
    );
    info!(target: "kugumo", "locations: {}", explain_counts(&location_counts(&poems)));
    info!(target: "kugumo", "sources: {}", explain_counts(&source_counts(&poems)));
    info!(target: "kugumo", "distinct tags: {}", tag_counts(&poems).len());
}
