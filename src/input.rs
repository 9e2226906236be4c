//! Wire types for the poem ingestion file.
//!
//! The ingestion source is a JSON array of poem objects with Japanese field
//! keys (`句`, `データ元`, `場所`, `年齢`, `AIタグ`, `tokens`); English
//! aliases are accepted on input. Every field is optional on the wire.
//! Tokenization and stopword removal happen before the file is produced, so
//! `tokens` arrives precomputed.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A tag list as it appears on the wire: either a single string or an array
/// of strings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TagField {
    One(String),
    Many(Vec<String>),
}

impl TagField {
    /// Normalize to a sequence; a lone string wraps into a one-element list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TagField::One(tag) => vec![tag],
            TagField::Many(tags) => tags,
        }
    }
}

impl Default for TagField {
    fn default() -> TagField {
        TagField::Many(vec![])
    }
}

/// A token sequence as it appears on the wire: either an array of words or
/// one space-joined string, the form tokenizer dumps use.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TokenField {
    Joined(String),
    Words(Vec<String>),
}

impl TokenField {
    /// Normalize to a sequence of word-strings.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TokenField::Joined(words) => {
                words.split_whitespace().map(str::to_owned).collect_vec()
            }
            TokenField::Words(words) => words,
        }
    }
}

impl Default for TokenField {
    fn default() -> TokenField {
        TokenField::Words(vec![])
    }
}

/// One poem as it appears in the ingestion file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct IPoem {
    #[serde(rename = "句", alias = "text", default)]
    pub text: String,
    #[serde(rename = "データ元", alias = "source", default)]
    pub source: String,
    #[serde(rename = "場所", alias = "location", default)]
    pub location: String,
    #[serde(rename = "年齢", alias = "age", default)]
    pub age: String,
    #[serde(rename = "AIタグ", alias = "tags", default)]
    pub tags: TagField,
    #[serde(default)]
    pub tokens: TokenField,
}
