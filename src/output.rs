//! Data structures for representing query results.

use crate::corpus::PoemRecord;
use serde::Serialize;

/// The display projection of a matching poem: exactly the fields the
/// presentation layer renders, under the keys it expects. `age` and `tokens`
/// are not part of the projection.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct DisplayRecord<'a> {
    #[serde(rename = "句")]
    pub text: &'a str,
    #[serde(rename = "AIタグ")]
    pub tags: &'a [String],
    #[serde(rename = "データ元")]
    pub source: &'a str,
    #[serde(rename = "場所")]
    pub location: &'a str,
}

impl<'a> From<&'a PoemRecord> for DisplayRecord<'a> {
    fn from(poem: &'a PoemRecord) -> DisplayRecord<'a> {
        DisplayRecord {
            text: &poem.text,
            tags: &poem.tags,
            source: &poem.source,
            location: &poem.location,
        }
    }
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}
