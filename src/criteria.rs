//! Search criteria and the filtering predicate derived from them.

use crate::corpus::PoemRecord;
use crate::errors::{invalid_criteria, invalid_criteria_ref, Result};
use serde_json::Value;

/// A partially-specified filter request. Absent fields impose no constraint;
/// with all four fields absent the predicate matches every record.
///
/// Present fields are non-empty: construction trims surrounding whitespace
/// and normalizes blank values to absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Substring of the poem text.
    pub keyword: Option<String>,
    /// Substring of the serialized tag list. This is containment in the
    /// list's string form, not membership: 恋 also matches a poem tagged
    /// 恋愛.
    pub tag: Option<String>,
    /// Substring of the provenance label.
    pub source: Option<String>,
    /// Exact geographic label.
    pub location: Option<String>,
}

fn normalize(value: Option<&str>) -> Option<String> {
    match value {
        None => None,
        Some(v) => {
            let v = v.trim();
            if v.is_empty() {
                None
            } else {
                Some(v.to_owned())
            }
        }
    }
}

fn contains(text: &str, needle: &Option<String>) -> bool {
    match needle {
        None => true,
        Some(n) => text.contains(n.as_str()),
    }
}

impl SearchCriteria {
    /// Build criteria from already-separated parts, trimming each field and
    /// dropping blanks.
    pub fn from_parts(
        keyword: Option<&str>,
        tag: Option<&str>,
        source: Option<&str>,
        location: Option<&str>,
    ) -> SearchCriteria {
        SearchCriteria {
            keyword: normalize(keyword),
            tag: normalize(tag),
            source: normalize(source),
            location: normalize(location),
        }
    }

    /// Build criteria from a JSON request object in the shape the search
    /// frontend posts: keys `query`, `tag`, `source`, `location`, each a
    /// string or null. Unknown keys are ignored.
    pub fn from_json(data: &str) -> Result<SearchCriteria> {
        let value: Value = serde_json::from_str(data)
            .map_err(|e| invalid_criteria(format!("request is not JSON: {e}")))?;
        let object = value
            .as_object()
            .ok_or_else(|| invalid_criteria_ref("request is not a JSON object"))?;
        let field = |key: &str| match object.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(invalid_criteria(format!("field '{key}' is not a string"))),
        };
        Ok(SearchCriteria::from_parts(
            field("query")?,
            field("tag")?,
            field("source")?,
            field("location")?,
        ))
    }

    /// True when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.keyword.is_none()
            && self.tag.is_none()
            && self.source.is_none()
            && self.location.is_none()
    }

    /// The conjunctive filtering predicate: every present field must match.
    pub fn matches(&self, poem: &PoemRecord) -> bool {
        contains(&poem.text, &self.keyword)
            && contains(&poem.source, &self.source)
            && match &self.location {
                None => true,
                Some(location) => poem.location == *location,
            }
            && contains(&poem.tags_json, &self.tag)
    }

    /// Human-readable form for logs and prompts.
    pub fn pretty(&self) -> String {
        let mut parts = vec![];
        if let Some(k) = &self.keyword {
            parts.push(format!("keyword ~ '{k}'"));
        }
        if let Some(s) = &self.source {
            parts.push(format!("source ~ '{s}'"));
        }
        if let Some(l) = &self.location {
            parts.push(format!("location = '{l}'"));
        }
        if let Some(t) = &self.tag {
            parts.push(format!("tag ~ '{t}'"));
        }
        if parts.is_empty() {
            "all poems".to_owned()
        } else {
            parts.join(", ")
        }
    }
}
