//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// Corpus build failed: the ingestion source is missing or malformed.
///
/// Fatal at startup; there is no store to fall back to.
#[derive(Debug)]
pub struct IngestionError(pub String);

/// Malformed search request.
///
/// Recoverable: the request is rejected and the store is untouched.
#[derive(Debug)]
pub struct InvalidCriteria(pub String);

impl fmt::Display for IngestionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ingestion error: {}", self.0)
    }
}

impl fmt::Display for InvalidCriteria {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid criteria: {}", self.0)
    }
}

impl error::Error for IngestionError {}

impl error::Error for InvalidCriteria {}

/// A helper for constructing [IngestionError].
pub fn ingestion_error(s: String) -> Box<dyn error::Error> {
    IngestionError(s).into()
}

/// A helper for constructing [InvalidCriteria].
pub fn invalid_criteria(s: String) -> Box<dyn error::Error> {
    InvalidCriteria(s).into()
}

/// A helper for constructing [InvalidCriteria].
pub fn invalid_criteria_ref(s: &str) -> Box<dyn error::Error> {
    InvalidCriteria(s.to_owned()).into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_ingestion() {
        let e = ingestion_error("cannot read poems.json".to_owned());
        assert_eq!(format!("{e}"), "ingestion error: cannot read poems.json");
    }

    #[test]
    fn display_invalid_criteria() {
        let e = invalid_criteria_ref("field 'tag' is not a string");
        assert_eq!(
            format!("{e}"),
            "invalid criteria: field 'tag' is not a string"
        );
    }
}
