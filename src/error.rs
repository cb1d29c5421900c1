//! Error types for tola-reuse.
//!
//! Reuse itself never fails. Errors only come from building the scalar
//! wrapper values (patterns and locators) out of untrusted text.

use thiserror::Error;

/// Errors that can occur while constructing values.
#[derive(Debug, Error)]
pub enum ValueError {
    /// A pattern flag outside the supported set
    #[error("invalid pattern flag '{0}'")]
    InvalidFlag(char),

    /// The same pattern flag was given twice
    #[error("duplicate pattern flag '{0}'")]
    DuplicateFlag(char),

    /// Pattern source failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// Locator text is not an absolute URL
    #[error("invalid locator '{input}': {source}")]
    InvalidLocator {
        /// Text that failed to parse
        input: String,
        /// Parser diagnosis
        #[source]
        source: url::ParseError,
    },
}

/// Result type alias for value construction.
pub type ValueResult<T> = Result<T, ValueError>;

impl ValueError {
    /// Create a locator error for the given input.
    pub fn locator(input: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidLocator {
            input: input.into(),
            source,
        }
    }
}

impl From<regex::Error> for ValueError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValueError::InvalidFlag('q');
        assert_eq!(err.to_string(), "invalid pattern flag 'q'");

        let err = ValueError::DuplicateFlag('g');
        assert_eq!(err.to_string(), "duplicate pattern flag 'g'");

        let err = ValueError::locator("nope", url::ParseError::RelativeUrlWithoutBase);
        assert_eq!(err.to_string(), "invalid locator 'nope': relative URL without a base");
    }

    #[test]
    fn test_locator_error_keeps_source() {
        use std::error::Error as _;

        let err = ValueError::locator("http://h:x/", url::ParseError::InvalidPort);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_regex_error_converts() {
        let err: ValueError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, ValueError::InvalidPattern(_)));
        assert!(err.to_string().starts_with("invalid pattern:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValueError>();
    }
}
