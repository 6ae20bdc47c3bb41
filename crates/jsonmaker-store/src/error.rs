use std::path::PathBuf;

/// Errors from document operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key was empty after trimming surrounding whitespace.
    #[error("key cannot be empty")]
    EmptyKey,

    /// The value could not be read as an integer or a finite float.
    #[error("invalid number format: {input:?}")]
    InvalidNumber { input: String },

    /// The value is not in the accepted true/false sets.
    #[error("boolean must be true/false, yes/no or 1/0, got {input:?}")]
    InvalidBoolean { input: String },

    /// The file could not be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level JSON value is not an object.
    #[error("document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// A loaded key is empty or only whitespace.
    #[error("document contains a blank key {key:?}")]
    BlankKey { key: String },

    /// A loaded value is not a string, number or boolean.
    #[error(
        "unsupported value for key {key:?}: {found} \
         (only strings, numbers and booleans are allowed)"
    )]
    UnsupportedValue { key: String, found: &'static str },
}

impl StoreError {
    /// Returns `true` for errors caused by the user's key/value input.
    ///
    /// These leave the document unchanged and the caller is expected to
    /// prompt again.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyKey | Self::InvalidNumber { .. } | Self::InvalidBoolean { .. }
        )
    }
}

/// Result alias for document operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_classified() {
        assert!(StoreError::EmptyKey.is_validation());
        assert!(StoreError::InvalidNumber { input: "abc".into() }.is_validation());
        assert!(StoreError::InvalidBoolean { input: "maybe".into() }.is_validation());
        assert!(!StoreError::NotAnObject { found: "array" }.is_validation());
        assert!(!StoreError::BlankKey { key: " ".into() }.is_validation());
    }

    #[test]
    fn io_error_mentions_path_and_cause() {
        let err = StoreError::Io {
            path: PathBuf::from("/nope/doc.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/doc.json"));
        assert!(msg.contains("missing"));
    }
}
