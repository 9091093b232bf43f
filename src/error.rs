//! Error types for cidr-calculator.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Library error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed address or out-of-range prefix length. Never retried.
    #[error("Invalid CIDR '{cidr}': {reason}")]
    InvalidCidr { cidr: String, reason: String },

    /// A rebuild of the address index failed. The previous index keeps serving.
    #[error("Index build failed: {0}")]
    IndexBuild(String),

    /// A single catalog CIDR block could not be resolved.
    #[error("Unresolvable catalog entry '{cidr}' in {data_center}/{service}: {reason}")]
    UnresolvableCatalogEntry {
        data_center: String,
        service: String,
        cidr: String,
        reason: String,
    },

    /// Configuration value missing or invalid.
    #[error("Invalid configuration for {key}: '{value}' ({reason})")]
    Config {
        key: String,
        value: String,
        reason: String,
    },

    /// Background worker channel closed or task failed.
    #[error("Worker error: {0}")]
    Worker(String),

    /// JSON parsing error with the path of the offending field.
    #[error("JSON error at '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid CIDR error
    pub fn invalid_cidr(cidr: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidCidr {
            cidr: cidr.into(),
            reason: reason.into(),
        }
    }

    /// Create an index build error
    pub fn index_build(msg: impl Into<String>) -> Self {
        Error::IndexBuild(msg.into())
    }

    /// Create a configuration error
    pub fn config(key: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Config {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is an invalid CIDR error
    pub fn is_invalid_cidr(&self) -> bool {
        matches!(self, Error::InvalidCidr { .. })
    }

    /// Check if this is an index build error
    pub fn is_index_build(&self) -> bool {
        matches!(self, Error::IndexBuild(_))
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for Error {
    fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Error::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json {
            path: ".".to_string(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_cidr_display() {
        let e = Error::invalid_cidr("10.0.0.0/33", "prefix length out of range");
        assert!(e.is_invalid_cidr());
        assert_eq!(
            e.to_string(),
            "Invalid CIDR '10.0.0.0/33': prefix length out of range"
        );
    }

    #[test]
    fn test_json_error_keeps_path() {
        let json = r#"{"cidr_notation": 12}"#;
        let mut de = serde_json::Deserializer::from_str(json);
        let res: std::result::Result<crate::models::SourceDocument, _> =
            serde_path_to_error::deserialize(&mut de);
        let e: Error = res.unwrap_err().into();
        match e {
            Error::Json { path, .. } => assert_eq!(path, "cidr_notation"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
