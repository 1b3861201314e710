//! Error types for hashing and identifier encoding.

use std::path::{Path, PathBuf};

/// Errors raised while hashing a script source.
///
/// Hashing never falls back to a substitute digest: any failure to read the
/// content is returned to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The backing file of a source could not be read.
    #[error("failed to hash {path}: {source}")]
    Io {
        /// The file being hashed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The text of an in-memory resource could not be obtained.
    #[error("failed to read text of {resource}: {source}")]
    Text {
        /// Display name of the resource.
        resource: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl HashError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        HashError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the kind of the underlying I/O error.
    pub fn kind(&self) -> std::io::ErrorKind {
        match self {
            HashError::Io { source, .. } | HashError::Text { source, .. } => source.kind(),
        }
    }
}

/// Errors raised while encoding or decoding artifact identifiers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The identifier variant has no wire encoding. Nothing was written.
    #[error("unsupported artifact identifier variant: {variant}")]
    UnsupportedIdentifierVariant {
        /// Name of the rejected variant.
        variant: &'static str,
    },

    /// A module artifact was decoded with an owner that is not a module component.
    #[error("expected a module component owner, found {found}")]
    UnexpectedOwner {
        /// Display form of the decoded owner.
        found: String,
    },

    /// The input stream is truncated or does not follow the wire format.
    #[error("malformed identifier stream at field '{field}': {reason}")]
    Malformed {
        /// The field being decoded when the error occurred.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// A field could not be encoded.
    #[error("failed to encode field '{field}': {reason}")]
    Encode {
        /// The field being encoded.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// The underlying stream failed.
    #[error("identifier stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = HashError::Io {
            path: PathBuf::from("/tmp/project/build.gradle"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to hash"));
        assert!(msg.contains("build.gradle"));
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn text_error_display() {
        let err = HashError::Text {
            resource: "inline script".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        };
        assert!(err.to_string().contains("inline script"));
    }

    #[test]
    fn unsupported_variant_display() {
        let err = CodecError::UnsupportedIdentifierVariant { variant: "opaque" };
        assert_eq!(
            err.to_string(),
            "unsupported artifact identifier variant: opaque"
        );
    }

    #[test]
    fn malformed_display() {
        let err = CodecError::Malformed {
            field: "classifier",
            reason: "unexpected end of stream".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("classifier"));
        assert!(msg.contains("unexpected end of stream"));
    }

    #[test]
    fn unexpected_owner_display() {
        let err = CodecError::UnexpectedOwner {
            found: "project :app".to_string(),
        };
        assert!(err.to_string().contains("project :app"));
    }
}
