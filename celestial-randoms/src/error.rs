use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input catalog does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("chunk count must be a positive integer, got {0}")]
    InvalidChunkCount(i64),

    #[error("invalid catalog file {}: {reason}", path.display())]
    InvalidCatalog { path: PathBuf, reason: String },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("catalog of {0} records does not fit in memory")]
    CatalogTooLarge(usize),

    #[error("invalid sky region: {0}")]
    InvalidRegion(String),

    #[error("catalog metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn input_not_found_display() {
        let err = Error::InputNotFound(PathBuf::from("/data/randoms.rcat"));
        assert_eq!(
            err.to_string(),
            "input catalog does not exist: /data/randoms.rcat"
        );
    }

    #[test]
    fn invalid_chunk_count_display() {
        let err = Error::InvalidChunkCount(-3);
        assert_eq!(
            err.to_string(),
            "chunk count must be a positive integer, got -3"
        );
    }

    #[test]
    fn invalid_catalog_display() {
        let err = Error::InvalidCatalog {
            path: PathBuf::from("bad.rcat"),
            reason: "file too small".to_string(),
        };
        assert_eq!(err.to_string(), "invalid catalog file bad.rcat: file too small");
    }

    #[test]
    fn catalog_too_large_display() {
        let err = Error::CatalogTooLarge(1 << 40);
        assert_eq!(
            err.to_string(),
            "catalog of 1099511627776 records does not fit in memory"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io = std::io::Error::new(ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
