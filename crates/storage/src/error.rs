//! Error types for document storage and upstream fetches.

use thiserror::Error;

use gpf_common::GpfError;

/// Errors raised by byte stores, fetchers and the capability cache.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem failure while reading or replacing a stored document.
    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The upstream server could not be read.
    #[error("failed to read {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl StorageError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

impl From<StorageError> for GpfError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Fetch { url, reason } => GpfError::UpstreamFetchFailed { url, reason },
            StorageError::Io { .. } => GpfError::CacheError(err.to_string()),
            StorageError::Client(reason) => GpfError::InternalError(reason),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_names_url() {
        let err: GpfError = StorageError::Fetch {
            url: "https://data.geopf.fr/wms-r/wms?REQUEST=GetMap".into(),
            reason: "timed out".into(),
        }
        .into();
        assert!(err.to_string().contains("https://data.geopf.fr/wms-r/wms"));
        assert_eq!(err.http_status_code(), 502);
    }
}
