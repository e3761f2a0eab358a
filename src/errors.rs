use tracing::error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure taxonomy for store operations.
///
/// Every variant wraps the underlying cause with the context needed to read
/// the failure in a log line. Nothing here is retried internally; each error
/// is logged once at error severity and handed straight back to the caller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to parse connection url: {source}")]
    InvalidConnectionUrl {
        #[from]
        source: url::ParseError,
    },

    #[error("invalid configuration for client: {reason}")]
    InvalidConfiguration { reason: &'static str },

    #[error("failed to authenticate to object storage at {address}: {source}")]
    Authentication {
        address: String,
        source: anyhow::Error,
    },

    #[error("failed to create bucket {bucket}: {source}")]
    BucketInitialization {
        bucket: String,
        source: anyhow::Error,
    },

    #[error("failed to fetch object {path}: {source}")]
    Fetch { path: String, source: anyhow::Error },

    #[error("failed to read object {path}: {source}")]
    Read { path: String, source: anyhow::Error },

    #[error("failed to upload object {path}: {source}")]
    Upload { path: String, source: anyhow::Error },

    #[error("failed to serialize payload for {path}: {source}")]
    Serialization { path: String, source: anyhow::Error },

    #[error("failed to deserialize object {path}: {source}")]
    Deserialization { path: String, source: anyhow::Error },
}

impl Error {
    /// Logs the failure and hands it back, so call sites stay one-liners.
    pub(crate) fn log(self) -> Self {
        error!("{self}");
        self
    }
}
