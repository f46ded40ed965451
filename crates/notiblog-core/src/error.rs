//! Error types for notiblog.

/// Errors that can occur while fetching or transforming blog content.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The remote content source answered with an error object.
    #[error("API error ({status} {code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Machine-readable error code (e.g. `rate_limited`)
        code: String,
        /// Human-readable error message
        message: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset, timeout).
    #[error("Transport error: {message}")]
    Transport {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path
    #[error("I/O error at {path}: {source}")]
    IoPath {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

}

/// Convenience `Result` type alias for notiblog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is retryable.
    ///
    /// Rate limits (429), upstream 5xx responses and transport failures are
    /// transient; everything else is permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status == 429 || *status >= 500,
            Error::Transport { .. } => true,
            Error::Io(_) => false,
            Error::IoPath { .. } => false,
            Error::Serialization(_) => false,
            Error::Config { .. } => false,
        }
    }

    /// Creates a new API error.
    pub fn api<C, M>(status: u16, code: C, message: M) -> Self
    where
        C: Into<String>,
        M: Into<String>,
    {
        Error::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a new transport error with a message.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Error::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a message and source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an I/O error carrying the offending path.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<std::path::Path>) -> Self {
        Error::IoPath {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
