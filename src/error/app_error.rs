use thiserror::Error;

/// Application-wide error type.
///
/// Every I/O boundary (feed, store, notifier) returns one of these instead of
/// swallowing the failure, so the cycle driver can decide what to substitute
/// and tests can see which path was taken.
#[derive(Error, Debug)]
pub enum AppError {
    /// Remote API failure: transport error, non-success status or unusable payload
    #[error("{service} API error: {message}")]
    ExternalApi {
        service: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Local store file could not be read, parsed or written
    #[error("Store {operation} failed for {path}: {source}")]
    Store {
        operation: String,
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// Encoding a value to JSON failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn external(
        service: impl Into<String>,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        AppError::ExternalApi {
            service: service.into(),
            message: message.into(),
            source,
        }
    }

    pub fn store(
        operation: impl Into<String>,
        path: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        AppError::Store {
            operation: operation.into(),
            path: path.into(),
            source: source.into(),
        }
    }

    /// Short machine-readable kind, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ExternalApi { .. } => "external_api",
            AppError::Store { .. } => "store",
            AppError::Serialization(_) => "serialization",
            AppError::Configuration { .. } => "configuration",
            AppError::Internal { .. } => "internal",
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        let key = match &error {
            crate::config::error::ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
