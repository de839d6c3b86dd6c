use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum S3Error {
    #[error("{operation} failed ({}): {message}", code.as_deref().unwrap_or("no error code"))]
    Sdk {
        operation: &'static str,
        code: Option<String>,
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Incomplete credentials: {0} is missing")]
    IncompleteCredentials(&'static str),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Failed to read object body: {0}")]
    Body(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("No files found in the date range {start} to {end}")]
    NoFilesInRange { start: NaiveDate, end: NaiveDate },
}

impl S3Error {
    /// Wrap an SDK failure, keeping the service error code and message if the
    /// response carried them; transport failures fall back to the full error chain
    pub fn sdk<E, R>(operation: &'static str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        let code = err.code().map(str::to_owned);
        let message = err
            .message()
            .map(str::to_owned)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
        S3Error::Sdk {
            operation,
            code,
            message,
            source: Box::new(err),
        }
    }

    /// Service error code, e.g. `NoSuchBucket`
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            S3Error::Sdk { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, S3Error>;
