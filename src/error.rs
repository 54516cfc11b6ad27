use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} not found in .env")]
    MissingCredential(&'static str),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status})")]
    Api { status: u16, body: String },

    #[error("Parse error: {message}")]
    Parse { message: String, body: String },

    #[error("Failed to read migration {path}: {source}")]
    MigrationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Raw HTTP response text, when the failure came with one
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Api { body, .. } | Error::Parse { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}
