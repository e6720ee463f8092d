use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayFeesError {
    #[error("Invalid fee item: {0}")]
    InvalidFeeItem(String),
    #[error("HTTP error: {context}: {source}")]
    Http {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected HTTP status {status}: {context}")]
    HttpStatus {
        context: &'static str,
        status: StatusCode,
    },
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("An auth token is required to {0}")]
    MissingAuthToken(&'static str),
    #[error("Payment account {0} not found")]
    PaymentAccountNotFound(u64),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PayFeesError>;
