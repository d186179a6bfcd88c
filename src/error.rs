//! Error types for loading and serving payroll data

use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "api")]
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

#[cfg(feature = "api")]
use crate::models::ErrorResponse;

/// Failure while fetching or parsing one of the source tables.
///
/// Every load is terminal on failure: nothing here is retried, the caller
/// shows a "no data" message in place of the affected chart.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    FileFetch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    HttpFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("malformed {encoding} text in {source_name}")]
    Encoding {
        encoding: &'static str,
        source_name: String,
    },

    #[error("failed to parse delimited data in {source_name}: {message}")]
    Delimited {
        source_name: String,
        message: String,
    },

    #[error("{source_name} is missing required column {column:?}")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },
}

impl LoadError {
    /// True for the "could not reach the source" half of the taxonomy.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            LoadError::FileFetch { .. } | LoadError::HttpFetch { .. } | LoadError::HttpStatus { .. }
        )
    }

    /// True for malformed encoding, delimiters or headers.
    pub fn is_parse(&self) -> bool {
        !self.is_fetch()
    }
}

/// Application error types returned by the HTTP API
#[derive(Debug, Error)]
pub enum AppError {
    /// The data behind the requested view failed to load at startup
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
    /// The requested team or state has no data
    #[error("Not found: {0}")]
    NotFound(String),
    /// Invalid request parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(feature = "api")]
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::DataUnavailable(msg) => ("data_unavailable", msg.clone()),
            AppError::NotFound(msg) => ("not_found", msg.clone()),
            AppError::ValidationError(msg) => ("validation_error", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_and_parse_split() {
        let fetch = LoadError::FileFetch {
            path: PathBuf::from("winspay.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(fetch.is_fetch());
        assert!(!fetch.is_parse());

        let parse = LoadError::MissingColumn {
            source_name: "winspay.csv".to_string(),
            column: "Team",
        };
        assert!(parse.is_parse());
        assert!(parse.to_string().contains("\"Team\""));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::NotFound("team XYZ".to_string());
        assert!(err.to_string().contains("Not found"));
    }

    #[cfg(feature = "api")]
    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ValidationError("".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DataUnavailable("".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
