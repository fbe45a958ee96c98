//! Fetch error types.

use std::path::PathBuf;

use lens_core::CoreError;
use thiserror::Error;

/// Errors that can occur while loading records from a source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API rejected the credentials (401).
    #[error("not authorized, check the API token")]
    Unauthorized,

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response body was not a collection of records.
    #[error("parse error: {0}")]
    Parse(String),

    /// The body was JSON but not an array of objects.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A local input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is missing required settings (e.g. `api.base_url`).
    #[error("source not configured: {0}")]
    NotConfigured(String),
}
