use thiserror::Error;

/// Errors surfaced by remote Spotify operations.
///
/// Every variant carries the logical operation name so a failed run can be
/// diagnosed without re-running with verbose output. `IncompleteResults` is
/// an integrity failure and is never retried: a count mismatch means the
/// remote collection mutated mid-pagination or the API misreported its
/// total, and no partial output is trusted.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "{operation}: total items according to Spotify ({expected}) does not equal total items collected from API calls ({actual})"
    )]
    IncompleteResults {
        operation: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("{operation}: request failed: {source}")]
    Remote {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: rate limited, retry-after of {retry_after_secs}s exceeds the retry policy")]
    RateLimited {
        operation: &'static str,
        retry_after_secs: u64,
    },
}

impl ApiError {
    pub fn remote(operation: &'static str, source: reqwest::Error) -> Self {
        ApiError::Remote { operation, source }
    }

    /// The logical operation name the error originated from.
    pub fn operation(&self) -> &'static str {
        match self {
            ApiError::IncompleteResults { operation, .. } => operation,
            ApiError::Remote { operation, .. } => operation,
            ApiError::RateLimited { operation, .. } => operation,
        }
    }
}
