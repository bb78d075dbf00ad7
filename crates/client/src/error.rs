//! API error taxonomy.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a backend call.
///
/// `Unauthorized` is special: whichever screen sees it must force a logout
/// and a redirect to the login screen; everything else degrades to a
/// notification. Nothing is retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend rejected the bearer token (HTTP 401).
    #[error("authentication rejected")]
    Unauthorized,

    /// The request hit the client-side deadline.
    #[error("request timed out")]
    Timeout,

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success status other than 401.
    #[error("server returned {0}: {1}")]
    Status(u16, String),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether this failure must clear the session and send the user back
    /// to the login screen.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_401_forces_logout() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::Status(403, "forbidden".into()).is_unauthorized());
        assert!(!ApiError::Timeout.is_unauthorized());
        assert!(!ApiError::Network("refused".into()).is_unauthorized());
    }
}
