//! GitHub API-specific error types.

use serde::Deserialize;

/// Shown when the service cannot be reached or a request times out.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your internet connection and try again.";

/// Shown when a non-2xx response carries no readable error body.
pub const ERROR_PARSING_MESSAGE: &str = "Unable to read the error returned by the server.";

/// Fallback when an error carries no message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Errors that can occur during GitHub API operations.
///
/// None of these leave the adapter: `GitHub` folds every variant into an
/// `Outcome::Failure` carrying `user_message()`.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// API answered with a non-2xx status
    #[error("API error (status {status})")]
    Http { status: u16, body: Vec<u8> },

    /// Request could not be sent or the response could not be read
    #[error("Network request failed: {0}")]
    Connectivity(#[source] reqwest::Error),

    /// Failed to deserialize API response
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// HTTP client could not be built from the configuration
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Generic API error
    #[error("{0}")]
    Other(String),
}

/// Shape of the body GitHub sends alongside error statuses.
///
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl GithubError {
    /// Message surfaced to the user for this error.
    ///
    pub fn user_message(&self) -> String {
        match self {
            GithubError::Http { body, .. } => {
                extract_error_message(body).unwrap_or_else(|| ERROR_PARSING_MESSAGE.to_string())
            }
            GithubError::Connectivity(_) => NETWORK_ERROR_MESSAGE.to_string(),
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    UNKNOWN_ERROR_MESSAGE.to_string()
                } else {
                    message
                }
            }
        }
    }
}

/// Pull the `message` field out of an error body, if there is one.
///
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_uses_body_message() {
        let error = GithubError::Http {
            status: 404,
            body: br#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#
                .to_vec(),
        };
        assert_eq!(error.user_message(), "Not Found");
        assert!(error.to_string().contains("404"));
    }

    #[test]
    fn test_http_error_unreadable_body() {
        let error = GithubError::Http {
            status: 500,
            body: b"<html>oops</html>".to_vec(),
        };
        assert_eq!(error.user_message(), ERROR_PARSING_MESSAGE);

        let error = GithubError::Http {
            status: 502,
            body: br#"{"other":"field"}"#.to_vec(),
        };
        assert_eq!(error.user_message(), ERROR_PARSING_MESSAGE);
    }

    #[test]
    fn test_decode_error_keeps_its_message() {
        let decode = serde_json::from_str::<u32>("not json").unwrap_err();
        let expected = decode.to_string();
        let error: GithubError = decode.into();
        assert_eq!(error.user_message(), expected);
    }

    #[test]
    fn test_empty_message_falls_back_to_unknown() {
        let error = GithubError::Other(String::new());
        assert_eq!(error.user_message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(br#"{"message":"Bad credentials"}"#),
            Some("Bad credentials".to_string())
        );
        assert_eq!(extract_error_message(br#"{"message":""}"#), None);
        assert_eq!(extract_error_message(b""), None);
    }
}
