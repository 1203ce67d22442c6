use reqwest::StatusCode;
use thiserror::Error;

use super::status::StatusAction;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// How a failed request surfaces to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBucket {
    /// Shown as field errors; the user may retry the same form.
    Validation,
    /// Navigates to the not-found view.
    NotFound,
    /// Navigates to the generic error view.
    Unclassified,
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Build the error for a reply its status table did not accept.
    pub fn from_reply(action: StatusAction, status: StatusCode, body: &str) -> Self {
        match action {
            StatusAction::NotFound => ApiError::NotFound(Self::truncate_body(body)),
            StatusAction::Reject(shape) => match shape.messages(body) {
                Ok(messages) => ApiError::Rejected(messages),
                Err(e) => ApiError::InvalidResponse(format!(
                    "Status {}: unreadable rejection body: {}",
                    status, e
                )),
            },
            StatusAction::Accept | StatusAction::Fail => ApiError::UnexpectedStatus {
                status,
                body: Self::truncate_body(body),
            },
        }
    }

    pub fn bucket(&self) -> ErrorBucket {
        match self {
            ApiError::Rejected(_) => ErrorBucket::Validation,
            ApiError::NotFound(_) => ErrorBucket::NotFound,
            ApiError::UnexpectedStatus { .. }
            | ApiError::NetworkError(_)
            | ApiError::InvalidResponse(_) => ErrorBucket::Unclassified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::status::RejectionBody;

    #[test]
    fn test_from_reply_buckets() {
        let err = ApiError::from_reply(StatusAction::NotFound, StatusCode::NOT_FOUND, "");
        assert_eq!(err.bucket(), ErrorBucket::NotFound);

        let err = ApiError::from_reply(
            StatusAction::Reject(RejectionBody::Error),
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Invalid credentials"}"#,
        );
        assert_eq!(err.bucket(), ErrorBucket::Validation);
        assert!(matches!(err, ApiError::Rejected(ref m) if m == &["Invalid credentials"]));

        let err = ApiError::from_reply(StatusAction::Fail, StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.bucket(), ErrorBucket::Unclassified);
    }

    #[test]
    fn test_unreadable_rejection_is_unclassified() {
        let err = ApiError::from_reply(
            StatusAction::Reject(RejectionBody::Errors),
            StatusCode::BAD_REQUEST,
            "<html>bad request</html>",
        );
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert_eq!(err.bucket(), ErrorBucket::Unclassified);
    }

    #[test]
    fn test_truncate_body() {
        let short = "short";
        assert_eq!(ApiError::truncate_body(short), "short");

        let long = "é".repeat(400);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.contains("truncated, 800 total bytes"));
    }
}
