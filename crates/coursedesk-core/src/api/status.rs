//! Status-code dispatch tables for the credential flows.
//!
//! Each flow declares which statuses it accepts, which carry validation
//! messages (and in what body shape), and which mean the route is missing.
//! Anything a table does not list is an unclassified failure.

use reqwest::StatusCode;
use serde::Deserialize;

/// Where a rejection reply keeps its human-readable messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionBody {
    /// `{ "error": "..." }`
    Error,
    /// `{ "errors": ["...", ...] }`
    Errors,
    /// `{ "message": "..." }`
    Message,
}

#[derive(Deserialize)]
struct ErrorField {
    error: String,
}

#[derive(Deserialize)]
struct ErrorsField {
    errors: Vec<String>,
}

#[derive(Deserialize)]
struct MessageField {
    message: String,
}

impl RejectionBody {
    /// Pull the messages out of a rejection body, keeping server order.
    pub fn messages(self, body: &str) -> Result<Vec<String>, serde_json::Error> {
        Ok(match self {
            RejectionBody::Error => vec![serde_json::from_str::<ErrorField>(body)?.error],
            RejectionBody::Errors => serde_json::from_str::<ErrorsField>(body)?.errors,
            RejectionBody::Message => vec![serde_json::from_str::<MessageField>(body)?.message],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Accept,
    NotFound,
    Reject(RejectionBody),
    Fail,
}

#[derive(Debug)]
pub struct StatusTable {
    rules: &'static [(u16, StatusAction)],
}

impl StatusTable {
    pub const fn new(rules: &'static [(u16, StatusAction)]) -> Self {
        Self { rules }
    }

    pub fn classify(&self, status: StatusCode) -> StatusAction {
        self.rules
            .iter()
            .find(|(code, _)| *code == status.as_u16())
            .map(|(_, action)| *action)
            .unwrap_or(StatusAction::Fail)
    }
}

pub const SIGN_IN: StatusTable = StatusTable::new(&[
    (200, StatusAction::Accept),
    (401, StatusAction::Reject(RejectionBody::Error)),
    (404, StatusAction::NotFound),
]);

pub const SIGN_UP: StatusTable = StatusTable::new(&[
    (201, StatusAction::Accept),
    (400, StatusAction::Reject(RejectionBody::Errors)),
    (404, StatusAction::NotFound),
    (409, StatusAction::Reject(RejectionBody::Message)),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_table() {
        assert_eq!(SIGN_IN.classify(StatusCode::OK), StatusAction::Accept);
        assert_eq!(
            SIGN_IN.classify(StatusCode::UNAUTHORIZED),
            StatusAction::Reject(RejectionBody::Error)
        );
        assert_eq!(SIGN_IN.classify(StatusCode::NOT_FOUND), StatusAction::NotFound);
        // Statuses owned by sign-up are failures here
        assert_eq!(SIGN_IN.classify(StatusCode::CREATED), StatusAction::Fail);
        assert_eq!(SIGN_IN.classify(StatusCode::BAD_REQUEST), StatusAction::Fail);
        assert_eq!(SIGN_IN.classify(StatusCode::CONFLICT), StatusAction::Fail);
        assert_eq!(SIGN_IN.classify(StatusCode::INTERNAL_SERVER_ERROR), StatusAction::Fail);
    }

    #[test]
    fn test_sign_up_table() {
        assert_eq!(SIGN_UP.classify(StatusCode::CREATED), StatusAction::Accept);
        assert_eq!(
            SIGN_UP.classify(StatusCode::BAD_REQUEST),
            StatusAction::Reject(RejectionBody::Errors)
        );
        assert_eq!(
            SIGN_UP.classify(StatusCode::CONFLICT),
            StatusAction::Reject(RejectionBody::Message)
        );
        assert_eq!(SIGN_UP.classify(StatusCode::NOT_FOUND), StatusAction::NotFound);
        assert_eq!(SIGN_UP.classify(StatusCode::OK), StatusAction::Fail);
        assert_eq!(SIGN_UP.classify(StatusCode::UNAUTHORIZED), StatusAction::Fail);
        assert_eq!(SIGN_UP.classify(StatusCode::BAD_GATEWAY), StatusAction::Fail);
    }

    #[test]
    fn test_rejection_messages_keep_order() {
        let body = r#"{"errors":["First Name is required","Password is required"]}"#;
        assert_eq!(
            RejectionBody::Errors.messages(body).unwrap(),
            vec!["First Name is required", "Password is required"]
        );
        assert_eq!(
            RejectionBody::Error.messages(r#"{"error":"Invalid credentials"}"#).unwrap(),
            vec!["Invalid credentials"]
        );
        assert_eq!(
            RejectionBody::Message.messages(r#"{"message":"Email already exists"}"#).unwrap(),
            vec!["Email already exists"]
        );
    }

    #[test]
    fn test_rejection_wrong_shape_is_error() {
        assert!(RejectionBody::Error.messages(r#"{"message":"nope"}"#).is_err());
        assert!(RejectionBody::Errors.messages("not json").is_err());
    }
}
