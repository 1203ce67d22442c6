//! Credential flows: sign-in, sign-up and sign-out.
//!
//! Each form owns one `FormState` that walks
//! `Idle -> Submitting -> {Success, Rejected, HardFailure}`. A submission
//! issues exactly one request; its reply is classified by the API client
//! and settled here into a session mutation, field errors, or a navigation.

pub mod form;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

pub use form::{FormState, Phase, Ticket};
pub use sign_in::{SignInField, SignInForm};
pub use sign_out::sign_out;
pub use sign_up::{SignUpField, SignUpForm};

use tracing::{debug, error, warn};

use crate::api::{ApiError, ErrorBucket};
use crate::auth::{Credential, SessionStore};
use crate::models::AuthGrant;
use crate::router::paths;

/// What the front-end should do after a flow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Signed in; go back to where the flow was started from.
    Success { navigate_to: String },
    /// Field errors are on the form; stay put.
    Rejected,
    HardFailure { navigate_to: &'static str },
    Cancelled { navigate_to: &'static str },
    /// Redundant submit or a reply for a form that has moved on.
    Ignored,
}

impl Transition {
    pub fn navigate_to(&self) -> Option<&str> {
        match self {
            Transition::Success { navigate_to } => Some(navigate_to.as_str()),
            Transition::HardFailure { navigate_to } | Transition::Cancelled { navigate_to } => {
                Some(*navigate_to)
            }
            Transition::Rejected | Transition::Ignored => None,
        }
    }
}

/// Where Cancel sends the user.
const CANCEL_PATH: &str = paths::COURSES;

/// Settle a reply against the form that sent it.
pub(crate) fn settle(
    form: &mut FormState,
    ticket: Ticket,
    result: Result<AuthGrant, ApiError>,
    store: &mut SessionStore,
    return_to: &str,
) -> Transition {
    if !form.is_current(ticket) {
        debug!("Discarding reply for a stale submission");
        return Transition::Ignored;
    }

    match result {
        Ok(grant) => {
            store.sign_in(grant.user, Credential::new(grant.token));
            form.finish(Phase::Success);
            Transition::Success {
                navigate_to: return_to.to_string(),
            }
        }
        Err(ApiError::Rejected(messages)) => {
            debug!(count = messages.len(), "Submission rejected");
            form.reject(messages);
            Transition::Rejected
        }
        Err(e) => {
            let navigate_to = match e.bucket() {
                ErrorBucket::NotFound => {
                    warn!(error = %e, "Users endpoint not found");
                    paths::NOT_FOUND
                }
                ErrorBucket::Validation | ErrorBucket::Unclassified => {
                    error!(error = %e, "Submission failed");
                    paths::ERROR
                }
            };
            form.finish(Phase::HardFailure);
            Transition::HardFailure { navigate_to }
        }
    }
}
