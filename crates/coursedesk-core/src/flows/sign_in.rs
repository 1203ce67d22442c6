use crate::api::{ApiClient, ApiError, BasicCredentials};
use crate::auth::SessionStore;
use crate::models::AuthGrant;

use super::form::{FormState, Ticket};
use super::{settle, Transition, CANCEL_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInField {
    EmailAddress,
    Password,
}

impl SignInField {
    pub const ALL: [SignInField; 2] = [SignInField::EmailAddress, SignInField::Password];

    pub fn label(&self) -> &'static str {
        match self {
            SignInField::EmailAddress => "Email Address",
            SignInField::Password => "Password",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, SignInField::Password)
    }
}

/// Sign-in form: email and password validated with `GET /users`.
#[derive(Debug, Clone)]
pub struct SignInForm {
    email_address: String,
    password: String,
    return_to: String,
    state: FormState,
}

impl SignInForm {
    /// `return_to` is where a successful sign-in navigates.
    pub fn new(return_to: impl Into<String>) -> Self {
        Self {
            email_address: String::new(),
            password: String::new(),
            return_to: return_to.into(),
            state: FormState::default(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email_address = email.into();
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn return_to(&self) -> &str {
        &self.return_to
    }

    pub fn value(&self, field: SignInField) -> &str {
        match field {
            SignInField::EmailAddress => &self.email_address,
            SignInField::Password => &self.password,
        }
    }

    fn value_mut(&mut self, field: SignInField) -> &mut String {
        match field {
            SignInField::EmailAddress => &mut self.email_address,
            SignInField::Password => &mut self.password,
        }
    }

    pub fn edit(&mut self, field: SignInField, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
    }

    pub fn push_char(&mut self, field: SignInField, c: char) {
        self.value_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: SignInField) {
        self.value_mut(field).pop();
    }

    /// Start a submission, snapshotting the typed credentials.
    pub fn begin_submit(&mut self) -> Option<(Ticket, BasicCredentials)> {
        let ticket = self.state.begin_submit()?;
        Some((
            ticket,
            BasicCredentials::new(self.email_address.clone(), self.password.clone()),
        ))
    }

    pub fn resolve(
        &mut self,
        ticket: Ticket,
        result: Result<AuthGrant, ApiError>,
        store: &mut SessionStore,
    ) -> Transition {
        let transition = settle(&mut self.state, ticket, result, store, &self.return_to);
        if matches!(transition, Transition::Success { .. }) {
            self.password.clear();
        }
        transition
    }

    /// Send the form and settle the reply.
    pub async fn submit(&mut self, api: &ApiClient, store: &mut SessionStore) -> Transition {
        let Some((ticket, credentials)) = self.begin_submit() else {
            return Transition::Ignored;
        };
        let result = api.sign_in(&credentials).await;
        self.resolve(ticket, result, store)
    }

    /// Discard edits and leave. No request is sent.
    pub fn cancel(&mut self) -> Transition {
        self.email_address.clear();
        self.password.clear();
        self.state.reset();
        Transition::Cancelled {
            navigate_to: CANCEL_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySlot;
    use crate::flows::Phase;
    use crate::models::Identity;

    fn grant() -> AuthGrant {
        AuthGrant {
            user: Identity {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                email_address: "a@b.com".to_string(),
                id: "1".to_string(),
            },
            token: "t".to_string(),
        }
    }

    fn filled_form() -> SignInForm {
        let mut form = SignInForm::new("/account");
        form.edit(SignInField::EmailAddress, "a@b.com");
        form.edit(SignInField::Password, "secret");
        form
    }

    #[test]
    fn test_begin_submit_snapshots_fields() {
        let mut form = filled_form();
        let (_, creds) = form.begin_submit().unwrap();
        assert_eq!(creds.email, "a@b.com");
        assert_eq!(creds.password, "secret");
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_success_signs_in_and_returns() {
        let mut store = SessionStore::new(MemorySlot::new());
        let mut form = filled_form();
        let (ticket, _) = form.begin_submit().unwrap();

        let transition = form.resolve(ticket, Ok(grant()), &mut store);

        assert_eq!(
            transition,
            Transition::Success {
                navigate_to: "/account".to_string()
            }
        );
        assert_eq!(form.state().phase(), Phase::Success);
        assert!(store.is_authenticated());
        assert_eq!(form.value(SignInField::Password), "");
    }

    #[test]
    fn test_rejection_sets_errors() {
        let mut store = SessionStore::new(MemorySlot::new());
        let mut form = filled_form();
        let (ticket, _) = form.begin_submit().unwrap();

        let result = Err(ApiError::Rejected(vec!["Invalid credentials".to_string()]));
        let transition = form.resolve(ticket, result, &mut store);

        assert_eq!(transition, Transition::Rejected);
        assert_eq!(form.state().errors(), ["Invalid credentials"]);
        assert!(!store.is_authenticated());
        // Fields survive so the user can fix them
        assert_eq!(form.value(SignInField::EmailAddress), "a@b.com");
    }

    #[test]
    fn test_stale_reply_is_discarded() {
        let mut store = SessionStore::new(MemorySlot::new());
        let mut form = filled_form();
        let (ticket, _) = form.begin_submit().unwrap();

        assert_eq!(
            form.cancel(),
            Transition::Cancelled {
                navigate_to: "/courses"
            }
        );
        let transition = form.resolve(ticket, Ok(grant()), &mut store);

        assert_eq!(transition, Transition::Ignored);
        assert!(!store.is_authenticated());
        assert_eq!(form.state().phase(), Phase::Idle);
    }

    #[test]
    fn test_cancel_clears_fields() {
        let mut form = filled_form();
        form.cancel();
        assert_eq!(form.value(SignInField::EmailAddress), "");
        assert_eq!(form.value(SignInField::Password), "");
    }
}
