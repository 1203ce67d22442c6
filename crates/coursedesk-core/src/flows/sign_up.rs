use crate::api::{ApiClient, ApiError};
use crate::auth::SessionStore;
use crate::models::{AuthGrant, NewAccount};

use super::form::{FormState, Ticket};
use super::{settle, Transition, CANCEL_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpField {
    FirstName,
    LastName,
    EmailAddress,
    Password,
}

impl SignUpField {
    pub const ALL: [SignUpField; 4] = [
        SignUpField::FirstName,
        SignUpField::LastName,
        SignUpField::EmailAddress,
        SignUpField::Password,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SignUpField::FirstName => "First Name",
            SignUpField::LastName => "Last Name",
            SignUpField::EmailAddress => "Email Address",
            SignUpField::Password => "Password",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, SignUpField::Password)
    }
}

/// Sign-up form: creates the account with `POST /users` and signs in.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    account: NewAccount,
    return_to: String,
    state: FormState,
}

impl SignUpForm {
    pub fn new(return_to: impl Into<String>) -> Self {
        Self {
            account: NewAccount::default(),
            return_to: return_to.into(),
            state: FormState::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn return_to(&self) -> &str {
        &self.return_to
    }

    pub fn value(&self, field: SignUpField) -> &str {
        match field {
            SignUpField::FirstName => &self.account.first_name,
            SignUpField::LastName => &self.account.last_name,
            SignUpField::EmailAddress => &self.account.email_address,
            SignUpField::Password => &self.account.password,
        }
    }

    fn value_mut(&mut self, field: SignUpField) -> &mut String {
        match field {
            SignUpField::FirstName => &mut self.account.first_name,
            SignUpField::LastName => &mut self.account.last_name,
            SignUpField::EmailAddress => &mut self.account.email_address,
            SignUpField::Password => &mut self.account.password,
        }
    }

    pub fn edit(&mut self, field: SignUpField, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
    }

    pub fn push_char(&mut self, field: SignUpField, c: char) {
        self.value_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: SignUpField) {
        self.value_mut(field).pop();
    }

    pub fn begin_submit(&mut self) -> Option<(Ticket, NewAccount)> {
        let ticket = self.state.begin_submit()?;
        Some((ticket, self.account.clone()))
    }

    pub fn resolve(
        &mut self,
        ticket: Ticket,
        result: Result<AuthGrant, ApiError>,
        store: &mut SessionStore,
    ) -> Transition {
        let transition = settle(&mut self.state, ticket, result, store, &self.return_to);
        if matches!(transition, Transition::Success { .. }) {
            self.account.password.clear();
        }
        transition
    }

    pub async fn submit(&mut self, api: &ApiClient, store: &mut SessionStore) -> Transition {
        let Some((ticket, account)) = self.begin_submit() else {
            return Transition::Ignored;
        };
        let result = api.sign_up(&account).await;
        self.resolve(ticket, result, store)
    }

    pub fn cancel(&mut self) -> Transition {
        self.account = NewAccount::default();
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

    #[test]
    fn test_begin_submit_snapshots_account() {
        let mut form = SignUpForm::new("/");
        form.edit(SignUpField::FirstName, "Jo");
        form.push_char(SignUpField::LastName, 'D');
        form.edit(SignUpField::EmailAddress, "jo@example.com");
        form.edit(SignUpField::Password, "pw");
        form.pop_char(SignUpField::Password);

        let (_, account) = form.begin_submit().unwrap();
        assert_eq!(account.first_name, "Jo");
        assert_eq!(account.last_name, "D");
        assert_eq!(account.email_address, "jo@example.com");
        assert_eq!(account.password, "p");
    }

    #[test]
    fn test_validation_errors_in_order() {
        let mut store = SessionStore::new(MemorySlot::new());
        let mut form = SignUpForm::new("/");
        let (ticket, _) = form.begin_submit().unwrap();

        let result = Err(ApiError::Rejected(vec![
            "First Name is required".to_string(),
            "Password is required".to_string(),
        ]));
        assert_eq!(form.resolve(ticket, result, &mut store), Transition::Rejected);
        assert_eq!(
            form.state().errors(),
            ["First Name is required", "Password is required"]
        );
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_invalid_response_goes_to_error() {
        let mut store = SessionStore::new(MemorySlot::new());
        let mut form = SignUpForm::new("/");
        let (ticket, _) = form.begin_submit().unwrap();

        let result = Err(ApiError::InvalidResponse("garbage".to_string()));
        assert_eq!(
            form.resolve(ticket, result, &mut store),
            Transition::HardFailure { navigate_to: "/error" }
        );
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut form = SignUpForm::new("/");
        form.edit(SignUpField::FirstName, "Jo");
        assert_eq!(
            form.cancel(),
            Transition::Cancelled {
                navigate_to: "/courses"
            }
        );
        assert_eq!(form.value(SignUpField::FirstName), "");
    }
}
