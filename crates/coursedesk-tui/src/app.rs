//! Application state management for coursedesk.
//!
//! This module contains the `App` struct that owns the session store, the
//! API client and the navigation history, and turns flow transitions into
//! navigations.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use coursedesk_core::auth::{FileSlot, SessionSlot, SessionStore};
use coursedesk_core::config::EMAIL_ENV;
use coursedesk_core::flows::{self, SignInField, SignInForm, SignUpField, SignUpForm, Transition};
use coursedesk_core::router::{paths, Navigator, RouteTable, View};
use coursedesk_core::{AccessGuard, ApiClient, Config, Resolution};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for any form field.
/// 128 chars accommodates password managers and passphrases.
const MAX_FIELD_LENGTH: usize = 128;

/// Maximum length for the go-to-path prompt.
const MAX_PATH_LENGTH: usize = 256;

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    EnteringPath,
    Quitting,
}

/// Form focus: one of the fields, or one of the two buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(usize),
    Submit,
    Cancel,
}

impl FormFocus {
    pub fn next(self, field_count: usize) -> Self {
        match self {
            FormFocus::Field(i) if i + 1 < field_count => FormFocus::Field(i + 1),
            FormFocus::Field(_) => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Cancel,
            FormFocus::Cancel => FormFocus::Field(0),
        }
    }

    pub fn prev(self, field_count: usize) -> Self {
        match self {
            FormFocus::Field(0) => FormFocus::Cancel,
            FormFocus::Field(i) => FormFocus::Field(i - 1),
            FormFocus::Submit => FormFocus::Field(field_count.saturating_sub(1)),
            FormFocus::Cancel => FormFocus::Submit,
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    /// Where `config` is written back; `None` keeps it in memory only
    pub config_path: Option<PathBuf>,
    pub api: ApiClient,
    pub store: SessionStore,
    pub routes: RouteTable,
    pub nav: Navigator,

    // UI State
    pub state: AppState,
    pub view: View,
    pub path_input: String,
    pub status_message: Option<String>,

    // Form state
    pub sign_in: SignInForm,
    pub sign_up: SignUpForm,
    pub focus: FormFocus,
}

impl App {
    /// Create a new application instance and restore any saved session
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let api = ApiClient::new(config.api_base_url())?;
        debug!(base_url = %api.base_url(), "API client configured");

        let slot = config.session_slot().unwrap_or_else(|e| {
            warn!(error = %e, "Configured session slot unavailable, using ./cache");
            Box::new(FileSlot::new(PathBuf::from("./cache"))) as Box<dyn SessionSlot>
        });
        let mut store = SessionStore::from_box(slot);
        store.restore();

        let mut app = Self::with_parts(config, api, store);
        app.config_path = Config::config_path().ok();
        Ok(app)
    }

    /// Assemble an app from already-built services
    pub fn with_parts(config: Config, api: ApiClient, store: SessionStore) -> Self {
        Self {
            config,
            config_path: None,
            api,
            store,
            routes: RouteTable::standard(),
            nav: Navigator::default(),

            state: AppState::Normal,
            view: View::Home,
            path_input: String::new(),
            status_message: None,

            sign_in: SignInForm::new(paths::HOME),
            sign_up: SignUpForm::new(paths::HOME),
            focus: FormFocus::Field(0),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to a path, pushing it onto history.
    pub fn navigate(&mut self, path: &str) {
        let origin = self.return_origin();
        self.route(path, true, origin);
    }

    /// Go back one step in history.
    pub fn go_back(&mut self) {
        // Taken before popping, so a form reached by going back returns
        // to the page we left rather than to itself
        let origin = self.return_origin();
        if self.nav.back() {
            let current = self.nav.current().to_string();
            self.route(&current, false, origin);
        }
    }

    /// `origin` is where a sign-in or sign-up form opened here returns to.
    fn route(&mut self, path: &str, push: bool, origin: String) {
        match AccessGuard::resolve(&self.routes, self.store.session(), path) {
            Resolution::Redirect { to, from } => {
                if push {
                    self.nav.push(to);
                } else {
                    self.nav.replace(to);
                }
                self.status_message = Some("Please sign in to continue".to_string());
                self.open_sign_in(from);
            }
            Resolution::Render { view, .. } => {
                if push {
                    self.nav.push(path);
                }
                match view {
                    View::SignOut => {
                        let home = flows::sign_out(&mut self.store);
                        self.nav.replace(home);
                        self.view = View::Home;
                        self.status_message = Some("Signed out".to_string());
                    }
                    View::SignIn => self.open_sign_in(origin),
                    View::SignUp => self.open_sign_up(origin),
                    other => self.view = other,
                }
            }
        }
    }

    /// The path a sign-in or sign-up form opened now should go back to.
    fn return_origin(&self) -> String {
        match self.view {
            View::SignIn => self.sign_in.return_to().to_string(),
            View::SignUp => self.sign_up.return_to().to_string(),
            _ => self.nav.current().to_string(),
        }
    }

    fn open_sign_in(&mut self, return_to: String) {
        let prefill = std::env::var(EMAIL_ENV)
            .ok()
            .or_else(|| self.config.last_email.clone())
            .unwrap_or_default();
        self.sign_in = SignInForm::new(return_to).with_email(prefill);
        self.focus = if self.sign_in.value(SignInField::EmailAddress).is_empty() {
            FormFocus::Field(0)
        } else {
            FormFocus::Field(1)
        };
        self.view = View::SignIn;
    }

    fn open_sign_up(&mut self, return_to: String) {
        self.sign_up = SignUpForm::new(return_to);
        self.focus = FormFocus::Field(0);
        self.view = View::SignUp;
    }

    /// Follow the "sign up instead" / "sign in instead" link under a form.
    pub fn switch_form(&mut self) {
        match self.view {
            View::SignIn => self.navigate(paths::SIGN_UP),
            View::SignUp => self.navigate(paths::SIGN_IN),
            _ => {}
        }
    }

    // =========================================================================
    // Credential flows
    // =========================================================================

    pub fn form_field_count(&self) -> usize {
        match self.view {
            View::SignIn => SignInField::ALL.len(),
            View::SignUp => SignUpField::ALL.len(),
            _ => 0,
        }
    }

    /// Submit whichever form is showing.
    pub async fn submit_form(&mut self) {
        let transition = match self.view {
            View::SignIn => self.sign_in.submit(&self.api, &mut self.store).await,
            View::SignUp => self.sign_up.submit(&self.api, &mut self.store).await,
            _ => return,
        };
        self.apply_transition(transition);
    }

    pub fn cancel_form(&mut self) {
        let transition = match self.view {
            View::SignIn => self.sign_in.cancel(),
            View::SignUp => self.sign_up.cancel(),
            _ => return,
        };
        self.apply_transition(transition);
    }

    pub fn apply_transition(&mut self, transition: Transition) {
        match &transition {
            Transition::Success { .. } => {
                if let Some(user) = self.store.session().user() {
                    info!(user_id = %user.id, "Credential flow succeeded");
                    self.status_message = Some(format!("Signed in as {}", user.full_name()));
                    self.config.last_email = Some(user.email_address.clone());
                    if let Some(ref path) = self.config_path {
                        if let Err(e) = self.config.save_to(path) {
                            warn!(error = %e, "Failed to save config");
                        }
                    }
                }
            }
            Transition::Rejected => {
                self.focus = FormFocus::Field(0);
            }
            Transition::HardFailure { .. } | Transition::Cancelled { .. } | Transition::Ignored => {}
        }

        if let Some(path) = transition.navigate_to() {
            let path = path.to_string();
            self.navigate(&path);
        }
    }

    /// Type a character into the focused field.
    pub fn type_char(&mut self, c: char) {
        let FormFocus::Field(index) = self.focus else {
            return;
        };
        match self.view {
            View::SignIn => {
                if let Some(&field) = SignInField::ALL.get(index) {
                    if can_add_field_char(self.sign_in.value(field).chars().count(), c) {
                        self.sign_in.push_char(field, c);
                    }
                }
            }
            View::SignUp => {
                if let Some(&field) = SignUpField::ALL.get(index) {
                    if can_add_field_char(self.sign_up.value(field).chars().count(), c) {
                        self.sign_up.push_char(field, c);
                    }
                }
            }
            _ => {}
        }
    }

    pub fn delete_char(&mut self) {
        let FormFocus::Field(index) = self.focus else {
            return;
        };
        match self.view {
            View::SignIn => {
                if let Some(&field) = SignInField::ALL.get(index) {
                    self.sign_in.pop_char(field);
                }
            }
            View::SignUp => {
                if let Some(&field) = SignUpField::ALL.get(index) {
                    self.sign_up.pop_char(field);
                }
            }
            _ => {}
        }
    }

    // =========================================================================
    // Go-to-path prompt
    // =========================================================================

    pub fn start_path_prompt(&mut self) {
        self.path_input = "/".to_string();
        self.state = AppState::EnteringPath;
    }

    pub fn push_path_char(&mut self, c: char) {
        if self.path_input.len() < MAX_PATH_LENGTH && !c.is_control() && !c.is_whitespace() {
            self.path_input.push(c);
        }
    }

    pub fn finish_path_prompt(&mut self) {
        self.state = AppState::Normal;
        let input = std::mem::take(&mut self.path_input);
        let path = if input.starts_with('/') {
            input
        } else {
            format!("/{}", input)
        };
        self.navigate(&path);
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a field character should be accepted
pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
