use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::Identity;

use super::slot::{SessionRecord, SessionSlot};

/// Opaque bearer token handed out by the API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SignedIn {
    user: Identity,
    credential: Credential,
    signed_in_at: DateTime<Utc>,
}

/// Read-only snapshot of who is signed in.
///
/// User and credential are stored together, so the session is
/// authenticated exactly when both are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    signed_in: Option<SignedIn>,
}

impl Session {
    pub fn user(&self) -> Option<&Identity> {
        self.signed_in.as_ref().map(|s| &s.user)
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.signed_in.as_ref().map(|s| &s.credential)
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in.as_ref().map(|s| s.signed_in_at)
    }

    pub fn is_authenticated(&self) -> bool {
        self.signed_in.is_some()
    }

    /// Minutes since sign-in (for display)
    pub fn minutes_signed_in(&self) -> Option<i64> {
        self.signed_in_at()
            .map(|at| (Utc::now() - at).num_minutes().max(0))
    }
}

/// Single owner of the current session.
///
/// Consumers read through `session()`. `sign_in` and `sign_out` are the only
/// mutations and the only code that writes the persistence slot.
pub struct SessionStore {
    slot: Box<dyn SessionSlot>,
    session: Session,
}

impl SessionStore {
    /// Create an empty store. Call `restore` once at startup.
    pub fn new(slot: impl SessionSlot + 'static) -> Self {
        Self::from_box(Box::new(slot))
    }

    pub fn from_box(slot: Box<dyn SessionSlot>) -> Self {
        Self {
            slot,
            session: Session::default(),
        }
    }

    /// Rehydrate from the slot. Missing or corrupt records leave the
    /// session empty; this never fails. Returns whether a session was restored.
    pub fn restore(&mut self) -> bool {
        match self.slot.load() {
            Ok(Some(record)) if record.is_usable() => {
                debug!(user_id = %record.user.id, "Session restored");
                self.session = Session {
                    signed_in: Some(SignedIn {
                        user: record.user,
                        credential: record.credential,
                        signed_in_at: record.signed_in_at,
                    }),
                };
                true
            }
            Ok(Some(_)) => {
                warn!("Stored session is incomplete, ignoring");
                false
            }
            Ok(None) => {
                debug!("No stored session");
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to load stored session, ignoring");
                false
            }
        }
    }

    /// Replace the current user and credential and persist them.
    pub fn sign_in(&mut self, user: Identity, credential: Credential) {
        let record = SessionRecord {
            user,
            credential,
            signed_in_at: Utc::now(),
        };

        if let Err(e) = self.slot.save(&record) {
            warn!(error = %e, "Failed to save session");
        }

        info!(user_id = %record.user.id, "Signed in");
        self.session = Session {
            signed_in: Some(SignedIn {
                user: record.user,
                credential: record.credential,
                signed_in_at: record.signed_in_at,
            }),
        };
    }

    /// Drop the session and its persisted copy. Safe to call repeatedly.
    pub fn sign_out(&mut self) {
        if self.session.is_authenticated() {
            info!("Signed out");
        }
        self.session = Session::default();

        if let Err(e) = self.slot.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}
