//! Authentication module for the signed-in session.
//!
//! This module provides:
//! - `SessionStore`: the single owner of the current `Session`; only
//!   `sign_in` and `sign_out` mutate it or touch persistence
//! - `SessionSlot`: where the session survives between runs
//!   (`FileSlot`, `KeyringSlot`, `MemorySlot`)

pub mod credentials;
pub mod session;
pub mod slot;

pub use credentials::KeyringSlot;
pub use session::{Credential, Session, SessionStore};
pub use slot::{FileSlot, MemorySlot, SessionRecord, SessionSlot};
