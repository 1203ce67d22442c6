//! Core library for coursedesk.
//!
//! Everything the front-end needs to gate views behind a signed-in session:
//!
//! - `api`: REST client for the `/api/users` endpoints
//! - `auth`: the session store and its persistence slots
//! - `router`: route table, path matching and navigation history
//! - `guard`: the access guard for protected routes
//! - `flows`: sign-in, sign-up and sign-out
//! - `config`: on-disk configuration and environment overrides

pub mod api;
pub mod auth;
pub mod config;
pub mod flows;
pub mod guard;
pub mod models;
pub mod router;

pub use api::{ApiClient, ApiError};
pub use auth::{Credential, Session, SessionStore};
pub use config::Config;
pub use guard::{AccessGuard, Resolution};
pub use models::{Identity, NewAccount};
