//! REST API client module for the course catalog's users endpoints.
//!
//! This module provides the `ApiClient` for signing in (`GET /api/users`
//! with Basic auth) and signing up (`POST /api/users`). Every reply is
//! classified through a per-flow `StatusTable` before it reaches a form.

pub mod basic;
pub mod client;
pub mod error;
pub mod status;

pub use basic::BasicCredentials;
pub use client::ApiClient;
pub use error::{ApiError, ErrorBucket};
pub use status::{RejectionBody, StatusAction, StatusTable};
