//! Data models exchanged with the users API.
//!
//! - `Identity`: the signed-in user snapshot held by the session
//! - `NewAccount`: the sign-up request body
//! - `AuthGrant`: the success body of sign-in and sign-up

pub mod user;

pub use user::{AuthGrant, Identity, NewAccount};
