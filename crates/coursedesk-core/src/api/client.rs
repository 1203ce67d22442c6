//! API client for the users endpoints.
//!
//! Sign-in and sign-up both hit `{base}/users`; the flows own the status
//! tables that decide what each reply means.

use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client, Response};
use tracing::debug;

use crate::models::{AuthGrant, NewAccount};

use super::basic::BasicCredentials;
use super::error::ApiError;
use super::status::{self, StatusAction, StatusTable};

// ============================================================================
// Constants
// ============================================================================

/// Default API root when neither config nor environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Users collection, relative to the API root.
const USERS_PATH: &str = "/users";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the course catalog.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url` (e.g. `http://host:5000/api`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}{}", self.base_url, USERS_PATH)
    }

    /// Validate credentials with `GET /users` and a Basic auth header.
    pub async fn sign_in(&self, credentials: &BasicCredentials) -> Result<AuthGrant, ApiError> {
        let url = self.users_url();
        debug!(url = %url, email = %credentials.email, "Sending sign-in request");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, credentials.header_value())
            .send()
            .await?;

        Self::read_grant(&status::SIGN_IN, response).await
    }

    /// Create an account with `POST /users`.
    pub async fn sign_up(&self, account: &NewAccount) -> Result<AuthGrant, ApiError> {
        let url = self.users_url();
        debug!(url = %url, email = %account.email_address, "Sending sign-up request");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(account)
            .send()
            .await?;

        Self::read_grant(&status::SIGN_UP, response).await
    }

    /// Classify the reply and decode the grant on an accepted status.
    async fn read_grant(table: &StatusTable, response: Response) -> Result<AuthGrant, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        let action = table.classify(status);
        debug!(%status, ?action, "Users API replied");

        match action {
            StatusAction::Accept => serde_json::from_str(&body).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse auth response: {}", e))
            }),
            other => Err(ApiError::from_reply(other, status, &body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_url_strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.users_url(), "http://localhost:5000/api/users");
    }
}
