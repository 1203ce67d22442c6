use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Email and password as typed into the sign-in form.
#[derive(Clone)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Base64 of `email:password`
    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.email, self.password))
    }

    pub fn header_value(&self) -> String {
        format!("Basic {}", self.encode())
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let creds = BasicCredentials::new("a@b.com", "secret");
        assert_eq!(creds.encode(), "YUBiLmNvbTpzZWNyZXQ=");
        assert_eq!(creds.header_value(), "Basic YUBiLmNvbTpzZWNyZXQ=");
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = BasicCredentials::new("a@b.com", "secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("a@b.com"));
        assert!(!printed.contains("secret"));
    }
}
