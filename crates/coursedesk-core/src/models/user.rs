use serde::{Deserialize, Serialize};

/// Signed-in user, copied out of the API response.
///
/// Replaced wholesale on every sign-in and never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    /// Sign-in returns the key as `_id`, sign-up as `id`.
    #[serde(alias = "_id")]
    pub id: String,
}

impl Identity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

/// Success body shared by sign-in (200) and sign-up (201).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
    pub user: Identity,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_accepts_underscore_id() {
        let json = r#"{"firstName":"A","lastName":"B","emailAddress":"a@b.com","_id":"1"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, "1");
        assert_eq!(identity.first_name, "A");
        assert_eq!(identity.email_address, "a@b.com");
    }

    #[test]
    fn test_identity_accepts_plain_id() {
        let json = r#"{"firstName":"A","lastName":"B","emailAddress":"a@b.com","id":"7"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, "7");
    }

    #[test]
    fn test_grant_ignores_extra_user_fields() {
        let json = r#"{"user":{"firstName":"A","lastName":"B","emailAddress":"a@b.com","_id":"1","password":"x"},"token":"t"}"#;
        let grant: AuthGrant = serde_json::from_str(json).unwrap();
        assert_eq!(grant.token, "t");
        assert_eq!(grant.user.last_name, "B");
    }

    #[test]
    fn test_new_account_serializes_camel_case() {
        let account = NewAccount {
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            email_address: "jo@example.com".to_string(),
            password: "pw".to_string(),
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["firstName"], "Jo");
        assert_eq!(value["lastName"], "Doe");
        assert_eq!(value["emailAddress"], "jo@example.com");
        assert_eq!(value["password"], "pw");
    }

    #[test]
    fn test_full_name() {
        let identity = Identity {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email_address: "ada@example.com".to_string(),
            id: "1".to_string(),
        };
        assert_eq!(identity.full_name(), "Ada Lovelace");
    }
}
