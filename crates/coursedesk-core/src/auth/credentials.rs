use anyhow::{Context, Result};
use keyring::Entry;

use super::slot::{SessionRecord, SessionSlot};

const SERVICE_NAME: &str = "coursedesk";

/// Keychain account the session record is stored under
const SESSION_ACCOUNT: &str = "session";

/// Keeps the whole session record in the OS keychain so the credential
/// never sits on disk in cleartext.
pub struct KeyringSlot {
    account: String,
}

impl KeyringSlot {
    pub fn new() -> Self {
        Self {
            account: SESSION_ACCOUNT.to_string(),
        }
    }

    #[cfg(test)]
    fn with_account(account: &str) -> Self {
        Self {
            account: account.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(SERVICE_NAME, &self.account).context("Failed to create keyring entry")
    }
}

impl Default for KeyringSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSlot for KeyringSlot {
    fn load(&self) -> Result<Option<SessionRecord>> {
        match self.entry()?.get_password() {
            Ok(secret) => Ok(Some(
                serde_json::from_str(&secret).context("Failed to parse session from keychain")?,
            )),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve session from keychain"),
        }
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        let secret = serde_json::to_string(record)?;
        self.entry()?
            .set_password(&secret)
            .context("Failed to store session in keychain")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete session from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credential;
    use crate::models::Identity;
    use chrono::Utc;

    #[test]
    fn test_keyring_slot_round_trip() {
        let slot = KeyringSlot::with_account(&format!("test-{}", std::process::id()));
        let record = SessionRecord {
            user: Identity {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                email_address: "a@b.com".to_string(),
                id: "1".to_string(),
            },
            credential: Credential::new("t"),
            signed_in_at: Utc::now(),
        };

        // CI machines often have no keychain service running
        if let Err(e) = slot.save(&record) {
            eprintln!("skipping, no keychain available: {e:#}");
            return;
        }

        let loaded = slot.load().unwrap();
        slot.clear().unwrap();
        assert_eq!(loaded, Some(record));
        assert!(slot.load().unwrap().is_none());
    }
}
