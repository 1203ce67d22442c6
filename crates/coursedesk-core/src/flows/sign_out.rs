use crate::auth::SessionStore;
use crate::router::paths;

/// Clear the session and return the path to land on. Renders nothing.
pub fn sign_out(store: &mut SessionStore) -> &'static str {
    store.sign_out();
    paths::HOME
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credential, MemorySlot};
    use crate::models::Identity;

    #[test]
    fn test_sign_out_goes_home_and_clears() {
        let mut store = SessionStore::new(MemorySlot::new());
        store.sign_in(
            Identity {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                email_address: "a@b.com".to_string(),
                id: "1".to_string(),
            },
            Credential::new("t"),
        );

        assert_eq!(sign_out(&mut store), "/");
        assert!(!store.is_authenticated());
        assert_eq!(sign_out(&mut store), "/");
        assert!(!store.is_authenticated());
    }
}
