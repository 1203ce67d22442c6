//! Access guard for protected routes.
//!
//! A pure function of the route table, the current session and the
//! requested path: either render the matched view or redirect to sign-in,
//! carrying the requested path so sign-in can return to it.

use tracing::debug;

use crate::auth::Session;
use crate::router::{paths, Params, RouteTable, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render { view: View, params: Params },
    Redirect { to: &'static str, from: String },
}

pub struct AccessGuard;

impl AccessGuard {
    pub fn resolve(table: &RouteTable, session: &Session, path: &str) -> Resolution {
        let found = table.lookup(path);

        if found.protected && !session.is_authenticated() {
            debug!(path, "Protected route without session, redirecting to sign in");
            return Resolution::Redirect {
                to: paths::SIGN_IN,
                from: path.to_string(),
            };
        }

        Resolution::Render {
            view: found.view,
            params: found.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credential, MemorySlot, SessionStore};
    use crate::models::Identity;

    fn signed_in_store() -> SessionStore {
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
        store
    }

    #[test]
    fn test_protected_route_redirects_without_session() {
        let table = RouteTable::standard();
        let store = SessionStore::new(MemorySlot::new());

        assert_eq!(
            AccessGuard::resolve(&table, store.session(), "/account"),
            Resolution::Redirect {
                to: "/signin",
                from: "/account".to_string(),
            }
        );
    }

    #[test]
    fn test_protected_route_renders_with_session() {
        let table = RouteTable::standard();
        let store = signed_in_store();

        assert_eq!(
            AccessGuard::resolve(&table, store.session(), "/account"),
            Resolution::Render {
                view: View::Account,
                params: Params::default(),
            }
        );
    }

    #[test]
    fn test_redirects_again_after_sign_out() {
        let table = RouteTable::standard();
        let mut store = signed_in_store();
        store.sign_out();

        assert!(matches!(
            AccessGuard::resolve(&table, store.session(), "/account"),
            Resolution::Redirect { .. }
        ));
    }

    #[test]
    fn test_public_routes_render_either_way() {
        let table = RouteTable::standard();
        let anonymous = SessionStore::new(MemorySlot::new());
        let signed_in = signed_in_store();

        for store in [&anonymous, &signed_in] {
            assert!(matches!(
                AccessGuard::resolve(&table, store.session(), "/courses"),
                Resolution::Render { view: View::Courses, .. }
            ));
        }
    }

    #[test]
    fn test_render_passes_params() {
        let table = RouteTable::new().protected("/courses/:id/update", View::Account);
        let store = signed_in_store();

        match AccessGuard::resolve(&table, store.session(), "/courses/7/update") {
            Resolution::Render { params, .. } => assert_eq!(params.get("id"), Some("7")),
            other => panic!("expected render, got {:?}", other),
        }
    }
}
