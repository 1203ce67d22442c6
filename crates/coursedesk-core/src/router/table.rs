use super::pattern::{Params, RoutePattern};
use super::{paths, View};

#[derive(Debug, Clone)]
struct RouteEntry {
    pattern: RoutePattern,
    view: View,
    protected: bool,
}

/// Result of looking a path up in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub view: View,
    pub params: Params,
    pub protected: bool,
}

/// Ordered route list; the first matching entry wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &str, view: View) -> Self {
        self.entries.push(RouteEntry {
            pattern: RoutePattern::parse(pattern),
            view,
            protected: false,
        });
        self
    }

    /// Add a route that only renders for a signed-in session.
    pub fn protected(mut self, pattern: &str, view: View) -> Self {
        self.entries.push(RouteEntry {
            pattern: RoutePattern::parse(pattern),
            view,
            protected: true,
        });
        self
    }

    /// The application's route table.
    pub fn standard() -> Self {
        Self::new()
            .route(paths::HOME, View::Home)
            .route(paths::COURSES, View::Courses)
            .route(paths::SIGN_IN, View::SignIn)
            .route(paths::SIGN_UP, View::SignUp)
            .route(paths::SIGN_OUT, View::SignOut)
            .route(paths::NOT_FOUND, View::NotFound)
            .route(paths::ERROR, View::Error)
            .protected(paths::ACCOUNT, View::Account)
    }

    /// Unknown paths resolve to the not-found view.
    pub fn lookup(&self, path: &str) -> RouteMatch {
        self.entries
            .iter()
            .find_map(|entry| {
                entry.pattern.matches(path).map(|params| RouteMatch {
                    view: entry.view,
                    params,
                    protected: entry.protected,
                })
            })
            .unwrap_or(RouteMatch {
                view: View::NotFound,
                params: Params::default(),
                protected: false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_paths() {
        let table = RouteTable::standard();
        assert_eq!(table.lookup("/").view, View::Home);
        assert_eq!(table.lookup("/courses").view, View::Courses);
        assert_eq!(table.lookup("/signin").view, View::SignIn);
        assert_eq!(table.lookup("/signup").view, View::SignUp);
        assert_eq!(table.lookup("/signout").view, View::SignOut);
        assert_eq!(table.lookup("/notfound").view, View::NotFound);
        assert_eq!(table.lookup("/error").view, View::Error);

        let account = table.lookup("/account");
        assert_eq!(account.view, View::Account);
        assert!(account.protected);
        assert!(!table.lookup("/courses").protected);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let table = RouteTable::standard();
        let found = table.lookup("/no/such/page");
        assert_eq!(found.view, View::NotFound);
        assert!(!found.protected);
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::new()
            .route("/courses/:id", View::Courses)
            .protected("/courses/:id", View::Account);
        let found = table.lookup("/courses/9");
        assert_eq!(found.view, View::Courses);
        assert_eq!(found.params.get("id"), Some("9"));
    }
}
