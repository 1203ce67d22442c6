//! Client-side routing.
//!
//! - `paths`: the fixed paths the front-end navigates between
//! - `RoutePattern`: `/segment/:param` matching
//! - `RouteTable`: pattern to `View`, with protected entries
//! - `Navigator`: explicit navigation history

pub mod history;
pub mod pattern;
pub mod table;

pub use history::Navigator;
pub use pattern::{Params, RoutePattern};
pub use table::{RouteMatch, RouteTable};

pub mod paths {
    pub const HOME: &str = "/";
    pub const COURSES: &str = "/courses";
    pub const SIGN_IN: &str = "/signin";
    pub const SIGN_UP: &str = "/signup";
    pub const SIGN_OUT: &str = "/signout";
    pub const NOT_FOUND: &str = "/notfound";
    pub const ERROR: &str = "/error";
    pub const ACCOUNT: &str = "/account";
}

/// Screens the front-end knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Courses,
    SignIn,
    SignUp,
    SignOut,
    Account,
    NotFound,
    Error,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Courses => "Courses",
            View::SignIn => "Sign In",
            View::SignUp => "Sign Up",
            View::SignOut => "Sign Out",
            View::Account => "Account",
            View::NotFound => "Not Found",
            View::Error => "Error",
        }
    }
}
