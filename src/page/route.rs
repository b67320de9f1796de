//! Page routes.

use std::fmt;

/// Which page behavior to wire up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Project listing (home page).
    Listing,
    /// Project creation form.
    Create,
    /// Anything else; nothing is wired.
    Unknown(String),
}

impl Route {
    /// Map a page path to its route.
    ///
    /// Both the site root and the `/website/` mount serve the same pages.
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/website/" => Route::Listing,
            "/create.html" | "/website/create.html" => Route::Create,
            other => Route::Unknown(other.to_string()),
        }
    }

    /// Canonical path of this route.
    pub fn path(&self) -> &str {
        match self {
            Route::Listing => "/",
            Route::Create => "/create.html",
            Route::Unknown(path) => path,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
