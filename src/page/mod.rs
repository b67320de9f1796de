//! Page bootstrapping and routing.
//!
//! The route is injected by the caller; the bootstrapper fetches and
//! renders the listing, answers card clicks with the detail popup, and
//! hands the create form its service.

mod bootstrap;
mod route;

pub use bootstrap::{Bootstrapper, ClickOutcome, FETCH_ERROR_MESSAGE, Page};
pub use route::Route;
