//! Discovery of installed package files.
//!
//! Search roots are always an explicit list handed to [`PathLocator`].
//! [`discover_search_roots`] builds that list from a Python interpreter
//! when the configuration does not name the roots itself.

mod errors;
mod locator;
mod site;

pub use errors::{LocateError, LocateResult};
pub use locator::{InstalledFile, PathLocator};
pub use site::{discover_search_roots, fallback_search_roots, query_interpreter, SiteLayout};
