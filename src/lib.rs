//! # samesitenet
//!
//! SameSite=None compatibility checks for HTTP servers.
//!
//! Several widely deployed browsers mishandle the `SameSite=None` cookie
//! attribute. `samesitenet` recognizes them from their `User-Agent` string
//! and tells you when the attribute must be left out, following the
//! incompatible-clients list published by the Chromium project.
//!
//! ## Known defects
//!
//! - **WebKit**: iOS 12, and Safari or embedded WebKit views on macOS 10.14,
//!   treat `SameSite=None` as `SameSite=Strict`.
//! - **Unrecognized values**: Chromium 51 to 66 and UC Browser before 12.13.2
//!   drop any cookie carrying a SameSite value they do not know.
//!
//! Anything else, including user agents that cannot be recognized, is
//! treated as compatible.
//!
//! ## Quick Start
//!
//! ```rust
//! use samesitenet::{get_safe_string, SameSite};
//!
//! let chrome70 = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
//!                 (KHTML, like Gecko) Chrome/70.0.3163.100 Safari/537.36";
//!
//! let value = get_safe_string(Some("None"), Some(chrome70), true)?;
//! assert_eq!(value, Some(SameSite::None));
//! # Ok::<(), samesitenet::SameSiteError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type and request context collaborators
//! - [`useragent`] - User-Agent matchers and defect predicates
//! - [`cookies`] - SameSite values and the sanitizer

pub mod base;
pub mod cookies;
pub mod useragent;

pub use base::context::{BatchContext, EnvironmentContext, ExecutionMode, RequestContext};
pub use base::error::SameSiteError;
pub use cookies::samesite::SameSite;
pub use cookies::sanitize::{get_safe_string, SameSiteSanitizer, SanitizerOptions};
pub use useragent::compat::{
    drops_unrecognized_same_site_cookies, has_webkit_same_site_bug, incompatibility,
    is_same_site_none_incompatible, Incompatibility,
};
