//! SameSite=None compatibility predicates.
//!
//! Combines the matchers into the two known client defects:
//!
//! | Defect | Affected clients |
//! |--------|------------------|
//! | `None` treated as `Strict` | iOS 12; Safari and embedded WebKit on macOS 10.14 |
//! | Unrecognized SameSite drops the cookie | Chromium 51 to 66; UC Browser before 12.13.2 |

use crate::useragent::matcher::{
    is_chromium_based, is_chromium_version_at_least, is_ios_version, is_mac_embedded_browser,
    is_macosx_version, is_safari, is_uc_browser, uc_browser_version,
};
use std::fmt;

/// First Chromium major version that drops unrecognized SameSite cookies.
const CHROMIUM_DROPS_FROM: u32 = 51;
/// First Chromium major version with the fix.
const CHROMIUM_FIXED_IN: u32 = 67;
/// First UC Browser version with the fix.
const UC_BROWSER_FIXED_IN: (u32, u32, u32) = (12, 13, 2);

/// Why a client cannot be sent `SameSite=None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Incompatibility {
    /// The client treats `SameSite=None` as `SameSite=Strict`.
    WebKitNoneAsStrict,
    /// The client discards cookies with a SameSite value it does not know.
    DropsUnrecognized,
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Incompatibility::WebKitNoneAsStrict => "webkit-none-as-strict",
            Incompatibility::DropsUnrecognized => "drops-unrecognized",
        };
        write!(f, "{}", name)
    }
}

pub fn has_webkit_same_site_bug(user_agent: &str) -> bool {
    if is_ios_version(12, user_agent) {
        tracing::trace!(user_agent, "iOS 12 client");
        return true;
    }
    let affected = is_macosx_version(10, 14, user_agent)
        && (is_safari(user_agent) || is_mac_embedded_browser(user_agent));
    if affected {
        tracing::trace!(user_agent, "macOS 10.14 WebKit client");
    }
    affected
}

pub fn drops_unrecognized_same_site_cookies(user_agent: &str) -> bool {
    if is_uc_browser(user_agent) {
        let (major, minor, build) = UC_BROWSER_FIXED_IN;
        // An unparseable version is not known to be affected.
        let drops = uc_browser_version(user_agent)
            .is_some_and(|version| !version.is_at_least(major, minor, build));
        tracing::trace!(user_agent, drops, "UC Browser client");
        return drops;
    }
    if is_chromium_based(user_agent) {
        let drops = is_chromium_version_at_least(CHROMIUM_DROPS_FROM, user_agent)
            && !is_chromium_version_at_least(CHROMIUM_FIXED_IN, user_agent);
        tracing::trace!(user_agent, drops, "Chromium-based client");
        return drops;
    }
    false
}

/// Which defect, if any, makes `SameSite=None` unsafe for this client.
pub fn incompatibility(user_agent: &str) -> Option<Incompatibility> {
    if has_webkit_same_site_bug(user_agent) {
        Some(Incompatibility::WebKitNoneAsStrict)
    } else if drops_unrecognized_same_site_cookies(user_agent) {
        Some(Incompatibility::DropsUnrecognized)
    } else {
        None
    }
}

/// Is the client known to mishandle `SameSite=None`?
pub fn is_same_site_none_incompatible(user_agent: &str) -> bool {
    has_webkit_same_site_bug(user_agent) || drops_unrecognized_same_site_cookies(user_agent)
}
