//! User-Agent pattern matchers.
//!
//! Family detection and version extraction over raw `User-Agent` strings.
//! Patterns follow the incompatible-clients list published by the Chromium
//! project: <https://www.chromium.org/updates/same-site/incompatible-clients>.
//!
//! Every matcher is fail-open: a string that does not match, or whose version
//! digits overflow a `u32`, is simply "not matched".

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SAFARI: Lazy<Regex> = Lazy::new(|| Regex::new(r"Version/.* Safari/").unwrap());
static CHROMIUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"Chrom(e|ium)").unwrap());
static UC_BROWSER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"UCBrowser/([0-9]+)\.([0-9]+)\.([0-9]+)[.0-9]* ").unwrap()
});
static MAC_EMBEDDED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Mozilla.*\(Macintosh;.*Mac OS X [_0-9]+\).*AppleWebKit/[.0-9]+ \(KHTML, like Gecko\)$",
    )
    .unwrap()
});
static IOS_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(iP.+; CPU .*OS ([0-9]+)[_0-9]*.*\) AppleWebKit/").unwrap()
});
static MACOS_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(Macintosh;.*Mac OS X ([0-9]+)_([0-9]+)[_0-9]*.*\) AppleWebKit/").unwrap()
});
static CHROMIUM_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Chrom[^ /]+/([0-9]+)[.0-9]* ").unwrap());

/// Integer value of capture group `idx`.
fn group(caps: &Captures<'_>, idx: usize) -> Option<u32> {
    caps.get(idx)?.as_str().parse().ok()
}

/// iOS major version, e.g. `12` from `CPU iPhone OS 12_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IosVersion {
    pub major: u32,
}

/// macOS version, e.g. `10.14` from `Mac OS X 10_14_5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacOsVersion {
    pub major: u32,
    pub minor: u32,
}

/// Chromium major version, e.g. `70` from `Chrome/70.0.3538.102`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChromiumVersion {
    pub major: u32,
}

/// UC Browser version, e.g. `11.5.1` from `UCBrowser/11.5.1.944`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UcBrowserVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl UcBrowserVersion {
    /// Is this version at least `major.minor.build`?
    ///
    /// The higher-order components decide strictly by direction; only when
    /// major and minor are equal does the build compare with `<=`.
    pub fn is_at_least(&self, major: u32, minor: u32, build: u32) -> bool {
        if major != self.major {
            return major < self.major;
        }
        if minor != self.minor {
            return minor < self.minor;
        }
        build <= self.build
    }
}

pub fn ios_version(user_agent: &str) -> Option<IosVersion> {
    let caps = IOS_VERSION.captures(user_agent)?;
    Some(IosVersion {
        major: group(&caps, 1)?,
    })
}

pub fn macos_version(user_agent: &str) -> Option<MacOsVersion> {
    let caps = MACOS_VERSION.captures(user_agent)?;
    Some(MacOsVersion {
        major: group(&caps, 1)?,
        minor: group(&caps, 2)?,
    })
}

pub fn chromium_version(user_agent: &str) -> Option<ChromiumVersion> {
    let caps = CHROMIUM_VERSION.captures(user_agent)?;
    Some(ChromiumVersion {
        major: group(&caps, 1)?,
    })
}

pub fn uc_browser_version(user_agent: &str) -> Option<UcBrowserVersion> {
    let caps = UC_BROWSER.captures(user_agent)?;
    Some(UcBrowserVersion {
        major: group(&caps, 1)?,
        minor: group(&caps, 2)?,
        build: group(&caps, 3)?,
    })
}

/// Chromium-based browsers (Chrome, Chromium, Edge, Opera, Samsung Internet, ...).
pub fn is_chromium_based(user_agent: &str) -> bool {
    CHROMIUM.is_match(user_agent)
}

/// Safari proper. Chromium browsers also carry a `Safari/` token and are
/// excluded.
pub fn is_safari(user_agent: &str) -> bool {
    SAFARI.is_match(user_agent) && !is_chromium_based(user_agent)
}

pub fn is_uc_browser(user_agent: &str) -> bool {
    UC_BROWSER.is_match(user_agent)
}

/// An app embedding the system WebKit view on macOS. These send a bare
/// `AppleWebKit/... (KHTML, like Gecko)` with no browser token after it.
pub fn is_mac_embedded_browser(user_agent: &str) -> bool {
    MAC_EMBEDDED.is_match(user_agent)
}

/// Exact iOS major version match.
pub fn is_ios_version(major: u32, user_agent: &str) -> bool {
    ios_version(user_agent).is_some_and(|v| v.major == major)
}

/// Exact macOS `major.minor` match.
pub fn is_macosx_version(major: u32, minor: u32, user_agent: &str) -> bool {
    macos_version(user_agent).is_some_and(|v| v.major == major && v.minor == minor)
}

pub fn is_chromium_version_at_least(major: u32, user_agent: &str) -> bool {
    chromium_version(user_agent).is_some_and(|v| major <= v.major)
}

/// Returns `false` for anything that is not UC Browser.
pub fn is_uc_browser_version_at_least(major: u32, minor: u32, build: u32, user_agent: &str) -> bool {
    uc_browser_version(user_agent).is_some_and(|v| v.is_at_least(major, minor, build))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.102 Safari/537.36";
    const EMBEDDED_MAC: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_5) AppleWebKit/605.1.15 (KHTML, like Gecko)";

    #[test]
    fn test_patterns_compile() {
        for re in [
            &SAFARI,
            &CHROMIUM,
            &UC_BROWSER,
            &MAC_EMBEDDED,
            &IOS_VERSION,
            &MACOS_VERSION,
            &CHROMIUM_VERSION,
        ] {
            Lazy::force(re);
        }
    }

    #[test]
    fn test_extract_versions() {
        assert_eq!(
            macos_version(CHROME_MAC),
            Some(MacOsVersion {
                major: 10,
                minor: 14
            })
        );
        assert_eq!(chromium_version(CHROME_MAC), Some(ChromiumVersion { major: 70 }));
        assert_eq!(ios_version(CHROME_MAC), None);
        assert_eq!(uc_browser_version(CHROME_MAC), None);
    }

    #[test]
    fn test_chromium_token() {
        assert!(is_chromium_based("Chromium/90.0"));
        assert!(is_chromium_based("CriOS Chrome/90.0"));
        assert!(!is_chromium_based("chrome/90.0"));
    }

    #[test]
    fn test_mac_embedded() {
        assert!(is_mac_embedded_browser(EMBEDDED_MAC));
        assert!(!is_mac_embedded_browser(CHROME_MAC));
        // Anything trailing the KHTML token is a named browser.
        assert!(!is_mac_embedded_browser(&format!("{EMBEDDED_MAC} Version/12.1.1 Safari/605.1.15")));
    }

    #[test]
    fn test_version_overflow_is_no_match() {
        let ua = "Mozilla/5.0 (Windows NT 10.0) Chrome/99999999999.0 Safari/537.36";
        assert!(is_chromium_based(ua));
        assert_eq!(chromium_version(ua), None);
        assert!(!is_chromium_version_at_least(1, ua));
    }

    #[test]
    fn test_uc_version_overflow_is_no_match() {
        let ua = "Mozilla/5.0 (Linux; U; Android 10) Chrome/57.0.2987.108 UCBrowser/99999999999.0.0.1 Mobile Safari/537.36";
        assert!(is_uc_browser(ua));
        assert_eq!(uc_browser_version(ua), None);
        assert!(!is_uc_browser_version_at_least(12, 13, 2, ua));
    }

    #[test]
    fn test_zero_version_is_a_match() {
        let ua = "Mozilla/5.0 Chrome/0.1 Safari/537.36";
        assert_eq!(chromium_version(ua), Some(ChromiumVersion { major: 0 }));
        assert!(is_chromium_version_at_least(0, ua));
    }

    #[test]
    fn test_uc_version_tie_break() {
        let v = UcBrowserVersion {
            major: 11,
            minor: 5,
            build: 1,
        };
        assert!(!v.is_at_least(11, 5, 3));
        assert!(v.is_at_least(11, 5, 1));
        assert!(v.is_at_least(11, 4, 1));
        assert!(v.is_at_least(10, 5, 1));
        assert!(!v.is_at_least(12, 5, 1));
        assert!(v.is_at_least(11, 4, 9));
        assert!(!v.is_at_least(11, 6, 0));
    }

    #[test]
    fn test_empty_string() {
        assert!(!is_safari(""));
        assert!(!is_chromium_based(""));
        assert!(!is_uc_browser(""));
        assert!(!is_mac_embedded_browser(""));
        assert!(!is_ios_version(12, ""));
        assert!(!is_macosx_version(10, 14, ""));
        assert!(!is_chromium_version_at_least(51, ""));
        assert!(!is_uc_browser_version_at_least(12, 13, 2, ""));
    }
}
