use crate::base::error::SameSiteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A SameSite cookie attribute value.
///
/// Parsing is case-sensitive and accepts only the exact tokens `Strict`,
/// `Lax` and `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    /// Every permitted value.
    pub const ALL: [SameSite; 3] = [SameSite::None, SameSite::Lax, SameSite::Strict];

    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }

    /// Parse an optional value. Absent and empty input both mean "no
    /// attribute requested".
    pub fn parse_optional(value: Option<&str>) -> Result<Option<SameSite>, SameSiteError> {
        match value {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

impl FromStr for SameSite {
    type Err = SameSiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SameSite::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| SameSiteError::invalid_same_site_value(s))
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SameSite> for cookie::SameSite {
    fn from(value: SameSite) -> Self {
        match value {
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::None => cookie::SameSite::None,
        }
    }
}

impl From<cookie::SameSite> for SameSite {
    fn from(value: cookie::SameSite) -> Self {
        match value {
            cookie::SameSite::Strict => SameSite::Strict,
            cookie::SameSite::Lax => SameSite::Lax,
            cookie::SameSite::None => SameSite::None,
        }
    }
}
