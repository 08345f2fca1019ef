use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SameSiteError {
    /// The requested value is not one of `Strict`, `Lax` or `None`.
    #[error("Value {value:?} is not valid for a SameSite cookie")]
    InvalidSameSiteValue { value: String },

    /// No user agent was supplied and none could be found in the context.
    #[error("No user agent can be found to test")]
    MissingUserAgent,
}

impl SameSiteError {
    /// Create an invalid value error.
    pub fn invalid_same_site_value(value: impl Into<String>) -> Self {
        SameSiteError::InvalidSameSiteValue {
            value: value.into(),
        }
    }

    /// Stable numeric code, for callers that report errors as integers.
    pub fn as_i32(&self) -> i32 {
        match self {
            SameSiteError::InvalidSameSiteValue { .. } => -20000,
            SameSiteError::MissingUserAgent => -20001,
        }
    }

    /// True for errors caused by the caller passing bad input, as opposed to
    /// missing request context.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SameSiteError::InvalidSameSiteValue { .. })
    }
}
