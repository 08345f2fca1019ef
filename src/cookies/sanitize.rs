//! SameSite attribute sanitization.
//!
//! Decides whether a requested SameSite value can be sent to the current
//! client. `None` is withheld from clients known to mishandle it; the caller
//! should then omit the attribute entirely rather than substitute another
//! value.

use crate::base::context::{EnvironmentContext, ExecutionMode, RequestContext};
use crate::base::error::SameSiteError;
use crate::cookies::samesite::SameSite;
use crate::useragent::compat::incompatibility;
use cookie::Cookie;
use serde::{Deserialize, Serialize};

/// Sanitizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerOptions {
    /// In batch mode, return the requested value unchanged when no user
    /// agent is available instead of failing.
    pub ignore_missing_user_agent: bool,
    /// Overrides the execution mode reported by the context.
    pub execution_mode: Option<ExecutionMode>,
}

impl Default for SanitizerOptions {
    fn default() -> Self {
        Self {
            ignore_missing_user_agent: true,
            execution_mode: None,
        }
    }
}

impl SanitizerOptions {
    /// Create new builder.
    pub fn builder() -> SanitizerOptionsBuilder {
        SanitizerOptionsBuilder::default()
    }
}

/// Builder for SanitizerOptions.
#[derive(Debug, Clone, Default)]
pub struct SanitizerOptionsBuilder {
    config: SanitizerOptions,
}

impl SanitizerOptionsBuilder {
    /// Set whether a missing user agent is tolerated in batch mode.
    pub fn ignore_missing_user_agent(mut self, ignore: bool) -> Self {
        self.config.ignore_missing_user_agent = ignore;
        self
    }

    /// Force an execution mode.
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = Some(mode);
        self
    }

    /// Build the options.
    pub fn build(self) -> SanitizerOptions {
        self.config
    }
}

/// Applies the SameSite=None compatibility rules for a request context.
#[derive(Debug, Clone, Default)]
pub struct SameSiteSanitizer<C = EnvironmentContext> {
    context: C,
    options: SanitizerOptions,
}

impl<C: RequestContext> SameSiteSanitizer<C> {
    pub fn new(context: C) -> Self {
        Self::with_options(context, SanitizerOptions::default())
    }

    pub fn with_options(context: C, options: SanitizerOptions) -> Self {
        Self { context, options }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn options(&self) -> &SanitizerOptions {
        &self.options
    }

    fn execution_mode(&self) -> ExecutionMode {
        self.options
            .execution_mode
            .unwrap_or_else(|| self.context.execution_mode())
    }

    /// Get a SameSite value that is safe to send.
    ///
    /// `same_site` must be `Strict`, `Lax`, `None` or absent. When
    /// `user_agent` is absent the context is consulted.
    ///
    /// Returns `Ok(None)` when the attribute should not be set at all.
    ///
    /// # Errors
    ///
    /// - [`SameSiteError::InvalidSameSiteValue`] for any other value.
    /// - [`SameSiteError::MissingUserAgent`] when no user agent can be found,
    ///   unless running in batch mode with `ignore_missing_user_agent`.
    pub fn get_safe_string(
        &self,
        same_site: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<Option<SameSite>, SameSiteError> {
        let same_site = SameSite::parse_optional(same_site)?;
        self.sanitize(same_site, user_agent)
    }

    /// Typed form of [`get_safe_string`](Self::get_safe_string).
    pub fn sanitize(
        &self,
        same_site: Option<SameSite>,
        user_agent: Option<&str>,
    ) -> Result<Option<SameSite>, SameSiteError> {
        let Some(user_agent) = self.resolve_user_agent(user_agent)? else {
            return Ok(same_site);
        };

        if same_site == Some(SameSite::None) {
            if let Some(reason) = incompatibility(user_agent) {
                tracing::debug!(%reason, user_agent, "omitting SameSite=None for incompatible client");
                return Ok(None);
            }
        }

        Ok(same_site)
    }

    /// Apply [`sanitize`](Self::sanitize) to a cookie in place, clearing its
    /// SameSite attribute if it cannot be sent.
    pub fn sanitize_cookie(
        &self,
        cookie: &mut Cookie<'_>,
        user_agent: Option<&str>,
    ) -> Result<Option<SameSite>, SameSiteError> {
        let requested = cookie.same_site().map(SameSite::from);
        let safe = self.sanitize(requested, user_agent)?;
        if safe != requested {
            cookie.set_same_site(safe.map(cookie::SameSite::from));
        }
        Ok(safe)
    }

    /// `Ok(None)` means there is no client to protect.
    fn resolve_user_agent<'a>(
        &'a self,
        user_agent: Option<&'a str>,
    ) -> Result<Option<&'a str>, SameSiteError> {
        if let Some(ua) = user_agent.filter(|ua| !ua.is_empty()) {
            return Ok(Some(ua));
        }
        if let Some(ua) = self.context.user_agent().filter(|ua| !ua.is_empty()) {
            return Ok(Some(ua));
        }

        match self.execution_mode() {
            ExecutionMode::Batch if self.options.ignore_missing_user_agent => {
                tracing::debug!("no user agent in batch mode, leaving SameSite unchanged");
                Ok(None)
            }
            mode => {
                tracing::debug!(?mode, "no user agent available");
                Err(SameSiteError::MissingUserAgent)
            }
        }
    }
}

/// Get a SameSite value that is safe to send, using the process environment
/// (`HTTP_USER_AGENT`, CGI server variables) when `user_agent` is absent.
///
/// See [`SameSiteSanitizer::get_safe_string`].
pub fn get_safe_string(
    same_site: Option<&str>,
    user_agent: Option<&str>,
    ignore_missing_user_agent: bool,
) -> Result<Option<SameSite>, SameSiteError> {
    let options = SanitizerOptions::builder()
        .ignore_missing_user_agent(ignore_missing_user_agent)
        .build();
    let context = match user_agent {
        Some(ua) if !ua.is_empty() => EnvironmentContext::default(),
        _ => EnvironmentContext::from_env(),
    };
    SameSiteSanitizer::with_options(context, options).get_safe_string(same_site, user_agent)
}
