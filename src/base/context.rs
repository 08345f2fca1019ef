//! Request context collaborators.
//!
//! The sanitizer never reads a request itself. It asks a [`RequestContext`]
//! for the client's user agent and for the [`ExecutionMode`] it runs in,
//! which decides whether a missing user agent is an error.

use http::header::USER_AGENT;
use http::{HeaderMap, Request};
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;

/// CGI variable carrying the client's `User-Agent` header.
pub const HTTP_USER_AGENT_VAR: &str = "HTTP_USER_AGENT";

/// CGI variables whose presence means the process is serving a request.
const SERVING_VARS: &[&str] = &["GATEWAY_INTERFACE", "SERVER_SOFTWARE"];

/// How the current code is being invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Handling a client request. A user agent is always expected.
    #[default]
    Serving,
    /// Scripts, jobs and other non-interactive runs with no client.
    Batch,
}

/// Source of the ambient user agent for a sanitization call.
pub trait RequestContext {
    /// The current client's user agent, if one is known.
    fn user_agent(&self) -> Option<&str>;

    /// The mode the caller is running in.
    fn execution_mode(&self) -> ExecutionMode;
}

impl<T: RequestContext + ?Sized> RequestContext for &T {
    fn user_agent(&self) -> Option<&str> {
        (**self).user_agent()
    }

    fn execution_mode(&self) -> ExecutionMode {
        (**self).execution_mode()
    }
}

impl RequestContext for HeaderMap {
    fn user_agent(&self) -> Option<&str> {
        // Non-visible-ASCII header values are treated as absent.
        self.get(USER_AGENT).and_then(|value| value.to_str().ok())
    }

    fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::Serving
    }
}

impl<B> RequestContext for Request<B> {
    fn user_agent(&self) -> Option<&str> {
        self.headers().user_agent()
    }

    fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::Serving
    }
}

/// Context for code running outside of any request.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchContext;

impl RequestContext for BatchContext {
    fn user_agent(&self) -> Option<&str> {
        None
    }

    fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::Batch
    }
}

/// Context captured from CGI-style process environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentContext {
    user_agent: Option<String>,
    mode: ExecutionMode,
}

impl EnvironmentContext {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        Self::from_os_vars(env::vars_os())
    }

    /// Build a context from raw environment pairs. Only the variables this
    /// context reads are decoded; a user agent that is not valid UTF-8 counts
    /// as absent.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(vars.into_iter().filter_map(|(name, value)| {
            let name = name.into_string().ok()?;
            if name != HTTP_USER_AGENT_VAR && !SERVING_VARS.contains(&name.as_str()) {
                return None;
            }
            Some((name, value.into_string().unwrap_or_default()))
        }))
    }

    /// Build a context from explicit `(name, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut user_agent = None;
        let mut mode = ExecutionMode::Batch;

        for (name, value) in vars {
            let name = name.as_ref();
            if name == HTTP_USER_AGENT_VAR {
                let value = value.into();
                if !value.is_empty() {
                    user_agent = Some(value);
                }
            } else if SERVING_VARS.contains(&name) {
                mode = ExecutionMode::Serving;
            }
        }

        tracing::trace!(?mode, has_user_agent = user_agent.is_some(), "captured environment context");

        Self { user_agent, mode }
    }
}

impl RequestContext for EnvironmentContext {
    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    fn execution_mode(&self) -> ExecutionMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_header_map_context() {
        let mut headers = HeaderMap::new();
        assert_eq!(headers.user_agent(), None);

        headers.insert(USER_AGENT, HeaderValue::from_static("Test/1.0"));
        assert_eq!(headers.user_agent(), Some("Test/1.0"));
        assert_eq!(headers.execution_mode(), ExecutionMode::Serving);
    }

    #[test]
    fn test_request_context() {
        let req = Request::builder()
            .uri("https://example.com/")
            .header(USER_AGENT, "Mozilla/5.0")
            .body(())
            .unwrap();

        assert_eq!(req.user_agent(), Some("Mozilla/5.0"));
        assert_eq!(req.execution_mode(), ExecutionMode::Serving);
    }

    #[test]
    fn test_environment_batch() {
        let ctx = EnvironmentContext::from_vars([("PATH", "/usr/bin")]);
        assert_eq!(ctx.user_agent(), None);
        assert_eq!(ctx.execution_mode(), ExecutionMode::Batch);
    }

    #[test]
    fn test_environment_serving() {
        let ctx = EnvironmentContext::from_vars([
            ("GATEWAY_INTERFACE", "CGI/1.1"),
            ("HTTP_USER_AGENT", "Mozilla/5.0"),
        ]);
        assert_eq!(ctx.user_agent(), Some("Mozilla/5.0"));
        assert_eq!(ctx.execution_mode(), ExecutionMode::Serving);
    }

    #[test]
    fn test_environment_empty_user_agent() {
        let ctx = EnvironmentContext::from_vars([("HTTP_USER_AGENT", "")]);
        assert_eq!(ctx.user_agent(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_environment_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let bad = || OsString::from_vec(vec![0xff, 0xfe]);
        let ctx = EnvironmentContext::from_os_vars([
            (bad(), OsString::from("value")),
            (OsString::from("OTHER"), bad()),
            (OsString::from("SERVER_SOFTWARE"), bad()),
            (OsString::from("HTTP_USER_AGENT"), bad()),
        ]);
        assert_eq!(ctx.user_agent(), None);
        assert_eq!(ctx.execution_mode(), ExecutionMode::Serving);
    }

    #[test]
    fn test_environment_os_vars() {
        let ctx = EnvironmentContext::from_os_vars([
            (OsString::from("HTTP_USER_AGENT"), OsString::from("Mozilla/5.0")),
            (OsString::from("PATH"), OsString::from("/usr/bin")),
        ]);
        assert_eq!(ctx.user_agent(), Some("Mozilla/5.0"));
        assert_eq!(ctx.execution_mode(), ExecutionMode::Batch);
    }

    #[test]
    fn test_execution_mode_serde() {
        let mode: ExecutionMode = serde_json::from_str("\"batch\"").unwrap();
        assert_eq!(mode, ExecutionMode::Batch);
        assert_eq!(serde_json::to_string(&ExecutionMode::Serving).unwrap(), "\"serving\"");
    }
}
