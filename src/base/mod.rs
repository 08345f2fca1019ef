//! Base types and error handling.
//!
//! - [`SameSiteError`](error::SameSiteError): error codes for sanitization
//! - [`RequestContext`](context::RequestContext): where the user agent comes from

pub mod context;
pub mod error;
