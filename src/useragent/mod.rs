//! User-Agent classification.
//!
//! - [`matcher`]: browser family and platform version matchers
//! - [`compat`]: the SameSite=None defect predicates built on them

pub mod compat;
pub mod matcher;
