//! SameSite cookie attribute handling.
//!
//! - [`SameSite`](samesite::SameSite): the closed `Strict` / `Lax` / `None` vocabulary
//! - [`SameSiteSanitizer`](sanitize::SameSiteSanitizer): withholds `None` from
//!   clients that mishandle it
//!
//! # Example
//!
//! ```rust
//! use samesitenet::base::context::BatchContext;
//! use samesitenet::cookies::samesite::SameSite;
//! use samesitenet::cookies::sanitize::SameSiteSanitizer;
//!
//! let sanitizer = SameSiteSanitizer::new(BatchContext);
//! let ios12 = "Mozilla/5.0 (iPhone; CPU iPhone OS 12_0 like Mac OS X) \
//!              AppleWebKit/605.1.15 (KHTML, like Gecko) Version/12.0 Mobile/15E148 Safari/604.1";
//!
//! // iOS 12 treats None as Strict: leave the attribute out.
//! assert_eq!(sanitizer.get_safe_string(Some("None"), Some(ios12))?, None);
//! assert_eq!(sanitizer.get_safe_string(Some("Lax"), Some(ios12))?, Some(SameSite::Lax));
//! # Ok::<(), samesitenet::base::error::SameSiteError>(())
//! ```
//!
//! # Cookies
//!
//! ```rust
//! use cookie::Cookie;
//! use samesitenet::base::context::BatchContext;
//! use samesitenet::cookies::sanitize::SameSiteSanitizer;
//!
//! let chrome60 = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
//!                 (KHTML, like Gecko) Chrome/60.0.3112.78 Safari/537.36";
//! let mut cookie = Cookie::build(("session", "abc"))
//!     .same_site(cookie::SameSite::None)
//!     .secure(true)
//!     .build();
//!
//! SameSiteSanitizer::new(BatchContext).sanitize_cookie(&mut cookie, Some(chrome60))?;
//! assert_eq!(cookie.same_site(), None);
//! # Ok::<(), samesitenet::base::error::SameSiteError>(())
//! ```

pub mod samesite;
pub mod sanitize;
