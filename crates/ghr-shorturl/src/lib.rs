//! ghr-shorturl: URL shortening with service fallback
//!
//! Each [`ShortUrlService`] wraps one external shortener. The
//! [`FallbackShortener`] tries them in configured order and falls back to
//! the original URL when every service fails.

pub mod error;
pub mod fallback;
pub mod service;

pub use error::{Result, ShortUrlError};
pub use fallback::FallbackShortener;
pub use service::{BitlyService, ServiceKind, ShortUrlService, TextApiService};
