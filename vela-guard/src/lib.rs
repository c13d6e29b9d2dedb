pub mod cookie;
pub mod csrf;
pub mod headers;
pub mod origin;
pub mod rate_limit;
pub mod sanitize;
pub mod upload;

pub use cookie::{build_cookie, CookieOptions, SameSite};
pub use csrf::{CsrfConfig, CsrfStore};
pub use headers::security_headers;
pub use origin::OriginPolicy;
pub use rate_limit::{RateDecision, RateLimitConfig, RateLimiter};
pub use sanitize::Sanitizer;
pub use upload::{UploadCheck, UploadPolicy};
