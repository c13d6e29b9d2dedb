use std::sync::Arc;
use vela_booking::{BookingGateway, PackageStore, PricingEngine};
use vela_guard::{CsrfStore, OriginPolicy, RateLimiter, Sanitizer};

/// Header names the guard middleware reads tokens from.
#[derive(Clone)]
pub struct GuardRules {
    pub csrf_header: String,
    pub session_header: String,
}

#[derive(Clone)]
pub struct AppState {
    pub rate_limiter: Arc<RateLimiter>,
    pub csrf: Arc<CsrfStore>,
    pub origins: Arc<OriginPolicy>,
    pub sanitizer: Arc<Sanitizer>,
    pub pricing: Arc<PricingEngine>,
    pub packages: Arc<dyn PackageStore>,
    pub gateway: Arc<dyn BookingGateway>,
    pub guard_rules: GuardRules,
}
