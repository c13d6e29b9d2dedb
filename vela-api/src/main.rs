use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vela_api::{app, state::{AppState, GuardRules}};
use vela_booking::{MemoryBookingGateway, MemoryPackageStore, PricingConfig, PricingEngine};
use vela_guard::{CsrfConfig, CsrfStore, OriginPolicy, RateLimitConfig, RateLimiter, Sanitizer};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vela_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = vela_api::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Vela API on port {}", config.server.port);

    let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig {
        window_ms: config.guard.window_ms,
        max_requests: config.guard.max_requests,
    }));
    let csrf = Arc::new(CsrfStore::new(CsrfConfig {
        ttl_seconds: config.guard.csrf_ttl_seconds,
        token_length: config.guard.csrf_token_length,
    }));

    let app_state = AppState {
        rate_limiter: rate_limiter.clone(),
        csrf: csrf.clone(),
        origins: Arc::new(OriginPolicy::new(config.guard.allowed_origins.clone())),
        sanitizer: Arc::new(Sanitizer::new()),
        pricing: Arc::new(PricingEngine::new(PricingConfig {
            tax_rate: config.business_rules.tax_rate,
        })),
        packages: Arc::new(MemoryPackageStore::new()),
        gateway: Arc::new(MemoryBookingGateway::new()),
        guard_rules: GuardRules {
            csrf_header: config.guard.csrf_header.clone(),
            session_header: config.guard.session_header.clone(),
        },
    };

    tokio::spawn(vela_api::worker::start_sweep_worker(
        csrf,
        rate_limiter,
        config.guard.sweep_interval_seconds,
    ));

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
