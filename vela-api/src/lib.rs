use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod bookings;
pub mod error;
pub mod middleware;
pub mod state;
pub mod worker;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .origins
        .allowed_origins()
        .filter_map(|o| o.parse().ok())
        .collect();

    let mut allow_headers = vec![header::CONTENT_TYPE];
    for name in [
        &state.guard_rules.csrf_header,
        &state.guard_rules.session_header,
    ] {
        if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
            allow_headers.push(name);
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(allow_headers);

    Router::new()
        .merge(bookings::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::guard::csrf_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::guard::rate_limit_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware::guard::security_headers_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
