use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;
use vela_guard::security_headers;

use crate::state::AppState;

// ============================================================================
// Security Headers
// ============================================================================

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    for (name, value) in security_headers() {
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(*name, value);
        }
    }

    response
}

// ============================================================================
// Rate Limiting
// ============================================================================

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    let identifier = addr.ip().to_string();
    let decision = state.rate_limiter.check(&identifier);

    if !decision.allowed {
        let retry_after = (decision.reset_time - Utc::now()).num_seconds().max(0);
        tracing::warn!("Rate limit exceeded for {}", identifier);

        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "rate limit exceeded" })),
        )
            .into_response();
        set_rate_headers(&mut response, &decision);
        if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    let mut response = next.run(req).await;
    set_rate_headers(&mut response, &decision);
    response
}

fn set_rate_headers(response: &mut Response, decision: &vela_guard::RateDecision) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&decision.remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", value);
    }
    if let Ok(value) = HeaderValue::from_str(&decision.reset_time.timestamp().to_string()) {
        headers.insert("X-RateLimit-Reset", value);
    }
}

// ============================================================================
// CSRF + Origin (state-changing requests only)
// ============================================================================

pub async fn csrf_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    // Safe methods pass through untouched
    if matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return next.run(req).await;
    }

    if let Some(origin) = req.headers().get(header::ORIGIN).and_then(|v| v.to_str().ok()) {
        if !state.origins.is_allowed(origin) {
            tracing::warn!("Rejected request from disallowed origin {}", origin);
            return forbidden("origin not allowed");
        }
    }

    let session_id = req
        .headers()
        .get(&state.guard_rules.session_header)
        .and_then(|v| v.to_str().ok());
    let token = req
        .headers()
        .get(&state.guard_rules.csrf_header)
        .and_then(|v| v.to_str().ok());

    match (session_id, token) {
        (Some(session_id), Some(token)) if state.csrf.validate(session_id, token) => {
            next.run(req).await
        }
        _ => forbidden("invalid or missing CSRF token"),
    }
}

fn forbidden(message: &str) -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "error": message }))).into_response()
}
