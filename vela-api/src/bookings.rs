use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use vela_booking::{is_date_available, BookingFlow};
use vela_guard::{build_cookie, CookieOptions, SameSite};
use vela_shared::{BookingSchedule, ContactInfo};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/quote", post(quote_booking))
        .route("/api/packages/{id}/availability", get(check_availability))
        .route("/api/csrf", get(issue_csrf_token))
}

#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    package_id: Uuid,
    venue_id: Option<Uuid>,
    schedule: BookingSchedule,
    guest_count: u32,
    contact: ContactInfo,
    #[serde(default)]
    customizations: serde_json::Value,
    notes: Option<String>,
    payment_method: String,
}

#[derive(Debug, Serialize)]
struct BookingResponse {
    booking_id: Uuid,
    status: String,
    total_amount: f64,
    currency: String,
}

/// Drive the wizard server-side: validate the selection, then hand the
/// submission to the booking-creation collaborator.
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let package = state
        .packages
        .get_package(req.package_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("package {} not found", req.package_id)))?;

    let mut flow = BookingFlow::new(package);
    flow.set_schedule(req.schedule);
    flow.set_guest_count(req.guest_count)
        .map_err(|e| AppError::ValidationError(vec![e]))?;
    flow.set_venue(req.venue_id);
    flow.set_contact(ContactInfo {
        name: state.sanitizer.sanitize(&req.contact.name),
        email: req.contact.email.trim().to_string(),
        phone: req.contact.phone.trim().to_string(),
    });
    flow.set_customizations(req.customizations);
    flow.set_notes(req.notes.map(|n| state.sanitizer.sanitize(&n)));
    flow.set_payment_method(&req.payment_method);

    // PackageDetails -> Schedule -> Customize -> Review -> Payment
    for _ in 0..4 {
        flow.advance()?;
    }

    let record = flow.submit(&state.pricing, state.gateway.as_ref()).await?;
    info!("Booking submitted: {}", record.id);

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            booking_id: record.id,
            status: record.status.to_string(),
            total_amount: record.total_amount,
            currency: record.currency,
        }),
    ))
}

#[derive(Debug, Deserialize)]
struct QuoteRequest {
    package_id: Uuid,
}

async fn quote_booking(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let package = state
        .packages
        .get_package(req.package_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("package {} not found", req.package_id)))?;

    Ok(Json(state.pricing.quote(&package)))
}

#[derive(Debug, Deserialize)]
struct AvailabilityParams {
    date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct AvailabilityResponse {
    date: NaiveDate,
    available: bool,
}

async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let package = state
        .packages
        .get_package(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("package {} not found", id)))?;

    let available = is_date_available(params.date, Utc::now().date_naive(), &package);

    Ok(Json(AvailabilityResponse {
        date: params.date,
        available,
    }))
}

#[derive(Debug, Serialize)]
struct CsrfResponse {
    token: String,
}

/// Issue (or rotate) the CSRF token for the calling session. The token is
/// also mirrored into a cookie readable by the client-side wizard.
async fn issue_csrf_token(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let session_id = headers
        .get(&state.guard_rules.session_header)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::ValidationError(vec![vela_booking::FieldError {
                field: state.guard_rules.session_header.clone(),
                message: "session header is required".to_string(),
            }])
        })?;

    let token = state.csrf.issue(session_id);
    let cookie = build_cookie(
        "csrf_token",
        &token,
        &CookieOptions {
            max_age: Some(3600),
            http_only: false,
            secure: true,
            same_site: Some(SameSite::Strict),
            path: Some("/".to_string()),
            domain: None,
        },
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(CsrfResponse { token }),
    ))
}
