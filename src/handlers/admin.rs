use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, Event, EventStatus, Trainer};
use crate::services::calendar::normalize_date;
use crate::state::AppState;

pub fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

fn now_string() -> String {
    Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Strict status parse for admin transitions: a typo must not silently
/// become `pending`.
fn parse_status_strict(s: &str) -> Result<BookingStatus, AppError> {
    let parsed = BookingStatus::parse(s);
    if parsed == BookingStatus::Pending && !s.eq_ignore_ascii_case("pending") {
        return Err(AppError::InvalidInput(format!("unknown status: {s}")));
    }
    Ok(parsed)
}

/// Best-effort push to the trainer's registered device; failures are
/// logged, never surfaced to the caller.
async fn notify_trainer(state: &Arc<AppState>, trainer_id: &str, title: &str, body: &str) {
    if state.config.push_endpoint.is_empty() {
        tracing::debug!("push endpoint not configured, skipping notification");
        return;
    }

    let push_token = {
        let db = state.db.lock().unwrap();
        queries::get_trainer(&db, trainer_id)
            .ok()
            .flatten()
            .and_then(|t| t.push_token)
    };

    let Some(token) = push_token.filter(|t| !t.is_empty()) else {
        tracing::debug!(trainer_id = %trainer_id, "trainer has no push token, skipping notification");
        return;
    };

    if let Err(e) = state.notifier.notify(&token, title, body).await {
        tracing::error!(error = %e, trainer_id = %trainer_id, "failed to send notification");
    }
}

// ── Trainers ──

// GET /api/admin/trainers
pub async fn get_trainers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Trainer>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let trainers = {
        let db = state.db.lock().unwrap();
        queries::list_trainers(&db)?
    };
    Ok(Json(trainers))
}

// POST /api/admin/trainers
#[derive(Deserialize)]
pub struct CreateTrainerRequest {
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub push_token: Option<String>,
}

pub async fn create_trainer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateTrainerRequest>,
) -> Result<Json<Trainer>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if body.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".to_string()));
    }

    let trainer = Trainer {
        id: body.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        name: body.name,
        email: body.email,
        push_token: body.push_token,
        created_at: now_string(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_trainer(&db, &trainer)?;
    }

    tracing::info!(trainer_id = %trainer.id, "trainer created");
    Ok(Json(trainer))
}

// ── Bookings ──

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub trainer_id: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_all_bookings(
            &db,
            query.status.as_deref(),
            query.trainer_id.as_deref(),
            limit,
        )?
    };
    Ok(Json(bookings))
}

// POST /api/admin/bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub course_id: String,
    pub trainer_id: String,
    pub requested_date: String,
    pub end_date: Option<String>,
    pub title: Option<String>,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if normalize_date(&body.requested_date).is_none() {
        return Err(AppError::InvalidInput(format!(
            "invalid requested_date: {}",
            body.requested_date
        )));
    }
    if let Some(end) = &body.end_date {
        if normalize_date(end).is_none() {
            return Err(AppError::InvalidInput(format!("invalid end_date: {end}")));
        }
    }

    {
        let db = state.db.lock().unwrap();
        if queries::get_trainer(&db, &body.trainer_id)?.is_none() {
            return Err(AppError::NotFound(format!("trainer {}", body.trainer_id)));
        }
    }

    let now = now_string();
    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        course_id: body.course_id,
        trainer_id: body.trainer_id,
        requested_date: body.requested_date,
        end_date: body.end_date,
        status: BookingStatus::Pending,
        title: body.title,
        created_at: now.clone(),
        updated_at: now,
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_booking(&db, &booking)?;
    }

    tracing::info!(booking_id = %booking.id, trainer_id = %booking.trainer_id, "booking created");
    notify_trainer(
        &state,
        &booking.trainer_id,
        "New booking request",
        &format!("Course {} on {}", booking.course_id, booking.requested_date),
    )
    .await;

    Ok(Json(booking))
}

// POST /api/admin/bookings/:id/status
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let next = parse_status_strict(&body.status)?;

    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking_by_id(&db, &id)?
            .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?
    };

    if booking.status.is_terminal() {
        return Err(AppError::Conflict(format!(
            "booking is {} and cannot change status",
            booking.status.as_str()
        )));
    }

    {
        let db = state.db.lock().unwrap();
        queries::update_booking_status(&db, &id, next)?;
    }

    tracing::info!(booking_id = %id, from = booking.status.as_str(), to = next.as_str(), "booking status updated");
    notify_trainer(
        &state,
        &booking.trainer_id,
        "Booking updated",
        &format!(
            "Booking for course {} is now {}",
            booking.course_id,
            next.as_str()
        ),
    )
    .await;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::get_booking_by_id(&db, &id)?
            .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?
    };
    Ok(Json(updated))
}

// POST /api/admin/bookings/:id/promote
//
// Turns an approved booking into a committed ACTIVE event; the booking
// itself becomes confirmed. On the calendar the event then supersedes
// the confirmed booking (same course + date).
pub async fn promote_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking_by_id(&db, &id)?
            .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?
    };

    if booking.status != BookingStatus::Approved {
        return Err(AppError::InvalidInput(format!(
            "only approved bookings can be promoted, this one is {}",
            booking.status.as_str()
        )));
    }

    let event = Event {
        id: uuid::Uuid::new_v4().to_string(),
        course_id: booking.course_id.clone(),
        trainer_id: booking.trainer_id.clone(),
        event_date: booking.requested_date.clone(),
        end_date: booking.end_date.clone(),
        title: booking.title.clone(),
        status: EventStatus::Active,
        created_at: now_string(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_event(&db, &event)?;
        queries::update_booking_status(&db, &id, BookingStatus::Confirmed)?;
    }

    tracing::info!(booking_id = %id, event_id = %event.id, "booking promoted to event");
    notify_trainer(
        &state,
        &booking.trainer_id,
        "Booking confirmed",
        &format!(
            "Course {} on {} is now a scheduled event",
            booking.course_id, booking.requested_date
        ),
    )
    .await;

    Ok(Json(event))
}

// ── Events ──

// GET /api/admin/events
#[derive(Deserialize)]
pub struct EventsQuery {
    pub trainer_id: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let events = {
        let db = state.db.lock().unwrap();
        queries::list_events(&db, query.trainer_id.as_deref(), limit)?
    };
    Ok(Json(events))
}

// POST /api/admin/events
#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub course_id: String,
    pub trainer_id: String,
    pub event_date: String,
    pub end_date: Option<String>,
    pub title: Option<String>,
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateEventRequest>,
) -> Result<Json<Event>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if normalize_date(&body.event_date).is_none() {
        return Err(AppError::InvalidInput(format!(
            "invalid event_date: {}",
            body.event_date
        )));
    }

    {
        let db = state.db.lock().unwrap();
        if queries::get_trainer(&db, &body.trainer_id)?.is_none() {
            return Err(AppError::NotFound(format!("trainer {}", body.trainer_id)));
        }
    }

    let event = Event {
        id: uuid::Uuid::new_v4().to_string(),
        course_id: body.course_id,
        trainer_id: body.trainer_id,
        event_date: body.event_date,
        end_date: body.end_date,
        title: body.title,
        status: EventStatus::Active,
        created_at: now_string(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_event(&db, &event)?;
    }

    tracing::info!(event_id = %event.id, trainer_id = %event.trainer_id, "event created");
    Ok(Json(event))
}
