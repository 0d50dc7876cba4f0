use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{AvailabilityRecord, AvailabilityStatus, CalendarDay};
use crate::services::calendar::{fetch_calendar, normalize_date};
use crate::state::AppState;

use super::admin::check_auth;

fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = start
        .and_then(normalize_date)
        .ok_or_else(|| AppError::InvalidInput("missing or invalid start date".to_string()))?;
    let end = end
        .and_then(normalize_date)
        .ok_or_else(|| AppError::InvalidInput("missing or invalid end date".to_string()))?;
    if start > end {
        return Err(AppError::InvalidInput("start is after end".to_string()));
    }
    Ok((start, end))
}

fn ensure_trainer(state: &AppState, trainer_id: &str) -> Result<(), AppError> {
    let db = state.db.lock().unwrap();
    match queries::get_trainer(&db, trainer_id)? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("trainer {trainer_id}"))),
    }
}

// GET /api/trainers/:id/calendar?start=YYYY-MM-DD&end=YYYY-MM-DD
#[derive(Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path(trainer_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<CalendarDay>>, AppError> {
    let (start, end) = parse_range(query.start.as_deref(), query.end.as_deref())?;
    ensure_trainer(&state, &trainer_id)?;

    let days = fetch_calendar(state.store.as_ref(), &trainer_id, start, end).await?;
    Ok(Json(days))
}

// GET /api/trainers/:id/availability?start&end
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(trainer_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<AvailabilityRecord>>, AppError> {
    let (start, end) = parse_range(query.start.as_deref(), query.end.as_deref())?;
    ensure_trainer(&state, &trainer_id)?;

    let records = {
        let db = state.db.lock().unwrap();
        queries::get_availability_in_range(&db, &trainer_id, start, end)?
    };
    Ok(Json(records))
}

// POST /api/trainers/:id/availability
#[derive(Deserialize)]
pub struct AvailabilityEntry {
    pub date: String,
    pub status: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Deserialize)]
pub struct UpsertAvailabilityRequest {
    pub entries: Vec<AvailabilityEntry>,
}

pub async fn upsert_availability(
    State(state): State<Arc<AppState>>,
    Path(trainer_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UpsertAvailabilityRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    ensure_trainer(&state, &trainer_id)?;

    // Validate every entry before writing any of them
    let mut normalized = Vec::with_capacity(body.entries.len());
    for entry in &body.entries {
        let date = normalize_date(&entry.date)
            .ok_or_else(|| AppError::InvalidInput(format!("invalid date: {}", entry.date)))?;
        normalized.push((date.to_string(), AvailabilityStatus::parse(&entry.status), entry));
    }

    {
        let db = state.db.lock().unwrap();
        for (date, status, entry) in &normalized {
            queries::upsert_availability(
                &db,
                &trainer_id,
                date,
                *status,
                entry.start_time.as_deref(),
                entry.end_time.as_deref(),
            )?;
        }
    }

    tracing::info!(trainer_id = %trainer_id, count = normalized.len(), "availability updated");
    Ok(Json(serde_json::json!({"ok": true, "updated": normalized.len()})))
}

// GET /api/trainers/:id/blocked-weekdays
pub async fn get_blocked_weekdays(
    State(state): State<Arc<AppState>>,
    Path(trainer_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_trainer(&state, &trainer_id)?;

    let weekdays = {
        let db = state.db.lock().unwrap();
        queries::get_blocked_weekdays(&db, &trainer_id)?
    };
    Ok(Json(serde_json::json!({"weekdays": weekdays})))
}

// PUT /api/trainers/:id/blocked-weekdays
#[derive(Deserialize)]
pub struct BlockedWeekdaysRequest {
    pub weekdays: Vec<u8>,
}

pub async fn set_blocked_weekdays(
    State(state): State<Arc<AppState>>,
    Path(trainer_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<BlockedWeekdaysRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    ensure_trainer(&state, &trainer_id)?;

    if let Some(bad) = body.weekdays.iter().find(|w| **w > 6) {
        return Err(AppError::InvalidInput(format!(
            "weekday out of range 0-6: {bad}"
        )));
    }

    {
        let mut db = state.db.lock().unwrap();
        queries::set_blocked_weekdays(&mut db, &trainer_id, &body.weekdays)?;
    }

    tracing::info!(trainer_id = %trainer_id, weekdays = ?body.weekdays, "blocked weekdays replaced");
    Ok(Json(serde_json::json!({"ok": true})))
}
