use serde::{Deserialize, Serialize};

use super::BookingStatus;
use crate::models::calendar::CalendarBooking;
use crate::services::calendar::normalize_date;

/// An admin-committed occurrence, usually derived from an approved
/// booking. Events carry their own lifecycle; only ACTIVE events feed the
/// calendar (the store query filters them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub course_id: String,
    pub trainer_id: String,
    pub event_date: String,
    pub end_date: Option<String>,
    pub title: Option<String>,
    pub status: EventStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Active,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Active => "ACTIVE",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "COMPLETED" => EventStatus::Completed,
            "CANCELLED" => EventStatus::Cancelled,
            _ => EventStatus::Active,
        }
    }
}

impl Event {
    /// Adapts an event into the canonical calendar record with the
    /// synthetic status `booked`. Returns None when the event date does
    /// not normalize; such records are dropped from display.
    pub fn to_calendar(&self) -> Option<CalendarBooking> {
        let start_date = normalize_date(&self.event_date)?;
        Some(CalendarBooking {
            id: self.id.clone(),
            course_id: self.course_id.clone(),
            trainer_id: self.trainer_id.clone(),
            start_date,
            end_date: self.end_date.as_deref().and_then(normalize_date),
            status: BookingStatus::Booked,
            title: self.title.clone(),
        })
    }
}
