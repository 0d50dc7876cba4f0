use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AvailabilityStatus, BookingStatus};

/// The one canonical record shape at the calendar aggregation boundary.
/// Raw bookings and events are each mapped into this exactly once, dates
/// normalized; everything downstream (dedup, matching, resolution) works
/// on this shape only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarBooking {
    pub id: String,
    pub course_id: String,
    pub trainer_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: BookingStatus,
    pub title: Option<String>,
}

impl CalendarBooking {
    /// Dedup identity: `{course_id}:{start_date}`.
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.course_id, self.start_date)
    }
}

/// Render-ready representation of one displayed date.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub bookings: Vec<CalendarBooking>,
    pub availability: Option<AvailabilityStatus>,
    pub blocked: bool,
}

/// The five mutually exclusive display states, in descending precedence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Blocked,
    Booked,
    Tentative,
    Available,
    NotAvailable,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Blocked => "blocked",
            DayStatus::Booked => "booked",
            DayStatus::Tentative => "tentative",
            DayStatus::Available => "available",
            DayStatus::NotAvailable => "not_available",
        }
    }
}
