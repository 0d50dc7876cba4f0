use serde::{Deserialize, Serialize};

use crate::models::calendar::CalendarBooking;
use crate::services::calendar::normalize_date;

/// A client's request to engage a trainer for a course. Dates are kept as
/// the raw strings the request arrived with (date-only or ISO datetime);
/// normalization happens once, at the calendar aggregation boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub course_id: String,
    pub trainer_id: String,
    pub requested_date: String,
    pub end_date: Option<String>,
    pub status: BookingStatus,
    pub title: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Booking {
    /// Adapts a raw booking into the canonical calendar record,
    /// normalizing dates once. Returns None when the requested date does
    /// not normalize; such records are dropped from calendar display.
    pub fn to_calendar(&self) -> Option<CalendarBooking> {
        let start_date = normalize_date(&self.requested_date)?;
        Some(CalendarBooking {
            id: self.id.clone(),
            course_id: self.course_id.clone(),
            trainer_id: self.trainer_id.clone(),
            start_date,
            end_date: self.end_date.as_deref().and_then(normalize_date),
            status: self.status,
            title: self.title.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Confirmed,
    Denied,
    Tentative,
    Booked,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Denied => "denied",
            BookingStatus::Tentative => "tentative",
            BookingStatus::Booked => "booked",
            BookingStatus::Canceled => "canceled",
        }
    }

    /// Case-insensitive; unknown strings degrade to `pending` rather than
    /// dropping the record.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "approved" => BookingStatus::Approved,
            "confirmed" => BookingStatus::Confirmed,
            "denied" => BookingStatus::Denied,
            "tentative" => BookingStatus::Tentative,
            "booked" => BookingStatus::Booked,
            "canceled" | "cancelled" => BookingStatus::Canceled,
            _ => BookingStatus::Pending,
        }
    }

    /// Canceled and denied bookings accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Canceled | BookingStatus::Denied)
    }
}
