use serde::{Deserialize, Serialize};

/// A trainer-declared per-date status. At most one record exists per
/// (trainer, date); a missing record means `not_available`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub id: i64,
    pub trainer_id: String,
    pub date: String,
    pub status: AvailabilityStatus,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    NotAvailable,
    Booked,
    Tentative,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::NotAvailable => "not_available",
            AvailabilityStatus::Booked => "booked",
            AvailabilityStatus::Tentative => "tentative",
        }
    }

    /// Case-insensitive; anything unrecognized is the default
    /// `not_available`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "available" => AvailabilityStatus::Available,
            "booked" => AvailabilityStatus::Booked,
            "tentative" => AvailabilityStatus::Tentative,
            _ => AvailabilityStatus::NotAvailable,
        }
    }
}
