use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{AvailabilityRecord, Booking, Event};

/// The four independent reads behind a calendar build. Kept behind a
/// trait so the calendar service can be exercised against stubs and the
/// backing store swapped without touching the pure core.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    async fn bookings_in_range(
        &self,
        trainer_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<Booking>>;

    async fn active_events_in_range(
        &self,
        trainer_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<Event>>;

    async fn availability_in_range(
        &self,
        trainer_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<AvailabilityRecord>>;

    async fn blocked_weekdays(&self, trainer_id: &str) -> anyhow::Result<Vec<u8>>;
}

pub struct SqliteStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalendarStore for SqliteStore {
    async fn bookings_in_range(
        &self,
        trainer_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<Booking>> {
        let db = self.db.lock().unwrap();
        queries::get_bookings_in_range(&db, trainer_id, start, end)
    }

    async fn active_events_in_range(
        &self,
        trainer_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<Event>> {
        let db = self.db.lock().unwrap();
        queries::get_active_events_in_range(&db, trainer_id, start, end)
    }

    async fn availability_in_range(
        &self,
        trainer_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<AvailabilityRecord>> {
        let db = self.db.lock().unwrap();
        queries::get_availability_in_range(&db, trainer_id, start, end)
    }

    async fn blocked_weekdays(&self, trainer_id: &str) -> anyhow::Result<Vec<u8>> {
        let db = self.db.lock().unwrap();
        queries::get_blocked_weekdays(&db, trainer_id)
    }
}
