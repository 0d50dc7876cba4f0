use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};

use crate::models::{
    AvailabilityRecord, AvailabilityStatus, Booking, BookingStatus, CalendarBooking, CalendarDay,
    DayStatus, Event,
};
use crate::services::store::CalendarStore;

/// Canonicalizes a raw date value to a `NaiveDate`. Accepts date-only
/// strings and ISO datetimes (anything after `T` or a space is dropped).
/// Unparseable or empty input yields None; callers must filter these out
/// before aggregation.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Ordered sequence of every date in `[start, end]` inclusive. An
/// inverted range yields nothing.
pub fn expand_date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}

/// Concrete blocked dates in `[start, end]` for a recurring weekday set
/// (Sunday = 0 .. Saturday = 6), ascending.
pub fn expand_blocked_weekdays(start: NaiveDate, end: NaiveDate, weekdays: &[u8]) -> Vec<NaiveDate> {
    if weekdays.is_empty() {
        return Vec::new();
    }
    let set: HashSet<u8> = weekdays.iter().copied().collect();
    expand_date_range(start, end)
        .into_iter()
        .filter(|d| set.contains(&(d.weekday().num_days_from_sunday() as u8)))
        .collect()
}

/// Suppresses confirmed raw bookings that an event already represents
/// (same `{course_id}:{start_date}` identity); every other raw booking is
/// kept. Output order is raw-then-events, stable within each group.
pub fn dedupe_bookings(
    raw: Vec<CalendarBooking>,
    from_events: Vec<CalendarBooking>,
) -> Vec<CalendarBooking> {
    let event_keys: HashSet<String> = from_events.iter().map(|e| e.dedup_key()).collect();

    let mut merged: Vec<CalendarBooking> = raw
        .into_iter()
        .filter(|b| b.status != BookingStatus::Confirmed || !event_keys.contains(&b.dedup_key()))
        .collect();
    merged.extend(from_events);
    merged
}

/// Every booking overlapping `date`: inclusive `start <= date <= end` for
/// multi-day bookings, exact start match otherwise.
pub fn bookings_on(date: NaiveDate, bookings: &[CalendarBooking]) -> Vec<CalendarBooking> {
    bookings
        .iter()
        .filter(|b| match b.end_date {
            Some(end) => b.start_date <= date && date <= end,
            None => b.start_date == date,
        })
        .cloned()
        .collect()
}

/// The core decision: one display status per day, by strict descending
/// precedence. Blocked beats everything; a booked/confirmed booking beats
/// a tentative one; the availability record only matters when no booking
/// claims the day.
pub fn resolve_day_status(
    blocked: bool,
    bookings: &[CalendarBooking],
    availability: Option<AvailabilityStatus>,
) -> DayStatus {
    if blocked {
        return DayStatus::Blocked;
    }
    if bookings
        .iter()
        .any(|b| matches!(b.status, BookingStatus::Booked | BookingStatus::Confirmed))
    {
        return DayStatus::Booked;
    }
    if bookings
        .iter()
        .any(|b| matches!(b.status, BookingStatus::Approved | BookingStatus::Tentative))
    {
        return DayStatus::Tentative;
    }
    if availability == Some(AvailabilityStatus::Available) {
        return DayStatus::Available;
    }
    DayStatus::NotAvailable
}

/// The snapshot joined from the four upstream fetches. Events are
/// expected pre-filtered to ACTIVE by the store.
#[derive(Debug, Clone, Default)]
pub struct CalendarInputs {
    pub bookings: Vec<Booking>,
    pub events: Vec<Event>,
    pub availability: Vec<AvailabilityRecord>,
    pub blocked_weekdays: Vec<u8>,
}

/// Pure assembly of the render-ready calendar: adapt and normalize each
/// source exactly once, expand blocks, deduplicate, then resolve one
/// status per day.
pub fn build_calendar(start: NaiveDate, end: NaiveDate, inputs: &CalendarInputs) -> Vec<CalendarDay> {
    let raw: Vec<CalendarBooking> = inputs
        .bookings
        .iter()
        .filter_map(|b| {
            let adapted = b.to_calendar();
            if adapted.is_none() {
                tracing::debug!(id = %b.id, date = %b.requested_date, "dropping booking with unparseable date");
            }
            adapted
        })
        .collect();

    let from_events: Vec<CalendarBooking> = inputs
        .events
        .iter()
        .filter_map(|e| {
            let adapted = e.to_calendar();
            if adapted.is_none() {
                tracing::debug!(id = %e.id, date = %e.event_date, "dropping event with unparseable date");
            }
            adapted
        })
        .collect();

    let availability: HashMap<NaiveDate, AvailabilityStatus> = inputs
        .availability
        .iter()
        .filter_map(|r| normalize_date(&r.date).map(|d| (d, r.status)))
        .collect();

    let blocked: HashSet<NaiveDate> =
        expand_blocked_weekdays(start, end, &inputs.blocked_weekdays)
            .into_iter()
            .collect();

    let merged = dedupe_bookings(raw, from_events);

    expand_date_range(start, end)
        .into_iter()
        .map(|date| {
            let day_bookings = bookings_on(date, &merged);
            let day_availability = availability.get(&date).copied();
            let is_blocked = blocked.contains(&date);
            let status = resolve_day_status(is_blocked, &day_bookings, day_availability);
            CalendarDay {
                date,
                status,
                bookings: day_bookings,
                availability: day_availability,
                blocked: is_blocked,
            }
        })
        .collect()
}

/// Fans out the four independent reads and joins before the pure build.
/// Fail-fast: any fetch error fails the whole calendar; no partial
/// calendar is ever produced.
pub async fn fetch_calendar(
    store: &dyn CalendarStore,
    trainer_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<CalendarDay>> {
    let (bookings, events, availability, blocked_weekdays) = tokio::try_join!(
        store.bookings_in_range(trainer_id, start, end),
        store.active_events_in_range(trainer_id, start, end),
        store.availability_in_range(trainer_id, start, end),
        store.blocked_weekdays(trainer_id),
    )?;

    Ok(build_calendar(
        start,
        end,
        &CalendarInputs {
            bookings,
            events,
            availability,
            blocked_weekdays,
        },
    ))
}
