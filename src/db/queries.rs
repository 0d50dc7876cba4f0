use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Row};

use crate::models::{
    AvailabilityRecord, AvailabilityStatus, Booking, BookingStatus, Event, EventStatus, Trainer,
};

fn now_string() -> String {
    Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ── Trainers ──

fn trainer_from_row(row: &Row) -> rusqlite::Result<Trainer> {
    Ok(Trainer {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        push_token: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn create_trainer(conn: &Connection, trainer: &Trainer) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO trainers (id, name, email, push_token, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            trainer.id,
            trainer.name,
            trainer.email,
            trainer.push_token,
            trainer.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_trainer(conn: &Connection, id: &str) -> anyhow::Result<Option<Trainer>> {
    let result = conn.query_row(
        "SELECT id, name, email, push_token, created_at FROM trainers WHERE id = ?1",
        params![id],
        trainer_from_row,
    );

    match result {
        Ok(trainer) => Ok(Some(trainer)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_trainers(conn: &Connection) -> anyhow::Result<Vec<Trainer>> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, push_token, created_at FROM trainers ORDER BY name ASC")?;
    let rows = stmt.query_map([], trainer_from_row)?;

    let mut trainers = vec![];
    for row in rows {
        trainers.push(row?);
    }
    Ok(trainers)
}

// ── Bookings ──

fn booking_from_row(row: &Row) -> rusqlite::Result<Booking> {
    let status: String = row.get(5)?;
    Ok(Booking {
        id: row.get(0)?,
        course_id: row.get(1)?,
        trainer_id: row.get(2)?,
        requested_date: row.get(3)?,
        end_date: row.get(4)?,
        status: BookingStatus::parse(&status),
        title: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

const BOOKING_COLS: &str =
    "id, course_id, trainer_id, requested_date, end_date, status, title, created_at, updated_at";

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        &format!("INSERT INTO bookings ({BOOKING_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
        params![
            booking.id,
            booking.course_id,
            booking.trainer_id,
            booking.requested_date,
            booking.end_date,
            booking.status.as_str(),
            booking.title,
            booking.created_at,
            booking.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLS} FROM bookings WHERE id = ?1"),
        params![id],
        booking_from_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Bookings overlapping `[start, end]` for one trainer. Raw dates may
/// carry time-of-day suffixes, so comparisons use the 10-char date
/// prefix; a multi-day booking matches when its span touches the window.
pub fn get_bookings_in_range(
    conn: &Connection,
    trainer_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLS} FROM bookings
         WHERE trainer_id = ?1
           AND substr(requested_date, 1, 10) <= ?3
           AND substr(COALESCE(end_date, requested_date), 1, 10) >= ?2
         ORDER BY requested_date ASC, id ASC"
    ))?;

    let rows = stmt.query_map(
        params![trainer_id, start.to_string(), end.to_string()],
        booking_from_row,
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_all_bookings(
    conn: &Connection,
    status_filter: Option<&str>,
    trainer_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Booking>> {
    let mut sql = format!("SELECT {BOOKING_COLS} FROM bookings WHERE 1=1");
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = vec![];

    if let Some(status) = status_filter {
        params_vec.push(Box::new(status.to_lowercase()));
        sql.push_str(&format!(" AND status = ?{}", params_vec.len()));
    }
    if let Some(trainer_id) = trainer_filter {
        params_vec.push(Box::new(trainer_id.to_string()));
        sql.push_str(&format!(" AND trainer_id = ?{}", params_vec.len()));
    }
    params_vec.push(Box::new(limit));
    sql.push_str(&format!(
        " ORDER BY requested_date DESC LIMIT ?{}",
        params_vec.len()
    ));

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), booking_from_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now_string(), id],
    )?;
    Ok(count > 0)
}

// ── Events ──

fn event_from_row(row: &Row) -> rusqlite::Result<Event> {
    let status: String = row.get(6)?;
    Ok(Event {
        id: row.get(0)?,
        course_id: row.get(1)?,
        trainer_id: row.get(2)?,
        event_date: row.get(3)?,
        end_date: row.get(4)?,
        title: row.get(5)?,
        status: EventStatus::parse(&status),
        created_at: row.get(7)?,
    })
}

const EVENT_COLS: &str =
    "id, course_id, trainer_id, event_date, end_date, title, status, created_at";

pub fn create_event(conn: &Connection, event: &Event) -> anyhow::Result<()> {
    conn.execute(
        &format!("INSERT INTO events ({EVENT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
        params![
            event.id,
            event.course_id,
            event.trainer_id,
            event.event_date,
            event.end_date,
            event.title,
            event.status.as_str(),
            event.created_at,
        ],
    )?;
    Ok(())
}

/// Calendar feed: ACTIVE events only, same window semantics as bookings.
pub fn get_active_events_in_range(
    conn: &Connection,
    trainer_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<Event>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLS} FROM events
         WHERE trainer_id = ?1
           AND status = 'ACTIVE'
           AND substr(event_date, 1, 10) <= ?3
           AND substr(COALESCE(end_date, event_date), 1, 10) >= ?2
         ORDER BY event_date ASC, id ASC"
    ))?;

    let rows = stmt.query_map(
        params![trainer_id, start.to_string(), end.to_string()],
        event_from_row,
    )?;

    let mut events = vec![];
    for row in rows {
        events.push(row?);
    }
    Ok(events)
}

pub fn list_events(
    conn: &Connection,
    trainer_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Event>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match trainer_filter {
        Some(trainer_id) => (
            format!(
                "SELECT {EVENT_COLS} FROM events WHERE trainer_id = ?1
                 ORDER BY event_date DESC LIMIT ?2"
            ),
            vec![
                Box::new(trainer_id.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            format!("SELECT {EVENT_COLS} FROM events ORDER BY event_date DESC LIMIT ?1"),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), event_from_row)?;

    let mut events = vec![];
    for row in rows {
        events.push(row?);
    }
    Ok(events)
}

// ── Availability ──

fn availability_from_row(row: &Row) -> rusqlite::Result<AvailabilityRecord> {
    let status: String = row.get(3)?;
    Ok(AvailabilityRecord {
        id: row.get(0)?,
        trainer_id: row.get(1)?,
        date: row.get(2)?,
        status: AvailabilityStatus::parse(&status),
        start_time: row.get(4)?,
        end_time: row.get(5)?,
    })
}

pub fn upsert_availability(
    conn: &Connection,
    trainer_id: &str,
    date: &str,
    status: AvailabilityStatus,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO availability (trainer_id, date, status, start_time, end_time)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(trainer_id, date) DO UPDATE SET
           status = excluded.status,
           start_time = excluded.start_time,
           end_time = excluded.end_time",
        params![trainer_id, date, status.as_str(), start_time, end_time],
    )?;
    Ok(())
}

pub fn get_availability_in_range(
    conn: &Connection,
    trainer_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<AvailabilityRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, trainer_id, date, status, start_time, end_time FROM availability
         WHERE trainer_id = ?1
           AND substr(date, 1, 10) >= ?2
           AND substr(date, 1, 10) <= ?3
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(
        params![trainer_id, start.to_string(), end.to_string()],
        availability_from_row,
    )?;

    let mut records = vec![];
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

// ── Blocked Weekdays ──

pub fn set_blocked_weekdays(
    conn: &mut Connection,
    trainer_id: &str,
    weekdays: &[u8],
) -> anyhow::Result<()> {
    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM blocked_weekdays WHERE trainer_id = ?1",
        params![trainer_id],
    )?;
    for weekday in weekdays {
        tx.execute(
            "INSERT OR IGNORE INTO blocked_weekdays (trainer_id, weekday) VALUES (?1, ?2)",
            params![trainer_id, weekday],
        )?;
    }
    tx.commit()?;
    Ok(())
}

pub fn get_blocked_weekdays(conn: &Connection, trainer_id: &str) -> anyhow::Result<Vec<u8>> {
    let mut stmt = conn.prepare(
        "SELECT weekday FROM blocked_weekdays WHERE trainer_id = ?1 ORDER BY weekday ASC",
    )?;
    let rows = stmt.query_map(params![trainer_id], |row| row.get::<_, u8>(0))?;

    let mut weekdays = vec![];
    for row in rows {
        weekdays.push(row?);
    }
    Ok(weekdays)
}
