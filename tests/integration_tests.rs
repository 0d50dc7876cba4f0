use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceExt;

use trainerbook::config::AppConfig;
use trainerbook::db;
use trainerbook::db::queries;
use trainerbook::handlers;
use trainerbook::models::{Booking, BookingStatus, Event, EventStatus, Trainer};
use trainerbook::services::notifications::NotificationProvider;
use trainerbook::services::store::SqliteStore;
use trainerbook::state::AppState;

// ── Mock Notifier ──

struct MockNotifier {
    sent: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl MockNotifier {
    fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
        }
    }
}

#[async_trait]
impl NotificationProvider for MockNotifier {
    async fn notify(&self, push_token: &str, title: &str, body: &str) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push((
            push_token.to_string(),
            title.to_string(),
            body.to_string(),
        ));
        Ok(())
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        admin_token: "test-token".to_string(),
        push_endpoint: "http://localhost:9999/push".to_string(),
        push_api_key: "test-key".to_string(),
    }
}

fn test_state() -> Arc<AppState> {
    test_state_with_sent().0
}

fn test_state_with_sent() -> (Arc<AppState>, Arc<Mutex<Vec<(String, String, String)>>>) {
    let config = test_config();
    let conn = db::init_db(":memory:").unwrap();
    let db = Arc::new(Mutex::new(conn));
    let notifier = MockNotifier::new();
    let sent = Arc::clone(&notifier.sent);
    let state = Arc::new(AppState {
        db: Arc::clone(&db),
        config,
        store: Arc::new(SqliteStore::new(db)),
        notifier: Box::new(notifier),
    });
    (state, sent)
}

fn test_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/trainers/:id/calendar",
            get(handlers::calendar::get_calendar),
        )
        .route(
            "/api/trainers/:id/availability",
            get(handlers::calendar::get_availability),
        )
        .route(
            "/api/trainers/:id/availability",
            post(handlers::calendar::upsert_availability),
        )
        .route(
            "/api/trainers/:id/blocked-weekdays",
            get(handlers::calendar::get_blocked_weekdays),
        )
        .route(
            "/api/trainers/:id/blocked-weekdays",
            put(handlers::calendar::set_blocked_weekdays),
        )
        .route("/api/admin/trainers", get(handlers::admin::get_trainers))
        .route("/api/admin/trainers", post(handlers::admin::create_trainer))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route("/api/admin/bookings", post(handlers::admin::create_booking))
        .route(
            "/api/admin/bookings/:id/status",
            post(handlers::admin::update_booking_status),
        )
        .route(
            "/api/admin/bookings/:id/promote",
            post(handlers::admin::promote_booking),
        )
        .route("/api/admin/events", get(handlers::admin::get_events))
        .route("/api/admin/events", post(handlers::admin::create_event))
        .with_state(state)
}

fn seed_trainer(state: &Arc<AppState>, id: &str, push_token: Option<&str>) {
    let db = state.db.lock().unwrap();
    queries::create_trainer(
        &db,
        &Trainer {
            id: id.to_string(),
            name: format!("Trainer {id}"),
            email: None,
            push_token: push_token.map(|t| t.to_string()),
            created_at: "2024-01-01 00:00:00".to_string(),
        },
    )
    .unwrap();
}

fn seed_booking(state: &Arc<AppState>, id: &str, course: &str, date: &str, status: BookingStatus) {
    seed_booking_ending(state, id, course, date, None, status);
}

fn seed_booking_ending(
    state: &Arc<AppState>,
    id: &str,
    course: &str,
    date: &str,
    end_date: Option<&str>,
    status: BookingStatus,
) {
    let db = state.db.lock().unwrap();
    queries::create_booking(
        &db,
        &Booking {
            id: id.to_string(),
            course_id: course.to_string(),
            trainer_id: "tr-1".to_string(),
            requested_date: date.to_string(),
            end_date: end_date.map(|d| d.to_string()),
            status,
            title: None,
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: "2024-01-01 00:00:00".to_string(),
        },
    )
    .unwrap();
}

fn seed_event(state: &Arc<AppState>, id: &str, course: &str, date: &str) {
    let db = state.db.lock().unwrap();
    queries::create_event(
        &db,
        &Event {
            id: id.to_string(),
            course_id: course.to_string(),
            trainer_id: "tr-1".to_string(),
            event_date: date.to_string(),
            end_date: None,
            title: None,
            status: EventStatus::Active,
            created_at: "2024-01-01 00:00:00".to_string(),
        },
    )
    .unwrap();
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", "Bearer test-token")
        .body(Body::empty())
        .unwrap()
}

fn authed_json(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", "Bearer test-token")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let app = test_app(test_state());
    let res = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

// ── Auth ──

#[tokio::test]
async fn test_admin_requires_auth() {
    let app = test_app(test_state());
    let res = app
        .oneshot(get_request("/api/admin/bookings"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_wrong_token() {
    let app = test_app(test_state());
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/bookings")
                .header("Authorization", "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutating_trainer_routes_require_auth() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/trainers/tr-1/blocked-weekdays")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"weekdays":[0]}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// ── Trainers ──

#[tokio::test]
async fn test_create_and_list_trainers() {
    let state = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/trainers",
            r#"{"name":"Dana","email":"dana@example.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created = body_json(res).await;
    assert_eq!(created["name"], "Dana");
    assert!(created["id"].as_str().is_some());

    let app = test_app(state);
    let res = app.oneshot(authed_get("/api/admin/trainers")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let list = body_json(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_trainer_empty_name_rejected() {
    let app = test_app(test_state());
    let res = app
        .oneshot(authed_json("POST", "/api/admin/trainers", r#"{"name":"  "}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Bookings ──

#[tokio::test]
async fn test_create_booking_and_filter_by_status() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);

    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings",
            r#"{"course_id":"c1","trainer_id":"tr-1","requested_date":"2024-03-05","title":"Rust 101"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created = body_json(res).await;
    assert_eq!(created["status"], "pending");

    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_get("/api/admin/bookings?status=pending"))
        .await
        .unwrap();
    let list = body_json(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let app = test_app(state);
    let res = app
        .oneshot(authed_get("/api/admin/bookings?status=confirmed"))
        .await
        .unwrap();
    let list = body_json(res).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_booking_invalid_date_rejected() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);
    let app = test_app(state);

    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings",
            r#"{"course_id":"c1","trainer_id":"tr-1","requested_date":"next tuesday"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_booking_unknown_trainer_rejected() {
    let app = test_app(test_state());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings",
            r#"{"course_id":"c1","trainer_id":"ghost","requested_date":"2024-03-05"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_update_and_lifecycle_guard() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);
    seed_booking(&state, "bk-1", "c1", "2024-03-05", BookingStatus::Pending);

    // pending → canceled
    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings/bk-1/status",
            r#"{"status":"canceled"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated = body_json(res).await;
    assert_eq!(updated["status"], "canceled");

    // canceled is terminal
    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings/bk-1/status",
            r#"{"status":"approved"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // row unchanged
    let db = state.db.lock().unwrap();
    let booking = queries::get_booking_by_id(&db, "bk-1").unwrap().unwrap();
    assert_eq!(booking.status, BookingStatus::Canceled);
}

#[tokio::test]
async fn test_status_update_unknown_status_rejected() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);
    seed_booking(&state, "bk-1", "c1", "2024-03-05", BookingStatus::Pending);

    let app = test_app(state);
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings/bk-1/status",
            r#"{"status":"definitely"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_status_update_missing_booking_404() {
    let app = test_app(test_state());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings/nope/status",
            r#"{"status":"approved"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_update_notifies_trainer() {
    let (state, sent) = test_state_with_sent();
    seed_trainer(&state, "tr-1", Some("device-token-1"));
    seed_booking(&state, "bk-1", "c1", "2024-03-05", BookingStatus::Pending);

    let app = test_app(state);
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings/bk-1/status",
            r#"{"status":"approved"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let messages = sent.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, "device-token-1");
    assert!(
        messages[0].2.contains("approved"),
        "notification should mention the new status, got: {}",
        messages[0].2
    );
}

#[tokio::test]
async fn test_notification_skipped_without_push_token() {
    let (state, sent) = test_state_with_sent();
    seed_trainer(&state, "tr-1", None);
    seed_booking(&state, "bk-1", "c1", "2024-03-05", BookingStatus::Pending);

    let app = test_app(state);
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings/bk-1/status",
            r#"{"status":"approved"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(sent.lock().unwrap().is_empty());
}

// ── Promote ──

#[tokio::test]
async fn test_promote_requires_approved() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);
    seed_booking(&state, "bk-1", "c1", "2024-03-05", BookingStatus::Pending);

    let app = test_app(state);
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings/bk-1/promote",
            "{}",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_promote_creates_event_and_confirms_booking() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);
    seed_booking(&state, "bk-1", "c1", "2024-03-05", BookingStatus::Approved);

    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/bookings/bk-1/promote",
            "{}",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let event = body_json(res).await;
    assert_eq!(event["status"], "ACTIVE");
    assert_eq!(event["course_id"], "c1");

    {
        let db = state.db.lock().unwrap();
        let booking = queries::get_booking_by_id(&db, "bk-1").unwrap().unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    // the calendar now shows the event, not the duplicate confirmed booking
    let app = test_app(state);
    let res = app
        .oneshot(get_request(
            "/api/trainers/tr-1/calendar?start=2024-03-05&end=2024-03-05",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let days = body_json(res).await;
    let day = &days.as_array().unwrap()[0];
    assert_eq!(day["status"], "booked");
    assert_eq!(day["bookings"].as_array().unwrap().len(), 1);
    assert_eq!(day["bookings"][0]["status"], "booked");
}

// ── Calendar ──

#[tokio::test]
async fn test_calendar_unknown_trainer_404() {
    let app = test_app(test_state());
    let res = app
        .oneshot(get_request(
            "/api/trainers/ghost/calendar?start=2024-03-01&end=2024-03-31",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_calendar_missing_or_inverted_range_rejected() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request("/api/trainers/tr-1/calendar?start=2024-03-01"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = test_app(state);
    let res = app
        .oneshot(get_request(
            "/api/trainers/tr-1/calendar?start=2024-03-31&end=2024-03-01",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_calendar_statuses_end_to_end() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);

    // Mar 5: confirmed booking + matching event → event only, booked
    seed_booking(&state, "bk-conf", "c1", "2024-03-05", BookingStatus::Confirmed);
    seed_event(&state, "ev-1", "c1", "2024-03-05");
    // Mar 6: approved booking → tentative
    seed_booking(&state, "bk-appr", "c2", "2024-03-06", BookingStatus::Approved);
    // Mar 9 is a Saturday, blocked below, with a booked booking on it
    seed_booking(&state, "bk-sat", "c3", "2024-03-09", BookingStatus::Booked);

    // Mar 7: availability AVAILABLE (mixed case on the wire)
    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/trainers/tr-1/availability",
            r#"{"entries":[{"date":"2024-03-07","status":"AVAILABLE"}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Saturdays blocked
    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "PUT",
            "/api/trainers/tr-1/blocked-weekdays",
            r#"{"weekdays":[6]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(get_request(
            "/api/trainers/tr-1/calendar?start=2024-03-05&end=2024-03-09",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let days = body_json(res).await;
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 5);

    assert_eq!(days[0]["date"], "2024-03-05");
    assert_eq!(days[0]["status"], "booked");
    assert_eq!(days[0]["bookings"].as_array().unwrap().len(), 1);
    assert_eq!(days[0]["bookings"][0]["id"], "ev-1");

    assert_eq!(days[1]["status"], "tentative");

    assert_eq!(days[2]["status"], "available");
    assert_eq!(days[2]["availability"], "available");

    assert_eq!(days[3]["status"], "not_available");
    assert_eq!(days[3]["availability"], serde_json::Value::Null);

    // blocked wins over the booked booking
    assert_eq!(days[4]["status"], "blocked");
    assert_eq!(days[4]["blocked"], true);
    assert_eq!(days[4]["bookings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_calendar_multi_day_booking_spans_days() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);
    seed_booking_ending(
        &state,
        "bk-multi",
        "c1",
        "2024-01-10",
        Some("2024-01-12"),
        BookingStatus::Booked,
    );

    let app = test_app(state);
    let res = app
        .oneshot(get_request(
            "/api/trainers/tr-1/calendar?start=2024-01-09&end=2024-01-13",
        ))
        .await
        .unwrap();
    let days = body_json(res).await;
    let statuses: Vec<&str> = days
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["status"].as_str().unwrap())
        .collect();
    assert_eq!(
        statuses,
        vec!["not_available", "booked", "booked", "booked", "not_available"]
    );
}

#[tokio::test]
async fn test_calendar_accepts_datetime_range_params() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);

    let app = test_app(state);
    let res = app
        .oneshot(get_request(
            "/api/trainers/tr-1/calendar?start=2024-03-01T00:00:00&end=2024-03-03T23:59:59",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let days = body_json(res).await;
    assert_eq!(days.as_array().unwrap().len(), 3);
}

// ── Availability ──

#[tokio::test]
async fn test_availability_upsert_replaces_per_date() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);

    for status in ["available", "tentative"] {
        let app = test_app(state.clone());
        let res = app
            .oneshot(authed_json(
                "POST",
                "/api/trainers/tr-1/availability",
                &format!(r#"{{"entries":[{{"date":"2024-03-07","status":"{status}"}}]}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let app = test_app(state);
    let res = app
        .oneshot(get_request(
            "/api/trainers/tr-1/availability?start=2024-03-01&end=2024-03-31",
        ))
        .await
        .unwrap();
    let records = body_json(res).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], "tentative");
}

#[tokio::test]
async fn test_availability_invalid_date_rejected_atomically() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);

    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/trainers/tr-1/availability",
            r#"{"entries":[{"date":"2024-03-07","status":"available"},{"date":"bad","status":"available"}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // nothing was written
    let app = test_app(state);
    let res = app
        .oneshot(get_request(
            "/api/trainers/tr-1/availability?start=2024-03-01&end=2024-03-31",
        ))
        .await
        .unwrap();
    let records = body_json(res).await;
    assert_eq!(records.as_array().unwrap().len(), 0);
}

// ── Blocked Weekdays ──

#[tokio::test]
async fn test_blocked_weekdays_roundtrip_and_validation() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);

    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "PUT",
            "/api/trainers/tr-1/blocked-weekdays",
            r#"{"weekdays":[0,6]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state.clone());
    let res = app
        .oneshot(get_request("/api/trainers/tr-1/blocked-weekdays"))
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json["weekdays"], serde_json::json!([0, 6]));

    // out-of-range weekday rejected
    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "PUT",
            "/api/trainers/tr-1/blocked-weekdays",
            r#"{"weekdays":[7]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // replace with empty set clears all
    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "PUT",
            "/api/trainers/tr-1/blocked-weekdays",
            r#"{"weekdays":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(get_request("/api/trainers/tr-1/blocked-weekdays"))
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json["weekdays"], serde_json::json!([]));
}

// ── Events ──

#[tokio::test]
async fn test_create_event_directly_and_list() {
    let state = test_state();
    seed_trainer(&state, "tr-1", None);

    let app = test_app(state.clone());
    let res = app
        .oneshot(authed_json(
            "POST",
            "/api/admin/events",
            r#"{"course_id":"c9","trainer_id":"tr-1","event_date":"2024-04-02","title":"Onboarding"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let event = body_json(res).await;
    assert_eq!(event["status"], "ACTIVE");

    let app = test_app(state);
    let res = app
        .oneshot(authed_get("/api/admin/events?trainer_id=tr-1"))
        .await
        .unwrap();
    let list = body_json(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Onboarding");
}
