use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::notifications::NotificationProvider;
use crate::services::store::CalendarStore;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub store: Arc<dyn CalendarStore>,
    pub notifier: Box<dyn NotificationProvider>,
}
