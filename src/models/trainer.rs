use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub push_token: Option<String>,
    pub created_at: String,
}
