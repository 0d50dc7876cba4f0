pub mod push;

use async_trait::async_trait;

#[async_trait]
pub trait NotificationProvider: Send + Sync {
    async fn notify(&self, push_token: &str, title: &str, body: &str) -> anyhow::Result<()>;
}
