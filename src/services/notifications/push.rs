use anyhow::Context;
use async_trait::async_trait;

use super::NotificationProvider;

/// Posts notifications to an HTTP push relay (one request per message).
/// Delivery is best-effort; callers log failures and move on.
pub struct HttpPushProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpPushProvider {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            endpoint,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotificationProvider for HttpPushProvider {
    async fn notify(&self, push_token: &str, title: &str, body: &str) -> anyhow::Result<()> {
        self.client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "to": push_token,
                "title": title,
                "body": body,
            }))
            .send()
            .await
            .context("failed to send push notification")?
            .error_for_status()
            .context("push relay returned error")?;

        Ok(())
    }
}
