use async_trait::async_trait;
use reqwest::Client;
use serde::de::IgnoredAny;
use crate::models::errors::NotificationError;
use crate::models::notifications::FcmMessage;
use crate::utilities::logging::{log_info, log_warn};

#[async_trait]
pub trait PushSender: Send + Sync {
    /// Delivers one message and hands back the provider's JSON reply as received.
    async fn send(
        &self,
        project_id: &str,
        access_token: &str,
        message: &FcmMessage,
    ) -> Result<String, NotificationError>;
}

pub struct FcmClient {
    client: Client,
    base_url: String,
}

impl FcmClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn send_url(&self, project_id: &str) -> String {
        format!("{}/v1/projects/{}/messages:send", self.base_url, project_id)
    }
}

#[async_trait]
impl PushSender for FcmClient {
    async fn send(
        &self,
        project_id: &str,
        access_token: &str,
        message: &FcmMessage,
    ) -> Result<String, NotificationError> {
        let res = self
            .client
            .post(self.send_url(project_id))
            .bearer_auth(access_token)
            .json(message)
            .send()
            .await?;

        // Provider-level failures are still relayed to the caller as-is
        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            log_warn("FcmPushRejected", &format!("Push returned {}: {}", status, text));
        }

        // Checked for well-formedness only, the text itself is what gets relayed
        serde_json::from_str::<IgnoredAny>(&text)
            .map_err(|e| NotificationError::InvalidResponse(format!("{} ({}): {}", e, status, text)))?;

        log_info("FcmResponse", &text);
        Ok(text)
    }
}
