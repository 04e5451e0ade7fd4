use std::sync::Arc;
use reqwest::Client;
use serde_json::Value;
use crate::models::errors::{DispatchError, NotificationError};
use crate::models::events::{declared_event_type, NotificationRecord, INSERT_EVENT};
use crate::models::notifications::{FcmMessage, NotificationPayload, ServiceAccountKey};
use crate::repositories::profile_repository::{ProfileRepository, SupabaseProfileRepository};
use crate::services::firebase_auth::{AccessTokenProvider, FirebaseAuthenticator};
use crate::services::notification_services::{FcmClient, PushSender};
use crate::utilities::config::AppConfig;
use crate::utilities::logging::log_info;

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The webhook was not an insert; nothing was looked up or sent.
    Filtered,
    /// The recipient has no registered device.
    NoToken,
    /// Provider reply text, relayed as-is.
    Sent(String),
}

/// Turns one database webhook into at most one push message.
///
/// Holds only read-only collaborators, so a single instance serves concurrent
/// invocations.
pub struct NotificationDispatcher {
    profiles: Option<Arc<dyn ProfileRepository>>,
    service_account: Option<ServiceAccountKey>,
    authenticator: Arc<dyn AccessTokenProvider>,
    sender: Arc<dyn PushSender>,
}

impl NotificationDispatcher {
    pub fn new(
        profiles: Option<Arc<dyn ProfileRepository>>,
        service_account: Option<ServiceAccountKey>,
        authenticator: Arc<dyn AccessTokenProvider>,
        sender: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            profiles,
            service_account,
            authenticator,
            sender,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.outbound_timeout).build()?;

        let profiles = config.supabase.clone().map(|supabase| {
            Arc::new(SupabaseProfileRepository::new(client.clone(), supabase)) as Arc<dyn ProfileRepository>
        });

        Ok(Self::new(
            profiles,
            config.firebase.clone(),
            Arc::new(FirebaseAuthenticator::new(client.clone())),
            Arc::new(FcmClient::new(client, config.fcm_base_url.clone())),
        ))
    }

    pub async fn dispatch(&self, body: Value) -> Result<DispatchOutcome, DispatchError> {
        log_info("WebhookReceived", &body.to_string());

        if declared_event_type(&body) != INSERT_EVENT {
            return Ok(DispatchOutcome::Filtered);
        }

        let record = NotificationRecord::from_event(&body);

        let profiles = self.profiles.as_ref().ok_or(DispatchError::MissingSupabaseConfig)?;

        let device_token = match profiles.get_push_token(&record.recipient_id).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                log_info("NoDeviceToken", &format!("No FCM token found for user {}", record.recipient_id));
                return Ok(DispatchOutcome::NoToken);
            }
            Err(e) => return Err(DispatchError::ProfileLookupFailed(e)),
        };

        let service_account = self.service_account.as_ref().ok_or(DispatchError::MissingFirebaseSecret)?;

        let payload = NotificationPayload {
            title: record.title,
            body: record.body,
        };

        let reply = self.deliver(service_account, &device_token, &payload).await?;
        Ok(DispatchOutcome::Sent(reply))
    }

    async fn deliver(
        &self,
        service_account: &ServiceAccountKey,
        device_token: &str,
        payload: &NotificationPayload,
    ) -> Result<String, NotificationError> {
        let access_token = self.authenticator.access_token(service_account).await?;
        let message = FcmMessage::for_device(device_token, payload);
        self.sender
            .send(&service_account.project_id, &access_token, &message)
            .await
    }
}
