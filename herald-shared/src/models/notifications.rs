use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    pub title: Option<Value>,
    pub body: Option<Value>,
}

#[derive(Deserialize, Clone)]
pub struct ServiceAccountKey {
    pub private_key: String,
    pub client_email: String,
    pub project_id: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct FirebaseClaims<'a> {
    pub iss: &'a str,
    pub scope: &'a str,
    pub aud: &'a str,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Body of `POST /v1/projects/{project}/messages:send`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FcmMessage {
    pub message: FcmMessageContent,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FcmMessageContent {
    pub token: String,
    pub notification: FcmNotification,
    pub data: FcmData,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FcmNotification {
    // Forwarded as stored; absent columns are omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FcmData {
    pub click_action: String,
}

impl FcmMessage {
    pub fn for_device(device_token: &str, payload: &NotificationPayload) -> Self {
        Self {
            message: FcmMessageContent {
                token: device_token.to_string(),
                notification: FcmNotification {
                    title: payload.title.clone(),
                    body: payload.body.clone(),
                },
                data: FcmData {
                    click_action: CLICK_ACTION.to_string(),
                },
            },
        }
    }
}
