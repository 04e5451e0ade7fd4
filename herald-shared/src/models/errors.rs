use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid FIREBASE_SERVICE_ACCOUNT: {0}")]
    InvalidServiceAccount(#[from] SerdeJsonError),

    #[error("Invalid number in {0}: {1}")]
    InvalidNumber(String, String),
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile lookup returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Invalid profile response: {0}")]
    InvalidResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid private key format: {0}")]
    InvalidPrivateKey(String),

    #[error("JWT creation failed: {0}")]
    SigningFailed(String),

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("Token exchange response did not contain an access_token")]
    MissingAccessToken,

    #[error("Invalid FCM response: {0}")]
    InvalidResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),
}

/// Terminal failures of a single webhook dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Missing Supabase Config")]
    MissingSupabaseConfig,

    #[error("Failed to fetch profile")]
    ProfileLookupFailed(#[source] ProfileError),

    #[error("Server Config Error: Missing Firebase Secret")]
    MissingFirebaseSecret,

    #[error("{0}")]
    Delivery(#[from] NotificationError),
}
