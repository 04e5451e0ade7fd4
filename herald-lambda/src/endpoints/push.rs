use http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::Value;
use herald_shared::models::errors::DispatchError;
use herald_shared::services::dispatch_service::{DispatchOutcome, NotificationDispatcher};
use herald_shared::utilities::logging::log_error;
use herald_shared::utilities::responses::{json_passthrough, text_response};

pub const NOT_INSERT_MESSAGE: &str = "Not an INSERT event";
pub const NO_TOKEN_MESSAGE: &str = "No FCM token found";

pub async fn handler(dispatcher: &NotificationDispatcher, body: Value) -> Result<Response<Body>, lambda_http::Error> {
    match dispatcher.dispatch(body).await {
        Ok(DispatchOutcome::Filtered) => text_response(NOT_INSERT_MESSAGE, StatusCode::OK),
        Ok(DispatchOutcome::NoToken) => text_response(NO_TOKEN_MESSAGE, StatusCode::OK),
        Ok(DispatchOutcome::Sent(reply)) => json_passthrough(reply),
        Err(err) => {
            let (event, code) = classify(&err);
            // Debug keeps the upstream cause; the caller only sees Display
            log_error(event, &format!("{:?}", err));
            text_response(err.to_string(), code)
        }
    }
}

fn classify(err: &DispatchError) -> (&'static str, StatusCode) {
    match err {
        DispatchError::MissingSupabaseConfig => ("MissingSupabaseConfig", StatusCode::INTERNAL_SERVER_ERROR),
        DispatchError::ProfileLookupFailed(_) => ("ProfileLookupFailed", StatusCode::INTERNAL_SERVER_ERROR),
        DispatchError::MissingFirebaseSecret => ("MissingFirebaseSecret", StatusCode::INTERNAL_SERVER_ERROR),
        DispatchError::Delivery(_) => ("NotificationDeliveryFailed", StatusCode::INTERNAL_SERVER_ERROR),
    }
}
