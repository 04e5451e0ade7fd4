use http::StatusCode;
use lambda_http::{Body, Request, Response};
use lambda_http::RequestExt;
use herald_shared::services::dispatch_service::NotificationDispatcher;
use herald_shared::utilities::responses::{success_response, response_with_code};
use herald_shared::utilities::requests::extract_body;
use crate::endpoints::{push, status};

const GET: &str = "GET";
const POST: &str = "POST";

pub async fn handle_lambda(event: Request, dispatcher: &NotificationDispatcher) -> Result<Response<Body>, lambda_http::Error> {
    let raw_path = event.raw_http_path().to_string();
    let raw_path = if raw_path.is_empty() { event.uri().path().to_string() } else { raw_path };
    let path = raw_path.strip_prefix("/dev")
        .or_else(|| raw_path.strip_prefix("/prod"))
        .unwrap_or(&raw_path);

    log::info!("Received request for path: {}", path);

    match (event.method().as_str(), path) {
        //Monitor
        (GET, "/status") => success_response(status::handle().await),

        //Webhook
        (POST, "/") | (POST, "") | (POST, "/push-notification") => {
            let event_body = extract_body(&event);
            push::handler(dispatcher, event_body).await
        }

        //Not found
        _ => response_with_code("Not Found", StatusCode::NOT_FOUND),
    }
}
