use http::StatusCode;
use lambda_http::{Response, Body};
use serde::Serialize;

pub fn success_response<T: Serialize>(data: T) -> Result<Response<Body>, lambda_http::Error> {
    response_with_code(data, StatusCode::OK)
}

pub fn response_with_code<T: Serialize>(data: T, code: StatusCode) -> Result<Response<Body>, lambda_http::Error> {
    let body = serde_json::to_string(&data).map_err(|_| lambda_http::Error::from("Serialization error"))?;
    build_response(code, "application/json", body)
}

/// Plain-text reply used for the fixed webhook messages and error descriptions.
pub fn text_response(message: impl Into<String>, code: StatusCode) -> Result<Response<Body>, lambda_http::Error> {
    build_response(code, "text/plain", message.into())
}

/// Relays an upstream JSON document byte for byte with a 200.
pub fn json_passthrough(document: String) -> Result<Response<Body>, lambda_http::Error> {
    build_response(StatusCode::OK, "application/json", document)
}

fn build_response(code: StatusCode, content_type: &str, body: String) -> Result<Response<Body>, lambda_http::Error> {
    log::info!("Response Code:{}\nBody: {}", code, body);
    Response::builder()
        .status(code)
        .header("Content-Type", content_type)
        .body(Body::Text(body))
        .map_err(|e| {
            log::error!("Failed to build response: {:?}", e);
            lambda_http::Error::from("Failed to construct HTTP response")
        })
}
