use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use crate::models::errors::NotificationError;
use crate::models::notifications::{FirebaseClaims, ServiceAccountKey, TokenResponse, FCM_SCOPE};

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Mints bearer tokens for the FCM HTTP v1 API.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self, key: &ServiceAccountKey) -> Result<String, NotificationError>;
}

/// Service-account OAuth2 flow: sign an RS256 assertion, trade it at `token_uri`.
///
/// Every call signs and exchanges a new assertion; nothing is cached between requests.
pub struct FirebaseAuthenticator {
    client: Client,
}

impl FirebaseAuthenticator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccessTokenProvider for FirebaseAuthenticator {
    async fn access_token(&self, key: &ServiceAccountKey) -> Result<String, NotificationError> {
        let jwt = create_jwt(key, Utc::now())?;
        let token = exchange_jwt_for_token(&self.client, &key.token_uri, &jwt).await?;
        log::info!("[Push] Minted Firebase access token for {}", key.client_email);
        Ok(token)
    }
}

pub fn build_claims(sa: &ServiceAccountKey, now: DateTime<Utc>) -> FirebaseClaims<'_> {
    FirebaseClaims {
        iss: &sa.client_email,
        scope: FCM_SCOPE,
        aud: &sa.token_uri,
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
    }
}

pub fn create_jwt(sa: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, NotificationError> {
    let claims = build_claims(sa, now);

    // Keys pasted into env vars usually carry escaped newlines
    let key = EncodingKey::from_rsa_pem(sa.private_key.replace("\\n", "\n").as_bytes())
        .map_err(|e| NotificationError::InvalidPrivateKey(e.to_string()))?;

    encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| NotificationError::SigningFailed(e.to_string()))
}

pub async fn exchange_jwt_for_token(client: &Client, token_uri: &str, jwt: &str) -> Result<String, NotificationError> {
    let params = [
        ("grant_type", JWT_BEARER_GRANT),
        ("assertion", jwt),
    ];

    let res = client
        .post(token_uri)
        .form(&params)
        .send()
        .await?;

    if !res.status().is_success() {
        let body = res.text().await?;
        return Err(NotificationError::TokenExchangeFailed(body));
    }

    let token_response: TokenResponse = res
        .json()
        .await
        .map_err(|e| NotificationError::TokenExchangeFailed(e.to_string()))?;

    token_response
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(NotificationError::MissingAccessToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notifications::GOOGLE_TOKEN_URI;
    use crate::utilities::test::{test_service_account, TEST_CLIENT_EMAIL, TEST_PUBLIC_KEY};
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
    use serde_json::{json, Value};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_736_000_000, 0).unwrap()
    }

    #[test]
    fn claims_carry_identity_scope_and_lifetime() {
        let sa = test_service_account(GOOGLE_TOKEN_URI);
        let claims = build_claims(&sa, fixed_now());

        assert_eq!(claims.iss, TEST_CLIENT_EMAIL);
        assert_eq!(claims.scope, "https://www.googleapis.com/auth/firebase.messaging");
        assert_eq!(claims.aud, GOOGLE_TOKEN_URI);
        assert_eq!(claims.iat, 1_736_000_000);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn claims_one_second_apart_differ_only_in_timestamps() {
        let sa = test_service_account(GOOGLE_TOKEN_URI);
        let first = serde_json::to_value(build_claims(&sa, fixed_now())).unwrap();
        let second = serde_json::to_value(build_claims(&sa, fixed_now() + Duration::seconds(1))).unwrap();

        let strip = |mut v: Value| {
            let map = v.as_object_mut().unwrap();
            map.remove("iat");
            map.remove("exp");
            v
        };

        assert_eq!(second["iat"].as_i64().unwrap() - first["iat"].as_i64().unwrap(), 1);
        assert_eq!(second["exp"].as_i64().unwrap() - first["exp"].as_i64().unwrap(), 1);
        assert_eq!(strip(first), strip(second));
    }

    #[test]
    fn signing_is_deterministic_for_a_fixed_clock() {
        let sa = test_service_account(GOOGLE_TOKEN_URI);
        assert_eq!(create_jwt(&sa, fixed_now()).unwrap(), create_jwt(&sa, fixed_now()).unwrap());
    }

    #[test]
    fn assertion_verifies_with_the_public_key() {
        let sa = test_service_account(GOOGLE_TOKEN_URI);
        let jwt = create_jwt(&sa, Utc::now()).unwrap();

        let header = decode_header(&jwt).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.typ.as_deref(), Some("JWT"));

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[GOOGLE_TOKEN_URI]);
        validation.set_issuer(&[TEST_CLIENT_EMAIL]);
        let decoding_key = DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap();

        let data = decode::<Value>(&jwt, &decoding_key, &validation).unwrap();
        assert_eq!(data.claims["scope"], json!(FCM_SCOPE));
    }

    #[test]
    fn escaped_newlines_in_key_are_accepted() {
        let mut sa = test_service_account(GOOGLE_TOKEN_URI);
        sa.private_key = sa.private_key.replace('\n', "\\n");

        assert!(create_jwt(&sa, fixed_now()).is_ok());
    }

    #[test]
    fn malformed_key_is_rejected() {
        let mut sa = test_service_account(GOOGLE_TOKEN_URI);
        sa.private_key = "not a pem".to_string();

        let err = create_jwt(&sa, fixed_now()).unwrap_err();
        assert!(matches!(err, NotificationError::InvalidPrivateKey(_)));
    }

    #[tokio::test]
    async fn exchanges_assertion_with_jwt_bearer_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains(
                "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
            ))
            .and(body_string_contains("assertion=header.payload.sig"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.token",
                "token_type": "Bearer",
                "expires_in": 3599
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = exchange_jwt_for_token(&Client::new(), &format!("{}/token", server.uri()), "header.payload.sig")
            .await
            .unwrap();

        assert_eq!(token, "ya29.token");
    }

    #[tokio::test]
    async fn missing_access_token_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })))
            .mount(&server)
            .await;

        let err = exchange_jwt_for_token(&Client::new(), &format!("{}/token", server.uri()), "a.b.c")
            .await
            .unwrap_err();

        assert!(matches!(err, NotificationError::MissingAccessToken));
    }

    #[tokio::test]
    async fn rejected_grant_surfaces_upstream_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
            .mount(&server)
            .await;

        let err = exchange_jwt_for_token(&Client::new(), &format!("{}/token", server.uri()), "a.b.c")
            .await
            .unwrap_err();

        match err {
            NotificationError::TokenExchangeFailed(body) => assert!(body.contains("invalid_grant")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn authenticator_posts_signed_assertion_to_token_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "fresh" })))
            .expect(1)
            .mount(&server)
            .await;

        let token_uri = format!("{}/token", server.uri());
        let sa = test_service_account(&token_uri);
        let token = FirebaseAuthenticator::new(Client::new()).access_token(&sa).await.unwrap();
        assert_eq!(token, "fresh");

        let requests = server.received_requests().await.unwrap();
        let form = String::from_utf8(requests[0].body.clone()).unwrap();
        let assertion = form
            .split('&')
            .find_map(|pair| pair.strip_prefix("assertion="))
            .unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[token_uri.as_str()]);
        let decoding_key = DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap();
        let data = decode::<Value>(assertion, &decoding_key, &validation).unwrap();
        assert_eq!(data.claims["iss"], json!(TEST_CLIENT_EMAIL));
    }
}
