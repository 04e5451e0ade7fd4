use async_trait::async_trait;
use reqwest::Client;
use crate::models::errors::ProfileError;
use crate::models::profile::ProfileRow;
use crate::utilities::config::SupabaseConfig;
use crate::utilities::logging::log_error;

/// Interface
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Returns the recipient's registered device token, or `None` if they never registered one.
    async fn get_push_token(&self, user_id: &str) -> Result<Option<String>, ProfileError>;
}

/// Supabase REST (PostgREST) implementation
pub struct SupabaseProfileRepository {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseProfileRepository {
    pub fn new(client: Client, config: SupabaseConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ProfileRepository for SupabaseProfileRepository {
    async fn get_push_token(&self, user_id: &str) -> Result<Option<String>, ProfileError> {
        let res = self
            .client
            .get(self.config.profiles_url())
            .query(&[("id", format!("eq.{}", user_id).as_str()), ("select", "fcm_token")])
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            log_error("ProfileLookupFailed", &format!("Failed to fetch profile ({}): {}", status, body));
            return Err(ProfileError::UpstreamStatus { status, body });
        }

        let rows: Vec<ProfileRow> = res
            .json()
            .await
            .map_err(|e| ProfileError::InvalidResponse(e.to_string()))?;

        Ok(rows.into_iter().next().and_then(ProfileRow::push_token))
    }
}
