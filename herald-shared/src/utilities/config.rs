use std::env;
use std::fmt;
use std::time::Duration;
use dotenv::dotenv;
use once_cell::sync::OnceCell;
use crate::models::errors::ConfigError;
use crate::models::notifications::ServiceAccountKey;

pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const FIREBASE_SERVICE_ACCOUNT: &str = "FIREBASE_SERVICE_ACCOUNT";
pub const FCM_API_BASE_URL: &str = "FCM_API_BASE_URL";
pub const OUTBOUND_TIMEOUT_SECS: &str = "OUTBOUND_TIMEOUT_SECS";

pub const DEFAULT_FCM_API_BASE_URL: &str = "https://fcm.googleapis.com";
pub const DEFAULT_OUTBOUND_TIMEOUT_SECS: u64 = 30;

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Initialize dotenv (only needs to be called once at startup)
pub fn init() {
    if dotenv().is_ok() {
        println!("Loaded .env file");
    } else {
        println!("No .env file, using process environment");
    }
}

/// Fetch an environment variable, treating an empty value as unset
pub fn get_env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Loads the process-wide configuration once; later calls return the same instance.
pub fn load() -> Result<&'static AppConfig, ConfigError> {
    CONFIG.get_or_try_init(AppConfig::from_env)
}

#[derive(Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: String,
}

impl SupabaseConfig {
    pub fn profiles_url(&self) -> String {
        format!("{}/rest/v1/profiles", self.url.trim_end_matches('/'))
    }
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .finish()
    }
}

/// Read-only settings shared by every invocation.
///
/// Missing Supabase or Firebase settings are kept as `None` so each request can
/// answer with its own configuration error; a malformed service account fails here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase: Option<SupabaseConfig>,
    pub firebase: Option<ServiceAccountKey>,
    pub fcm_base_url: String,
    pub outbound_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(get_env_var)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let supabase = match (get(SUPABASE_URL), get(SUPABASE_SERVICE_ROLE_KEY)) {
            (Some(url), Some(service_role_key)) => Some(SupabaseConfig { url, service_role_key }),
            _ => None,
        };

        let firebase = get(FIREBASE_SERVICE_ACCOUNT)
            .map(|raw| serde_json::from_str::<ServiceAccountKey>(&raw))
            .transpose()?;

        let fcm_base_url = get(FCM_API_BASE_URL)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_FCM_API_BASE_URL.to_string());

        let timeout_secs = match get(OUTBOUND_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidNumber(OUTBOUND_TIMEOUT_SECS.to_string(), e.to_string()))?,
            None => DEFAULT_OUTBOUND_TIMEOUT_SECS,
        };

        Ok(Self {
            supabase,
            firebase,
            fcm_base_url,
            outbound_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
