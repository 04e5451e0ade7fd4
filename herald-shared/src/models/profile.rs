use serde::Deserialize;

/// Projection of a `profiles` row selected with `select=fcm_token`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRow {
    #[serde(default)]
    pub fcm_token: Option<String>,
}

impl ProfileRow {
    /// A blank token means the user never registered a device.
    pub fn push_token(self) -> Option<String> {
        self.fcm_token.filter(|token| !token.is_empty())
    }
}
