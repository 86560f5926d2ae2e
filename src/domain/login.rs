use secrecy::Secret;
use serde::Deserialize;

/// Body of `POST /operator/login`. Missing fields are a failed login, not a
/// malformed request.
#[derive(Deserialize)]
pub struct LoginForm {
    pub login: Option<String>,
    pub password: Option<Secret<String>>,
    #[serde(rename = "isRemember")]
    pub is_remember: Option<String>,
}

impl LoginForm {
    /// Checkbox semantics: only the literal `on` counts.
    pub fn remember(&self) -> bool {
        self.is_remember.as_deref() == Some("on")
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct LoginQuery {
    pub login: Option<String>,
}
