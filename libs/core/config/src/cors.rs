use crate::{ConfigError, FromEnv, env_required};
use http::HeaderValue;

/// The single browser origin allowed to call the API.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origin: HeaderValue,
}

impl CorsConfig {
    pub fn new(allowed_origin: HeaderValue) -> Self {
        Self { allowed_origin }
    }

    /// Whether a request `Origin` header value matches the allowed origin.
    pub fn allows(&self, origin: &HeaderValue) -> bool {
        origin == self.allowed_origin
    }
}

impl FromEnv for CorsConfig {
    /// Requires FRONTEND_URL, e.g. `http://localhost:5173`
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_required("FRONTEND_URL")?;
        let trimmed = raw.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(ConfigError::ParseError {
                key: "FRONTEND_URL".to_string(),
                details: "value cannot be empty".to_string(),
            });
        }

        let allowed_origin = HeaderValue::from_str(trimmed).map_err(|e| ConfigError::ParseError {
            key: "FRONTEND_URL".to_string(),
            details: format!("{}", e),
        })?;

        Ok(Self { allowed_origin })
    }
}
