use std::env;

/// Runtime configuration for the API
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Secret used to sign and verify JWTs
    pub jwt_secret: String,

    /// Token lifetime in seconds (default: 1 hour)
    pub token_ttl_secs: i64,

    /// Maximum accepted image upload size in bytes (default: 10 MB)
    pub max_upload_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me".to_string(),
            token_ttl_secs: 3600,
            max_upload_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                tracing::warn!("JWT_SECRET not set, using insecure default");
                default.jwt_secret
            }
        };

        Self {
            jwt_secret,

            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.token_ttl_secs),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),
        }
    }
}
