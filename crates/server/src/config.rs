use std::env;

/// PIN used when `ADMIN_PIN` is unset or not four digits.
pub const DEFAULT_ADMIN_PIN: &str = "1234";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub admin_pin: String,
    pub jwt_secret: String,
    pub admin_session_hours: i64,
    pub host: String,
    pub port: u16,
    pub storage_url: Option<String>,
    pub storage_bucket: String,
    pub storage_service_key: Option<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let admin_pin = env::var("ADMIN_PIN")
            .ok()
            .filter(|pin| crate::auth::pin::is_valid_pin_format(pin))
            .unwrap_or_else(|| {
                tracing::warn!("ADMIN_PIN missing or not 4 digits, using default PIN");
                DEFAULT_ADMIN_PIN.to_string()
            });

        Self {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            admin_pin,
            jwt_secret: env::var("JWT_SECRET_KEY")
                .unwrap_or_else(|_| "dev-secret-key-change-in-production".to_string()),
            admin_session_hours: env::var("ADMIN_SESSION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            storage_url: env::var("STORAGE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string()),
            storage_bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| "assets".to_string()),
            storage_service_key: env::var("STORAGE_SERVICE_KEY").ok(),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
        }
    }
}
