use chrono::Duration;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("APP_ENV must be development or production, got {other:?}")),
        }
    }
}

/// Transactional mail provider settings. Absent when no provider is configured.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

/// Environment configuration
/// Loads and validates environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_days: i64,
    pub hash_pepper: String,
    pub app_env: AppEnv,
    pub app_base_url: String,
    pub bind_addr: String,
    pub cors_origin: Option<String>,
    pub email: Option<EmailConfig>,
    pub rate_limit_burst: u32,
    pub rate_limit_per_minute: u32,
    /// Key rate limits on `X-Forwarded-For` (only behind a trusted proxy).
    pub trust_forwarded_for: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "JWT_SECRET must be set".to_string())?;

        let jwt_expiry_days = parse_or("JWT_EXPIRY_DAYS", 7i64)?;
        if jwt_expiry_days <= 0 {
            return Err("JWT_EXPIRY_DAYS must be positive".to_string());
        }

        // OTP hashes are keyed; fall back to the signing secret when no pepper is given.
        let hash_pepper = env::var("HASH_PEPPER")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| jwt_secret.clone());

        let app_env = match env::var("APP_ENV") {
            Ok(value) => AppEnv::parse(&value)?,
            Err(_) => AppEnv::Production,
        };

        let app_base_url = env::var("APP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let cors_origin = env::var("CORS_ORIGIN").ok().filter(|s| !s.is_empty());

        let email = match env::var("EMAIL_API_URL") {
            Ok(api_url) if !api_url.is_empty() => Some(EmailConfig {
                api_url,
                api_key: env::var("EMAIL_API_KEY")
                    .map_err(|_| "EMAIL_API_KEY must be set when EMAIL_API_URL is".to_string())?,
                from: env::var("EMAIL_FROM")
                    .map_err(|_| "EMAIL_FROM must be set when EMAIL_API_URL is".to_string())?,
            }),
            _ => None,
        };

        let rate_limit_burst = parse_or("AUTH_RATE_LIMIT_BURST", 10u32)?;
        let rate_limit_per_minute = parse_or("AUTH_RATE_LIMIT_PER_MINUTE", 5u32)?;
        if rate_limit_burst == 0 || rate_limit_per_minute == 0 {
            return Err("rate limit settings must be non-zero".to_string());
        }
        let trust_forwarded_for = parse_flag("TRUST_FORWARDED_FOR")?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiry_days,
            hash_pepper,
            app_env,
            app_base_url,
            bind_addr,
            cors_origin,
            email,
            rate_limit_burst,
            rate_limit_per_minute,
            trust_forwarded_for,
        })
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            otp_ttl: Duration::seconds(60),
            reset_ttl: Duration::hours(1),
            hash_pepper: self.hash_pepper.clone(),
            app_base_url: self.app_base_url.clone(),
            expose_debug_secrets: self.app_env == AppEnv::Development,
            secure_cookies: self.app_env == AppEnv::Production,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{key} is not a valid number")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(key: &str) -> Result<bool, String> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "" | "0" | "false" | "no" => Ok(false),
            _ => Err(format!("{key} must be true or false")),
        },
        Err(_) => Ok(false),
    }
}

/// Knobs for the identity lifecycle that handlers read from shared state.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub otp_ttl: Duration,
    pub reset_ttl: Duration,
    pub hash_pepper: String,
    pub app_base_url: String,
    /// Echo OTP codes and reset tokens in responses. Development only.
    pub expose_debug_secrets: bool,
    pub secure_cookies: bool,
}

impl AuthSettings {
    pub fn reset_url(&self, token: &str) -> String {
        format!("{}/admin/reset-password?token={}", self.app_base_url, token)
    }
}
