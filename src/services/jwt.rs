use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::modules::auth::model::{AdminStatus, Role};

pub const AUTH_COOKIE: &str = "auth-token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // account id
    pub email: String,
    pub name: String,
    pub role: Role,
    pub status: AdminStatus,
    pub iat: i64,
    pub exp: i64,
}

/// The identity half of a session token, before timestamps are stamped on.
#[derive(Debug, Clone)]
pub struct SessionSubject {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub status: AdminStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT signing secret is not configured")]
    MissingSecret,

    #[error("No session token presented")]
    Missing,

    // Bad signature, malformed and expired tokens all land here on purpose.
    #[error("Invalid session token")]
    Invalid,

    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_duration: Duration,
}

impl JwtService {
    pub fn new(secret: &str, session_duration: Duration) -> Result<Self, TokenError> {
        if secret.trim().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_duration,
        })
    }

    pub fn issue(&self, subject: &SessionSubject) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + self.session_duration;

        let claims = Claims {
            sub: subject.user_id.clone(),
            email: subject.email.clone(),
            name: subject.name.clone(),
            role: subject.role,
            status: subject.status,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "session token rejected");
                TokenError::Invalid
            })
    }

    pub fn session_duration_secs(&self) -> i64 {
        self.session_duration.num_seconds()
    }
}

/// Pulls the session token from `Authorization: Bearer` first, then the
/// `auth-token` cookie.
pub fn extract_token(headers: &HeaderMap) -> Result<String, TokenError> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Ok(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(TokenError::Missing)
}

pub fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::ZERO)
        .build()
}
