//! Session lookup for incoming requests.
//!
//! Handlers depend on [`SessionProvider`] only. The bundled implementation,
//! [`JwtSessionProvider`], accepts an HS256 token from the session cookie or an
//! `Authorization: Bearer` header.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("AUTH_SECRET is not configured")]
    MissingSecret,
    #[error("failed to sign session token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// The authenticated identity, returned to clients as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub expires: String,
}

pub trait SessionProvider: Send + Sync + Debug {
    /// Resolve the caller's session. `Ok(None)` means no valid credentials were presented.
    fn session(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError>;

    /// The environment flag as it was when the provider was constructed.
    fn captured_env(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: i64,
    exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

pub struct JwtSessionProvider {
    keys: Option<Keys>,
    cookie_name: String,
    captured_env: Option<String>,
}

impl Debug for JwtSessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionProvider")
            .field("keys", &self.keys.as_ref().map(|_| "[hidden]"))
            .field("cookie_name", &self.cookie_name)
            .field("captured_env", &self.captured_env)
            .finish()
    }
}

impl JwtSessionProvider {
    pub fn new(
        secret: Option<&str>,
        cookie_name: impl Into<String>,
        captured_env: Option<String>,
    ) -> Self {
        let keys = secret.map(|secret| Keys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });

        if keys.is_none() {
            tracing::warn!("AUTH_SECRET not set, session lookups will fail");
        }

        JwtSessionProvider {
            keys,
            cookie_name: cookie_name.into(),
            captured_env,
        }
    }

    /// Sign a session token for `user`, valid for `ttl`.
    pub fn issue(&self, user: &SessionUser, ttl: Duration) -> Result<String, SessionError> {
        let keys = self.keys.as_ref().ok_or(SessionError::MissingSecret)?;
        let now = Utc::now();

        let claims = SessionClaims {
            sub: user.id.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.image.clone(),
        };

        Ok(encode(&Header::default(), &claims, &keys.encoding)?)
    }

    fn token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        let from_cookie = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|cookies| cookie_value(cookies, &self.cookie_name));

        from_cookie.or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|token| !token.is_empty())
        })
    }
}

impl SessionProvider for JwtSessionProvider {
    fn session(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError> {
        let keys = self.keys.as_ref().ok_or(SessionError::MissingSecret)?;

        let Some(token) = self.token(headers) else {
            return Ok(None);
        };

        let claims = match decode::<SessionClaims>(token, &keys.decoding, &Validation::default()) {
            Ok(data) => data.claims,
            Err(err) => {
                tracing::debug!(error = %err, "rejected session token");
                return Ok(None);
            }
        };

        let expires = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let user = (!claims.sub.is_empty()).then(|| SessionUser {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            image: claims.picture,
        });

        Ok(Some(Session { user, expires }))
    }

    fn captured_env(&self) -> Option<&str> {
        self.captured_env.as_deref()
    }
}

fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}
