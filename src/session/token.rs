//! Bearer session credential

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ExpenseError, ExpenseResult};

/// An authenticated session
///
/// The token is wiped from memory when the session is dropped.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Session {
    /// Opaque bearer token issued by the server
    token: String,

    /// Account email, when known
    #[zeroize(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// When this client received the token
    #[zeroize(skip)]
    pub issued_at: DateTime<Utc>,

    /// When the token stops being valid, if the token says so
    #[zeroize(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a session from a freshly issued token
    ///
    /// The expiry is read from the token's `exp` claim when the token is a
    /// JWT; other tokens never expire client-side.
    pub fn new(token: impl Into<String>, email: Option<String>) -> ExpenseResult<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ExpenseError::Session("Server returned an empty token".into()));
        }

        let expires_at = jwt_expiry(&token);

        Ok(Self {
            token,
            email,
            issued_at: Utc::now(),
            expires_at,
        })
    }

    /// Override the expiry
    pub fn with_expiry(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// The bearer token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Check expiry against a given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expiry) if expiry <= now)
    }

    /// Check expiry against the current time
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Fail with a session error if this session can no longer be used
    pub fn ensure_valid(&self) -> ExpenseResult<()> {
        if self.is_expired() {
            return Err(ExpenseError::Session(
                "Session expired. Run 'expense login' to sign in again".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Read the `exp` claim of a JWT without verifying it
fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}
