//! Per-session form state: the last values the user has entered.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Duration, Utc};
use poem::web::cookie::CookieJar;
use tokio::sync::RwLock;

use crate::models::PredictionRequest;
use crate::prelude::*;
use crate::web::cookies;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u128);

impl SessionId {
    pub const COOKIE_NAME: &'static str = "session-id";

    pub fn generate() -> Self {
        Self(rand::random())
    }
}

impl Display for SessionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:032x}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        u128::from_str_radix(value, 16)
            .map(Self)
            .with_context(|| format!("`{}` is not a valid session ID", value))
    }
}

struct Session {
    inputs: PredictionRequest,
    expires_at: DateTime,
}

/// Sessions are isolated from each other and forgotten after `ttl` of inactivity.
#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Arc<RwLock<AHashMap<SessionId, Session>>>,
}

impl SessionStore {
    pub fn new(ttl: StdDuration) -> Result<Self> {
        Ok(Self {
            ttl: Duration::from_std(ttl).context("the session TTL is too long")?,
            sessions: Arc::default(),
        })
    }

    /// Picks up the session from the cookie or starts a new one, and prolongs the cookie.
    pub fn identify(&self, jar: &CookieJar) -> SessionId {
        let session_id = jar
            .get(SessionId::COOKIE_NAME)
            .and_then(|cookie| SessionId::from_str(cookie.value_str()).ok())
            .unwrap_or_else(SessionId::generate);
        cookies::Builder::new(SessionId::COOKIE_NAME)
            .value(session_id.to_string())
            .expires_in(self.ttl)
            .path("/")
            .http_only()
            .add_to(jar);
        session_id
    }

    /// Returns the remembered inputs, or all zeros for an unknown or expired session.
    pub async fn get_inputs(&self, session_id: SessionId) -> PredictionRequest {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session_id) {
            Some(session) if session.expires_at > now => {
                session.expires_at = now + self.ttl;
                session.inputs
            }
            _ => PredictionRequest::default(),
        }
    }

    pub async fn set_inputs(&self, session_id: SessionId, inputs: PredictionRequest) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let n_sessions = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        if sessions.len() != n_sessions {
            debug!(n_expired = n_sessions - sessions.len(), "purged the expired sessions");
        }
        sessions.insert(
            session_id,
            Session {
                inputs,
                expires_at: now + self.ttl,
            },
        );
    }
}
