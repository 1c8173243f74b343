//! Server-side sessions, carried by a cookie.
//!
//! A session is an ephemeral `session id -> user id` binding created at
//! login and destroyed at logout. Only the opaque session id ever leaves
//! the process.

use axum::http::{HeaderMap, header};
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::User;
use crate::states::AppState;

pub const SESSION_COOKIE: &str = "sid";

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Uuid>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, user_id: Uuid) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions.insert(session_id, user_id);
        session_id
    }

    pub fn resolve(&self, session_id: Uuid) -> Option<Uuid> {
        self.sessions.get(&session_id).map(|id| *id)
    }

    /// Idempotent; destroying an unknown or stale session is a no-op.
    pub fn destroy(&self, session_id: Uuid) {
        self.sessions.remove(&session_id);
    }
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(session_id: Uuid) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value clearing the session cookie on the client.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

/// Pull the session id out of the request's `Cookie` headers.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(value) = value.to_str() else { continue };
        for pair in value.split(';') {
            if let Some((name, id)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE {
                    if let Ok(session_id) = Uuid::parse_str(id) {
                        return Some(session_id);
                    }
                }
            }
        }
    }
    None
}

/// Resolve the request's identity, if any.
pub fn current_user(headers: &HeaderMap, state: &AppState) -> Option<User> {
    let session_id = session_id_from_headers(headers)?;
    let user_id = state.sessions.resolve(session_id)?;
    state.store.user(user_id)
}

/// Like [`current_user`], but for actions that require identity.
pub fn require_user(headers: &HeaderMap, state: &AppState) -> Result<User, ApiError> {
    current_user(headers, state).ok_or(ApiError::Unauthenticated)
}
