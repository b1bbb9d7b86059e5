//! In-memory cookie sessions
//!
//! Sessions live for the server's lifetime in a concurrent map keyed by an
//! opaque token carried in the `equiterm_session` cookie. Losing them on
//! restart just logs everyone out, which the terminal already survives.

use axum::http::HeaderMap;
use dashmap::DashMap;
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "equiterm_session";

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub is_premium: bool,
}

/// Concurrent token -> session map
#[derive(Default)]
pub struct SessionMap {
    sessions: DashMap<String, Session>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and return its token
    pub fn create(&self, session: Session) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), session);
        token
    }

    /// Resolve the session referenced by the request's cookie header
    pub fn resolve(&self, headers: &HeaderMap) -> Option<Session> {
        let token = token_from_headers(headers)?;
        self.sessions.get(&token).map(|entry| entry.value().clone())
    }

    /// Drop the session referenced by the request, if any
    pub fn destroy(&self, headers: &HeaderMap) {
        if let Some(token) = token_from_headers(headers) {
            self.sessions.remove(&token);
        }
    }

    /// Flip the premium flag on a live session (mock checkout)
    pub fn set_premium(&self, headers: &HeaderMap, is_premium: bool) {
        if let Some(token) = token_from_headers(headers) {
            if let Some(mut entry) = self.sessions.get_mut(&token) {
                entry.is_premium = is_premium;
            }
        }
    }

    /// `Set-Cookie` value for a freshly created token
    pub fn cookie_for(token: &str) -> String {
        format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
    }

    /// Expired `Set-Cookie` value that clears the cookie client-side
    pub fn clearing_cookie() -> String {
        format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
    }
}

/// Extract the session token from a request's `Cookie` header
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
