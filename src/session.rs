use ::actix_session::{config::BrowserSession, storage::CookieSessionStore, SessionMiddleware};
use ::aw::cookie::{Key, SameSite};
use ::serde::{Deserialize, Serialize};

/// session entry holding the signed-in user
pub const SESSION_USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
}

impl SessionUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[allow(dead_code)]
#[derive(Debug, ::thiserror::Error)]
pub enum SessionKeyError {
    #[error("SESSION_KEY must be set")]
    Missing,
    #[error("SESSION_KEY must be in base64 format")]
    NotBase64,
    #[error("SESSION_KEY must have 64 bytes, got {0}")]
    WrongLength(usize),
}

pub fn middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .session_lifecycle(BrowserSession::default())
        .cookie_name(String::from("session"))
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

#[cfg(debug_assertions)]
pub fn key() -> Result<Key, SessionKeyError> {
    Ok(Key::from(&[8; 64]))
}

#[cfg(not(debug_assertions))]
pub fn key() -> Result<Key, SessionKeyError> {
    use ::base64::{engine::general_purpose::STANDARD, Engine as _};

    let key = std::env::vars()
        .find(|(k, _)| k == "SESSION_KEY")
        .map(|(_, v)| v)
        .ok_or(SessionKeyError::Missing)?;

    let key = STANDARD
        .decode(key)
        .map_err(|_| SessionKeyError::NotBase64)?;
    if key.len() != 64 {
        return Err(SessionKeyError::WrongLength(key.len()));
    }
    Ok(Key::from(&key))
}
