//! Session model and the injectable session store seam.
//!
//! A session is the authentication token plus the cached user profile
//! obtained at login. It is persisted under six fixed keys so that views can
//! read the denormalized fields (role, email, ville, username) without
//! deserializing the full user object.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BinwatchError, Result};

/// The fixed set of durable session keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    AuthToken,
    UserData,
    Role,
    Email,
    Ville,
    Username,
}

impl SessionKey {
    /// All six keys, in storage order.
    pub const ALL: [SessionKey; 6] = [
        SessionKey::AuthToken,
        SessionKey::UserData,
        SessionKey::Role,
        SessionKey::Email,
        SessionKey::Ville,
        SessionKey::Username,
    ];

    /// The storage name for this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::AuthToken => "auth_token",
            SessionKey::UserData => "user_data",
            SessionKey::Role => "role",
            SessionKey::Email => "email",
            SessionKey::Ville => "ville",
            SessionKey::Username => "username",
        }
    }
}

/// Denormalized convenience fields copied out of the user object at login.
///
/// Each field is optional; only fields present in the login response are
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub role: Option<String>,
    pub email: Option<String>,
    pub ville: Option<String>,
    pub username: Option<String>,
}

impl UserProfile {
    /// Extracts the known profile fields from a user object.
    ///
    /// Unknown fields are ignored; non-string values for known fields are
    /// treated as absent.
    pub fn from_user(user: &Value) -> Self {
        let field = |name: &str| {
            user.get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            role: field("role"),
            email: field("email"),
            ville: field("ville"),
            username: field("username"),
        }
    }
}

/// The client-held session: token plus cached profile data.
///
/// Created from a successful login response and destroyed on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The opaque authentication token echoed on every request.
    pub token: String,
    /// The full user object as returned by the backend.
    pub user: Value,
    /// Denormalized copies of the known profile fields.
    pub profile: UserProfile,
}

impl Session {
    /// Builds a session from a login response's token and user object.
    pub fn new(token: impl Into<String>, user: Value) -> Self {
        let profile = UserProfile::from_user(&user);
        Self {
            token: token.into(),
            user,
            profile,
        }
    }

    /// Renders the session as storage entries.
    ///
    /// The token and serialized user object are always present; profile
    /// fields appear only when they were present in the login response, so
    /// absent fields leave no key behind.
    pub fn to_entries(&self) -> Result<Vec<(SessionKey, String)>> {
        let mut entries = vec![
            (SessionKey::AuthToken, self.token.clone()),
            (SessionKey::UserData, serde_json::to_string(&self.user)?),
        ];
        if let Some(role) = &self.profile.role {
            entries.push((SessionKey::Role, role.clone()));
        }
        if let Some(email) = &self.profile.email {
            entries.push((SessionKey::Email, email.clone()));
        }
        if let Some(ville) = &self.profile.ville {
            entries.push((SessionKey::Ville, ville.clone()));
        }
        if let Some(username) = &self.profile.username {
            entries.push((SessionKey::Username, username.clone()));
        }
        Ok(entries)
    }
}

/// Durable key-value storage for the session.
///
/// Implementations must treat `set_all` and `clear_all` as group operations:
/// a session is written or removed as a whole, never key by key, so partial
/// session state (a token without its profile fields) cannot persist.
pub trait SessionStore: Send + Sync {
    /// Reads a single session key. Absent keys are `Ok(None)`.
    fn get(&self, key: SessionKey) -> Result<Option<String>>;

    /// Replaces all stored session state with the given session's entries.
    fn set_all(&self, session: &Session) -> Result<()>;

    /// Removes every session key. Succeeds when no session exists.
    fn clear_all(&self) -> Result<()>;
}

/// In-process session store.
///
/// Useful as a test double and for embedders that do not want sessions to
/// outlive the process.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| BinwatchError::session("session store lock poisoned"))?;
        Ok(entries.get(&key).cloned())
    }

    fn set_all(&self, session: &Session) -> Result<()> {
        let new_entries: HashMap<_, _> = session.to_entries()?.into_iter().collect();
        let mut entries = self
            .entries
            .write()
            .map_err(|_| BinwatchError::session("session store lock poisoned"))?;
        *entries = new_entries;
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| BinwatchError::session("session store lock poisoned"))?;
        entries.clear();
        Ok(())
    }
}
