//! Session store
//!
//! Single source of truth for who is signed in. The token and the cached
//! user record live in durable [`Storage`] so they survive restarts, and
//! every transition is announced on an [`EventBus`] so that independent
//! observers can re-read state without knowing about each other.
//!
//! None of the operations here fail. Unreadable state reads as anonymous and
//! writes that cannot be persisted are logged and dropped.

use crate::auth::events::{EventBus, SessionEvent, Subscription};
use crate::auth::models::{Session, User, UserUpdate};
use crate::auth::token;
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "authToken";
/// Storage key holding the serialized user record
pub const USER_KEY: &str = "user";

/// Session store shared by every part of the application that needs it.
///
/// Cloning is cheap; clones share the same storage and listeners.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    events: EventBus,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            events: EventBus::new(),
        }
    }

    /// Current bearer token, if any
    pub fn get_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// Cached user record, if any and readable
    pub fn get_user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Cached user record is unreadable, treating as absent: {}", e);
                None
            }
        }
    }

    /// Token and user together. Either one missing means anonymous.
    pub fn session(&self) -> Option<Session> {
        let token = self.get_token()?;
        let user = self.get_user()?;
        Some(Session { token, user })
    }

    /// Store a freshly issued token and user, then notify observers
    pub fn login(&self, token: &str, user: &User) {
        if token.is_empty() {
            warn!("Ignoring login with an empty token for user {}", user.id);
            return;
        }

        match serde_json::to_string(user) {
            Ok(user_json) => {
                if let Err(e) = self
                    .storage
                    .set_many(&[(TOKEN_KEY, token), (USER_KEY, user_json.as_str())])
                {
                    warn!("Failed to persist session: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize user {}: {}", user.id, e),
        }

        info!("User {} logged in", user.id);
        self.events.emit(SessionEvent::LoggedIn);
    }

    /// Forget the session. Always notifies, even if nobody was logged in.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove_many(&[TOKEN_KEY, USER_KEY]) {
            warn!("Failed to clear session: {}", e);
        }

        info!("Logged out");
        self.events.emit(SessionEvent::LoggedOut);
    }

    /// Whether a full session is cached and its token is not yet expired
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// Same as [`is_authenticated`](Self::is_authenticated) against a given clock.
    ///
    /// A token without a readable user is anonymous, however fresh the token.
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        match self.session() {
            Some(session) => !token::is_expired_at(&session.token, now),
            None => false,
        }
    }

    /// When the current token expires, if it can be read
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        token::expiry(&self.get_token()?)
    }

    /// Merge fields into the cached user and notify observers.
    ///
    /// Without a cached user there is nothing to merge into; the call is a
    /// no-op and nothing is emitted.
    pub fn update_user(&self, update: &UserUpdate) {
        let Some(mut user) = self.get_user() else {
            debug!("No cached user, ignoring update");
            return;
        };

        user.merge(update);

        match serde_json::to_string(&user) {
            Ok(user_json) => {
                if let Err(e) = self.storage.set(USER_KEY, &user_json) {
                    warn!("Failed to persist updated user: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize user {}: {}", user.id, e),
        }

        info!("User {} updated", user.id);
        self.events.emit(SessionEvent::Updated);
    }

    /// Register an observer for session changes
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(SessionEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
