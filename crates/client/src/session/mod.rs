//! Session lifecycle: in-memory auth state mirrored to a durable store.
//!
//! The [`SessionManager`] owns the token, the user profile, and the loading
//! flag. It is constructed once at process start, hydrated from the
//! [`SessionStore`], and passed by handle to whatever consumes it. Route
//! guarding and the cart synchronizer derive everything they need from its
//! observable state; nothing here touches the network.

pub mod store;

use core::fmt;

use serde::{Deserialize, Serialize};

use freshcart_core::UserProfile;

pub use store::{FileStore, SessionStore, StoreError};

/// Opaque auth token (a JWT issued by the sign-in endpoint).
///
/// The `Debug` implementation redacts the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token, for the `token` request header and the durable store.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

/// Observable lifecycle state of the session.
///
/// `Uninitialized → Hydrating → {Authenticated, Anonymous}`, then cycling
/// between `Anonymous` and `Authenticated` via login/logout for the life of
/// the process. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, not yet hydrated.
    Uninitialized,
    /// Hydration from the durable store is in progress.
    Hydrating,
    /// A token is present.
    Authenticated,
    /// Hydration finished with no token.
    Anonymous,
}

/// In-memory session synchronized with a [`SessionStore`].
pub struct SessionManager<S> {
    store: S,
    token: Option<AuthToken>,
    user: Option<UserProfile>,
    loading: bool,
    hydrating: bool,
}

impl<S: SessionStore> SessionManager<S> {
    /// Create an empty, not-yet-hydrated session over `store`.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            token: None,
            user: None,
            loading: true,
            hydrating: false,
        }
    }

    /// Load the session from the durable store.
    ///
    /// - A store-level failure reading the token clears both persisted keys
    ///   and leaves the session empty.
    /// - A corrupt user record yields an absent user but does not prevent a
    ///   valid token from loading; the corrupt key is cleared.
    /// - `loading` transitions to `false` exactly once on completion,
    ///   regardless of outcome.
    pub fn hydrate(&mut self) {
        self.hydrating = true;

        match self.store.load_token() {
            Ok(token) => self.token = token,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored token, resetting session");
                self.clear_persisted();
                self.token = None;
                self.user = None;
                self.finish_hydration();
                return;
            }
        }

        match self.store.load_user() {
            Ok(user) => self.user = user,
            Err(e) => {
                // Per-key isolation: the token (already loaded) survives.
                tracing::warn!(error = %e, "stored user record unreadable, dropping it");
                self.user = None;
                if let Err(e) = self.store.clear_user() {
                    tracing::warn!(error = %e, "failed to clear corrupt user record");
                }
            }
        }

        self.finish_hydration();
    }

    /// Record a successful sign-in and persist it.
    ///
    /// In-memory state reflects the login even when the durable write fails;
    /// persistence is best-effort by design and the caller decides whether
    /// the error is worth surfacing.
    ///
    /// # Errors
    ///
    /// Returns the store error from a failed durable write.
    pub fn login(&mut self, user: UserProfile, token: AuthToken) -> Result<(), StoreError> {
        self.token = Some(token.clone());
        self.user = Some(user.clone());

        self.store.save_token(&token)?;
        self.store.save_user(&user)?;
        Ok(())
    }

    /// Clear the session, in memory and durably.
    ///
    /// Never fails visibly: persistence errors are logged and swallowed.
    /// Repeated calls are no-ops after the first.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
        self.clear_persisted();
    }

    /// Replace the user profile and persist it. Independent of token state.
    ///
    /// # Errors
    ///
    /// Returns the store error from a failed durable write; in-memory state
    /// still reflects the update.
    pub fn update_user(&mut self, user: UserProfile) -> Result<(), StoreError> {
        self.user = Some(user.clone());
        self.store.save_user(&user)
    }

    /// Whether a token is present. Pure derivation, no I/O.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The current token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// The current user profile, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Whether hydration has not yet completed.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The session's lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.loading {
            if self.hydrating {
                SessionState::Hydrating
            } else {
                SessionState::Uninitialized
            }
        } else if self.token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    fn finish_hydration(&mut self) {
        self.hydrating = false;
        self.loading = false;
    }

    fn clear_persisted(&mut self) {
        if let Err(e) = self.store.clear_token() {
            tracing::warn!(error = %e, "failed to clear stored token");
        }
        if let Err(e) = self.store.clear_user() {
            tracing::warn!(error = %e, "failed to clear stored user");
        }
    }
}
