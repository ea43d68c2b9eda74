//! Route guard for protected destinations.
//!
//! The guard is a pure decision over the session's observable state; the
//! embedding UI owns the actual navigation. The ordering matters: while
//! hydration is still running the only correct answer is to wait — deciding
//! before hydration completes either flashes a redirect at a user who is
//! about to be authenticated, or briefly renders a protected destination to
//! an anonymous one.

use crate::session::{SessionManager, SessionStore};

/// What to do with a navigation attempt at a protected destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Hydration has not completed; show a neutral waiting state.
    Wait,
    /// Hydration is done and no token is present; send to the login flow.
    RedirectToLogin,
    /// Authenticated; render the protected destination.
    Allow,
}

impl GuardDecision {
    /// Decide for the current session state.
    #[must_use]
    pub fn for_session<S: SessionStore>(session: &SessionManager<S>) -> Self {
        if session.is_loading() {
            Self::Wait
        } else if session.is_authenticated() {
            Self::Allow
        } else {
            Self::RedirectToLogin
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::{AuthToken, FileStore};
    use freshcart_core::{Email, UserProfile};

    fn manager(dir: &std::path::Path) -> SessionManager<FileStore> {
        SessionManager::new(FileStore::open(dir).unwrap())
    }

    #[test]
    fn test_waits_while_loading() {
        let dir = tempfile::tempdir().unwrap();
        let session = manager(dir.path());

        // Never a redirect (and never an allow) before hydration completes.
        assert_eq!(GuardDecision::for_session(&session), GuardDecision::Wait);
    }

    #[test]
    fn test_redirects_anonymous_after_hydration() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = manager(dir.path());
        session.hydrate();

        assert_eq!(
            GuardDecision::for_session(&session),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_allows_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = manager(dir.path());
        session.hydrate();
        session
            .login(
                UserProfile {
                    name: "A".to_string(),
                    email: Email::parse("a@example.com").unwrap(),
                    role: None,
                },
                AuthToken::new("t".to_string()),
            )
            .unwrap();

        assert_eq!(GuardDecision::for_session(&session), GuardDecision::Allow);
    }
}
