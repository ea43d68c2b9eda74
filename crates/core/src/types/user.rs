//! User profile types.

use serde::{Deserialize, Serialize};

use crate::types::email::Email;

/// Denormalized user profile as returned by the sign-in endpoint.
///
/// This is the record persisted alongside the auth token; the API does not
/// expose a separate profile read for it. Values coming back from the server
/// or the durable store are trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Account email address.
    pub email: Email,
    /// Account role (the API reports `"user"` for storefront accounts).
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_signin_user() {
        let json = r#"{"name":"Jane Doe","email":"jane@example.com","role":"user"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Jane Doe");
        assert_eq!(user.email.as_str(), "jane@example.com");
        assert_eq!(user.role.as_deref(), Some("user"));
    }

    #[test]
    fn test_deserialize_without_role() {
        let json = r#"{"name":"Jane","email":"jane@example.com"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert!(user.role.is_none());
    }
}
