//! Wire types for the remote e-commerce REST API.
//!
//! Response shapes follow the API exactly; unknown fields are ignored. Note
//! the asymmetry in the cart mutations: adding an item returns only the new
//! item count (its `data` denormalizes lines to bare product id strings and
//! is unusable as a snapshot), while quantity updates and removals return a
//! full replacement snapshot.

use serde::Deserialize;

use freshcart_core::{CartSnapshot, UserProfile};

/// `POST /auth/signin` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SigninResponse {
    /// `"success"` on a successful sign-in.
    pub message: String,
    /// The signed-in user's profile.
    pub user: UserProfile,
    /// JWT for authenticated calls.
    pub token: String,
}

/// `POST /auth/signup` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    /// `"success"` on a successful registration.
    pub message: String,
}

/// `POST /auth/forgotPasswords` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    /// `"success"` when a reset code was sent.
    #[serde(default)]
    pub status_msg: Option<String>,
    /// Human-readable confirmation.
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /auth/verifyResetCode` response.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResetCodeResponse {
    /// `"Success"` when the code matched.
    pub status: String,
}

/// `PUT /auth/resetPassword` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordResponse {
    /// Fresh JWT for the account.
    pub token: String,
}

/// `GET /cart` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFetchResponse {
    /// Total item count across all lines.
    pub num_of_cart_items: u32,
    /// Authoritative cart contents.
    pub data: CartSnapshot,
}

/// `POST /cart` response. Count only; no usable snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAddResponse {
    /// Human-readable confirmation.
    #[serde(default)]
    pub message: Option<String>,
    /// Total item count after the addition.
    pub num_of_cart_items: u32,
}

/// `PUT /cart/:id` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdateResponse {
    /// Total item count, when the server reports it.
    #[serde(default)]
    pub num_of_cart_items: Option<u32>,
    /// Authoritative replacement snapshot.
    pub data: CartSnapshot,
}

/// `DELETE /cart/:id` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRemoveResponse {
    /// Total item count after the removal.
    pub num_of_cart_items: u32,
    /// Authoritative replacement snapshot.
    pub data: CartSnapshot,
}

/// `DELETE /cart` response.
///
/// The server signals success with the literal message `"success"`; anything
/// else must leave local state untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct CartClearResponse {
    /// Success sentinel.
    pub message: String,
}

impl CartClearResponse {
    /// Whether the server confirmed the clear.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.message == "success"
    }
}

/// Single-record catalog envelope (`GET /products/:id` and friends).
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    /// The record.
    pub data: T,
}

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_signin() {
        let json = r#"{
            "message": "success",
            "user": {"name": "Jane", "email": "jane@example.com", "role": "user"},
            "token": "eyJhbGciOiJIUzI1NiJ9.x.y"
        }"#;
        let response: SigninResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message, "success");
        assert_eq!(response.user.name, "Jane");
        assert!(response.token.starts_with("eyJ"));
    }

    #[test]
    fn test_deserialize_add_response_without_snapshot() {
        // The real add response carries a `data` object with product ids as
        // strings; it must deserialize without trying to read a snapshot.
        let json = r#"{
            "status": "success",
            "message": "Product added successfully to your cart",
            "numOfCartItems": 3,
            "data": {"products": [{"count": 1, "product": "6428ebc6dc1175abc65ca0b9"}]}
        }"#;
        let response: CartAddResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.num_of_cart_items, 3);
    }

    #[test]
    fn test_clear_sentinel() {
        let ok: CartClearResponse = serde_json::from_str(r#"{"message": "success"}"#).unwrap();
        assert!(ok.is_success());

        let other: CartClearResponse =
            serde_json::from_str(r#"{"message": "cart not cleared"}"#).unwrap();
        assert!(!other.is_success());
    }
}
