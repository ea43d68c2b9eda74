//! REST client for the remote e-commerce API.
//!
//! # Architecture
//!
//! - The API is the source of truth - no local sync, direct calls
//! - Plain JSON over HTTP via `reqwest`; authenticated cart calls carry the
//!   raw JWT in a `token` header (the API's convention)
//! - Read-only catalog responses are cached in-memory via `moka` (short
//!   TTL); auth and cart calls are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use freshcart_client::config::ClientConfig;
//! use freshcart_client::gateway::HttpGateway;
//!
//! let gateway = HttpGateway::new(&ClientConfig::default())?;
//!
//! // Public catalog
//! let products = gateway.products(ListQuery::default()).await?;
//!
//! // Authenticated cart calls go through a token-bearing handle
//! let cart = gateway.cart_client(token)?;
//! let response = cart.add_item(&product_id).await?;
//! ```

pub mod types;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use freshcart_core::{
    Brand, BrandId, Category, CategoryId, Email, Paginated, Password, Product, ProductId,
    Subcategory,
};

use crate::cart::CartApi;
use crate::config::ClientConfig;
use crate::forms::RegisterForm;
use crate::session::AuthToken;
use types::{
    ApiErrorBody, CartAddResponse, CartClearResponse, CartFetchResponse, CartRemoveResponse,
    CartUpdateResponse, DataEnvelope, ForgotPasswordResponse, ResetPasswordResponse,
    SigninResponse, SignupResponse, VerifyResetCodeResponse,
};

/// Errors that can occur when talking to the remote API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed (unreachable host, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the raw body.
        message: String,
    },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GatewayError {
    /// Whether this is a client-side rejection (4xx), e.g. bad credentials
    /// from an auth endpoint.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 400 && *status < 500)
    }
}

/// Pass-through paging parameters for catalog list endpoints.
///
/// The client does no paging of its own; these go to the server untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
}

impl ListQuery {
    fn append_to(self, url: &mut String) {
        let mut sep = '?';
        if let Some(page) = self.page {
            url.push(sep);
            url.push_str(&format!("page={page}"));
            sep = '&';
        }
        if let Some(limit) = self.limit {
            url.push(sep);
            url.push_str(&format!("limit={limit}"));
        }
    }
}

/// Client for the public (unauthenticated) API surface: auth flows and the
/// read-only catalog.
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: Url,
    http_timeout: Duration,
    catalog_cache: moka::future::Cache<String, String>,
}

impl HttpGateway {
    /// Create a new gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let catalog_cache = moka::future::Cache::builder()
            .max_capacity(config.catalog_cache_capacity)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            http_timeout: config.http_timeout,
            catalog_cache,
        })
    }

    /// Build a token-bearing handle for the authenticated cart endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value.
    pub fn cart_client(&self, token: AuthToken) -> Result<CartClient, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "token",
            HeaderValue::from_str(token.as_str())
                .map_err(|e| GatewayError::Parse(format!("invalid token format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.http_timeout)
            .build()?;

        Ok(CartClient {
            client,
            base_url: self.base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Api` with a 4xx status for bad credentials.
    pub async fn signin(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<SigninResponse, GatewayError> {
        let url = self.endpoint("auth/signin");
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });
        let response = self.client.post(&url).json(&body).send().await?;
        decode(response).await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Api` if the account already exists or the
    /// server rejects the registration.
    pub async fn signup(&self, form: &RegisterForm) -> Result<SignupResponse, GatewayError> {
        let url = self.endpoint("auth/signup");
        let response = self.client.post(&url).json(form).send().await?;
        decode(response).await
    }

    /// Request a password reset code for an email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the account is unknown.
    pub async fn forgot_password(
        &self,
        email: &Email,
    ) -> Result<ForgotPasswordResponse, GatewayError> {
        let url = self.endpoint("auth/forgotPasswords");
        let body = serde_json::json!({ "email": email });
        let response = self.client.post(&url).json(&body).send().await?;
        decode(response).await
    }

    /// Verify a previously emailed reset code.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Api` if the code does not match.
    pub async fn verify_reset_code(
        &self,
        reset_code: &str,
    ) -> Result<VerifyResetCodeResponse, GatewayError> {
        let url = self.endpoint("auth/verifyResetCode");
        let body = serde_json::json!({ "resetCode": reset_code });
        let response = self.client.post(&url).json(&body).send().await?;
        decode(response).await
    }

    /// Set a new password after a verified reset code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reset_password(
        &self,
        email: &Email,
        new_password: &Password,
    ) -> Result<ResetPasswordResponse, GatewayError> {
        let url = self.endpoint("auth/resetPassword");
        let body = serde_json::json!({
            "email": email,
            "newPassword": new_password,
        });
        let response = self.client.put(&url).json(&body).send().await?;
        decode(response).await
    }

    // =========================================================================
    // Catalog (read-only, cached)
    // =========================================================================

    /// List products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    pub async fn products(&self, query: ListQuery) -> Result<Paginated<Product>, GatewayError> {
        self.get_catalog_list("products", query).await
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Api` with a 404 status for an unknown id.
    pub async fn product(&self, id: &ProductId) -> Result<Product, GatewayError> {
        self.get_catalog_record(&format!("products/{id}")).await
    }

    /// List categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    pub async fn categories(&self, query: ListQuery) -> Result<Paginated<Category>, GatewayError> {
        self.get_catalog_list("categories", query).await
    }

    /// Get a single category by id.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Api` with a 404 status for an unknown id.
    pub async fn category(&self, id: &CategoryId) -> Result<Category, GatewayError> {
        self.get_catalog_record(&format!("categories/{id}")).await
    }

    /// List brands.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    pub async fn brands(&self, query: ListQuery) -> Result<Paginated<Brand>, GatewayError> {
        self.get_catalog_list("brands", query).await
    }

    /// Get a single brand by id.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Api` with a 404 status for an unknown id.
    pub async fn brand(&self, id: &BrandId) -> Result<Brand, GatewayError> {
        self.get_catalog_record(&format!("brands/{id}")).await
    }

    /// List subcategories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    pub async fn subcategories(
        &self,
        query: ListQuery,
    ) -> Result<Paginated<Subcategory>, GatewayError> {
        self.get_catalog_list("subcategories", query).await
    }

    async fn get_catalog_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: ListQuery,
    ) -> Result<Paginated<T>, GatewayError> {
        let mut url = self.endpoint(path);
        query.append_to(&mut url);
        let body = self.get_catalog_text(url).await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))
    }

    async fn get_catalog_record<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, GatewayError> {
        let url = self.endpoint(path);
        let body = self.get_catalog_text(url).await?;
        let envelope: DataEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }

    /// Fetch a catalog URL, serving from the response cache when possible.
    /// Only successful bodies are cached.
    async fn get_catalog_text(&self, url: String) -> Result<String, GatewayError> {
        if let Some(cached) = self.catalog_cache.get(&url).await {
            tracing::debug!(%url, "catalog cache hit");
            return Ok(cached);
        }

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(api_error(status.as_u16(), response.text().await.unwrap_or_default()));
        }

        let body = response.text().await?;
        self.catalog_cache.insert(url, body.clone()).await;
        Ok(body)
    }
}

/// Token-bearing client for the authenticated cart endpoints.
///
/// Obtained from [`HttpGateway::cart_client`]; holds its own `reqwest`
/// client with the `token` default header.
#[derive(Clone)]
pub struct CartClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CartClient {
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

impl CartApi for CartClient {
    async fn fetch_cart(&self) -> Result<CartFetchResponse, GatewayError> {
        let url = self.endpoint("cart");
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    async fn add_item(&self, product_id: &ProductId) -> Result<CartAddResponse, GatewayError> {
        let url = self.endpoint("cart");
        let body = serde_json::json!({ "productId": product_id });
        let response = self.client.post(&url).json(&body).send().await?;
        decode(response).await
    }

    async fn update_item(
        &self,
        product_id: &ProductId,
        count: u32,
    ) -> Result<CartUpdateResponse, GatewayError> {
        let url = self.endpoint(&format!("cart/{product_id}"));
        let body = serde_json::json!({ "count": count });
        let response = self.client.put(&url).json(&body).send().await?;
        decode(response).await
    }

    async fn remove_item(
        &self,
        product_id: &ProductId,
    ) -> Result<CartRemoveResponse, GatewayError> {
        let url = self.endpoint(&format!("cart/{product_id}"));
        let response = self.client.delete(&url).send().await?;
        decode(response).await
    }

    async fn clear_cart(&self) -> Result<CartClearResponse, GatewayError> {
        let url = self.endpoint("cart");
        let response = self.client.delete(&url).send().await?;
        decode(response).await
    }
}

/// Check the status and decode a JSON response body.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
    let status = response.status();

    if !status.is_success() {
        return Err(api_error(status.as_u16(), response.text().await.unwrap_or_default()));
    }

    response
        .json()
        .await
        .map_err(|e| GatewayError::Parse(e.to_string()))
}

/// Build an `Api` error, preferring the body's `message` field when the body
/// is parseable.
fn api_error(status: u16, body: String) -> GatewayError {
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or(body);
    GatewayError::Api { status, message }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Api {
            status: 401,
            message: "Incorrect email or password".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error: 401 - Incorrect email or password"
        );
    }

    #[test]
    fn test_is_client_error() {
        let unauthorized = GatewayError::Api {
            status: 401,
            message: String::new(),
        };
        assert!(unauthorized.is_client_error());

        let server = GatewayError::Api {
            status: 502,
            message: String::new(),
        };
        assert!(!server.is_client_error());

        let parse = GatewayError::Parse("bad json".to_string());
        assert!(!parse.is_client_error());
    }

    #[test]
    fn test_api_error_prefers_body_message() {
        let err = api_error(
            400,
            r#"{"statusMsg": "fail", "message": "Reset code invalid or expired"}"#.to_string(),
        );
        match err {
            GatewayError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Reset code invalid or expired");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error(502, "Bad Gateway".to_string());
        match err {
            GatewayError::Api { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_list_query_append() {
        let mut url = "https://example.com/api/v1/products".to_string();
        ListQuery {
            page: Some(2),
            limit: Some(40),
        }
        .append_to(&mut url);
        assert_eq!(url, "https://example.com/api/v1/products?page=2&limit=40");

        let mut bare = "https://example.com/api/v1/products".to_string();
        ListQuery::default().append_to(&mut bare);
        assert_eq!(bare, "https://example.com/api/v1/products");
    }

    #[test]
    fn test_cart_client_carries_config_timeout() {
        let config = ClientConfig {
            http_timeout: Duration::from_secs(5),
            ..ClientConfig::default()
        };
        let gateway = HttpGateway::new(&config).unwrap();
        assert_eq!(gateway.http_timeout, Duration::from_secs(5));
        assert!(
            gateway
                .cart_client(AuthToken::new("t".to_string()))
                .is_ok()
        );
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::default();
        let gateway = HttpGateway::new(&config).unwrap();
        assert_eq!(
            gateway.endpoint("auth/signin"),
            "https://ecommerce.routemisr.com/api/v1/auth/signin"
        );
    }
}
