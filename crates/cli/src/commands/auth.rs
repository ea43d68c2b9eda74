//! Auth flow commands.
//!
//! # Usage
//!
//! ```bash
//! freshcart auth login -e jane@example.com -p 'abc123!'
//! freshcart auth whoami
//! freshcart auth logout
//! ```
//!
//! # Environment Variables
//!
//! - `FRESHCART_API_BASE_URL` - Remote API base URL
//! - `FRESHCART_STATE_DIR` - Directory for the persisted session

use thiserror::Error;

use freshcart_client::config::{ClientConfig, ConfigError};
use freshcart_client::forms::{
    ForgotPasswordForm, FormError, LoginForm, RegisterForm, ResetPasswordForm, VerifyResetCodeForm,
};
use freshcart_client::gateway::{GatewayError, HttpGateway};
use freshcart_client::session::{AuthToken, FileStore, SessionManager, StoreError};

/// Errors that can occur during auth commands.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Configuration failed to load.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A field failed client-side validation.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The remote API call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The persisted session could not be read or written.
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

/// Open and hydrate the persisted session.
fn open_session(config: &ClientConfig) -> Result<SessionManager<FileStore>, AuthError> {
    let mut session = SessionManager::new(FileStore::open(&config.state_dir)?);
    session.hydrate();
    Ok(session)
}

/// Sign in and persist the session.
///
/// # Errors
///
/// Returns an error for invalid fields, bad credentials, or a failed
/// durable write.
pub async fn login(email: &str, password: &str) -> Result<(), AuthError> {
    let config = ClientConfig::from_env()?;
    let form = LoginForm::parse(email, password)?;

    let gateway = HttpGateway::new(&config)?;
    let response = gateway.signin(&form.email, &form.password).await?;

    let mut session = open_session(&config)?;
    session.login(response.user.clone(), AuthToken::new(response.token))?;

    tracing::info!(
        "Signed in as {} <{}>",
        response.user.name,
        response.user.email
    );
    Ok(())
}

/// Register a new account.
///
/// The API does not sign new accounts in; follow with `auth login`.
///
/// # Errors
///
/// Returns an error for invalid fields or a server-side rejection (e.g. the
/// account already exists).
pub async fn register(
    name: &str,
    email: &str,
    password: &str,
    phone: &str,
) -> Result<(), AuthError> {
    let config = ClientConfig::from_env()?;
    let form = RegisterForm::parse(name, email, password, password, phone)?;

    let gateway = HttpGateway::new(&config)?;
    let response = gateway.signup(&form).await?;

    tracing::info!("Registration {}; sign in with `auth login`", response.message);
    Ok(())
}

/// Clear the persisted session.
///
/// # Errors
///
/// Returns an error if configuration fails to load; store-level clear
/// failures are logged, not surfaced.
pub fn logout() -> Result<(), AuthError> {
    let config = ClientConfig::from_env()?;
    let mut session = open_session(&config)?;
    session.logout();

    tracing::info!("Signed out");
    Ok(())
}

/// Show the current session.
///
/// # Errors
///
/// Returns an error if configuration fails to load.
pub fn whoami() -> Result<(), AuthError> {
    let config = ClientConfig::from_env()?;
    let session = open_session(&config)?;

    match (session.user(), session.is_authenticated()) {
        (Some(user), _) => tracing::info!("Signed in as {} <{}>", user.name, user.email),
        (None, true) => tracing::info!("Signed in (no cached profile)"),
        (None, false) => tracing::info!("Not signed in"),
    }
    Ok(())
}

/// Request a password reset code by email.
///
/// # Errors
///
/// Returns an error for an invalid email or an unknown account.
pub async fn forgot_password(email: &str) -> Result<(), AuthError> {
    let config = ClientConfig::from_env()?;
    let form = ForgotPasswordForm::parse(email)?;

    let gateway = HttpGateway::new(&config)?;
    let response = gateway.forgot_password(&form.email).await?;

    tracing::info!(
        "{}",
        response
            .message
            .unwrap_or_else(|| "Reset code sent; check your email".to_string())
    );
    Ok(())
}

/// Verify an emailed reset code.
///
/// # Errors
///
/// Returns an error if the code is malformed or does not match.
pub async fn verify_reset_code(code: &str) -> Result<(), AuthError> {
    let config = ClientConfig::from_env()?;
    let form = VerifyResetCodeForm::parse(code)?;

    let gateway = HttpGateway::new(&config)?;
    let response = gateway.verify_reset_code(&form.reset_code).await?;

    tracing::info!("Code verified ({}); set a new password with `auth reset`", response.status);
    Ok(())
}

/// Set a new password after a verified reset code.
///
/// # Errors
///
/// Returns an error for invalid fields or a server-side rejection.
pub async fn reset_password(email: &str, new_password: &str) -> Result<(), AuthError> {
    let config = ClientConfig::from_env()?;
    let form = ResetPasswordForm::parse(email, new_password)?;

    let gateway = HttpGateway::new(&config)?;
    gateway
        .reset_password(&form.email, &form.new_password)
        .await?;

    tracing::info!("Password updated; sign in with `auth login`");
    Ok(())
}
