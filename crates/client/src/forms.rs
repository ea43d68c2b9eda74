//! Pre-network validation for the auth flows.
//!
//! Each form mirrors the storefront's client-side schema; a rejection here
//! never reaches the network and is resolved by the caller's form layer.
//! Only the final variant of each original flow is modeled.

use serde::Serialize;
use thiserror::Error;

use freshcart_core::{Email, EmailError, Password, PasswordError};

/// Display-name length bounds.
const NAME_MIN: usize = 3;
const NAME_MAX: usize = 20;

/// Client-side schema rejection.
#[derive(Debug, Error)]
pub enum FormError {
    /// Email failed validation.
    #[error(transparent)]
    Email(#[from] EmailError),

    /// Password failed validation.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Display name outside the allowed length.
    #[error("name must be between {NAME_MIN} and {NAME_MAX} characters")]
    InvalidName,

    /// The two password fields do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Phone number is not a valid Egyptian mobile number.
    #[error("phone must be a valid Egyptian mobile number (e.g. 01012345678)")]
    InvalidPhone,

    /// Reset code is empty or not numeric.
    #[error("reset code must be a non-empty numeric code")]
    InvalidResetCode,
}

/// Validated sign-in form.
#[derive(Debug, Clone)]
pub struct LoginForm {
    /// Account email.
    pub email: Email,
    /// Account password.
    pub password: Password,
}

impl LoginForm {
    /// Validate raw field values.
    ///
    /// # Errors
    ///
    /// Returns the first schema rejection.
    pub fn parse(email: &str, password: &str) -> Result<Self, FormError> {
        Ok(Self {
            email: Email::parse(email)?,
            password: Password::parse(password)?,
        })
    }
}

/// Validated registration form; serializes to the signup request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: Email,
    /// Account password.
    pub password: Password,
    /// Confirmation; always equals `password` after validation.
    pub re_password: Password,
    /// Egyptian mobile number.
    pub phone: String,
}

impl RegisterForm {
    /// Validate raw field values.
    ///
    /// # Errors
    ///
    /// Returns the first schema rejection.
    pub fn parse(
        name: &str,
        email: &str,
        password: &str,
        re_password: &str,
        phone: &str,
    ) -> Result<Self, FormError> {
        let name = name.trim();
        if name.len() < NAME_MIN || name.len() > NAME_MAX {
            return Err(FormError::InvalidName);
        }

        if !is_egyptian_mobile(phone) {
            return Err(FormError::InvalidPhone);
        }

        let password = Password::parse(password)?;
        if re_password != password.expose() {
            return Err(FormError::PasswordMismatch);
        }

        Ok(Self {
            name: name.to_owned(),
            email: Email::parse(email)?,
            re_password: password.clone(),
            password,
            phone: phone.to_owned(),
        })
    }
}

/// Validated forgot-password form.
#[derive(Debug, Clone)]
pub struct ForgotPasswordForm {
    /// Account email.
    pub email: Email,
}

impl ForgotPasswordForm {
    /// Validate a raw email value.
    ///
    /// # Errors
    ///
    /// Returns the schema rejection for an invalid email.
    pub fn parse(email: &str) -> Result<Self, FormError> {
        Ok(Self {
            email: Email::parse(email)?,
        })
    }
}

/// Validated reset-code form.
#[derive(Debug, Clone)]
pub struct VerifyResetCodeForm {
    /// The emailed numeric code.
    pub reset_code: String,
}

impl VerifyResetCodeForm {
    /// Validate a raw code value.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidResetCode` for an empty or non-numeric
    /// code.
    pub fn parse(reset_code: &str) -> Result<Self, FormError> {
        let reset_code = reset_code.trim();
        if reset_code.is_empty() || !reset_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(FormError::InvalidResetCode);
        }
        Ok(Self {
            reset_code: reset_code.to_owned(),
        })
    }
}

/// Validated new-password form for the final reset step.
#[derive(Debug, Clone)]
pub struct ResetPasswordForm {
    /// Account email.
    pub email: Email,
    /// The replacement password.
    pub new_password: Password,
}

impl ResetPasswordForm {
    /// Validate raw field values.
    ///
    /// # Errors
    ///
    /// Returns the first schema rejection.
    pub fn parse(email: &str, new_password: &str) -> Result<Self, FormError> {
        Ok(Self {
            email: Email::parse(email)?,
            new_password: Password::parse(new_password)?,
        })
    }
}

/// Egyptian mobile format: `01` + one of `0|1|2|5` + 8 digits.
fn is_egyptian_mobile(phone: &str) -> bool {
    let mut chars = phone.chars();
    phone.len() == 11
        && chars.next() == Some('0')
        && chars.next() == Some('1')
        && chars.next().is_some_and(|c| matches!(c, '0' | '1' | '2' | '5'))
        && chars.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_valid() {
        let form = LoginForm::parse("user@example.com", "abc123!").unwrap();
        assert_eq!(form.email.as_str(), "user@example.com");
    }

    #[test]
    fn test_login_form_rejects_bad_email() {
        assert!(matches!(
            LoginForm::parse("not-an-email", "abc123!"),
            Err(FormError::Email(_))
        ));
    }

    #[test]
    fn test_login_form_rejects_weak_password() {
        assert!(matches!(
            LoginForm::parse("user@example.com", "password"),
            Err(FormError::Password(_))
        ));
    }

    #[test]
    fn test_register_form_valid() {
        let form = RegisterForm::parse(
            "Jane",
            "jane@example.com",
            "abc123!",
            "abc123!",
            "01012345678",
        )
        .unwrap();
        assert_eq!(form.phone, "01012345678");
    }

    #[test]
    fn test_register_form_rejects_mismatch() {
        assert!(matches!(
            RegisterForm::parse(
                "Jane",
                "jane@example.com",
                "abc123!",
                "abc124!",
                "01012345678"
            ),
            Err(FormError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_register_form_rejects_short_name() {
        assert!(matches!(
            RegisterForm::parse("Jo", "jane@example.com", "abc123!", "abc123!", "01012345678"),
            Err(FormError::InvalidName)
        ));
    }

    #[test]
    fn test_register_form_serializes_re_password_key() {
        let form = RegisterForm::parse(
            "Jane",
            "jane@example.com",
            "abc123!",
            "abc123!",
            "01012345678",
        )
        .unwrap();
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("rePassword").is_some());
        assert!(json.get("re_password").is_none());
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_egyptian_mobile("01012345678"));
        assert!(is_egyptian_mobile("01512345678"));
        assert!(!is_egyptian_mobile("01312345678")); // bad operator digit
        assert!(!is_egyptian_mobile("0101234567")); // too short
        assert!(!is_egyptian_mobile("0101234567a"));
        assert!(!is_egyptian_mobile("+2001012345678"));
    }

    #[test]
    fn test_reset_code_validation() {
        assert!(VerifyResetCodeForm::parse("123456").is_ok());
        assert!(VerifyResetCodeForm::parse(" 123456 ").is_ok());
        assert!(matches!(
            VerifyResetCodeForm::parse(""),
            Err(FormError::InvalidResetCode)
        ));
        assert!(matches!(
            VerifyResetCodeForm::parse("12a456"),
            Err(FormError::InvalidResetCode)
        ));
    }
}
