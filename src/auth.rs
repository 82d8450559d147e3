//! Authentication forms and the signed-in user.
//!
//! Sessions are cookie based; the phone number doubles as the username.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::phone::{format_phone, login_username};

/// Signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account id
    pub id: u64,

    /// Username, the customer's phone
    pub username: String,

    /// Display name
    #[serde(default)]
    pub first_name: String,

    /// Email
    #[serde(default)]
    pub email: String,
}

impl User {
    /// Name to greet the customer with.
    pub fn display_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }
}

/// Authentication failures shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Phone or password left empty.
    #[error("Введите телефон и пароль")]
    MissingCredentials,

    /// Password confirmation differs.
    #[error("Пароли не совпадают")]
    PasswordMismatch,

    /// Login rejected by the server.
    #[error("Неверный логин или пароль")]
    InvalidCredentials,

    /// Registration rejected by the server.
    #[error("{0}")]
    Rejected(String),

    /// The server could not be reached.
    #[error("Ошибка соединения с сервером")]
    Connection,
}

/// Fallback shown when the server rejects a registration without details.
pub const REGISTRATION_FAILED: &str = "Ошибка регистрации";

/// Body of `POST /api/auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    /// Phone in username form
    pub username: String,

    /// Password
    pub password: String,
}

/// Body of `POST /api/auth/register/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// Phone in username form
    pub username: String,

    /// Password
    pub password: String,

    /// Display name
    pub first_name: String,

    /// Email
    pub email: String,
}

/// Login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Phone as typed
    pub phone: String,

    /// Password
    pub password: String,
}

impl LoginForm {
    /// Validate and build the request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] when phone or password is empty.
    pub fn into_request(self) -> Result<LoginRequest, AuthError> {
        let username = login_username(&format_phone(&self.phone));

        if username.is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        Ok(LoginRequest {
            username,
            password: self.password,
        })
    }
}

/// Registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    /// Phone as typed
    pub phone: String,

    /// Password
    pub password: String,

    /// Password confirmation
    pub confirm_password: String,

    /// Display name
    pub name: String,

    /// Email
    pub email: String,
}

impl RegistrationForm {
    /// Validate and build the request.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`]: phone or password is empty.
    /// - [`AuthError::PasswordMismatch`]: confirmation differs from the password.
    pub fn into_request(self) -> Result<RegisterRequest, AuthError> {
        let username = login_username(&format_phone(&self.phone));

        if username.is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        Ok(RegisterRequest {
            username,
            password: self.password,
            first_name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}
