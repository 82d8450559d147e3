//! Signed-in user state.

use std::sync::Arc;

use tracing::{info, warn};

use dacha::{
    auth::{AuthError, LoginForm, REGISTRATION_FAILED, RegistrationForm, User},
    observe::{Observers, SubscriptionId},
};

use crate::api::{ApiError, StorefrontApi};

/// Tracks the signed-in user and notifies subscribers when it changes.
pub struct AuthStore {
    api: Arc<dyn StorefrontApi>,
    user: Option<User>,
    observers: Observers<Option<User>>,
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("user", &self.user)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    /// Create a signed-out store.
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self {
            api,
            user: None,
            observers: Observers::new(),
        }
    }

    /// Signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Register a listener called with the user after each change.
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&Option<User>) + Send + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    /// Remove a listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Ask the backend who is signed in. Any failure signs the user out.
    pub async fn refresh(&mut self) -> Option<&User> {
        let user = match self.api.current_user().await {
            Ok(user) => user,
            Err(error) => {
                warn!("failed to fetch current user: {error}");
                None
            }
        };

        self.set(user);
        self.user.as_ref()
    }

    /// Sign in.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`]: the form is incomplete.
    /// - [`AuthError::InvalidCredentials`]: the backend refused the credentials.
    /// - [`AuthError::Connection`]: the backend could not be reached.
    pub async fn login(&mut self, form: LoginForm) -> Result<User, AuthError> {
        let request = form.into_request()?;

        match self.api.login(&request).await {
            Ok(user) => {
                info!(user = user.id, "signed in");
                self.set(Some(user.clone()));
                Ok(user)
            }
            Err(ApiError::Rejected { status, .. }) => {
                warn!(status, "login rejected");
                Err(AuthError::InvalidCredentials)
            }
            Err(error) => {
                warn!("login failed: {error}");
                Err(AuthError::Connection)
            }
        }
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] / [`AuthError::PasswordMismatch`]: the form is invalid.
    /// - [`AuthError::Rejected`]: the backend refused the registration, with its field errors.
    /// - [`AuthError::Connection`]: the backend could not be reached.
    pub async fn register(&mut self, form: RegistrationForm) -> Result<User, AuthError> {
        let request = form.into_request()?;

        match self.api.register(&request).await {
            Ok(user) => {
                info!(user = user.id, "registered");
                self.set(Some(user.clone()));
                Ok(user)
            }
            Err(ApiError::Rejected { status, message }) => {
                warn!(status, "registration rejected");
                Err(AuthError::Rejected(
                    message.unwrap_or_else(|| REGISTRATION_FAILED.to_string()),
                ))
            }
            Err(error) => {
                warn!("registration failed: {error}");
                Err(AuthError::Connection)
            }
        }
    }

    /// Sign out. The local user is cleared even when the request fails.
    pub async fn logout(&mut self) {
        if let Err(error) = self.api.logout().await {
            warn!("logout request failed: {error}");
        }

        self.set(None);
    }

    fn set(&mut self, user: Option<User>) {
        if self.user != user {
            self.user = user;
            self.observers.notify(&self.user);
        }
    }
}
