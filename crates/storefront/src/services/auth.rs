//! Simulated authentication backend.
//!
//! There is no real identity provider behind this app. Login always
//! succeeds and hands back a fixed demo identity; registration only
//! checks that every field was filled in. Both calls sleep for a
//! configurable latency so the UI exercises its loading states.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::time::sleep;

use viorra_core::UserId;

use crate::models::User;

/// Round-trip latency applied to every simulated call.
const DEFAULT_LATENCY: Duration = Duration::from_secs(1);

/// Email substituted when the login form is submitted empty.
const DEFAULT_EMAIL: &str = "user@example.com";

/// Display name of the fixed login identity.
const LOGIN_NAME: &str = "Sarah Johnson";

const LOGIN_AVATAR: &str = "https://i.pravatar.cc/150?img=1";
const REGISTER_AVATAR: &str = "https://i.pravatar.cc/150?img=2";

/// Errors that can occur during authentication operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Registration was submitted with one or more empty fields.
    #[error("All fields are required")]
    MissingFields,
}

/// Registration form data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Simulated authentication service.
///
/// Stands in for a backend the app does not have. Credentials are never
/// verified; see [`AuthService::login`].
#[derive(Debug, Clone)]
pub struct AuthService {
    latency: Duration,
}

impl AuthService {
    /// Create a service with the default one-second simulated latency.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }

    /// Create a service with a custom latency. Tests pass `Duration::ZERO`.
    #[must_use]
    pub const fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Sign in with an email and password.
    ///
    /// Always succeeds: the password is ignored and the returned user is
    /// a fixed demo identity carrying the supplied email, or
    /// `user@example.com` when the email is empty.
    pub async fn login(&self, email: &str, _password: &str) -> User {
        sleep(self.latency).await;

        let email = if email.is_empty() {
            DEFAULT_EMAIL.to_string()
        } else {
            email.to_string()
        };

        User {
            id: UserId::new(1),
            name: LOGIN_NAME.to_string(),
            email,
            avatar: LOGIN_AVATAR.to_string(),
        }
    }

    /// Register a new account.
    ///
    /// The user id is synthesized from the current timestamp, so two
    /// registrations in the same process get distinct ids in practice.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingFields`] if any field is empty. The
    /// check runs after the simulated round trip, matching how a real
    /// backend would report a rejected form.
    pub async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        sleep(self.latency).await;

        if registration.full_name.is_empty()
            || registration.email.is_empty()
            || registration.password.is_empty()
        {
            return Err(AuthError::MissingFields);
        }

        Ok(User {
            id: UserId::new(Utc::now().timestamp_millis()),
            name: registration.full_name,
            email: registration.email,
            avatar: REGISTER_AVATAR.to_string(),
        })
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn instant() -> AuthService {
        AuthService::with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_login_always_succeeds() {
        let user = instant().login("sarah@viorra.com", "hunter2").await;

        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.name, "Sarah Johnson");
        assert_eq!(user.email, "sarah@viorra.com");
    }

    #[tokio::test]
    async fn test_login_substitutes_default_email() {
        let user = instant().login("", "").await;

        assert_eq!(user.email, "user@example.com");
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let err = instant()
            .register(Registration {
                full_name: "Amelia Pond".into(),
                email: "amelia@example.com".into(),
                password: String::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::MissingFields);
        assert_eq!(err.to_string(), "All fields are required");
    }

    #[tokio::test]
    async fn test_register_builds_user_from_form() {
        let user = instant()
            .register(Registration {
                full_name: "Amelia Pond".into(),
                email: "amelia@example.com".into(),
                password: "fish-fingers".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.name, "Amelia Pond");
        assert_eq!(user.email, "amelia@example.com");
        assert!(user.id.as_i64() > 0);
    }
}
