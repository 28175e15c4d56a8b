//! Session state.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::instrument;

use crate::models::User;
use crate::services::{AuthService, Registration};

/// Auth store state snapshot.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    /// The signed-in user, if any.
    pub user: Option<User>,
    /// Whether a login or registration is in flight.
    pub loading: bool,
    /// Message from the most recent failed operation.
    pub error: Option<String>,
}

/// State transitions. Login has no failure arm: the simulated backend
/// accepts every credential pair.
#[derive(Debug)]
enum AuthAction {
    LoginStart,
    LoginSuccess(User),
    RegisterStart,
    RegisterSuccess(User),
    RegisterFailure(String),
    Logout,
    ClearError,
}

impl AuthState {
    /// Whether a user is signed in. Always in lockstep with `user`.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::LoginStart | AuthAction::RegisterStart => {
                self.loading = true;
                self.error = None;
            }
            AuthAction::LoginSuccess(user) | AuthAction::RegisterSuccess(user) => {
                self.user = Some(user);
                self.loading = false;
                self.error = None;
            }
            AuthAction::RegisterFailure(message) => {
                // An existing session survives a failed registration.
                self.loading = false;
                self.error = Some(message);
            }
            AuthAction::Logout => *self = Self::default(),
            AuthAction::ClearError => self.error = None,
        }
    }
}

/// Auth store handle.
///
/// Cheap to clone; all clones share one state record. Logging out does
/// not touch the product store, so the cart survives a logout.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthStoreInner>,
}

struct AuthStoreInner {
    service: AuthService,
    state: RwLock<AuthState>,
}

impl AuthStore {
    /// Create a store over an authentication service.
    #[must_use]
    pub fn new(service: AuthService) -> Self {
        Self {
            inner: Arc::new(AuthStoreInner {
                service,
                state: RwLock::new(AuthState::default()),
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner.state.read().clone()
    }

    /// Sign in. Always ends authenticated; see [`AuthService::login`].
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) {
        self.dispatch(AuthAction::LoginStart);

        let user = self.inner.service.login(email, password).await;
        self.dispatch(AuthAction::LoginSuccess(user));
    }

    /// Register a new account. On failure the error message lands in
    /// state and any existing session is left untouched.
    #[instrument(skip_all)]
    pub async fn register(&self, registration: Registration) {
        self.dispatch(AuthAction::RegisterStart);

        let action = match self.inner.service.register(registration).await {
            Ok(user) => AuthAction::RegisterSuccess(user),
            Err(error) => AuthAction::RegisterFailure(error.to_string()),
        };
        self.dispatch(action);
    }

    /// Drop the session and return to the anonymous state.
    pub fn logout(&self) {
        self.dispatch(AuthAction::Logout);
    }

    /// Clear the stored error without touching the session.
    pub fn clear_error(&self) {
        self.dispatch(AuthAction::ClearError);
    }

    fn dispatch(&self, action: AuthAction) {
        self.inner.state.write().apply(action);
    }
}
