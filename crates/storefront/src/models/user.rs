//! User domain types.

use serde::{Deserialize, Serialize};
use viorra_core::UserId;

/// A signed-in user.
///
/// Produced by the simulated auth backend; there is no server-side
/// account behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID. Registration derives it from the current time.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address as entered at login or registration.
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
}
