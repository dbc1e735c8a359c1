//! Auth Models

use tillpoint::ids::TypedUuid;

/// Marker for operator identifiers.
#[derive(Debug)]
pub struct User;

/// Operator UUID, assigned by the auth service.
pub type UserId = TypedUuid<User>;

/// The signed-in operator.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}
