//! Auth session identity.
//!
//! The hosted backend owns authentication; this module only surfaces the
//! signed-in operator (used to stamp `created_by` on transactions) and the
//! sign-out call.

pub mod models;
pub mod service;

pub use models::{CurrentUser, UserId};
pub use service::{AuthService, AuthServiceError, HostedAuthService, MockAuthService};
