//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::{
    auth::models::CurrentUser,
    backend::{Backend, BackendError},
};

/// Errors raised by the auth service.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Auth service backed by the hosted backend's session endpoints.
#[derive(Clone)]
pub struct HostedAuthService {
    backend: Arc<dyn Backend>,
}

impl HostedAuthService {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AuthService for HostedAuthService {
    async fn current_user(&self) -> Result<CurrentUser, AuthServiceError> {
        let record = self.backend.current_user().await?;

        Ok(CurrentUser {
            id: record.id,
            email: record.email,
        })
    }

    async fn sign_out(&self) -> Result<(), AuthServiceError> {
        self.backend.sign_out().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// The operator whose session the client holds.
    async fn current_user(&self) -> Result<CurrentUser, AuthServiceError>;

    /// End the session.
    async fn sign_out(&self) -> Result<(), AuthServiceError>;
}
