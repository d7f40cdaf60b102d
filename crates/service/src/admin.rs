//! Admin gate shared by every service that exposes admin-only operations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use common::metrics::ADMIN_CHECKS_TOTAL;

use crate::errors::ServiceError;
use crate::peers::{Lookup, UserDirectory};
use crate::users::repository::UserRepository;

#[async_trait]
pub trait AdminAuthorizer: Send + Sync {
    /// True only when `email` resolves to a user flagged as admin.
    async fn is_admin(&self, email: &str) -> bool;
}

/// Deny with `message` unless `email` belongs to an admin. A missing email
/// is a denial like any other.
pub async fn require_admin(
    auth: &dyn AdminAuthorizer,
    email: Option<&str>,
    message: &str,
) -> Result<(), ServiceError> {
    let email = email.map(str::trim).unwrap_or_default();
    let allowed = !email.is_empty() && auth.is_admin(email).await;
    ADMIN_CHECKS_TOTAL
        .with_label_values(&[if allowed { "allowed" } else { "denied" }])
        .inc();
    if allowed {
        Ok(())
    } else {
        debug!(%email, "admin_denied");
        Err(ServiceError::forbidden(message))
    }
}

/// Resolves the email through the users service.
pub struct DirectoryAdminAuthorizer {
    directory: Arc<dyn UserDirectory>,
}

impl DirectoryAdminAuthorizer {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl AdminAuthorizer for DirectoryAdminAuthorizer {
    async fn is_admin(&self, email: &str) -> bool {
        match self.directory.find_by_email(email).await {
            Lookup::Found(user) => user.is_admin(),
            Lookup::NotFound | Lookup::Unreachable(_) => false,
        }
    }
}

/// Used by the users service itself, backed by its own store.
pub struct LocalAdminAuthorizer {
    repo: Arc<dyn UserRepository>,
}

impl LocalAdminAuthorizer {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AdminAuthorizer for LocalAdminAuthorizer {
    async fn is_admin(&self, email: &str) -> bool {
        match self.repo.find_by_email(email).await {
            Ok(Some(user)) => user.is_admin,
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "admin lookup failed");
                false
            }
        }
    }
}

/// Fixed answer, for tests.
pub struct StaticAdminAuthorizer {
    pub admins: Vec<String>,
}

#[async_trait]
impl AdminAuthorizer for StaticAdminAuthorizer {
    async fn is_admin(&self, email: &str) -> bool {
        self.admins.iter().any(|a| a == email)
    }
}
