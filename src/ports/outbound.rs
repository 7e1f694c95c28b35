//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, ProviderRequest, RawProviderResponse, User};

/// Multimodal chat-completion provider.
#[async_trait::async_trait]
pub trait ProviderPort: Send + Sync {
    /// Send the request and return the raw response for any HTTP status.
    ///
    /// Only transport-level failures (connect, timeout, unreadable body) are
    /// returned as `Err`; a non-2xx status is reported through
    /// `RawProviderResponse::status`.
    async fn send(&self, request: &ProviderRequest) -> Result<RawProviderResponse, DomainError>;
}

/// Local credential store with a "current session" pointer.
#[async_trait::async_trait]
pub trait UserStorePort: Send + Sync {
    /// Email match is case-insensitive.
    async fn find_user_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Fails with `DomainError::Auth` when the email is already registered.
    async fn create_user(&self, name: &str, email: &str, password: &str)
    -> Result<User, DomainError>;

    async fn set_current_user(&self, user: Option<&User>) -> Result<(), DomainError>;

    async fn get_current_user(&self) -> Result<Option<User>, DomainError>;
}
